//! Binding module - where handler inputs come from and outputs go.
//!
//! Provides:
//! - [`Parameter`] / [`Source`] - one handler input and its wire location
//! - [`Output`] / [`Destination`] - one handler result and its wire location
//!
//! Neither transforms anything on its own: the attached operator chain does,
//! driven by whoever serves the request.
//!
//! # Example
//!
//! ```
//! use wirebind::binding::{data_error_results, Destination, Parameter, Source};
//!
//! let id = Parameter::path("id", "user id", vec![]);
//! assert_eq!(id.source, Source::Path);
//!
//! let results = data_error_results("the user");
//! assert_eq!(results[1].destination, Destination::Error);
//! ```

mod output;
mod parameter;

pub use output::{data_error_results, Destination, Output};
pub use parameter::{Parameter, Source};
