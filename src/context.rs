//! Per-request context passed to every operator invocation.
//!
//! The binding layer itself never inspects the context; it only threads it
//! through to operator functions. A context carries:
//! - a cancellation signal shared by all of its clones,
//! - a set of typed values (one per type), which is where prefab and auto
//!   parameter providers usually find their inputs.
//!
//! # Example
//!
//! ```
//! use wirebind::Context;
//!
//! #[derive(Debug, PartialEq)]
//! struct Tenant(&'static str);
//!
//! let ctx = Context::new().with_value(Tenant("acme"));
//! assert_eq!(ctx.value::<Tenant>(), Some(&Tenant("acme")));
//!
//! let child = ctx.clone();
//! ctx.cancel();
//! assert!(child.is_cancelled());
//! ```

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// Shared cancellation state.
#[derive(Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Context handed to operators.
///
/// `Context` is `Clone` and cheap to clone: clones share the cancellation
/// signal and the value map.
#[derive(Clone, Default)]
pub struct Context {
    cancel: Arc<CancelState>,
    values: Arc<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl Context {
    /// Create an empty, uncancelled context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a context that also carries `value`.
    ///
    /// The returned context shares this context's cancellation signal. A
    /// value of the same type already present is replaced in the new
    /// context only.
    pub fn with_value<T: Any + Send + Sync>(&self, value: T) -> Self {
        let mut values = (*self.values).clone();
        values.insert(TypeId::of::<T>(), Arc::new(value));
        Self {
            cancel: self.cancel.clone(),
            values: Arc::new(values),
        }
    }

    /// Look up a value by type.
    pub fn value<T: Any + Send + Sync>(&self) -> Option<&T> {
        self.values
            .get(&TypeId::of::<T>())
            .and_then(|v| v.downcast_ref::<T>())
    }

    /// Signal cancellation to every clone of this context.
    pub fn cancel(&self) {
        if !self.cancel.cancelled.swap(true, Ordering::AcqRel) {
            self.cancel.notify.notify_waiters();
        }
    }

    /// Whether cancellation has been signalled.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.cancelled.load(Ordering::Acquire)
    }

    /// Wait until cancellation is signalled.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.cancel.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("cancelled", &self.is_cancelled())
            .field("values", &self.values.len())
            .finish()
    }
}
