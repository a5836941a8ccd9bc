//! Change subscription: watch the workspace file and the config file and
//! report debounced changes to a callback.

mod error;
mod runtime;

pub use error::WatchError;
pub use runtime::{run, start_blocking, ChangeKind, WatchTargets, DEBOUNCE_WINDOW};
