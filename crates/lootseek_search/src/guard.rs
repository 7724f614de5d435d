//! Panic containment around collaborator calls.
//!
//! A collaborator that panics on one candidate, container or seed costs
//! that unit of work only. The panic is caught at the call site, logged
//! and turned into the matching "skip" outcome; the worker keeps going.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Runs `f`, returning the panic message as `Err` if it panics.
///
/// State touched by `f` may be half-updated afterwards. Every caller
/// either discards that state or re-seeds it before the next use.
pub(crate) fn contained<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "<non-string panic payload>".to_owned()
    }
}
