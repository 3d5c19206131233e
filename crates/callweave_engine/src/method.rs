//! The handler trait behind every registered method.

use std::sync::Arc;

use callweave_foundation::{Result, Value};

use crate::context::RuntimeContext;
use crate::parameter::Parameter;

/// Result of a method invocation.
///
/// `Ok(None)` means "no replacement": the handler does not apply to these
/// arguments, and the call span stays literal in the output. It is an
/// ordinary outcome, not an error. `Err` is reserved for handler faults and
/// is demoted to "no replacement" (with a log event) at the call boundary.
pub type MethodResult = Result<Option<Value>>;

/// A method invocable from a call span.
///
/// Handlers receive their arguments unevaluated; an argument is only
/// resolved when the handler asks for its value, so unused branches of a
/// conditional never run. The engine is single-threaded, so handlers need
/// not be `Send` or `Sync`; a concurrent host serializes access to the
/// whole engine instead.
pub trait Method {
    /// Invokes the method with the given arguments.
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult;
}

struct FnMethod<F>(F);

impl<F> Method for FnMethod<F>
where
    F: for<'a> Fn(&[Parameter], &mut RuntimeContext<'a>) -> MethodResult,
{
    fn call(&self, args: &[Parameter], ctx: &mut RuntimeContext<'_>) -> MethodResult {
        (self.0)(args, ctx)
    }
}

/// Wraps a closure as a registrable method.
pub fn method_fn<F>(f: F) -> Arc<dyn Method>
where
    F: for<'a> Fn(&[Parameter], &mut RuntimeContext<'a>) -> MethodResult + 'static,
{
    Arc::new(FnMethod(f))
}
