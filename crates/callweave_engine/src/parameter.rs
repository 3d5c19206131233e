//! The compiled segment tree and its evaluation.
//!
//! A compiled line is a flat list of segments: literal text and call spans.
//! Each call span carries its arguments as [`Parameter`]s, which are
//! themselves small segment trees. Nothing evaluates until asked: a
//! handler that never reads an argument never triggers its side effects.

use std::cell::RefCell;

use callweave_foundation::Value;

use crate::context::RuntimeContext;

/// One piece of a compiled line or argument.
#[derive(Clone, Debug)]
pub enum Segment {
    /// Literal text, spliced into the output unchanged.
    Text(String),
    /// A call span, replaced by its result when it resolves.
    Call(Call),
}

impl Segment {
    fn reset(&self) {
        if let Self::Call(call) = self {
            for arg in &call.args {
                arg.reset();
            }
        }
    }
}

/// A `name(args)` span.
#[derive(Clone, Debug)]
pub struct Call {
    pub(crate) name: String,
    pub(crate) full: String,
    pub(crate) args: Vec<Parameter>,
}

impl Call {
    /// The method name as written, including any prefix.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The whole span as written, used as the literal fallback.
    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.full
    }

    /// The arguments of this call.
    #[must_use]
    pub fn args(&self) -> &[Parameter] {
        &self.args
    }

    /// Resolves and invokes this call.
    ///
    /// Returns `None` when the name does not resolve, the handler
    /// abstains, or the depth ceiling blocks the call.
    pub fn eval(&self, ctx: &mut RuntimeContext<'_>) -> Option<Value> {
        let method = ctx.resolve(&self.name, self.args.len())?;
        ctx.call(&self.name, method.as_ref(), &self.args)
    }

    /// Like [`Call::eval`], but falls back to the span's literal text.
    pub fn eval_or_literal(&self, ctx: &mut RuntimeContext<'_>) -> Value {
        self.eval(ctx)
            .unwrap_or_else(|| Value::from(self.full.as_str()))
    }
}

/// One argument of a call, unevaluated until a handler asks for it.
///
/// The resolved value is memoized for the duration of one evaluation, so a
/// handler reading the same argument twice does not re-run the expansion
/// behind it. [`Compiled::eval`] drops the memos on entry, so a reused
/// compiled line re-resolves its arguments against the current state.
#[derive(Clone, Debug)]
pub struct Parameter {
    segments: Vec<Segment>,
    text: String,
    full: String,
    cache: RefCell<Option<Option<Value>>>,
}

impl Parameter {
    pub(crate) fn new(segments: Vec<Segment>, text: String, full: String) -> Self {
        Self {
            segments,
            text,
            full,
            cache: RefCell::new(None),
        }
    }

    /// Creates a plain text parameter. Useful for invoking methods
    /// directly from host code.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        let text = text.into();
        Self::new(
            vec![Segment::Text(text.clone())],
            text.clone(),
            text,
        )
    }

    /// The processed argument text, with quotes stripped and escapes
    /// resolved but call spans left as written.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The raw argument span as written.
    #[must_use]
    pub fn full_text(&self) -> &str {
        &self.full
    }

    /// The segments of this argument.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Resolves this argument without the literal fallback.
    ///
    /// A pure-text argument yields a string; a single call span yields the
    /// handler's result, which may be `None`; mixed segments concatenate
    /// to a string, with unresolved call spans kept literal.
    pub fn inner_value(&self, ctx: &mut RuntimeContext<'_>) -> Option<Value> {
        if let Some(cached) = self.cache.borrow().as_ref() {
            return cached.clone();
        }
        let computed = self.compute(ctx);
        *self.cache.borrow_mut() = Some(computed.clone());
        computed
    }

    /// Resolves this argument, falling back to its literal text.
    pub fn value(&self, ctx: &mut RuntimeContext<'_>) -> Value {
        self.inner_value(ctx)
            .unwrap_or_else(|| Value::from(self.full.as_str()))
    }

    fn reset(&self) {
        self.cache.borrow_mut().take();
        for segment in &self.segments {
            segment.reset();
        }
    }

    fn compute(&self, ctx: &mut RuntimeContext<'_>) -> Option<Value> {
        match self.segments.as_slice() {
            [] => Some(Value::from("")),
            [Segment::Text(text)] => Some(Value::from(text.as_str())),
            [Segment::Call(call)] => call.eval(ctx),
            segments => {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        Segment::Text(text) => out.push_str(text),
                        Segment::Call(call) => {
                            out.push_str(&call.eval_or_literal(ctx).as_string());
                        }
                    }
                }
                Some(Value::from(out))
            }
        }
    }
}

/// A parsed line, reusable across evaluations.
#[derive(Clone, Debug)]
pub struct Compiled {
    pub(crate) segments: Vec<Segment>,
    pub(crate) source: String,
}

impl Compiled {
    /// The segments of this line.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The source text this line was compiled from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evaluates this line.
    ///
    /// A line that is a single call span hands the handler's value through
    /// natively, so a whole-line `array(...)` stays an array. Anything
    /// else concatenates to a string, with unresolved spans kept literal.
    ///
    /// Argument memos from a previous evaluation are dropped first, so the
    /// same compiled line can run against different variable scopes.
    pub fn eval(&self, ctx: &mut RuntimeContext<'_>) -> Value {
        for segment in &self.segments {
            segment.reset();
        }
        match self.segments.as_slice() {
            [] => Value::from(""),
            [Segment::Text(text)] => Value::from(text.as_str()),
            [Segment::Call(call)] => call.eval_or_literal(ctx),
            segments => {
                let mut out = String::new();
                for segment in segments {
                    match segment {
                        Segment::Text(text) => out.push_str(text),
                        Segment::Call(call) => {
                            out.push_str(&call.eval_or_literal(ctx).as_string());
                        }
                    }
                }
                Value::from(out)
            }
        }
    }
}
