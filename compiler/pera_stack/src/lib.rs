//! Stack safety for the recursive parts of the pipeline.
//!
//! Tail positions in the evaluator never recurse on the host: they loop in
//! the trampoline. Two paths still do recurse:
//!
//! - the parser, once per nesting level of parentheses or operator operands;
//! - the evaluator, for non-tail sub-forms such as operands of `+` or the
//!   argument forms of a user call.
//!
//! Both wrap their recursive entry in [`ensure_sufficient_stack`], so a
//! program nested a hundred thousand levels deep costs heap-allocated stack
//! segments rather than a crash.
//!
//! On `wasm32` the helper is a plain call.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// Run `f` directly; the wasm runtime manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Approximate bytes of stack left on the current segment, where known.
#[cfg(not(target_arch = "wasm32"))]
pub fn remaining_stack() -> Option<usize> {
    stacker::remaining_stack()
}

#[cfg(target_arch = "wasm32")]
pub fn remaining_stack() -> Option<usize> {
    None
}
