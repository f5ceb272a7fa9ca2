//! Stack safety for the recursive parser and evaluator.
//!
//! Deeply nested programs recurse once per nesting level, so every recursive
//! entry point runs inside [`ensure_sufficient_stack`], which grows the native
//! stack on demand. Unbounded Egg-level recursion is cut off separately by
//! [`CallDepth`], which turns it into a `RangeError` instead of letting the
//! process run out of memory.

use super::error::InterpreterError;
use crate::diagnostic::Span;

/// Closure call depth allowed before evaluation is aborted.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    /// Minimum stack space to keep available (100KB red zone).
    const RED_ZONE: usize = 100 * 1024;

    /// Stack space to allocate when growing (1MB).
    const STACK_PER_RECURSION: usize = 1024 * 1024;

    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// Counts nested closure invocations.
#[derive(Debug, Clone)]
pub struct CallDepth {
    depth: usize,
    max_depth: usize,
}

impl CallDepth {
    pub fn new(max_depth: usize) -> Self {
        Self { depth: 0, max_depth }
    }

    /// Enter a call made at `span`. The depth is not raised on failure.
    pub fn enter(&mut self, span: Span) -> Result<(), InterpreterError> {
        if self.depth >= self.max_depth {
            return Err(InterpreterError::recursion_limit_at(self.max_depth, span));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn exit(&mut self) {
        debug_assert!(self.depth > 0, "CallDepth::exit() without matching enter()");
        self.depth = self.depth.saturating_sub(1);
    }

    pub fn depth(&self) -> usize {
        self.depth
    }
}

impl Default for CallDepth {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::ErrorKind;

    #[test]
    fn test_enter_and_exit() {
        let mut calls = CallDepth::new(2);
        calls.enter(Span::dummy()).unwrap();
        calls.enter(Span::dummy()).unwrap();
        assert_eq!(calls.depth(), 2);

        let err = calls.enter(Span::new(4, 8)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);
        assert_eq!(err.span(), Span::new(4, 8));
        assert_eq!(calls.depth(), 2);

        calls.exit();
        assert_eq!(calls.depth(), 1);
    }

    #[test]
    fn test_deep_recursion_with_stack_growth() {
        fn count_down(n: u64) -> u64 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + count_down(n - 1) })
        }
        assert_eq!(count_down(100_000), 100_000);
    }
}
