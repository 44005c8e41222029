/// Minimum stack space to keep available before recursing (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first growing the native stack if less than the red zone remains.
///
/// Wrap every recursive descent into a quotation with this, both while
/// parsing and while executing.
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nest(depth: usize) -> usize {
        if depth == 0 {
            0
        } else {
            ensure_sufficient_stack(|| 1 + nest(depth - 1))
        }
    }

    #[test]
    fn deep_recursion_completes() {
        assert_eq!(nest(200_000), 200_000);
    }
}
