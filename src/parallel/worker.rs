//! Per-partition reduction
//!
//! Workers fold their own partition starting from its first element. The
//! caller's seed is applied once, by the orchestrator, when the partial
//! results are combined.

use std::ops::Range;

/// Reduce `block` left to right, `None` if it is empty
pub fn accumulate_block<T, F>(block: &[T], op: &F) -> Option<T>
where
    T: Clone,
    F: Fn(T, T) -> T,
{
    block.iter().cloned().reduce(|acc, item| op(acc, item))
}

/// Apply `map` to every index in `range` and reduce the results left to right
pub fn accumulate_range<T, M, F>(range: Range<usize>, map: &M, op: &F) -> Option<T>
where
    M: Fn(usize) -> T,
    F: Fn(T, T) -> T,
{
    range.map(map).reduce(|acc, item| op(acc, item))
}

/// Fold partial results in slot order, seeded by `init`
///
/// Empty slots contribute nothing.
pub fn fold_slots<T, F>(init: T, slots: Vec<Option<T>>, op: &F) -> T
where
    F: Fn(T, T) -> T,
{
    slots.into_iter().flatten().fold(init, |acc, partial| op(acc, partial))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_starts_from_first_element() {
        let add = |a: i64, b: i64| a + b;
        assert_eq!(accumulate_block(&[5, 6, 7], &add), Some(18));
        assert_eq!(accumulate_block(&[9], &add), Some(9));
        assert_eq!(accumulate_block::<i64, _>(&[], &add), None);
    }

    #[test]
    fn test_block_preserves_order() {
        let concat = |a: String, b: String| a + &b;
        let block = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(accumulate_block(&block, &concat).as_deref(), Some("abc"));
    }

    #[test]
    fn test_range_applies_work_function() {
        let square = |i: usize| (i * i) as u64;
        let add = |a: u64, b: u64| a + b;
        assert_eq!(accumulate_range(1..4, &square, &add), Some(14));
        assert_eq!(accumulate_range(4..4, &square, &add), None);
    }

    #[test]
    fn test_fold_uses_seed_once_in_slot_order() {
        let concat = |a: String, b: String| a + &b;
        let slots = vec![Some("b".to_string()), None, Some("c".to_string())];
        assert_eq!(fold_slots("a".to_string(), slots, &concat), "abc");
    }
}
