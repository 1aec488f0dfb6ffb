//! Sequence helpers backing drag-and-drop reordering.
//!
//! # Invariants
//! - Reordering never adds or drops elements.

use std::collections::HashSet;
use std::hash::Hash;

/// Moves the element at `from` so it ends up at index `to`.
///
/// Returns the offending index when either one is out of range.
pub fn move_to_index<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<(), usize> {
    let len = items.len();
    if from >= len {
        return Err(from);
    }
    if to >= len {
        return Err(to);
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

/// Returns whether `candidate` holds exactly the elements of `current`,
/// each once, in any order.
pub fn is_permutation<T: Eq + Hash>(current: &[T], candidate: &[T]) -> bool {
    if current.len() != candidate.len() {
        return false;
    }
    let expected: HashSet<&T> = current.iter().collect();
    let mut seen = HashSet::with_capacity(candidate.len());
    candidate
        .iter()
        .all(|item| expected.contains(item) && seen.insert(item))
}

#[cfg(test)]
mod tests {
    use super::{is_permutation, move_to_index};

    #[test]
    fn move_forward_and_backward() {
        let mut items = vec!['a', 'b', 'c', 'd'];
        move_to_index(&mut items, 0, 2).unwrap();
        assert_eq!(items, vec!['b', 'c', 'a', 'd']);

        move_to_index(&mut items, 3, 0).unwrap();
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);

        move_to_index(&mut items, 1, 1).unwrap();
        assert_eq!(items, vec!['d', 'b', 'c', 'a']);
    }

    #[test]
    fn move_rejects_out_of_range() {
        let mut items = vec![1, 2];
        assert_eq!(move_to_index(&mut items, 2, 0), Err(2));
        assert_eq!(move_to_index(&mut items, 0, 5), Err(5));
        assert_eq!(items, vec![1, 2]);
    }

    #[test]
    fn permutation_check() {
        assert!(is_permutation(&[1, 2, 3], &[3, 1, 2]));
        assert!(is_permutation::<i32>(&[], &[]));
        assert!(!is_permutation(&[1, 2, 3], &[1, 2]));
        assert!(!is_permutation(&[1, 2, 3], &[1, 1, 2]));
        assert!(!is_permutation(&[1, 2, 3], &[1, 2, 4]));
    }
}
