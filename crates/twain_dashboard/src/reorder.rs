//! Drag-and-drop reordering helpers.

/// Move the element at `from` so it ends up at `to`, shifting the rest.
///
/// Returns false and leaves `items` untouched when the move is a no-op
/// (equal indices or either index out of range).
///
/// # Examples
///
/// ```
/// use twain_dashboard::array_move;
///
/// let mut items = vec!["a", "b", "c"];
/// assert!(array_move(&mut items, 2, 0));
/// assert_eq!(items, vec!["c", "a", "b"]);
///
/// assert!(!array_move(&mut items, 1, 1));
/// assert!(!array_move(&mut items, 0, 9));
/// ```
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from == to || from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

/// Outcome of persisting a reorder.
///
/// Writes are independent: a failed write leaves the earlier ones in
/// place and does not stop the later ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReorderReport {
    /// Number of `update_order` calls issued
    pub attempted: usize,
    /// Ids whose write failed
    pub failed: Vec<String>,
}

impl ReorderReport {
    /// Whether every write landed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Whether the move was a no-op.
    pub fn is_noop(&self) -> bool {
        self.attempted == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_forward_and_back() {
        let mut items = vec![1, 2, 3, 4];
        assert!(array_move(&mut items, 0, 2));
        assert_eq!(items, vec![2, 3, 1, 4]);
        assert!(array_move(&mut items, 3, 1));
        assert_eq!(items, vec![2, 4, 3, 1]);
    }

    #[test]
    fn test_empty_report_is_noop_and_complete() {
        let report = ReorderReport::default();
        assert!(report.is_noop());
        assert!(report.is_complete());
    }
}
