//! Snapshot-based undo history.

use crate::types::PixelBuffer;

/// Last-in-first-out stack of full buffer snapshots.
///
/// Unbounded: one snapshot is taken per edit until the stack is cleared.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    snapshots: Vec<PixelBuffer>,
}

impl UndoStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a copy of `buffer`.
    pub fn push(&mut self, buffer: &PixelBuffer) {
        self.snapshots.push(buffer.clone());
    }

    /// Take the most recent snapshot, or `None` when there is nothing to undo.
    pub fn pop(&mut self) -> Option<PixelBuffer> {
        self.snapshots.pop()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recolor::recolor;
    use crate::types::{Colour, ToleranceConfig};

    #[test]
    fn test_pop_empty_is_none() {
        let mut stack = UndoStack::new();
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_round_trip_restores_buffer() {
        let original = PixelBuffer::from_rows(vec![vec![
            Colour::rgb(255, 0, 0),
            Colour::new(200, 10, 10, 90),
        ]])
        .unwrap();
        let mut working = original.clone();
        let mut stack = UndoStack::new();

        stack.push(&working);
        recolor(
            &mut working,
            Colour::rgb(255, 0, 0),
            Colour::rgb(0, 0, 255),
            &ToleranceConfig::new(100, false).unwrap(),
        );
        assert_ne!(working, original);

        let restored = stack.pop().unwrap();
        assert_eq!(restored, original);
        assert!(stack.is_empty());
    }

    #[test]
    fn test_lifo_order() {
        let a = PixelBuffer::filled(1, 1, Colour::rgb(1, 1, 1));
        let b = PixelBuffer::filled(1, 1, Colour::rgb(2, 2, 2));
        let mut stack = UndoStack::new();

        stack.push(&a);
        stack.push(&b);
        assert_eq!(stack.len(), 2);

        assert_eq!(stack.pop(), Some(b));
        assert_eq!(stack.pop(), Some(a));
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_snapshot_is_independent_copy() {
        let mut working = PixelBuffer::filled(1, 1, Colour::BLACK);
        let mut stack = UndoStack::new();
        stack.push(&working);

        working.set(0, 0, Colour::WHITE);

        assert_eq!(stack.pop().unwrap().get(0, 0), Some(Colour::BLACK));
    }

    #[test]
    fn test_clear() {
        let mut stack = UndoStack::new();
        stack.push(&PixelBuffer::filled(1, 1, Colour::BLACK));
        stack.clear();
        assert!(stack.pop().is_none());
    }
}
