//! Linear undo/redo history of scene snapshots.

use crate::scene::Scene;

/// Snapshot sequence plus a cursor pointing at the snapshot currently shown.
///
/// Always holds at least one snapshot; a fresh history holds the empty scene
/// at cursor 0. Undo and redo only move the cursor; committing after an undo
/// discards everything past the cursor first.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    snapshots: Vec<Scene>,
    cursor: usize,
    limit: Option<usize>,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create a history holding only the empty scene.
    pub fn new() -> Self {
        Self {
            snapshots: vec![Scene::new()],
            cursor: 0,
            limit: None,
        }
    }

    /// Create a history that keeps at most `limit` snapshots, dropping the
    /// oldest first. A limit below 1 is treated as 1.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit: Some(limit.max(1)),
            ..Self::new()
        }
    }

    /// Record a new snapshot after the cursor, discarding any redo branch.
    pub fn commit(&mut self, scene: Scene) {
        self.snapshots.truncate(self.cursor + 1);
        self.snapshots.push(scene);
        self.cursor = self.snapshots.len() - 1;

        if let Some(limit) = self.limit {
            let excess = self.snapshots.len().saturating_sub(limit);
            if excess > 0 {
                self.snapshots.drain(..excess);
                self.cursor -= excess;
            }
        }
    }

    /// Step back one snapshot. Returns `None` (and changes nothing) when
    /// already at the oldest snapshot.
    pub fn undo(&mut self) -> Option<&Scene> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Step forward one snapshot. Returns `None` (and changes nothing) when
    /// already at the newest snapshot.
    pub fn redo(&mut self) -> Option<&Scene> {
        if !self.can_redo() {
            return None;
        }
        self.cursor += 1;
        Some(&self.snapshots[self.cursor])
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.snapshots.len()
    }

    /// Snapshot at the cursor.
    pub fn current(&self) -> &Scene {
        &self.snapshots[self.cursor]
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of retained snapshots, including the initial one.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Never true: a history always holds at least one snapshot.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rectangle, Shape, ShapeStyle};
    use kurbo::Point;

    fn scene_with(n: usize) -> Scene {
        Scene::from_shapes(
            (0..n)
                .map(|i| {
                    Shape::Rectangle(Rectangle::new(
                        Point::new(i as f64, 0.0),
                        1.0,
                        1.0,
                        ShapeStyle::default(),
                    ))
                })
                .collect(),
        )
    }

    #[test]
    fn test_initial_state() {
        let history = History::new();
        assert_eq!(history.len(), 1);
        assert_eq!(history.cursor(), 0);
        assert!(history.current().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commits_advance_cursor() {
        let mut history = History::new();
        for n in 1..=4 {
            history.commit(scene_with(n));
        }
        assert_eq!(history.len(), 5);
        assert_eq!(history.cursor(), 4);
        assert_eq!(history.current().len(), 4);
    }

    #[test]
    fn test_undo_redo_move_cursor_only() {
        let mut history = History::new();
        let one = scene_with(1);
        let two = scene_with(2);
        history.commit(one.clone());
        history.commit(two.clone());

        assert_eq!(history.undo(), Some(&one));
        assert_eq!(history.undo(), Some(&Scene::new()));
        assert_eq!(history.redo(), Some(&one));
        assert_eq!(history.redo(), Some(&two));
        assert_eq!(history.len(), 3);
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut history = History::new();
        assert!(history.undo().is_none());
        assert_eq!(history.cursor(), 0);

        history.commit(scene_with(1));
        assert!(history.redo().is_none());
        assert_eq!(history.cursor(), 1);
        assert_eq!(history.current().len(), 1);
    }

    #[test]
    fn test_commit_after_undo_discards_redo() {
        let mut history = History::new();
        history.commit(scene_with(1));
        history.commit(scene_with(2));
        history.commit(scene_with(3));

        history.undo();
        history.undo();
        history.commit(scene_with(5));

        assert!(!history.can_redo());
        assert!(history.redo().is_none());
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current().len(), 5);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = History::with_limit(3);
        for n in 1..=5 {
            history.commit(scene_with(n));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.cursor(), 2);
        assert_eq!(history.current().len(), 5);
        history.undo();
        history.undo();
        assert!(!history.can_undo());
        assert_eq!(history.current().len(), 3);
    }
}
