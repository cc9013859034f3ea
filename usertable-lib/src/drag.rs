//! Drag-to-reorder for table rows.
//!
//! A drag starts on a row's handle, moves the row on screen as the pointer
//! passes over other rows, and on release commits the on-screen order. There
//! is no cancel gesture: releasing always commits.

use crate::binding::RowBinding;
use crate::model::RecordId;
use crate::view::{Placement, RowHandle, RowSet};

/// Context captured when a drag starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragSession {
    /// Row being dragged.
    pub row: RowHandle,
    /// Record rendered by that row.
    pub id: RecordId,
    /// On-screen position the row started from.
    pub origin: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Idle/Dragging state machine driven by pointer gestures.
#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Pointer-down on the handle of `row`.
    ///
    /// Returns true if a drag started.
    pub fn start(&mut self, rows: &mut RowSet, binding: &RowBinding, row: RowHandle) -> bool {
        if self.is_dragging() {
            return false;
        }
        let (Some(id), Some(origin)) = (binding.record_for(row), rows.position(row)) else {
            log::warn!("drag start on a row that is not bound");
            return false;
        };
        rows.set_draggable(row, true);
        rows.set_grabbing(true);
        self.state = DragState::Dragging(DragSession { row, id, origin });
        log::debug!("drag start: record {} at {}", id, origin);
        true
    }

    /// Pointer entered `over` while dragging.
    ///
    /// A row below the dragged one pulls it to just after itself, a row above
    /// to just before. Returns true if the on-screen order changed.
    pub fn hover(&mut self, rows: &mut RowSet, over: RowHandle) -> bool {
        let DragState::Dragging(session) = self.state else {
            return false;
        };
        let (Some(dragged), Some(target)) = (rows.position(session.row), rows.position(over)) else {
            return false;
        };
        let placement = match target.cmp(&dragged) {
            std::cmp::Ordering::Greater => Placement::After,
            std::cmp::Ordering::Less => Placement::Before,
            std::cmp::Ordering::Equal => return false,
        };
        rows.move_row(session.row, over, placement)
    }

    /// Pointer released: clear the drag markers and return the on-screen
    /// order to commit, top to bottom.
    ///
    /// Returns `None` when no drag was in progress.
    pub fn finish(&mut self, rows: &mut RowSet, binding: &RowBinding) -> Option<Vec<RecordId>> {
        let DragState::Dragging(session) = std::mem::take(&mut self.state) else {
            return None;
        };
        rows.set_draggable(session.row, false);
        rows.set_grabbing(false);

        let order: Vec<RecordId> = rows
            .handles()
            .into_iter()
            .filter_map(|h| binding.record_for(h))
            .collect();
        log::debug!(
            "drag end: record {} moved from {} to {:?}",
            session.id,
            session.origin,
            rows.position(session.row)
        );
        Some(order)
    }

    /// Drop an in-progress drag without committing.
    ///
    /// Used when the rows are re-rendered under the drag.
    pub fn abort(&mut self, rows: &mut RowSet) {
        if let DragState::Dragging(session) = std::mem::take(&mut self.state) {
            rows.set_draggable(session.row, false);
            rows.set_grabbing(false);
            log::debug!("drag of record {} aborted by re-render", session.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RawRecord, Record, assign_ids};

    fn setup(n: usize) -> (Vec<Record>, RowSet, RowBinding, Vec<RowHandle>) {
        let data = assign_ids(
            (0..n)
                .map(|i| RawRecord {
                    name: format!("u{}", i),
                    rating: 0.0,
                    stories: 0.0,
                    comments: 0.0,
                    date: String::new(),
                    avatar: String::new(),
                })
                .collect(),
        );
        let mut rows = RowSet::new();
        let handles = rows.rebuild(&data, |d| d.to_string());
        let mut binding = RowBinding::new();
        let visible: Vec<&Record> = data.iter().collect();
        binding.rebuild(&visible, &handles);
        (data, rows, binding, handles)
    }

    fn ids(order: &[RecordId]) -> Vec<usize> {
        order.iter().map(|id| id.0).collect()
    }

    #[test]
    fn test_drag_up_and_commit() {
        let (_data, mut rows, binding, h) = setup(4);
        let mut drag = DragController::new();

        assert!(drag.start(&mut rows, &binding, h[2]));
        assert!(rows.grabbing());
        assert!(rows.get(h[2]).unwrap().draggable);

        assert!(drag.hover(&mut rows, h[1]));
        assert!(drag.hover(&mut rows, h[0]));
        assert_eq!(rows.position(h[2]), Some(0));

        let order = drag.finish(&mut rows, &binding).unwrap();
        assert_eq!(ids(&order), vec![2, 0, 1, 3]);
        assert!(!rows.grabbing());
        assert!(!rows.get(h[2]).unwrap().draggable);
        assert_eq!(drag.state(), DragState::Idle);
    }

    #[test]
    fn test_drag_down_places_after_target() {
        let (_data, mut rows, binding, h) = setup(4);
        let mut drag = DragController::new();
        drag.start(&mut rows, &binding, h[0]);

        // Jumping straight to the last row puts the dragged row after it
        assert!(drag.hover(&mut rows, h[3]));
        assert_eq!(ids(&rows.ids()), vec![1, 2, 3, 0]);
    }

    #[test]
    fn test_hover_over_self_is_noop() {
        let (_data, mut rows, binding, h) = setup(3);
        let mut drag = DragController::new();
        drag.start(&mut rows, &binding, h[1]);
        assert!(!drag.hover(&mut rows, h[1]));
        assert_eq!(ids(&rows.ids()), vec![0, 1, 2]);
    }

    #[test]
    fn test_hover_while_idle_is_ignored() {
        let (_data, mut rows, _binding, h) = setup(3);
        let mut drag = DragController::new();
        assert!(!drag.hover(&mut rows, h[0]));
        assert_eq!(ids(&rows.ids()), vec![0, 1, 2]);
    }

    #[test]
    fn test_release_without_drag_commits_nothing() {
        let (_data, mut rows, binding, _h) = setup(2);
        let mut drag = DragController::new();
        assert_eq!(drag.finish(&mut rows, &binding), None);
    }

    #[test]
    fn test_release_without_movement_commits_current_order() {
        let (_data, mut rows, binding, h) = setup(3);
        let mut drag = DragController::new();
        drag.start(&mut rows, &binding, h[1]);
        let order = drag.finish(&mut rows, &binding).unwrap();
        assert_eq!(ids(&order), vec![0, 1, 2]);
    }

    #[test]
    fn test_second_start_is_ignored() {
        let (_data, mut rows, binding, h) = setup(3);
        let mut drag = DragController::new();
        assert!(drag.start(&mut rows, &binding, h[0]));
        assert!(!drag.start(&mut rows, &binding, h[1]));
        match drag.state() {
            DragState::Dragging(session) => assert_eq!(session.id, RecordId(0)),
            DragState::Idle => panic!("expected a drag in progress"),
        }
    }

    #[test]
    fn test_abort_clears_markers() {
        let (_data, mut rows, binding, h) = setup(2);
        let mut drag = DragController::new();
        drag.start(&mut rows, &binding, h[0]);
        drag.abort(&mut rows);
        assert!(!drag.is_dragging());
        assert!(!rows.grabbing());
        assert!(!rows.get(h[0]).unwrap().draggable);
    }
}
