// Column order and per-column widths for the task list header

use crate::error::BoardError;
use crate::models::{ColumnName, TaskHeader};
use std::collections::HashMap;
use tracing::debug;

pub const DEFAULT_MIN_WIDTH_RATIO: f64 = 0.25;

/// Anchors captured when a resize drag starts
///
/// Threaded through every subsequent move event for the same drag. Dropping
/// it ends the gesture; the last computed width stays in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeGesture {
    pub column: ColumnName,
    pub anchor_pointer: f64,
    pub anchor_left_offset: f64,
}

/// Reorderable, resizable column layout
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnLayout {
    columns: Vec<TaskHeader>,
    widths: HashMap<ColumnName, f64>,
    viewport_width: f64,
    min_width_ratio: f64,
    max_width_ratio: Option<f64>,
}

impl ColumnLayout {
    /// Default headers, each starting at the minimum width
    pub fn new(viewport_width: f64) -> Self {
        let widths = ColumnName::ALL
            .iter()
            .map(|name| (*name, viewport_width * DEFAULT_MIN_WIDTH_RATIO))
            .collect();
        Self {
            columns: TaskHeader::defaults(),
            widths,
            viewport_width,
            min_width_ratio: DEFAULT_MIN_WIDTH_RATIO,
            max_width_ratio: None,
        }
    }

    /// Override the floor ratio; existing widths are raised to the new floor
    pub fn with_min_width_ratio(mut self, ratio: f64) -> Self {
        self.min_width_ratio = ratio;
        let floor = self.min_width();
        for width in self.widths.values_mut() {
            *width = width.max(floor);
        }
        self
    }

    /// Cap widths at `viewport * ratio`; unbounded when not set
    pub fn with_max_width_ratio(mut self, ratio: Option<f64>) -> Self {
        self.max_width_ratio = ratio;
        self
    }

    pub fn columns(&self) -> &[TaskHeader] {
        &self.columns
    }

    pub fn widths(&self) -> &HashMap<ColumnName, f64> {
        &self.widths
    }

    pub fn width(&self, column: ColumnName) -> f64 {
        self.widths.get(&column).copied().unwrap_or(0.0)
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Smallest width any column may take
    pub fn min_width(&self) -> f64 {
        self.viewport_width * self.min_width_ratio
    }

    fn max_width(&self) -> Option<f64> {
        self.max_width_ratio
            .map(|ratio| (self.viewport_width * ratio).max(self.min_width()))
    }

    /// Sum of widths of every column positioned before `column`
    pub fn left_offset(&self, column: ColumnName) -> f64 {
        self.columns
            .iter()
            .take_while(|header| header.name != column)
            .map(|header| self.width(header.name))
            .sum()
    }

    // ========================================================================
    // Reorder
    // ========================================================================

    /// Replace the column sequence verbatim
    ///
    /// `new_order` must hold exactly the current columns. Widths are left alone.
    pub fn reorder(&mut self, new_order: Vec<TaskHeader>) -> Result<(), BoardError> {
        let mut current: Vec<&str> = self.columns.iter().map(|h| h.id.as_str()).collect();
        let mut proposed: Vec<&str> = new_order.iter().map(|h| h.id.as_str()).collect();
        current.sort_unstable();
        proposed.sort_unstable();

        let same_names = new_order
            .iter()
            .all(|h| self.columns.iter().any(|c| c.id == h.id && c.name == h.name));

        if current != proposed || !same_names {
            return Err(BoardError::ColumnMismatch {
                got: describe(&new_order),
                expected: describe(&self.columns),
            });
        }

        debug!(order = %describe(&new_order), "reorder: applied");
        self.columns = new_order;
        Ok(())
    }

    /// Drag-to-reorder: take the column at `from` and drop it at `to`
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<(), BoardError> {
        let len = self.columns.len();
        if from >= len {
            return Err(BoardError::invalid("column index", from.to_string()));
        }
        if to >= len {
            return Err(BoardError::invalid("column index", to.to_string()));
        }

        let mut order = self.columns.clone();
        let header = order.remove(from);
        order.insert(to, header);
        self.reorder(order)
    }

    // ========================================================================
    // Resize
    // ========================================================================

    /// Start a resize drag on `column` with the pointer at `pointer_x`
    ///
    /// The left offset is taken from the live widths at this moment.
    pub fn begin_resize(&self, column: ColumnName, pointer_x: f64) -> ResizeGesture {
        let gesture = ResizeGesture {
            column,
            anchor_pointer: pointer_x,
            anchor_left_offset: self.left_offset(column),
        };
        debug!(?gesture, "begin_resize: anchored");
        gesture
    }

    /// Apply one pointer-move event and return the column's new width
    pub fn update_resize(&mut self, gesture: &ResizeGesture, pointer_x: f64) -> f64 {
        let delta = pointer_x - gesture.anchor_pointer - gesture.anchor_left_offset;
        let mut width = self.min_width().max(delta);
        if let Some(ceiling) = self.max_width() {
            width = width.min(ceiling);
        }

        self.widths.insert(gesture.column, width);
        width
    }
}

fn describe(headers: &[TaskHeader]) -> String {
    headers
        .iter()
        .map(|h| h.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const VIEWPORT: f64 = 400.0;

    fn names(layout: &ColumnLayout) -> Vec<ColumnName> {
        layout.columns().iter().map(|h| h.name).collect()
    }

    #[test]
    fn test_new_layout_defaults() {
        let layout = ColumnLayout::new(VIEWPORT);
        assert_eq!(names(&layout), ColumnName::ALL.to_vec());
        for name in ColumnName::ALL {
            assert_eq!(layout.width(name), 100.0);
        }
        assert_eq!(layout.min_width(), 100.0);
    }

    #[test]
    fn test_left_offset() {
        let layout = ColumnLayout::new(VIEWPORT);
        assert_eq!(layout.left_offset(ColumnName::Title), 0.0);
        assert_eq!(layout.left_offset(ColumnName::Priority), 200.0);
        assert_eq!(layout.left_offset(ColumnName::Status), 300.0);
    }

    #[test]
    fn test_reorder_is_exact_and_keeps_widths() {
        let mut layout = ColumnLayout::new(VIEWPORT);
        let gesture = layout.begin_resize(ColumnName::Title, 0.0);
        layout.update_resize(&gesture, 180.0);
        let widths_before = layout.widths().clone();

        let mut order = layout.columns().to_vec();
        order.reverse();
        layout.reorder(order.clone()).unwrap();

        assert_eq!(layout.columns(), order.as_slice());
        assert_eq!(layout.widths(), &widths_before);
    }

    #[test]
    fn test_reorder_rejects_membership_change() {
        let mut layout = ColumnLayout::new(VIEWPORT);
        let before = layout.clone();

        let mut short = layout.columns().to_vec();
        short.pop();
        assert!(matches!(layout.reorder(short), Err(BoardError::ColumnMismatch { .. })));

        let mut duplicated = layout.columns().to_vec();
        duplicated[3] = duplicated[0].clone();
        assert!(layout.reorder(duplicated).is_err());

        let mut renamed = layout.columns().to_vec();
        renamed[0].name = ColumnName::Status;
        assert!(layout.reorder(renamed).is_err());

        assert_eq!(layout, before);
    }

    #[test]
    fn test_move_column() {
        let mut layout = ColumnLayout::new(VIEWPORT);
        layout.move_column(3, 0).unwrap();
        assert_eq!(
            names(&layout),
            vec![ColumnName::Status, ColumnName::Title, ColumnName::DueDate, ColumnName::Priority]
        );
        layout.move_column(0, 2).unwrap();
        assert_eq!(
            names(&layout),
            vec![ColumnName::Title, ColumnName::DueDate, ColumnName::Status, ColumnName::Priority]
        );
        assert!(layout.move_column(4, 0).is_err());
        assert!(layout.move_column(0, 9).is_err());
    }

    #[test]
    fn test_resize_first_column() {
        let mut layout = ColumnLayout::new(VIEWPORT);
        let gesture = layout.begin_resize(ColumnName::Title, 100.0);
        assert_eq!(gesture.anchor_left_offset, 0.0);

        assert_eq!(layout.update_resize(&gesture, 250.0), 150.0);
        assert_eq!(layout.update_resize(&gesture, 400.0), 300.0);
        assert_eq!(layout.width(ColumnName::Title), 300.0);
        assert_eq!(layout.width(ColumnName::DueDate), 100.0);
    }

    #[test]
    fn test_resize_subtracts_left_offset() {
        let mut layout = ColumnLayout::new(VIEWPORT);
        let gesture = layout.begin_resize(ColumnName::Priority, 0.0);
        assert_eq!(gesture.anchor_left_offset, 200.0);

        // delta = 450 - 0 - 200
        assert_eq!(layout.update_resize(&gesture, 450.0), 250.0);
        // delta = 250 - 0 - 200 = 50, floored
        assert_eq!(layout.update_resize(&gesture, 250.0), 100.0);
    }

    #[test]
    fn test_each_move_event_is_applied_in_order() {
        let mut layout = ColumnLayout::new(VIEWPORT);
        let gesture = layout.begin_resize(ColumnName::Title, 0.0);
        for x in [120.0, 160.0, 140.0, 500.0] {
            let width = layout.update_resize(&gesture, x);
            assert_eq!(layout.width(ColumnName::Title), width);
        }
        assert_eq!(layout.width(ColumnName::Title), 500.0);
    }

    #[test]
    fn test_offset_recomputed_at_gesture_start() {
        let mut layout = ColumnLayout::new(VIEWPORT);
        let first = layout.begin_resize(ColumnName::Title, 0.0);
        layout.update_resize(&first, 220.0);

        let second = layout.begin_resize(ColumnName::DueDate, 0.0);
        assert_eq!(second.anchor_left_offset, 220.0);
    }

    #[test]
    fn test_resize_unbounded_by_default() {
        let mut layout = ColumnLayout::new(VIEWPORT);
        let gesture = layout.begin_resize(ColumnName::Title, 0.0);
        assert_eq!(layout.update_resize(&gesture, 5_000.0), 5_000.0);
    }

    #[test]
    fn test_resize_with_ceiling() {
        let mut layout = ColumnLayout::new(VIEWPORT).with_max_width_ratio(Some(0.5));
        let gesture = layout.begin_resize(ColumnName::Title, 0.0);
        assert_eq!(layout.update_resize(&gesture, 5_000.0), 200.0);
        assert_eq!(layout.update_resize(&gesture, 10.0), 100.0);
    }

    #[test]
    fn test_ceiling_never_below_floor() {
        let mut layout = ColumnLayout::new(VIEWPORT).with_max_width_ratio(Some(0.1));
        let gesture = layout.begin_resize(ColumnName::Title, 0.0);
        assert_eq!(layout.update_resize(&gesture, 5_000.0), 100.0);
    }

    #[test]
    fn test_custom_min_ratio_raises_widths() {
        let layout = ColumnLayout::new(VIEWPORT).with_min_width_ratio(0.3);
        assert_eq!(layout.min_width(), 120.0);
        assert_eq!(layout.width(ColumnName::Status), 120.0);
    }

    proptest! {
        #[test]
        fn resize_never_goes_below_floor(
            viewport in 100.0f64..2000.0,
            start in -500.0f64..2000.0,
            end in -500.0f64..2000.0,
            column_idx in 0usize..4,
        ) {
            let mut layout = ColumnLayout::new(viewport);
            let column = ColumnName::ALL[column_idx];
            let gesture = layout.begin_resize(column, start);
            let width = layout.update_resize(&gesture, end);
            let delta = end - start - gesture.anchor_left_offset;

            prop_assert!(width >= viewport * 0.25);
            if delta < viewport * 0.25 {
                prop_assert_eq!(width, viewport * 0.25);
            } else {
                prop_assert_eq!(width, delta);
            }
        }
    }
}
