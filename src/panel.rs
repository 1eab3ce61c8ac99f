use alloc::vec::Vec;

use crate::item::SelectorItem;
use crate::{ItemId, Orientation, SnapPoints, SnapPointsAlignment};

/// Absolute-position container for item visuals.
///
/// The panel is geometry only: it knows its own height, where children sit, and the regular snap
/// point grid the scroll host settles on. It never decides which items exist.
#[derive(Clone, Debug, Default)]
pub struct LoopingPanel {
    height: f64,
    offset_in_pixels: f64,
    size_in_pixels: f64,
    children: Vec<ItemId>,
    snap_points_changed: bool,
}

impl LoopingPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub(crate) fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    pub fn offset_in_pixels(&self) -> f64 {
        self.offset_in_pixels
    }

    pub fn size_in_pixels(&self) -> f64 {
        self.size_in_pixels
    }

    /// Sets the first snap point. Marks the snap points changed when the value differs.
    pub fn set_offset_in_pixels(&mut self, offset: f64) {
        if self.offset_in_pixels != offset {
            self.offset_in_pixels = offset;
            self.snap_points_changed = true;
        }
    }

    /// Sets the snap point spacing (the item height).
    pub fn set_size_in_pixels(&mut self, size: f64) {
        if self.size_in_pixels != size {
            self.size_in_pixels = size;
            self.snap_points_changed = true;
        }
    }

    /// Returns and clears the pending "snap points changed" notification.
    pub fn take_snap_points_changed(&mut self) -> bool {
        core::mem::take(&mut self.snap_points_changed)
    }

    /// Only the vertical axis has snap points.
    pub fn are_snap_points_regular(&self, orientation: Orientation) -> bool {
        orientation == Orientation::Vertical
    }

    pub fn snap_points(&self, orientation: Orientation, alignment: SnapPointsAlignment) -> SnapPoints {
        if orientation == Orientation::Horizontal {
            return SnapPoints::default();
        }
        let spacing = self.size_in_pixels;
        let offset = match alignment {
            SnapPointsAlignment::Near => self.offset_in_pixels,
            SnapPointsAlignment::Center => self.offset_in_pixels + spacing / 2.0,
            SnapPointsAlignment::Far => self.offset_in_pixels + spacing,
        };
        SnapPoints { offset, spacing }
    }

    /// Snaps `offset` to the nearest vertical snap point.
    pub fn nearest_snap_point(&self, offset: f64) -> f64 {
        if self.size_in_pixels <= 0.0 {
            return offset;
        }
        let steps = ((offset - self.offset_in_pixels) / self.size_in_pixels).round();
        self.offset_in_pixels + steps * self.size_in_pixels
    }

    pub fn children(&self) -> &[ItemId] {
        &self.children
    }

    pub(crate) fn attach(&mut self, id: ItemId) {
        debug_assert!(!self.children.contains(&id), "LoopingPanel: child attached twice");
        self.children.push(id);
    }

    pub(crate) fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Places `item` at `offset` along the scroll axis, back in the visible column.
    pub fn set_position(&self, item: &mut SelectorItem, offset: f64) {
        item.place(offset, 0.0);
    }
}
