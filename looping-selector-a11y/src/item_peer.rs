use alloc::string::{String, ToString};
use core::fmt::Display;

use looping_selector::{ItemId, LoopingSelector, ScrollHost};

use crate::{AutomationError, Result};

/// Panel-relative bounds of a materialized item.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub width: f64,
    pub height: f64,
}

/// Accessibility peer for one logical item.
///
/// The peer exists independently of whether the item is materialized: it only remembers the
/// logical index and looks everything else up in the selector it is handed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemAutomationPeer {
    logical_index: usize,
}

impl ItemAutomationPeer {
    pub(crate) fn new(logical_index: usize) -> Self {
        Self { logical_index }
    }

    pub fn logical_index(&self) -> usize {
        self.logical_index
    }

    /// Accessible name: the item's `Display` text.
    pub fn name<T, H>(&self, selector: &LoopingSelector<T, H>) -> Option<String>
    where
        T: Clone + Display,
        H: ScrollHost,
    {
        selector
            .items()
            .get(self.logical_index)
            .map(ToString::to_string)
    }

    /// 1-based.
    pub fn position_in_set(&self) -> usize {
        self.logical_index + 1
    }

    pub fn size_of_set<T: Clone, H: ScrollHost>(&self, selector: &LoopingSelector<T, H>) -> usize {
        selector.item_count()
    }

    pub fn is_selected<T: Clone, H: ScrollHost>(&self, selector: &LoopingSelector<T, H>) -> bool {
        selector.item_count() > self.logical_index
            && selector.selected_index() == self.logical_index
    }

    /// The item visual currently bound to this logical item, if any.
    pub fn container<T: Clone, H: ScrollHost>(
        &self,
        selector: &LoopingSelector<T, H>,
    ) -> Option<ItemId> {
        selector.automation_container_for_logical(self.logical_index)
    }

    /// `None` when the item is not materialized.
    pub fn bounding_box<T: Clone, H: ScrollHost>(
        &self,
        selector: &LoopingSelector<T, H>,
    ) -> Option<BoundingBox> {
        let item = selector.item(self.container(selector)?)?;
        Some(BoundingBox {
            top: item.top(),
            left: item.left(),
            width: item.width(),
            height: item.height(),
        })
    }

    /// Off-screen unless a realized copy intersects the viewport.
    pub fn is_offscreen<T: Clone, H: ScrollHost>(&self, selector: &LoopingSelector<T, H>) -> bool {
        let viewport = selector.state().viewport;
        !selector.realized_items().any(|id| {
            selector.item(id).is_some_and(|item| {
                item.content() == Some(self.logical_index)
                    && item.top() < viewport.bottom
                    && item.top() + item.height() > viewport.top
            })
        })
    }

    /// Materializes the item (off-screen if needed) so its geometry can be reported.
    pub fn realize<T: Clone, H: ScrollHost>(
        &self,
        selector: &mut LoopingSelector<T, H>,
    ) -> Result<ItemId> {
        atrace!(logical_index = self.logical_index, "realize");
        Ok(selector.realize_for_inspection(self.logical_index)?)
    }

    pub fn scroll_into_view<T: Clone, H: ScrollHost>(
        &self,
        selector: &mut LoopingSelector<T, H>,
    ) -> Result<()> {
        Ok(selector.scroll_into_view(self.logical_index)?)
    }

    pub fn select<T: Clone, H: ScrollHost>(&self, selector: &mut LoopingSelector<T, H>) -> Result<()> {
        adebug!(logical_index = self.logical_index, "select");
        Ok(selector.select(self.logical_index)?)
    }

    pub fn add_to_selection(&self) -> Result<()> {
        Err(AutomationError::InvalidOperation(
            "add to selection on a single-selection list",
        ))
    }

    pub fn remove_from_selection(&self) -> Result<()> {
        Err(AutomationError::InvalidOperation(
            "remove from selection on a selection-required list",
        ))
    }
}
