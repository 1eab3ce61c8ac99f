//! Entry points for the accessibility bridge.

use alloc::vec::Vec;

use super::LoopingSelector;
use crate::host::ScrollHost;
use crate::index::nearest_visual_index;
use crate::item::ItemVisualState;
use crate::pool::Acquired;
use crate::{ItemId, ItemsState, Result, ScrollAmount, SelectorError, SelectorEvent};

impl<T: Clone, H: ScrollHost> LoopingSelector<T, H> {
    pub fn is_setup_for_automation(&self) -> bool {
        self.is_set_up()
    }

    /// Scrolls `visual_index` to the viewport centre without animation and rebalances.
    ///
    /// Does nothing unless the selector is set up and idle (expanded).
    pub fn automation_scroll_to_visual_index(
        &mut self,
        visual_index: i64,
        ignore_scrolling_state: bool,
    ) -> Result<()> {
        if !self.is_set_up() || self.items_state != ItemsState::Expanded {
            return Ok(());
        }
        if !self.options.should_loop {
            crate::index::visual_to_logical(visual_index, self.items.len(), false)?;
        }
        let pixels = (visual_index - self.realized_midpoint_idx) as f64 * self.scaled_item_height;
        lstrace!(visual_index, pixels, "automation_scroll_to_visual_index");
        self.set_scroll_position(self.unpadded_extent_top + pixels, false)?;
        self.balance(true)?;
        if pixels == 0.0 {
            self.update_selected_item(ignore_scrolling_state);
        }
        // The settled view change for this scroll has already been processed.
        self.skip_selection_change_until_final_view_changed = false;
        Ok(())
    }

    /// The visual index showing `logical_index` that is closest to the current midpoint.
    pub fn visual_index_for_logical(&self, logical_index: usize) -> i64 {
        if self.options.should_loop {
            nearest_visual_index(logical_index, self.items.len(), self.realized_midpoint_idx)
        } else {
            i64::try_from(logical_index).unwrap_or(i64::MAX)
        }
    }

    /// Brings `logical_index` to the centre without selecting it.
    pub fn scroll_into_view(&mut self, logical_index: usize) -> Result<()> {
        self.check_logical_index(logical_index)?;
        self.skip_selection_change_until_final_view_changed = true;
        let visual_index = self.visual_index_for_logical(logical_index);
        self.automation_scroll_to_visual_index(visual_index, false)
    }

    /// Scrolls `logical_index` to the centre and selects it.
    pub fn select(&mut self, logical_index: usize) -> Result<()> {
        self.check_logical_index(logical_index)?;
        let visual_index = self.visual_index_for_logical(logical_index);
        self.automation_scroll_to_visual_index(visual_index, true)
    }

    /// Any non-empty collection is scrollable, set up or not.
    pub fn automation_is_scrollable(&self) -> bool {
        !self.items.is_empty()
    }

    /// Position of the selection within the collection, `0.0..100.0`.
    pub fn automation_scroll_percent(&self) -> f64 {
        let count = self.items.len();
        if count == 0 {
            return 0.0;
        }
        self.selected_index as f64 / count as f64 * 100.0
    }

    /// Share of the collection visible in the viewport, capped at 100.
    pub fn automation_scroll_view_size(&self) -> f64 {
        let count = self.items.len();
        if !self.is_set_up() || count == 0 || self.scaled_item_height <= 0.0 {
            return 100.0;
        }
        let viewport = self.unpadded_extent_bottom - self.unpadded_extent_top;
        (viewport / (count as f64 * self.scaled_item_height) * 100.0).min(100.0)
    }

    pub fn automation_set_scroll_percent(&mut self, percent: f64) -> Result<()> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(SelectorError::InvalidScrollPercent(percent));
        }
        let count = self.items.len();
        if count == 0 {
            return Ok(());
        }
        let target = ((count - 1) as f64 * percent / 100.0).floor() as usize;
        self.select(target.min(count - 1))
    }

    /// Moves the selection by the configured small or large increment, stopping at either end.
    pub fn automation_scroll(&mut self, amount: ScrollAmount) -> Result<()> {
        let count = self.items.len();
        if count == 0 {
            return Ok(());
        }
        let small = self.options.automation_small_increment;
        let large = self.options.automation_large_increment;
        let current = self.selected_index;
        let target = match amount {
            ScrollAmount::NoAmount => return Ok(()),
            ScrollAmount::SmallDecrement => current.saturating_sub(small),
            ScrollAmount::LargeDecrement => current.saturating_sub(large),
            ScrollAmount::SmallIncrement => current.saturating_add(small),
            ScrollAmount::LargeIncrement => current.saturating_add(large),
        };
        self.select(target.min(count - 1))
    }

    /// Logical indexes of the realized items from head to tail, each at most once.
    pub fn automation_realized_items(&self) -> Vec<usize> {
        self.realized
            .iter()
            .take(self.items.len())
            .filter_map(|&id| self.pool.get(id).and_then(|item| item.content()))
            .collect()
    }

    /// The realized item at the viewport centre, when it shows the selection.
    pub fn automation_selected_item(&self) -> Option<ItemId> {
        let id = self.realized_at(self.realized_midpoint_idx)?;
        let item = self.pool.get(id)?;
        (item.content() == Some(self.selected_index)).then_some(id)
    }

    /// Finds a materialized item for `logical_index`: the copy nearest the midpoint in the window,
    /// any copy in the window, or the accessibility-only item.
    pub fn automation_container_for_logical(&self, logical_index: usize) -> Option<ItemId> {
        if logical_index >= self.items.len() {
            return None;
        }
        let nearest = self.visual_index_for_logical(logical_index);
        if let Some(id) = self.realized_at(nearest) {
            return Some(id);
        }
        self.realized
            .iter()
            .copied()
            .find(|&id| {
                self.pool
                    .get(id)
                    .is_some_and(|item| item.content() == Some(logical_index))
            })
            .or_else(|| self.realized_for_ap.get(&logical_index).copied())
    }

    /// Materializes `logical_index` off-screen so assistive technology can inspect it.
    ///
    /// The realized window is left untouched. The item joins the window for free if the user
    /// later scrolls to it.
    pub fn realize_for_inspection(&mut self, logical_index: usize) -> Result<ItemId> {
        self.check_logical_index(logical_index)?;
        if !self.is_template_and_items_attached() {
            return Err(SelectorError::NotReady);
        }
        if let Some(id) = self.automation_container_for_logical(logical_index) {
            return Ok(id);
        }
        let count = self.items.len();
        let visual_index = self.visual_index_for_logical(logical_index);
        let (id, acquired) = self.pool.acquire(self.item_width, self.item_height)?;
        if acquired == Acquired::New {
            if let Some(panel) = self.panel.as_mut() {
                panel.attach(id);
            }
        }
        self.pool.bind(id, visual_index, logical_index, count);
        if let Some(item) = self.pool.get_mut(id) {
            item.set_state(ItemVisualState::Expanded, false);
        }
        let top = self.slot_top(visual_index);
        self.park_offscreen(id, top);
        self.realized_for_ap.insert(logical_index, id);
        lsdebug!(logical_index, visual_index, "realize_for_inspection");
        Ok(id)
    }

    /// Items realized for inspection only, keyed by logical index.
    pub fn inspection_items(&self) -> impl Iterator<Item = (usize, ItemId)> + '_ {
        self.realized_for_ap.iter().map(|(&logical, &id)| (logical, id))
    }

    pub(crate) fn automation_raise_selection_changed(&mut self) {
        self.push_event(SelectorEvent::AutomationSelectionChanged);
        let new = self.automation_scroll_percent();
        let old = self.previous_scroll_percent;
        if new != old {
            self.previous_scroll_percent = new;
            self.push_event(SelectorEvent::AutomationScrollPercentChanged { old, new });
        }
    }

    fn check_logical_index(&self, logical_index: usize) -> Result<()> {
        let count = self.items.len();
        if logical_index < count {
            Ok(())
        } else {
            Err(SelectorError::InvalidIndex {
                index: i64::try_from(logical_index).unwrap_or(i64::MAX),
                count,
            })
        }
    }
}

impl<T: Clone + PartialEq, H: ScrollHost> LoopingSelector<T, H> {
    /// Scrolls the first entry equal to `item` into view. Returns whether one was found.
    pub fn automation_try_scroll_item_into_view(&mut self, item: &T) -> Result<bool> {
        let Some(logical_index) = self.items.iter().position(|candidate| candidate == item) else {
            return Ok(false);
        };
        self.scroll_into_view(logical_index)?;
        Ok(true)
    }
}
