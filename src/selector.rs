use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;

use crate::host::{ScrollHost, ViewEvent};
use crate::index::{positive_mod, visual_to_logical};
use crate::item::{ItemVisualState, RECYCLED_LEFT, SelectorItem};
use crate::panel::LoopingPanel;
use crate::pool::{Acquired, ItemPool, PoolStats};
use crate::types::ListEnd;
use crate::{
    BalanceStats, ControlVisualState, ItemId, ItemsState, Result, SelectionChanged, SelectorError,
    SelectorEvent, SelectorOptions, SelectorState, ViewportEdges,
};

mod automation;
mod input;

const PROVISIONAL_EXTENT: f64 = 1_000_000.0;

/// A headless, infinitely scrolling single-selection list.
///
/// The selector owns the item pool and the panel geometry, and drives a [`ScrollHost`] for the
/// scroll offset. It never renders: adapters read item positions and states back through
/// [`LoopingSelector::realized_items`] and [`LoopingSelector::item`], and drain
/// [`LoopingSelector::take_events`] after each call.
///
/// Visual indexes are slots of the unrolled wheel; the realized window is the contiguous run of
/// slots `realized_top_idx..=realized_bottom_idx` whose items are positioned on the panel.
#[derive(Clone, Debug)]
pub struct LoopingSelector<T, H> {
    options: SelectorOptions<T>,
    items: Vec<T>,
    selected_index: usize,

    host: Option<H>,
    panel: Option<LoopingPanel>,
    pool: ItemPool,
    // Front is the head (top) of the window.
    realized: VecDeque<ItemId>,
    // Items realized only so an accessibility client can inspect them, keyed by logical index.
    realized_for_ap: BTreeMap<usize, ItemId>,
    events: Vec<SelectorEvent<T>>,

    has_focus: bool,
    is_sized: bool,
    is_setup_pending: bool,
    is_scroll_host_initialized: bool,
    skip_next_balance: bool,
    skip_selection_change_until_final_view_changed: bool,
    skip_next_arrange: bool,
    is_within_scroll_change: bool,
    is_within_arrange: bool,
    is_within_balance: bool,

    items_state: ItemsState,
    control_visual_state: ControlVisualState,

    unpadded_extent_top: f64,
    unpadded_extent_bottom: f64,
    realized_top: f64,
    realized_bottom: f64,
    realized_top_idx: i64,
    realized_bottom_idx: i64,
    realized_midpoint_idx: i64,

    item_height: f64,
    item_width: f64,
    item_width_fallback: f64,
    scaled_item_height: f64,
    panel_size: f64,
    panel_midpoint_scroll_position: f64,
    last_arrange_height: f64,
    delay_scroll_position: Option<f64>,
    previous_scroll_percent: f64,
    last_balance: BalanceStats,
}

impl<T: Clone, H: ScrollHost> LoopingSelector<T, H> {
    /// Creates a selector with no items and no scroll host.
    ///
    /// Nothing is realized until [`Self::apply_template`] and [`Self::set_items`] have both been
    /// called and the first [`Self::arrange`] pass has run.
    pub fn new(options: SelectorOptions<T>) -> Self {
        lsdebug!(
            item_height = options.item_height,
            should_loop = options.should_loop,
            selected_index = options.selected_index,
            "LoopingSelector::new"
        );
        Self {
            selected_index: options.selected_index,
            items: Vec::new(),
            host: None,
            panel: None,
            pool: ItemPool::new(),
            realized: VecDeque::new(),
            realized_for_ap: BTreeMap::new(),
            events: Vec::new(),
            has_focus: false,
            is_sized: false,
            is_setup_pending: true,
            is_scroll_host_initialized: false,
            skip_next_balance: false,
            skip_selection_change_until_final_view_changed: false,
            skip_next_arrange: false,
            is_within_scroll_change: false,
            is_within_arrange: false,
            is_within_balance: false,
            items_state: ItemsState::Expanded,
            control_visual_state: ControlVisualState::Normal,
            unpadded_extent_top: 0.0,
            unpadded_extent_bottom: 0.0,
            realized_top: 0.0,
            realized_bottom: 0.0,
            realized_top_idx: 0,
            realized_bottom_idx: -1,
            realized_midpoint_idx: 0,
            item_height: 0.0,
            item_width: 0.0,
            item_width_fallback: 0.0,
            scaled_item_height: 0.0,
            panel_size: 0.0,
            panel_midpoint_scroll_position: 0.0,
            last_arrange_height: 0.0,
            delay_scroll_position: None,
            previous_scroll_percent: 0.0,
            last_balance: BalanceStats::default(),
            options,
        }
    }

    pub fn options(&self) -> &SelectorOptions<T> {
        &self.options
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Mutable host access, for adapters that feed viewport changes into it.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn panel(&self) -> Option<&LoopingPanel> {
        self.panel.as_ref()
    }

    pub fn pool(&self) -> &ItemPool {
        &self.pool
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    pub fn item(&self, id: ItemId) -> Option<&SelectorItem> {
        self.pool.get(id)
    }

    /// The collection entry bound to `id`, if the item is not recycled.
    pub fn item_content(&self, id: ItemId) -> Option<&T> {
        let logical = self.pool.get(id)?.content()?;
        self.items.get(logical)
    }

    /// Realized items from head to tail.
    pub fn realized_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.realized.iter().copied()
    }

    pub fn realized_len(&self) -> usize {
        self.realized.len()
    }

    /// Inclusive visual index bounds of the realized window, `None` when it is empty.
    pub fn realized_range(&self) -> Option<(i64, i64)> {
        if self.realized.is_empty() {
            None
        } else {
            Some((self.realized_top_idx, self.realized_bottom_idx))
        }
    }

    /// Visual index of the item under the viewport centre.
    pub fn midpoint_index(&self) -> i64 {
        self.realized_midpoint_idx
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn selected_item(&self) -> Option<&T> {
        self.items.get(self.selected_index)
    }

    pub fn items_state(&self) -> ItemsState {
        self.items_state
    }

    pub fn control_visual_state(&self) -> ControlVisualState {
        self.control_visual_state
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    /// Whether geometry is computed and the initial scroll position has been applied.
    pub fn is_set_up(&self) -> bool {
        self.is_template_and_items_attached() && self.is_sized && !self.is_setup_pending
    }

    /// Work done by the most recent balance pass that got past its early exits.
    pub fn last_balance_stats(&self) -> BalanceStats {
        self.last_balance
    }

    /// Drains queued notifications.
    pub fn take_events(&mut self) -> Vec<SelectorEvent<T>> {
        core::mem::take(&mut self.events)
    }

    pub fn state(&self) -> SelectorState {
        SelectorState {
            realized_top_idx: self.realized_top_idx,
            realized_bottom_idx: self.realized_bottom_idx,
            midpoint_idx: self.realized_midpoint_idx,
            selected_index: self.selected_index,
            items_state: self.items_state,
            viewport: ViewportEdges {
                top: self.unpadded_extent_top,
                bottom: self.unpadded_extent_bottom,
            },
            realized: ViewportEdges {
                top: self.realized_top,
                bottom: self.realized_bottom,
            },
        }
    }

    /// Installs the scroll host and a fresh panel, returning the previous host.
    ///
    /// Everything realized against the old template is discarded and setup runs again on the next
    /// arrange pass.
    pub fn apply_template(&mut self, mut host: H) -> Option<H> {
        lsdebug!("apply_template");
        let previous = self.detach();
        // Provisional until the first arrange sizes the panel.
        host.set_extent_height(PROVISIONAL_EXTENT);
        self.host = Some(host);
        self.panel = Some(LoopingPanel::new());
        previous
    }

    /// Releases the scroll host and every item visual.
    pub fn detach(&mut self) -> Option<H> {
        self.realized.clear();
        self.realized_for_ap.clear();
        self.pool.drain();
        lstrace!("detach");
        if let Some(panel) = self.panel.as_mut() {
            panel.clear_children();
        }
        self.panel = None;
        self.realized_bottom = self.realized_top;
        self.realized_bottom_idx = self.realized_top_idx - 1;
        self.is_sized = false;
        self.is_setup_pending = true;
        self.is_scroll_host_initialized = false;
        self.skip_next_balance = false;
        self.skip_next_arrange = false;
        self.delay_scroll_position = None;
        self.last_arrange_height = 0.0;
        self.host.take()
    }

    /// Replaces the item collection.
    ///
    /// The realized window is rebuilt around the (clamped) selected index. Accessibility peers
    /// must be dropped on the resulting [`SelectorEvent::PeerMapInvalidated`].
    pub fn set_items(&mut self, items: Vec<T>) -> Result<()> {
        lsdebug!(count = items.len(), "set_items");
        let old_count = self.items.len();
        self.items = items;
        let count = self.items.len();
        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
        self.clear_all_items();
        if !self.options.should_loop || self.loop_panel_len(old_count) != self.loop_panel_len(count)
        {
            // The panel height depends on the item count.
            self.is_sized = false;
            self.is_setup_pending = true;
        }
        self.balance(false)?;
        self.push_event(SelectorEvent::PeerMapInvalidated);
        self.automation_raise_selection_changed();
        Ok(())
    }

    pub fn set_should_loop(&mut self, should_loop: bool) -> Result<()> {
        if self.options.should_loop == should_loop {
            return Ok(());
        }
        self.options.should_loop = should_loop;
        self.invalidate_geometry()
    }

    pub fn set_item_height(&mut self, item_height: u32) -> Result<()> {
        if self.options.item_height == item_height {
            return Ok(());
        }
        self.options.item_height = item_height;
        self.invalidate_geometry()
    }

    pub fn set_item_width(&mut self, item_width: u32) -> Result<()> {
        if self.options.item_width == item_width {
            return Ok(());
        }
        self.options.item_width = item_width;
        self.invalidate_geometry()
    }

    /// Programmatically selects `index` and scrolls it to the viewport centre.
    ///
    /// Does not raise [`SelectorEvent::SelectionChanged`]: the caller initiated the change.
    pub fn set_selected_index(&mut self, index: usize) -> Result<()> {
        let count = self.items.len();
        if count > 0 && index >= count {
            return Err(SelectorError::InvalidIndex {
                index: i64::try_from(index).unwrap_or(i64::MAX),
                count,
            });
        }
        lstrace!(old = self.selected_index, index, "set_selected_index");
        self.selected_index = index;
        self.options.selected_index = index;
        if self.is_set_up() && self.items_state == ItemsState::Expanded {
            // Measured from the centred slot, which need not show the previous selection.
            let target = self.visual_index_for_logical(index);
            let pixels = (target - self.realized_midpoint_idx) as f64 * self.scaled_item_height;
            if pixels != 0.0 {
                self.set_scroll_position(self.unpadded_extent_top + pixels, false)?;
            }
        }
        self.balance(false)
    }

    /// Desired width for the control.
    pub fn measure(&self, available_width: f64) -> f64 {
        if self.options.item_width == 0 && available_width.is_finite() {
            available_width
        } else {
            f64::from(self.options.item_width)
        }
    }

    /// Lays the control out at its final size.
    ///
    /// The host's viewport must already reflect `final_height`. The first call marks the host
    /// initialized, which lets setup run. Returns the width used for items.
    pub fn arrange(&mut self, final_width: f64, final_height: f64) -> Result<f64> {
        self.is_within_arrange = true;
        let result = self.arrange_inner(final_width, final_height);
        self.last_arrange_height = final_height;
        self.is_within_arrange = false;
        result
    }

    fn arrange_inner(&mut self, final_width: f64, final_height: f64) -> Result<f64> {
        let width = if self.options.item_width == 0 {
            if self.item_width_fallback != final_width {
                self.item_width_fallback = final_width;
                self.is_sized = false;
            }
            final_width
        } else {
            f64::from(self.options.item_width)
        };

        let mut expected_offset_change = false;
        if let Some(offset) = self.delay_scroll_position.take() {
            lstrace!(offset, "arrange: replaying delayed scroll");
            self.set_scroll_position(offset, false)?;
            self.skip_next_balance = false;
            expected_offset_change = true;
        }

        let set_up = self.is_scroll_host_initialized && !self.is_setup_pending && self.is_sized;
        if set_up && final_height != self.last_arrange_height {
            let offset_before = self.host_offset();
            let old_panel_size = self.panel_size;
            self.measure_extent();
            self.size_panel();
            let delta = (self.panel_size - old_panel_size) / 2.0;
            self.realized_top += delta;
            self.realized_bottom += delta;
            self.shift_children(delta);
            let offset_after = self.host_offset();
            lsdebug!(final_height, delta, "arrange: viewport resized");
            if offset_after != offset_before && !expected_offset_change {
                // The host coerced the offset while the extent changed; put it back next pass.
                self.delay_scroll_position = Some(offset_before);
                self.skip_next_arrange = true;
            }
        }

        if self.skip_next_arrange && self.is_scroll_host_initialized {
            self.skip_next_arrange = false;
        } else {
            self.is_scroll_host_initialized = true;
            self.balance(false)?;
        }
        Ok(width)
    }

    /// Dispatches every queued host notification.
    pub fn process_host_events(&mut self) -> Result<()> {
        while let Some(event) = self.host.as_mut().and_then(|host| host.take_view_event()) {
            match event {
                ViewEvent::Changing { .. } => self.on_view_changing()?,
                ViewEvent::Changed {
                    is_intermediate, ..
                } => self.on_view_changed(is_intermediate)?,
            }
        }
        Ok(())
    }

    /// The host's offset is about to change.
    pub fn on_view_changing(&mut self) -> Result<()> {
        if self.is_within_scroll_change || self.is_within_arrange {
            return Ok(());
        }
        self.balance(false)?;
        if self.items_state != ItemsState::LostFocus && !self.has_focus {
            self.push_event(SelectorEvent::FocusRequested);
        }
        if self.items_state == ItemsState::Expanded {
            self.transition_items_state(ItemsState::ManipulationInProgress);
            self.push_event(SelectorEvent::AutomationExpandCollapseChanged);
        }
        Ok(())
    }

    /// The host's offset changed. Only settled (non-intermediate) changes do any work.
    pub fn on_view_changed(&mut self, is_intermediate: bool) -> Result<()> {
        if is_intermediate {
            return Ok(());
        }
        if self.is_within_scroll_change || self.is_within_arrange {
            if self.is_within_scroll_change {
                // Echo of our own write, delivered synchronously.
                self.skip_next_balance = false;
            }
            return Ok(());
        }
        self.balance(true)?;
        match self.items_state {
            ItemsState::ManipulationInProgress => {
                self.transition_items_state(ItemsState::Expanded);
            }
            ItemsState::LostFocus => self.expand_if_necessary(),
            ItemsState::Expanded => {}
        }
        self.skip_selection_change_until_final_view_changed = false;
        Ok(())
    }

    fn is_template_and_items_attached(&self) -> bool {
        self.host.is_some() && self.panel.is_some() && !self.items.is_empty()
    }

    fn host_offset(&self) -> f64 {
        self.host
            .as_ref()
            .map_or(self.unpadded_extent_top, |host| host.vertical_offset())
    }

    fn measure_extent(&mut self) {
        if let Some(host) = self.host.as_ref() {
            self.unpadded_extent_top = host.vertical_offset();
            self.unpadded_extent_bottom = self.unpadded_extent_top + host.viewport_height();
        }
    }

    fn invalidate_geometry(&mut self) -> Result<()> {
        lsdebug!(
            should_loop = self.options.should_loop,
            item_height = self.options.item_height,
            "invalidate_geometry"
        );
        self.clear_all_items();
        self.is_sized = false;
        self.is_setup_pending = true;
        self.balance(false)
    }

    /// Grows and shrinks the realized window so it covers the viewport plus half a viewport of
    /// padding on each side.
    ///
    /// `is_on_snap_point` is true once scrolling has settled; only then may the scroll position
    /// be recentred.
    pub(crate) fn balance(&mut self, is_on_snap_point: bool) -> Result<()> {
        if self.is_within_balance {
            lstrace!("balance: reentrant call ignored");
            return Ok(());
        }
        if !self.is_template_and_items_attached() {
            return Ok(());
        }
        if self.skip_next_balance {
            self.skip_next_balance = false;
            lstrace!("balance: skipped");
            return Ok(());
        }
        self.measure_extent();
        let viewport = self.unpadded_extent_bottom - self.unpadded_extent_top;
        if viewport > self.options.max_viewport_extent {
            lswarn!(viewport, "balance: viewport exceeds the maximum extent");
            return Ok(());
        }

        self.is_within_balance = true;
        let result = self.balance_window(is_on_snap_point);
        self.is_within_balance = false;
        result
    }

    fn balance_window(&mut self, is_on_snap_point: bool) -> Result<()> {
        self.ensure_setup()?;
        if !self.is_sized || self.is_setup_pending {
            return Ok(());
        }

        let mut stats = BalanceStats::default();
        if is_on_snap_point {
            stats.normalized = self.normalize()?;
        }

        let h = self.scaled_item_height;
        let half_viewport = (self.unpadded_extent_bottom - self.unpadded_extent_top) / 2.0;
        let padded_top = self.unpadded_extent_top - half_viewport;
        let padded_bottom = self.unpadded_extent_bottom + half_viewport;
        let (max_top_idx, max_bottom_idx) = self.maximum_add_index_position();

        // The one pixel of slack keeps an item sitting exactly on the padded edge from being
        // trimmed and re-added in the same pass.
        while !self.realized.is_empty() && self.realized_top < padded_top + 1.0 - h {
            self.trim(ListEnd::Head);
            stats.head_trim += 1;
        }
        while !self.realized.is_empty() && self.realized_bottom > padded_bottom - 1.0 + h {
            self.trim(ListEnd::Tail);
            stats.tail_trim += 1;
        }
        if self.realized.is_empty() {
            self.reanchor_empty_window(padded_top, max_top_idx, max_bottom_idx);
        }
        while self.realized_top > padded_top && self.realized_top_idx > max_top_idx {
            self.add(ListEnd::Head)?;
            stats.head_add += 1;
        }
        while self.realized_bottom < padded_bottom && self.realized_bottom_idx < max_bottom_idx {
            self.add(ListEnd::Tail)?;
            stats.tail_add += 1;
        }

        lstrace!(
            head_add = stats.head_add,
            head_trim = stats.head_trim,
            tail_add = stats.tail_add,
            tail_trim = stats.tail_trim,
            normalized = stats.normalized,
            top = self.realized_top_idx,
            bottom = self.realized_bottom_idx,
            realized = self.realized.len(),
            recycled = self.pool.recycled_len(),
            "balance"
        );
        self.debug_assert_window();
        self.last_balance = stats;
        if stats.changed_structure() {
            self.push_event(SelectorEvent::AutomationStructureChanged);
        }

        if is_on_snap_point || self.items_state == ItemsState::Expanded {
            self.update_selected_item(false);
        }
        Ok(())
    }

    /// Visual index bounds the window may grow to.
    fn maximum_add_index_position(&self) -> (i64, i64) {
        if self.options.should_loop {
            (i64::MIN, i64::MAX)
        } else {
            let last = i64::try_from(self.items.len()).unwrap_or(i64::MAX) - 1;
            (0, last)
        }
    }

    /// Moves an empty window to the slot at the padded viewport top, so a long jump does not
    /// realize every item in between.
    fn reanchor_empty_window(&mut self, padded_top: f64, max_top_idx: i64, max_bottom_idx: i64) {
        let h = self.scaled_item_height;
        if h <= 0.0 {
            return;
        }
        let lo = max_top_idx.saturating_sub(self.realized_top_idx);
        let hi = max_bottom_idx
            .saturating_add(1)
            .saturating_sub(self.realized_top_idx);
        let slots = (((padded_top - self.realized_top) / h).floor() as i64).clamp(lo, hi);
        if slots == 0 {
            return;
        }
        lstrace!(slots, "balance: re-anchoring empty window");
        self.realized_top += slots as f64 * h;
        self.realized_bottom = self.realized_top;
        self.realized_top_idx += slots;
        self.realized_bottom_idx = self.realized_top_idx - 1;
    }

    /// Recentres a looping panel on its midpoint once the viewport has drifted too far, shifting
    /// the realized window by the same whole number of items so nothing visibly moves.
    fn normalize(&mut self) -> Result<bool> {
        if !self.options.should_loop {
            return Ok(false);
        }
        let midpoint = self.panel_midpoint_scroll_position;
        if (self.unpadded_extent_top - midpoint).abs() <= self.options.normalize_threshold {
            return Ok(false);
        }
        let delta = midpoint - self.unpadded_extent_top;
        let steps = delta / self.scaled_item_height;
        if (steps - steps.round()).abs() > 0.001 {
            // Not resting on a snap point.
            lstrace!(delta, "normalize: off snap point");
            return Ok(false);
        }

        lsdebug!(delta, "normalize");
        self.realized_top += delta;
        self.realized_bottom += delta;
        self.unpadded_extent_top += delta;
        self.unpadded_extent_bottom += delta;
        self.shift_children(delta);
        self.set_scroll_position(midpoint, false)?;
        Ok(true)
    }

    /// Computes geometry and applies the initial scroll position once a host is available.
    fn ensure_setup(&mut self) -> Result<()> {
        if !self.is_sized {
            if self.options.item_height == 0 {
                lstrace!("ensure_setup: item height not configured");
                return Ok(());
            }
            self.item_height = f64::from(self.options.item_height);
            self.scaled_item_height = self.item_height;
            self.item_width = if self.options.item_width == 0 {
                self.item_width_fallback
            } else {
                f64::from(self.options.item_width)
            };
            self.clear_all_items();
            self.size_panel();
            self.is_sized = true;
        }

        if !(self.is_scroll_host_initialized && self.is_setup_pending) {
            return Ok(());
        }

        let h = self.scaled_item_height;
        let count = self.items.len();
        let viewport = self.unpadded_extent_bottom - self.unpadded_extent_top;
        self.clear_all_items();
        self.setup_snap_points(0.0, h);

        if self.selected_index >= count {
            self.selected_index = count.saturating_sub(1);
        }
        let selected = i64::try_from(self.selected_index).unwrap_or(i64::MAX);
        let new_scroll_position = if self.options.should_loop {
            let start = self.panel_size / 2.0;
            self.panel_midpoint_scroll_position = start - viewport / 2.0 + h / 2.0;
            self.realized_top = start;
            self.panel_midpoint_scroll_position
        } else {
            let start = (self.panel_size - count as f64 * h) / 2.0;
            self.panel_midpoint_scroll_position = start - viewport / 2.0 + h / 2.0;
            self.realized_top = start + selected as f64 * h;
            self.panel_midpoint_scroll_position + selected as f64 * h
        };
        self.realized_bottom = self.realized_top;
        self.realized_top_idx = selected;
        self.realized_bottom_idx = selected - 1;
        self.realized_midpoint_idx = selected;

        let current = self.unpadded_extent_top;
        lsdebug!(
            panel_size = self.panel_size,
            new_scroll_position,
            selected,
            "ensure_setup"
        );
        if (current - new_scroll_position).abs() > 1.0 {
            self.set_scroll_position(new_scroll_position, false)?;
            let delta = new_scroll_position - current;
            self.unpadded_extent_top += delta;
            self.unpadded_extent_bottom += delta;
        }
        self.is_setup_pending = false;
        Ok(())
    }

    fn size_panel(&mut self) {
        let viewport = self.unpadded_extent_bottom - self.unpadded_extent_top;
        let h = self.scaled_item_height;
        self.panel_size = if self.options.should_loop {
            viewport + self.loop_panel_len(self.items.len()) as f64 * h
        } else {
            viewport + self.items.len().saturating_sub(1) as f64 * h + 1.0
        };
        if let Some(panel) = self.panel.as_mut() {
            panel.set_height(self.panel_size);
        }
        if let Some(host) = self.host.as_mut() {
            host.set_extent_height(self.panel_size);
        }
    }

    /// Length of a looping panel, in items. Always odd, and at least two full cycles so a move to
    /// the nearest copy of any item stays within the panel.
    fn loop_panel_len(&self, count: usize) -> usize {
        let configured = self.options.loop_panel_items as usize;
        configured.max(count.saturating_mul(2).saturating_add(1)) | 1
    }

    fn setup_snap_points(&mut self, offset: f64, size: f64) {
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        panel.set_offset_in_pixels(offset);
        panel.set_size_in_pixels(size);
        if panel.take_snap_points_changed() {
            self.push_event(SelectorEvent::SnapPointsChanged);
        }
    }

    fn trim(&mut self, end: ListEnd) {
        let h = self.scaled_item_height;
        let id = match end {
            ListEnd::Head => self.realized.pop_front(),
            ListEnd::Tail => self.realized.pop_back(),
        };
        let Some(id) = id else {
            return;
        };
        match end {
            ListEnd::Head => {
                self.realized_top += h;
                self.realized_top_idx += 1;
            }
            ListEnd::Tail => {
                self.realized_bottom -= h;
                self.realized_bottom_idx -= 1;
            }
        }
        self.recycle_item(id);
    }

    fn add(&mut self, end: ListEnd) -> Result<()> {
        let h = self.scaled_item_height;
        let (visual_index, top) = match end {
            ListEnd::Head => (self.realized_top_idx - 1, self.realized_top - h),
            ListEnd::Tail => (self.realized_bottom_idx + 1, self.realized_bottom),
        };
        let id = self.realize_item(visual_index)?;
        if let (Some(panel), Some(item)) = (self.panel.as_ref(), self.pool.get_mut(id)) {
            panel.set_position(item, top);
        }
        match end {
            ListEnd::Head => {
                self.realized.push_front(id);
                self.realized_top = top;
                self.realized_top_idx = visual_index;
            }
            ListEnd::Tail => {
                self.realized.push_back(id);
                self.realized_bottom = top + h;
                self.realized_bottom_idx = visual_index;
            }
        }
        Ok(())
    }

    /// Binds an item to `visual_index`: the accessibility-only item for that logical index if
    /// there is one, else a recycled item, else a new one.
    fn realize_item(&mut self, visual_index: i64) -> Result<ItemId> {
        let count = self.items.len();
        let logical = visual_to_logical(visual_index, count, self.options.should_loop)?;
        let id = match self.realized_for_ap.remove(&logical) {
            Some(id) => id,
            None => {
                let (id, acquired) = self.pool.acquire(self.item_width, self.item_height)?;
                if acquired == Acquired::New {
                    if let Some(panel) = self.panel.as_mut() {
                        panel.attach(id);
                    }
                }
                id
            }
        };
        self.pool.bind(id, visual_index, logical, count);
        if let Some(item) = self.pool.get_mut(id) {
            item.set_state(ItemVisualState::Expanded, false);
        }
        Ok(id)
    }

    fn recycle_item(&mut self, id: ItemId) {
        self.pool.recycle(id);
    }

    /// Moves every materialized item by `delta`, inspection-only items included.
    fn shift_children(&mut self, delta: f64) {
        for &id in &self.realized {
            if let Some(item) = self.pool.get_mut(id) {
                let top = item.top() + delta;
                item.place(top, 0.0);
            }
        }
        for &id in self.realized_for_ap.values() {
            if let Some(item) = self.pool.get_mut(id) {
                let top = item.top() + delta;
                item.place(top, RECYCLED_LEFT);
            }
        }
    }

    /// Recycles the window and every accessibility-only item, then rebases visual indexes so the
    /// empty window's midpoint slot shows the selected item.
    fn clear_all_items(&mut self) {
        let h = self.scaled_item_height;
        while let Some(id) = self.realized.pop_back() {
            self.recycle_item(id);
            self.realized_bottom -= h;
            self.realized_bottom_idx -= 1;
        }
        for id in core::mem::take(&mut self.realized_for_ap).into_values() {
            self.recycle_item(id);
        }
        if self.items.is_empty() {
            return;
        }
        let target = i64::try_from(self.selected_index).unwrap_or(i64::MAX);
        let delta = self.realized_midpoint_idx - target;
        self.realized_midpoint_idx -= delta;
        self.realized_top_idx -= delta;
        self.realized_bottom_idx -= delta;
    }

    fn debug_assert_window(&self) {
        debug_assert_eq!(
            self.realized.len() as i64,
            self.realized_bottom_idx - self.realized_top_idx + 1,
            "realized window has a gap"
        );
        debug_assert!(
            self.realized.iter().all(|&id| !self.pool.is_recycled(id)),
            "realized item is also in the recycle list"
        );
    }

    pub(crate) fn realized_at(&self, visual_index: i64) -> Option<ItemId> {
        if visual_index < self.realized_top_idx || visual_index > self.realized_bottom_idx {
            return None;
        }
        let pos = usize::try_from(visual_index - self.realized_top_idx).ok()?;
        self.realized.get(pos).copied()
    }

    /// Derives the selection from the item under the viewport centre.
    ///
    /// With `ignore_scrolling_state`, the logical selection is updated even while selection
    /// changes are being suppressed.
    pub(crate) fn update_selected_item(&mut self, ignore_scrolling_state: bool) {
        let count = self.items.len();
        let h = self.scaled_item_height;
        if count == 0 || h <= 0.0 {
            return;
        }
        let midpoint =
            (self.unpadded_extent_top + self.unpadded_extent_bottom) / 2.0 - self.realized_top;
        let mut new_idx = self.realized_top_idx + (midpoint / h).floor() as i64;
        if !self.options.should_loop {
            let last = i64::try_from(count).unwrap_or(i64::MAX) - 1;
            new_idx = new_idx.clamp(0, last);
        }

        self.update_visual_selected_item(self.realized_midpoint_idx, new_idx);
        self.realized_midpoint_idx = new_idx;

        if ignore_scrolling_state || !self.skip_selection_change_until_final_view_changed {
            let logical = positive_mod(new_idx, count);
            let old = self.selected_index;
            if logical != old {
                self.selected_index = logical;
                self.options.selected_index = logical;
                lsdebug!(old, new = logical, "selection changed");
                self.raise_selection_changed(old, logical);
                self.automation_raise_selection_changed();
            }
        }
    }

    fn update_visual_selected_item(&mut self, old_idx: i64, new_idx: i64) {
        let rest = if self.items_state == ItemsState::Expanded {
            ItemVisualState::Expanded
        } else {
            ItemVisualState::Normal
        };
        if let Some(id) = self.realized_at(old_idx) {
            if let Some(item) = self.pool.get_mut(id) {
                item.set_state(rest, true);
            }
        }
        if let Some(id) = self.realized_at(new_idx) {
            if let Some(item) = self.pool.get_mut(id) {
                item.set_state(ItemVisualState::Selected, true);
            }
        }
    }

    /// Moves the item set to `state` and restyles every realized item to match.
    pub(crate) fn transition_items_state(&mut self, state: ItemsState) {
        lstrace!(?state, "transition_items_state");
        self.items_state = state;
        let midpoint = self.realized_midpoint_idx;
        let mut visual_index = self.realized_top_idx;
        for &id in &self.realized {
            let next = match state {
                ItemsState::ManipulationInProgress => ItemVisualState::Expanded,
                _ if visual_index == midpoint => ItemVisualState::Selected,
                ItemsState::Expanded => ItemVisualState::Expanded,
                ItemsState::LostFocus => ItemVisualState::Normal,
            };
            if let Some(item) = self.pool.get_mut(id) {
                item.set_state(next, true);
            }
            visual_index += 1;
        }
    }

    pub(crate) fn expand_if_necessary(&mut self) {
        if self.items_state != ItemsState::Expanded {
            self.transition_items_state(ItemsState::Expanded);
        }
    }

    /// Writes the host's vertical offset.
    ///
    /// Arms `skip_next_balance` for the echo of this write. Non-animated writes deliver the echo
    /// synchronously, so the flag is already consumed on return unless the host refused the
    /// write; refused writes are replayed by the next arrange pass.
    pub(crate) fn set_scroll_position(&mut self, offset: f64, animate: bool) -> Result<()> {
        lstrace!(offset, animate, "set_scroll_position");
        self.skip_next_balance = true;
        let Some(host) = self.host.as_mut() else {
            self.delay_scroll_position = Some(offset);
            return Ok(());
        };
        if animate {
            if !host.change_view(offset, true) {
                self.delay_scroll_position = Some(offset);
            }
            return Ok(());
        }

        self.is_within_scroll_change = true;
        if !host.change_view(offset, false) {
            lsdebug!(offset, "set_scroll_position: host refused; delaying");
            self.delay_scroll_position = Some(offset);
        }
        let result = self.process_host_events();
        self.is_within_scroll_change = false;
        result
    }

    fn raise_selection_changed(&mut self, old_index: usize, new_index: usize) {
        let change = SelectionChanged {
            old_index,
            new_index,
            old_item: self.items.get(old_index).cloned(),
            new_item: self.items.get(new_index).cloned(),
        };
        if let Some(callback) = self.options.on_selection_changed.as_ref() {
            callback(&change);
        }
        self.push_event(SelectorEvent::SelectionChanged(change));
    }

    pub(crate) fn push_event(&mut self, event: SelectorEvent<T>) {
        self.events.push(event);
    }

    /// Top edge a realized item at `visual_index` would have.
    pub(crate) fn slot_top(&self, visual_index: i64) -> f64 {
        self.realized_top + (visual_index - self.realized_top_idx) as f64 * self.scaled_item_height
    }

    pub(crate) fn park_offscreen(&mut self, id: ItemId, top: f64) {
        if let Some(item) = self.pool.get_mut(id) {
            item.place(top, RECYCLED_LEFT);
        }
    }
}
