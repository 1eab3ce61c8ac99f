//! Keyboard, pointer, and focus handling.

use super::LoopingSelector;
use crate::host::ScrollHost;
use crate::item::ItemInput;
use crate::{
    ControlVisualState, ElementSoundKind, ItemId, ItemsState, Key, Modifiers, PointerDeviceType,
    Result, SelectorEvent,
};

impl<T: Clone, H: ScrollHost> LoopingSelector<T, H> {
    /// Handles a key press. Returns whether the key was consumed.
    ///
    /// Keys are ignored while the menu (Alt) modifier is held.
    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers) -> Result<bool> {
        if modifiers.menu {
            return Ok(false);
        }
        match key {
            Key::Up => self.select_previous_item(),
            Key::Down => self.select_next_item(),
            Key::PageUp | Key::GamepadLeftTrigger => self.handle_page_up_key(),
            Key::PageDown | Key::GamepadRightTrigger => self.handle_page_down_key(),
            Key::Home => self.handle_home_key(),
            Key::End => self.handle_end_key(),
            Key::Other => Ok(false),
        }
    }

    pub fn on_up_button_clicked(&mut self) -> Result<bool> {
        self.select_previous_item()
    }

    pub fn on_down_button_clicked(&mut self) -> Result<bool> {
        self.select_next_item()
    }

    /// Animates one item up. Blocked at the first item when not looping.
    pub fn select_previous_item(&mut self) -> Result<bool> {
        if !self.is_set_up() {
            return Ok(false);
        }
        if !self.options.should_loop && self.realized_midpoint_idx <= 0 {
            return Ok(false);
        }
        let target = self.unpadded_extent_top - self.scaled_item_height;
        self.set_scroll_position(target, true)?;
        self.push_event(SelectorEvent::InteractionSound(ElementSoundKind::Focus));
        Ok(true)
    }

    /// Animates one item down. Blocked at the last item when not looping.
    pub fn select_next_item(&mut self) -> Result<bool> {
        if !self.is_set_up() {
            return Ok(false);
        }
        let last = i64::try_from(self.items.len()).unwrap_or(i64::MAX) - 1;
        if !self.options.should_loop && self.realized_midpoint_idx >= last {
            return Ok(false);
        }
        let target = self.unpadded_extent_top + self.scaled_item_height;
        self.set_scroll_position(target, true)?;
        self.push_event(SelectorEvent::InteractionSound(ElementSoundKind::Focus));
        Ok(true)
    }

    fn handle_page_up_key(&mut self) -> Result<bool> {
        self.page(-1.0)
    }

    fn handle_page_down_key(&mut self) -> Result<bool> {
        self.page(1.0)
    }

    fn page(&mut self, direction: f64) -> Result<bool> {
        if !self.is_set_up() {
            return Ok(false);
        }
        let half_viewport = (self.unpadded_extent_bottom - self.unpadded_extent_top) / 2.0;
        self.set_scroll_position(self.unpadded_extent_top + direction * half_viewport, true)?;
        self.push_event(SelectorEvent::InteractionSound(ElementSoundKind::Focus));
        Ok(true)
    }

    fn handle_home_key(&mut self) -> Result<bool> {
        self.jump_to_logical(0)
    }

    fn handle_end_key(&mut self) -> Result<bool> {
        let last = self.items.len().saturating_sub(1);
        self.jump_to_logical(last)
    }

    /// Moves the nearest copy of `logical_index` to the centre without animation.
    fn jump_to_logical(&mut self, logical_index: usize) -> Result<bool> {
        if !self.is_set_up() {
            return Ok(false);
        }
        let target = self.visual_index_for_logical(logical_index);
        let pixels = (target - self.realized_midpoint_idx) as f64 * self.scaled_item_height;
        lstrace!(logical_index, pixels, "jump_to_logical");
        self.set_scroll_position(self.unpadded_extent_top + pixels, false)?;
        self.balance(true)?;
        self.push_event(SelectorEvent::InteractionSound(ElementSoundKind::Focus));
        Ok(true)
    }

    pub fn on_pointer_entered(&mut self, device: PointerDeviceType) {
        if device == PointerDeviceType::Touch {
            return;
        }
        self.set_control_visual_state(ControlVisualState::PointerOver);
    }

    pub fn on_pointer_exited(&mut self) {
        self.set_control_visual_state(ControlVisualState::Normal);
        self.transition_items_state(self.items_state);
    }

    /// A press after focus was lost mid-manipulation takes the manipulation back.
    pub fn on_pointer_pressed(&mut self) {
        if self.items_state == ItemsState::LostFocus {
            self.transition_items_state(ItemsState::ManipulationInProgress);
        }
    }

    pub fn on_got_focus(&mut self) {
        self.has_focus = true;
    }

    /// `still_has_focus` is true when focus only moved within the control.
    pub fn on_lost_focus(&mut self, still_has_focus: bool) {
        let had_focus = self.has_focus;
        self.has_focus = still_has_focus;
        if !had_focus || still_has_focus {
            return;
        }
        if self.items_state == ItemsState::ManipulationInProgress {
            // Collapse once the running manipulation settles.
            self.items_state = ItemsState::LostFocus;
        } else {
            self.expand_if_necessary();
        }
    }

    /// Tapping an item other than the selected one scrolls it to the centre.
    pub fn on_item_tapped(&mut self, id: ItemId) -> Result<()> {
        if self.items_state != ItemsState::Expanded {
            return Ok(());
        }
        let Some(item) = self.pool.get(id) else {
            return Ok(());
        };
        let Some(logical) = item.content() else {
            return Ok(());
        };
        if logical == self.selected_index {
            self.expand_if_necessary();
            return Ok(());
        }
        let pixels = (item.visual_index() - self.realized_midpoint_idx) as f64 * self.scaled_item_height;
        lstrace!(logical, pixels, "on_item_tapped");
        self.set_scroll_position(self.unpadded_extent_top + pixels, true)
    }

    pub fn on_item_pointer_entered(&mut self, id: ItemId, device: PointerDeviceType) {
        if device != PointerDeviceType::Touch {
            self.apply_item_input(id, ItemInput::PointerEntered);
        }
    }

    pub fn on_item_pointer_pressed(&mut self, id: ItemId) {
        self.apply_item_input(id, ItemInput::PointerPressed);
    }

    pub fn on_item_pointer_released(&mut self, id: ItemId) {
        self.apply_item_input(id, ItemInput::PointerReleased);
    }

    pub fn on_item_pointer_exited(&mut self, id: ItemId) {
        self.apply_item_input(id, ItemInput::PointerExited);
    }

    fn apply_item_input(&mut self, id: ItemId, input: ItemInput) {
        if let Some(item) = self.pool.get_mut(id) {
            if !item.is_recycled() {
                item.apply(input, true);
            }
        }
    }

    fn set_control_visual_state(&mut self, state: ControlVisualState) {
        if self.control_visual_state != state {
            self.control_visual_state = state;
            self.push_event(SelectorEvent::ControlVisualState(state));
        }
    }
}
