use alloc::collections::BTreeMap;
use alloc::string::ToString;
use alloc::vec::Vec;
use core::fmt::Display;

use looping_selector::{
    ItemsState, LoopingSelector, ScrollAmount, ScrollHost, SelectorError, SelectorEvent,
};

use crate::{AutomationError, ItemAutomationPeer, Result};

/// Scroll percent reported for an axis that cannot scroll.
pub const NO_SCROLL: f64 = -1.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExpandCollapseState {
    Collapsed,
    Expanded,
}

/// Notifications for an assistive technology client, translated from [`SelectorEvent`]s.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutomationNotification {
    ElementSelected { logical_index: usize },
    StructureChanged,
    ExpandCollapseStateChanged,
    VerticalScrollPercentChanged { old: f64, new: f64 },
}

/// Accessibility peer for the selector itself.
///
/// Holds no selector state: every operation takes the selector it describes. Item peers are
/// created lazily per logical index and live until released or until the item collection is
/// replaced.
#[derive(Clone, Debug, Default)]
pub struct SelectorAutomationPeer {
    peers: BTreeMap<usize, ItemAutomationPeer>,
}

impl SelectorAutomationPeer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn peer_count(&self) -> usize {
        self.peers.len()
    }

    /// Returns the peer for `logical_index`, creating it on first use.
    pub fn peer_for<T: Clone, H: ScrollHost>(
        &mut self,
        selector: &LoopingSelector<T, H>,
        logical_index: usize,
    ) -> Result<ItemAutomationPeer> {
        let count = selector.item_count();
        if logical_index >= count {
            return Err(SelectorError::InvalidIndex {
                index: i64::try_from(logical_index).unwrap_or(i64::MAX),
                count,
            }
            .into());
        }
        let peer = *self.peers.entry(logical_index).or_insert_with(|| {
            atrace!(logical_index, "peer created");
            ItemAutomationPeer::new(logical_index)
        });
        Ok(peer)
    }

    /// Forgets the peer for `logical_index` (the peer is being torn down).
    pub fn release_peer(&mut self, logical_index: usize) -> Option<ItemAutomationPeer> {
        self.peers.remove(&logical_index)
    }

    pub fn clear_peer_map(&mut self) {
        adebug!(peers = self.peers.len(), "clear_peer_map");
        self.peers.clear();
    }

    /// Peers for the realized window, one per logical item.
    pub fn children<T: Clone, H: ScrollHost>(
        &mut self,
        selector: &LoopingSelector<T, H>,
    ) -> Result<Vec<ItemAutomationPeer>> {
        selector
            .automation_realized_items()
            .into_iter()
            .map(|logical_index| self.peer_for(selector, logical_index))
            .collect()
    }

    pub fn can_select_multiple(&self) -> bool {
        false
    }

    pub fn is_selection_required(&self) -> bool {
        true
    }

    pub fn selection<T: Clone, H: ScrollHost>(
        &mut self,
        selector: &LoopingSelector<T, H>,
    ) -> Result<Vec<ItemAutomationPeer>> {
        if selector.item_count() == 0 {
            return Ok(Vec::new());
        }
        Ok(alloc::vec![self.peer_for(selector, selector.selected_index())?])
    }

    pub fn expand_collapse_state<T: Clone, H: ScrollHost>(
        &self,
        selector: &LoopingSelector<T, H>,
    ) -> ExpandCollapseState {
        if selector.items_state() == ItemsState::Expanded {
            ExpandCollapseState::Expanded
        } else {
            ExpandCollapseState::Collapsed
        }
    }

    pub fn horizontally_scrollable(&self) -> bool {
        false
    }

    pub fn horizontal_scroll_percent(&self) -> f64 {
        NO_SCROLL
    }

    pub fn horizontal_view_size(&self) -> f64 {
        100.0
    }

    pub fn vertically_scrollable<T: Clone, H: ScrollHost>(
        &self,
        selector: &LoopingSelector<T, H>,
    ) -> bool {
        selector.automation_is_scrollable()
    }

    pub fn vertical_scroll_percent<T: Clone, H: ScrollHost>(
        &self,
        selector: &LoopingSelector<T, H>,
    ) -> f64 {
        selector.automation_scroll_percent()
    }

    pub fn vertical_view_size<T: Clone, H: ScrollHost>(
        &self,
        selector: &LoopingSelector<T, H>,
    ) -> f64 {
        selector.automation_scroll_view_size()
    }

    /// `horizontal` must be [`NO_SCROLL`].
    pub fn set_scroll_percent<T: Clone, H: ScrollHost>(
        &self,
        selector: &mut LoopingSelector<T, H>,
        horizontal: f64,
        vertical: f64,
    ) -> Result<()> {
        if horizontal != NO_SCROLL {
            return Err(AutomationError::InvalidOperation("horizontal scrolling"));
        }
        if vertical == NO_SCROLL {
            return Ok(());
        }
        Ok(selector.automation_set_scroll_percent(vertical)?)
    }

    /// `horizontal` must be [`ScrollAmount::NoAmount`].
    pub fn scroll<T: Clone, H: ScrollHost>(
        &self,
        selector: &mut LoopingSelector<T, H>,
        horizontal: ScrollAmount,
        vertical: ScrollAmount,
    ) -> Result<()> {
        if horizontal != ScrollAmount::NoAmount {
            return Err(AutomationError::InvalidOperation("horizontal scrolling"));
        }
        Ok(selector.automation_scroll(vertical)?)
    }

    /// First item whose `Display` text equals `name`.
    pub fn find_by_name<T, H>(
        &mut self,
        selector: &LoopingSelector<T, H>,
        name: &str,
    ) -> Result<Option<ItemAutomationPeer>>
    where
        T: Clone + Display,
        H: ScrollHost,
    {
        let Some(logical_index) = selector
            .items()
            .iter()
            .position(|item| item.to_string() == name)
        else {
            return Ok(None);
        };
        self.peer_for(selector, logical_index).map(Some)
    }

    /// Applies engine events to the peer map and translates them for the client.
    ///
    /// [`SelectorEvent::PeerMapInvalidated`] drops every item peer.
    pub fn handle_events<T>(&mut self, events: &[SelectorEvent<T>]) -> Vec<AutomationNotification> {
        let mut out = Vec::new();
        for event in events {
            match event {
                SelectorEvent::PeerMapInvalidated => self.clear_peer_map(),
                SelectorEvent::SelectionChanged(change) => {
                    out.push(AutomationNotification::ElementSelected {
                        logical_index: change.new_index,
                    });
                }
                SelectorEvent::AutomationStructureChanged => {
                    out.push(AutomationNotification::StructureChanged);
                }
                SelectorEvent::AutomationExpandCollapseChanged => {
                    out.push(AutomationNotification::ExpandCollapseStateChanged);
                }
                SelectorEvent::AutomationScrollPercentChanged { old, new } => {
                    out.push(AutomationNotification::VerticalScrollPercentChanged {
                        old: *old,
                        new: *new,
                    });
                }
                _ => {}
            }
        }
        out
    }
}
