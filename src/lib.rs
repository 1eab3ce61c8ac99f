//! A headless looping selector engine.
//!
//! A looping selector presents a finite collection as an endlessly wrapping wheel (think minute or
//! month pickers). Only the handful of items around the viewport are ever materialized: the
//! engine keeps a small realized window of pooled item visuals, recycles them as they scroll out,
//! and periodically recentres the scroll position so a panel of finite height can scroll forever.
//!
//! It is UI-agnostic. An adapter is expected to provide:
//! - a [`ScrollHost`]: viewport height, vertical offset, and view-change notifications
//! - layout passes ([`LoopingSelector::arrange`])
//! - input (keys, pointer, focus)
//!
//! and to render items from [`LoopingSelector::realized_items`]. Accessibility peers live in the
//! `looping-selector-a11y` crate.
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod error;
mod host;
mod index;
mod item;
mod options;
mod panel;
mod pool;
mod selector;
mod state;
mod types;

#[cfg(test)]
mod tests;

pub use error::{Result, SelectorError};
pub use host::{MemoryScrollHost, ScrollHost, ViewEvent};
pub use index::{cycle_start, nearest_visual_index, positive_mod, visual_to_logical};
pub use item::{ItemInput, ItemVisualState, RECYCLED_LEFT, SelectorItem};
pub use options::{SelectionChangedCallback, SelectorOptions};
pub use panel::LoopingPanel;
pub use pool::{ItemPool, PoolStats};
pub use selector::LoopingSelector;
pub use state::{SelectorState, ViewportEdges};
pub use types::{
    BalanceStats, ControlVisualState, ElementSoundKind, ItemId, ItemsState, Key, Modifiers,
    Orientation, PointerDeviceType, ScrollAmount, SelectionChanged, SelectorEvent, SnapPoints,
    SnapPointsAlignment,
};
