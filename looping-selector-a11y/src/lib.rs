//! Accessibility peers for the `looping-selector` crate.
//!
//! The engine only exposes automation entry points and queues automation events. This crate
//! turns them into a peer tree an adapter can hand to its platform's accessibility API:
//!
//! - [`SelectorAutomationPeer`]: selection, scroll and expand/collapse patterns for the list
//! - [`ItemAutomationPeer`]: one per logical item, whether or not it is materialized
//!
//! Peers hold no references into the selector. Every query takes the selector it describes.
#![forbid(unsafe_code)]

extern crate alloc;

#[macro_use]
mod macros;

mod error;
mod item_peer;
mod peer;


pub use error::{AutomationError, Result};
pub use item_peer::{BoundingBox, ItemAutomationPeer};
pub use peer::{AutomationNotification, ExpandCollapseState, NO_SCROLL, SelectorAutomationPeer};
