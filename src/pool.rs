use alloc::vec::Vec;

use crate::item::{RECYCLED_LEFT, SelectorItem};
use crate::{ItemId, Result, SelectorError};

/// Lifecycle counters for the item pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PoolStats {
    /// Items currently bound to a logical item.
    pub items_in_use: usize,
    /// Items parked in the recycle list.
    pub items_in_pool: usize,
    /// Items ever allocated.
    pub total_created: usize,
    /// Acquisitions served from the recycle list.
    pub reuse_count: usize,
}

/// Whether [`ItemPool::acquire`] allocated a new item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Acquired {
    New,
    Reused,
}

/// Owns every item visual the selector ever created.
///
/// Items are addressed by [`ItemId`] and never freed while the selector lives; released items go
/// to a LIFO recycle list instead.
#[derive(Clone, Debug, Default)]
pub struct ItemPool {
    items: Vec<SelectorItem>,
    recycled: Vec<ItemId>,
    reuse_count: usize,
}

impl ItemPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: ItemId) -> Option<&SelectorItem> {
        self.items.get(id.0)
    }

    pub(crate) fn get_mut(&mut self, id: ItemId) -> Option<&mut SelectorItem> {
        self.items.get_mut(id.0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn recycled_len(&self) -> usize {
        self.recycled.len()
    }

    pub fn is_recycled(&self, id: ItemId) -> bool {
        self.recycled.contains(&id)
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            items_in_use: self.items.len() - self.recycled.len(),
            items_in_pool: self.recycled.len(),
            total_created: self.items.len(),
            reuse_count: self.reuse_count,
        }
    }

    /// Takes the most recently recycled item, or allocates a new one.
    pub(crate) fn acquire(&mut self, width: f64, height: f64) -> Result<(ItemId, Acquired)> {
        if let Some(id) = self.recycled.pop() {
            self.reuse_count = self.reuse_count.saturating_add(1);
            if let Some(item) = self.items.get_mut(id.0) {
                item.set_width(width);
                item.set_height(height);
            }
            return Ok((id, Acquired::Reused));
        }

        self.items
            .try_reserve(1)
            .map_err(|_| SelectorError::Allocation)?;
        self.recycled
            .try_reserve(self.items.len() + 1 - self.recycled.len())
            .map_err(|_| SelectorError::Allocation)?;
        let id = ItemId(self.items.len());
        self.items.push(SelectorItem::new(width, height));
        Ok((id, Acquired::New))
    }

    /// Binds `id` to the logical item shown at `visual_index`.
    pub(crate) fn bind(&mut self, id: ItemId, visual_index: i64, logical_index: usize, count: usize) {
        if let Some(item) = self.items.get_mut(id.0) {
            item.bind(visual_index, logical_index, count);
        }
    }

    /// Unbinds `id`, parks it off-screen, and makes it available to [`Self::acquire`].
    pub(crate) fn recycle(&mut self, id: ItemId) {
        debug_assert!(
            !self.recycled.contains(&id),
            "ItemPool: item {id:?} recycled twice"
        );
        let Some(item) = self.items.get_mut(id.0) else {
            return;
        };
        item.unbind();
        let top = item.top();
        item.place(top, RECYCLED_LEFT);
        // Capacity was reserved when the item was allocated.
        self.recycled.push(id);
    }

    /// Drops every item. Used when the selector is torn down.
    pub(crate) fn drain(&mut self) -> usize {
        let n = self.items.len();
        self.items.clear();
        self.recycled.clear();
        n
    }
}
