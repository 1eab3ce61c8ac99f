use crate::ItemsState;

/// A lightweight, serializable snapshot of the selector's bookkeeping.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectorState {
    /// Inclusive visual index bounds of the realized window. `top > bottom` when empty.
    pub realized_top_idx: i64,
    pub realized_bottom_idx: i64,
    pub midpoint_idx: i64,
    pub selected_index: usize,
    pub items_state: ItemsState,
    pub viewport: ViewportEdges,
    pub realized: ViewportEdges,
}

/// Top/bottom pixel edges along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ViewportEdges {
    pub top: f64,
    pub bottom: f64,
}

impl ViewportEdges {
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn midpoint(&self) -> f64 {
        (self.top + self.bottom) / 2.0
    }
}
