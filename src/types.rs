/// Handle to an item visual owned by the item pool.
///
/// Items never hold a reference back to the selector; everything they need is looked up through
/// this handle in the selector's tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Presentation state of the whole item set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemsState {
    /// A scroll gesture or animation is running; no item is highlighted.
    ManipulationInProgress,
    /// Idle; the midpoint item shows as selected.
    Expanded,
    /// Focus left during a manipulation; collapse once it settles.
    LostFocus,
}

/// Which end of the realized window an operation applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListEnd {
    Head,
    Tail,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    Up,
    Down,
    PageUp,
    PageDown,
    Home,
    End,
    GamepadLeftTrigger,
    GamepadRightTrigger,
    Other,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    /// Alt. Key navigation is ignored while it is held.
    pub menu: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerDeviceType {
    Touch,
    Pen,
    Mouse,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollAmount {
    LargeDecrement,
    SmallDecrement,
    NoAmount,
    LargeIncrement,
    SmallIncrement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementSoundKind {
    Focus,
}

/// Visual state of the control itself (not of its items).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlVisualState {
    #[default]
    Normal,
    PointerOver,
}

impl ControlVisualState {
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::PointerOver => "PointerOver",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SnapPointsAlignment {
    Near,
    Center,
    Far,
}

/// A regular grid of snap points: `offset + k * spacing`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SnapPoints {
    pub offset: f64,
    pub spacing: f64,
}

/// Old and new selection, raised when the logical selected index changes.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionChanged<T> {
    pub old_index: usize,
    pub new_index: usize,
    pub old_item: Option<T>,
    pub new_item: Option<T>,
}

/// Notifications queued by the selector for its adapter and accessibility layer.
#[derive(Clone, Debug, PartialEq)]
pub enum SelectorEvent<T> {
    SelectionChanged(SelectionChanged<T>),
    /// The selected item changed for assistive technology purposes.
    AutomationSelectionChanged,
    /// Items were realized or trimmed.
    AutomationStructureChanged,
    /// The items went from their collapsed to their expanded treatment.
    AutomationExpandCollapseChanged,
    AutomationScrollPercentChanged { old: f64, new: f64 },
    /// The item collection was replaced; accessibility peers are stale.
    PeerMapInvalidated,
    SnapPointsChanged,
    InteractionSound(ElementSoundKind),
    /// The selector wants programmatic focus.
    FocusRequested,
    ControlVisualState(ControlVisualState),
}

/// Work done by a single balance pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BalanceStats {
    pub head_add: u32,
    pub head_trim: u32,
    pub tail_add: u32,
    pub tail_trim: u32,
    /// Whether the pass recentred the scroll position.
    pub normalized: bool,
}

impl BalanceStats {
    pub fn changed_structure(&self) -> bool {
        self.head_add > 0 || self.head_trim > 0 || self.tail_add > 0 || self.tail_trim > 0
    }
}
