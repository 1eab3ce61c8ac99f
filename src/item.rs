/// Horizontal offset used to park recycled items outside the viewport.
///
/// Recycled items stay attached to the panel; some scroll hosts misbehave when children are added
/// or removed during a gesture.
pub const RECYCLED_LEFT: f64 = -10_000.0;

/// Per-item visual state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemVisualState {
    #[default]
    Normal,
    Expanded,
    Selected,
    PointerOver,
    Pressed,
}

/// Inputs that drive [`ItemVisualState::next`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemInput {
    /// The selector assigns a resting state (Normal, Expanded, or Selected).
    Assign(ItemVisualState),
    PointerEntered,
    PointerPressed,
    PointerReleased,
    PointerExited,
}

impl ItemVisualState {
    /// Visual state name understood by item templates.
    pub fn name(self) -> &'static str {
        match self {
            Self::Normal => "Normal",
            Self::Expanded => "Expanded",
            Self::Selected => "Selected",
            Self::PointerOver => "PointerOver",
            Self::Pressed => "Pressed",
        }
    }

    /// Transition table. `rest` is the last state assigned by the selector and is what pointer
    /// states fall back to.
    pub fn next(self, rest: ItemVisualState, input: ItemInput) -> ItemVisualState {
        use ItemVisualState::*;
        match (self, input) {
            (_, ItemInput::Assign(state)) => state,
            (Normal | Expanded, ItemInput::PointerEntered) => PointerOver,
            (Normal | Expanded | PointerOver, ItemInput::PointerPressed) => Pressed,
            (Pressed, ItemInput::PointerReleased) => PointerOver,
            (PointerOver | Pressed, ItemInput::PointerExited) => rest,
            (state, _) => state,
        }
    }
}

/// A materialized item visual.
///
/// Lifetime is governed by the item pool alone: an item is created once, then moves between the
/// realized window, the accessibility-only map, and the recycle list.
#[derive(Clone, Debug)]
pub struct SelectorItem {
    visual_index: i64,
    content: Option<usize>,
    position_in_set: usize,
    size_of_set: usize,
    top: f64,
    left: f64,
    width: f64,
    height: f64,
    state: ItemVisualState,
    rest_state: ItemVisualState,
    use_transitions: bool,
}

impl SelectorItem {
    pub(crate) fn new(width: f64, height: f64) -> Self {
        Self {
            visual_index: 0,
            content: None,
            position_in_set: 0,
            size_of_set: 0,
            top: 0.0,
            left: 0.0,
            width,
            height,
            state: ItemVisualState::Normal,
            rest_state: ItemVisualState::Normal,
            use_transitions: false,
        }
    }

    pub fn visual_index(&self) -> i64 {
        self.visual_index
    }

    /// Logical index of the bound item, `None` while recycled.
    pub fn content(&self) -> Option<usize> {
        self.content
    }

    /// 1-based position for assistive technology ("1 of 60").
    pub fn position_in_set(&self) -> usize {
        self.position_in_set
    }

    pub fn size_of_set(&self) -> usize {
        self.size_of_set
    }

    pub fn top(&self) -> f64 {
        self.top
    }

    pub fn left(&self) -> f64 {
        self.left
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn state(&self) -> ItemVisualState {
        self.state
    }

    /// Whether the last state change asked for animated transitions.
    pub fn use_transitions(&self) -> bool {
        self.use_transitions
    }

    pub fn is_recycled(&self) -> bool {
        self.content.is_none()
    }

    pub(crate) fn bind(&mut self, visual_index: i64, logical_index: usize, count: usize) {
        self.visual_index = visual_index;
        self.content = Some(logical_index);
        self.position_in_set = logical_index + 1;
        self.size_of_set = count;
    }

    pub(crate) fn unbind(&mut self) {
        self.content = None;
        self.position_in_set = 0;
        self.size_of_set = 0;
    }

    pub(crate) fn set_width(&mut self, width: f64) {
        self.width = width;
    }

    pub(crate) fn set_height(&mut self, height: f64) {
        self.height = height;
    }

    pub(crate) fn place(&mut self, top: f64, left: f64) {
        self.top = top;
        self.left = left;
    }

    pub(crate) fn set_state(&mut self, state: ItemVisualState, use_transitions: bool) {
        self.apply(ItemInput::Assign(state), use_transitions);
    }

    pub(crate) fn apply(&mut self, input: ItemInput, use_transitions: bool) {
        if let ItemInput::Assign(state) = input {
            self.rest_state = state;
        }
        self.state = self.state.next(self.rest_state, input);
        self.use_transitions = use_transitions;
    }
}
