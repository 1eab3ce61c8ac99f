use alloc::sync::Arc;

use crate::SelectionChanged;

/// A callback fired synchronously whenever the logical selection changes.
pub type SelectionChangedCallback<T> = Arc<dyn Fn(&SelectionChanged<T>) + Send + Sync>;

/// Configuration for [`crate::LoopingSelector`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
pub struct SelectorOptions<T> {
    /// Item height in pixels. `0` means "not configured" and keeps the selector from setting up.
    pub item_height: u32,
    /// Item width in pixels. `0` falls back to the width the selector is arranged with.
    pub item_width: u32,
    /// Wrap around past the last item.
    pub should_loop: bool,
    /// Initially selected logical index.
    pub selected_index: usize,

    /// How far (in pixels) the viewport may drift from the panel midpoint before a settled
    /// balance recentres it. Only applies when looping.
    pub normalize_threshold: f64,
    /// Viewports taller than this are treated as unbounded and never balanced.
    pub max_viewport_extent: f64,
    /// Scrollable length of a looping panel, in items. Must be odd so the panel midpoint lands on
    /// a snap point.
    pub loop_panel_items: u32,

    /// Items moved by a small automation scroll.
    pub automation_small_increment: usize,
    /// Items moved by a large automation scroll.
    pub automation_large_increment: usize,

    pub on_selection_changed: Option<SelectionChangedCallback<T>>,
}

impl<T> Clone for SelectorOptions<T> {
    fn clone(&self) -> Self {
        Self {
            item_height: self.item_height,
            item_width: self.item_width,
            should_loop: self.should_loop,
            selected_index: self.selected_index,
            normalize_threshold: self.normalize_threshold,
            max_viewport_extent: self.max_viewport_extent,
            loop_panel_items: self.loop_panel_items,
            automation_small_increment: self.automation_small_increment,
            automation_large_increment: self.automation_large_increment,
            on_selection_changed: self.on_selection_changed.clone(),
        }
    }
}

impl<T> Default for SelectorOptions<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> SelectorOptions<T> {
    /// Creates options for items of `item_height` pixels, looping, with item 0 selected.
    pub fn new(item_height: u32) -> Self {
        Self {
            item_height,
            item_width: 0,
            should_loop: true,
            selected_index: 0,
            normalize_threshold: 50.0,
            max_viewport_extent: 100_000.0,
            loop_panel_items: 1001,
            automation_small_increment: 1,
            automation_large_increment: 5,
            on_selection_changed: None,
        }
    }

    pub fn with_item_height(mut self, item_height: u32) -> Self {
        self.item_height = item_height;
        self
    }

    pub fn with_item_width(mut self, item_width: u32) -> Self {
        self.item_width = item_width;
        self
    }

    pub fn with_should_loop(mut self, should_loop: bool) -> Self {
        self.should_loop = should_loop;
        self
    }

    pub fn with_selected_index(mut self, selected_index: usize) -> Self {
        self.selected_index = selected_index;
        self
    }

    pub fn with_normalize_threshold(mut self, threshold: f64) -> Self {
        self.normalize_threshold = threshold;
        self
    }

    pub fn with_max_viewport_extent(mut self, extent: f64) -> Self {
        self.max_viewport_extent = extent;
        self
    }

    /// Sets the looping panel length in items. Even values are bumped to the next odd value.
    pub fn with_loop_panel_items(mut self, items: u32) -> Self {
        self.loop_panel_items = items | 1;
        self
    }

    pub fn with_automation_increments(mut self, small: usize, large: usize) -> Self {
        self.automation_small_increment = small;
        self.automation_large_increment = large;
        self
    }

    pub fn with_on_selection_changed(
        mut self,
        on_selection_changed: Option<impl Fn(&SelectionChanged<T>) + Send + Sync + 'static>,
    ) -> Self {
        self.on_selection_changed = on_selection_changed.map(|f| Arc::new(f) as _);
        self
    }
}

impl<T> core::fmt::Debug for SelectorOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SelectorOptions")
            .field("item_height", &self.item_height)
            .field("item_width", &self.item_width)
            .field("should_loop", &self.should_loop)
            .field("selected_index", &self.selected_index)
            .field("normalize_threshold", &self.normalize_threshold)
            .field("max_viewport_extent", &self.max_viewport_extent)
            .field("loop_panel_items", &self.loop_panel_items)
            .field("automation_small_increment", &self.automation_small_increment)
            .field("automation_large_increment", &self.automation_large_increment)
            .finish_non_exhaustive()
    }
}
