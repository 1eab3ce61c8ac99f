use alloc::collections::VecDeque;

/// Notification raised by a scroll host.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ViewEvent {
    /// The offset is about to change (gesture or animation frame).
    Changing { vertical_offset: f64 },
    /// The offset changed. `is_intermediate` is true for in-flight frames.
    Changed {
        vertical_offset: f64,
        is_intermediate: bool,
    },
}

/// The scroll surface hosting the selector's panel.
///
/// The host's extent is allowed to lag behind a programmatic [`ScrollHost::change_view`]; the
/// selector keeps its own copy of the viewport edges for that reason.
pub trait ScrollHost {
    fn viewport_height(&self) -> f64;

    fn vertical_offset(&self) -> f64;

    /// Requests a new vertical offset.
    ///
    /// Returns `false` when the host cannot scroll right now (e.g. it is not in a visual tree);
    /// the selector then replays the request on its next arrange pass.
    fn change_view(&mut self, vertical_offset: f64, animate: bool) -> bool;

    /// Sets the scrollable content height (the panel height).
    fn set_extent_height(&mut self, height: f64);

    /// Pops the next pending notification.
    fn take_view_event(&mut self) -> Option<ViewEvent>;
}

/// In-memory [`ScrollHost`].
///
/// Non-animated writes apply immediately; animated writes are parked until
/// [`MemoryScrollHost::finish_animation`], standing in for a dispatcher-deferred animation.
/// Every effective offset change queues a `Changing` and a final `Changed` event.
#[derive(Clone, Debug)]
pub struct MemoryScrollHost {
    viewport_height: f64,
    vertical_offset: f64,
    extent_height: f64,
    attached: bool,
    pending_animation: Option<f64>,
    events: VecDeque<ViewEvent>,
}

impl MemoryScrollHost {
    pub fn new(viewport_height: f64) -> Self {
        Self {
            viewport_height,
            vertical_offset: 0.0,
            extent_height: 0.0,
            attached: true,
            pending_animation: None,
            events: VecDeque::new(),
        }
    }

    pub fn set_viewport_height(&mut self, viewport_height: f64) {
        self.viewport_height = viewport_height;
        self.vertical_offset = self.clamp(self.vertical_offset);
    }

    pub fn extent_height(&self) -> f64 {
        self.extent_height
    }

    pub fn max_vertical_offset(&self) -> f64 {
        (self.extent_height - self.viewport_height).max(0.0)
    }

    /// Detached hosts refuse `change_view`.
    pub fn set_attached(&mut self, attached: bool) {
        self.attached = attached;
    }

    pub fn pending_animation(&self) -> Option<f64> {
        self.pending_animation
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Simulates a user gesture that ends at `offset`.
    pub fn user_scroll_to(&mut self, offset: f64) {
        self.pending_animation = None;
        self.jump(offset);
    }

    /// Simulates an in-flight gesture frame: a `Changing` event without a final `Changed`.
    pub fn user_drag_to(&mut self, offset: f64) {
        let offset = self.clamp(offset);
        if offset == self.vertical_offset {
            return;
        }
        self.vertical_offset = offset;
        self.events.push_back(ViewEvent::Changing {
            vertical_offset: offset,
        });
        self.events.push_back(ViewEvent::Changed {
            vertical_offset: offset,
            is_intermediate: true,
        });
    }

    /// Simulates lifting the finger after [`Self::user_drag_to`]: a final `Changed` at the
    /// current offset.
    pub fn end_manipulation(&mut self) {
        self.events.push_back(ViewEvent::Changed {
            vertical_offset: self.vertical_offset,
            is_intermediate: false,
        });
    }

    /// Completes a parked animated `change_view`. Returns whether one was pending.
    pub fn finish_animation(&mut self) -> bool {
        let Some(target) = self.pending_animation.take() else {
            return false;
        };
        self.jump(target);
        true
    }

    fn clamp(&self, offset: f64) -> f64 {
        offset.clamp(0.0, self.max_vertical_offset())
    }

    fn jump(&mut self, offset: f64) {
        let offset = self.clamp(offset);
        if offset == self.vertical_offset {
            return;
        }
        self.vertical_offset = offset;
        self.events.push_back(ViewEvent::Changing {
            vertical_offset: offset,
        });
        self.events.push_back(ViewEvent::Changed {
            vertical_offset: offset,
            is_intermediate: false,
        });
    }
}

impl ScrollHost for MemoryScrollHost {
    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    fn change_view(&mut self, vertical_offset: f64, animate: bool) -> bool {
        if !self.attached {
            return false;
        }
        if animate {
            self.pending_animation = Some(vertical_offset);
        } else {
            self.pending_animation = None;
            self.jump(vertical_offset);
        }
        true
    }

    fn set_extent_height(&mut self, height: f64) {
        self.extent_height = height;
        self.vertical_offset = self.clamp(self.vertical_offset);
    }

    fn take_view_event(&mut self) -> Option<ViewEvent> {
        self.events.pop_front()
    }
}
