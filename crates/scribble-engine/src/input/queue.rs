/// Pointer event types the engine understands.
/// Coordinates are in the same display space as the target rectangle.
#[derive(Debug, Clone, Copy)]
pub enum InputEvent {
    /// A finger/stylus touched down at (x, y).
    PointerDown { x: f32, y: f32 },
    /// The pointer moved to (x, y) while down.
    PointerMove { x: f32, y: f32 },
    /// The pointer lifted at (x, y); the active stroke is committed.
    PointerUp { x: f32, y: f32 },
    /// The gesture was interrupted by the system (incoming call, palm
    /// rejection); the active stroke is discarded.
    PointerCancel,
}

/// A queue of pointer events.
/// The gesture layer writes events in; the session reads and drains them
/// each frame.
pub struct InputQueue {
    events: Vec<InputEvent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            events: Vec::with_capacity(32),
        }
    }

    /// Push a new pointer event.
    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// Drain all pending events. Returns a Vec and clears the queue.
    pub fn drain(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }

    /// Iterate over pending events without consuming them.
    pub fn iter(&self) -> impl Iterator<Item = &InputEvent> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl Default for InputQueue {
    fn default() -> Self {
        Self::new()
    }
}
