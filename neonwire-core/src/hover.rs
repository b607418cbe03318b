/// Cursor proximity: whether the pointer is over something interactive
use tracing::debug;

/// Hover state reported to the cursor presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering,
}

impl HoverState {
    pub fn is_hovering(self) -> bool {
        matches!(self, HoverState::Hovering)
    }
}

/// Anything the pointer can land on.
///
/// The flag is decided when the target is built; the state machine never
/// looks at names, roles or parents.
pub trait Interactive {
    fn is_interactive(&self) -> bool;
}

/// A hit-test target with a label and an interactive capability flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    label: String,
    interactive: bool,
}

impl Element {
    /// A target that changes the cursor (links, buttons).
    pub fn interactive(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            interactive: true,
        }
    }

    /// A target that leaves the cursor alone.
    pub fn plain(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            interactive: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Interactive for Element {
    fn is_interactive(&self) -> bool {
        self.interactive
    }
}

impl Interactive for bool {
    fn is_interactive(&self) -> bool {
        *self
    }
}

/// Two-state machine driven by pointer-move and pointer-over events.
#[derive(Debug, Clone, Default)]
pub struct CursorProximity {
    state: HoverState,
    transitions: u64,
}

impl CursorProximity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluate against the element under the pointer.
    ///
    /// `None` means the pointer is over empty space.
    pub fn on_pointer_event<T: Interactive + ?Sized>(&mut self, target: Option<&T>) -> HoverState {
        let matched = target.is_some_and(|t| t.is_interactive());
        let next = match (self.state, matched) {
            (HoverState::Idle, true) => HoverState::Hovering,
            (HoverState::Hovering, false) => HoverState::Idle,
            (state, _) => state,
        };

        if next != self.state {
            self.transitions += 1;
            debug!(from = ?self.state, to = ?next, "cursor hover transition");
        }
        self.state = next;
        self.state
    }

    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Number of state changes since creation (self-transitions excluded).
    pub fn transitions(&self) -> u64 {
        self.transitions
    }
}
