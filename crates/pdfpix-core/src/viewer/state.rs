//! Navigation state machine.

/// Logical input, independent of where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewerEvent {
    /// Mouse wheel rolled away from the user.
    WheelUp,
    /// Mouse wheel rolled towards the user.
    WheelDown,
    KeyNext,
    KeyPrev,
    KeyHome,
    KeyEnd,
    KeyRefresh,
    KeyToggleTop,
    KeyHelp,
    KeyQuit,
    /// The viewport changed size.
    Resize,
}

/// What the render step must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Nothing changed.
    None,
    /// Show the current image, fitted to the current viewport.
    Render,
    /// Re-read the current image from disk, then render it.
    Reload,
    /// Set the window's stay-on-top hint.
    StayOnTop(bool),
    /// Open the help dialog.
    ShowHelp,
    /// Close the window.
    Close,
}

/// Position in the image set plus the stay-on-top flag.
///
/// `index < len` holds whenever `len > 0`; with `len == 0` the index is
/// always 0 and navigation does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerState {
    index: usize,
    len: usize,
    always_on_top: bool,
}

impl ViewerState {
    /// State for a set of `len` images, showing the first.
    pub fn new(len: usize) -> Self {
        Self {
            index: 0,
            len,
            always_on_top: false,
        }
    }

    pub fn with_always_on_top(mut self, on: bool) -> Self {
        self.always_on_top = on;
        self
    }

    /// Index of the image on screen, or `None` for an empty set.
    pub fn current(&self) -> Option<usize> {
        (self.len > 0).then_some(self.index)
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn always_on_top(&self) -> bool {
        self.always_on_top
    }

    fn moved_to(self, index: usize) -> (Self, Effect) {
        (Self { index, ..self }, Effect::Render)
    }
}

/// Apply one event.
pub fn transition(state: ViewerState, event: ViewerEvent) -> (ViewerState, Effect) {
    use ViewerEvent::*;

    match event {
        KeyToggleTop => {
            let on = !state.always_on_top;
            (state.with_always_on_top(on), Effect::StayOnTop(on))
        }
        KeyHelp => (state, Effect::ShowHelp),
        KeyQuit => (state, Effect::Close),
        Resize => (state, Effect::Render),
        KeyRefresh => (state, Effect::Reload),

        _ if state.is_empty() => (state, Effect::None),

        WheelDown | KeyNext => state.moved_to((state.index + 1) % state.len),
        WheelUp | KeyPrev => state.moved_to((state.index + state.len - 1) % state.len),
        KeyHome => state.moved_to(0),
        KeyEnd => state.moved_to(state.len - 1),
    }
}
