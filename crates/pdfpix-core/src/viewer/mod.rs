//! Display-independent viewer logic.
//!
//! Input from the window toolkit is translated into [`ViewerEvent`]s and run
//! through [`transition`], which returns the new [`ViewerState`] and an
//! [`Effect`] for the render step. Nothing here touches a window, so the
//! navigation rules can be tested headless.

mod help;
mod layout;
mod state;

pub use help::{CONTROLS, help_text};
pub use layout::{fit_within, window_title};
pub use state::{Effect, ViewerEvent, ViewerState, transition};
