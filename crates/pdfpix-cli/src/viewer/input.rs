//! Mapping of raw egui input onto viewer events.

use egui::Key;
use pdfpix_core::viewer::ViewerEvent;

/// Scroll smaller than this (in points per frame) is ignored.
const WHEEL_THRESHOLD: f32 = 1.0;

/// Event for a pressed key, if the key is bound.
pub fn key_event(key: Key) -> Option<ViewerEvent> {
    let event = match key {
        Key::ArrowRight | Key::ArrowDown | Key::Space | Key::PageDown => ViewerEvent::KeyNext,
        Key::ArrowLeft | Key::ArrowUp | Key::PageUp => ViewerEvent::KeyPrev,
        Key::Home => ViewerEvent::KeyHome,
        Key::End => ViewerEvent::KeyEnd,
        Key::R => ViewerEvent::KeyRefresh,
        Key::T | Key::A => ViewerEvent::KeyToggleTop,
        Key::H => ViewerEvent::KeyHelp,
        Key::Escape | Key::Q => ViewerEvent::KeyQuit,
        _ => return None,
    };
    Some(event)
}

/// Event for one frame's vertical scroll. Positive deltas scroll up.
pub fn wheel_event(delta_y: f32) -> Option<ViewerEvent> {
    if delta_y > WHEEL_THRESHOLD {
        Some(ViewerEvent::WheelUp)
    } else if delta_y < -WHEEL_THRESHOLD {
        Some(ViewerEvent::WheelDown)
    } else {
        None
    }
}

/// Keys that dismiss the help dialog.
pub fn closes_help(key: Key) -> bool {
    matches!(key, Key::Escape | Key::Enter | Key::H)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_keys() {
        for key in [Key::ArrowRight, Key::ArrowDown, Key::Space, Key::PageDown] {
            assert_eq!(key_event(key), Some(ViewerEvent::KeyNext), "{key:?}");
        }
        for key in [Key::ArrowLeft, Key::ArrowUp, Key::PageUp] {
            assert_eq!(key_event(key), Some(ViewerEvent::KeyPrev), "{key:?}");
        }
        assert_eq!(key_event(Key::Home), Some(ViewerEvent::KeyHome));
        assert_eq!(key_event(Key::End), Some(ViewerEvent::KeyEnd));
    }

    #[test]
    fn test_command_keys() {
        assert_eq!(key_event(Key::R), Some(ViewerEvent::KeyRefresh));
        assert_eq!(key_event(Key::T), Some(ViewerEvent::KeyToggleTop));
        assert_eq!(key_event(Key::A), Some(ViewerEvent::KeyToggleTop));
        assert_eq!(key_event(Key::H), Some(ViewerEvent::KeyHelp));
        assert_eq!(key_event(Key::Escape), Some(ViewerEvent::KeyQuit));
        assert_eq!(key_event(Key::Q), Some(ViewerEvent::KeyQuit));
        assert_eq!(key_event(Key::X), None);
        assert_eq!(key_event(Key::Enter), None);
    }

    #[test]
    fn test_wheel() {
        assert_eq!(wheel_event(50.0), Some(ViewerEvent::WheelUp));
        assert_eq!(wheel_event(-50.0), Some(ViewerEvent::WheelDown));
        assert_eq!(wheel_event(0.0), None);
        assert_eq!(wheel_event(0.5), None);
    }

    #[test]
    fn test_help_dismissal() {
        assert!(closes_help(Key::Escape));
        assert!(closes_help(Key::Enter));
        assert!(closes_help(Key::H));
        assert!(!closes_help(Key::Q));
        assert!(!closes_help(Key::ArrowRight));
    }
}
