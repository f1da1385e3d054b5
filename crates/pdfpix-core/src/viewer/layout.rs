//! Fitting images into the viewport and the window title.

use super::ViewerState;

/// Largest size with the aspect ratio of `image` that fits inside `bounds`.
///
/// Small images are scaled up to the box as well. Each side is at least one
/// pixel. Returns `None` when either size is empty.
pub fn fit_within(image: (u32, u32), bounds: (u32, u32)) -> Option<(u32, u32)> {
    let (iw, ih) = image;
    let (bw, bh) = bounds;
    if iw == 0 || ih == 0 || bw == 0 || bh == 0 {
        return None;
    }

    let scale = (f64::from(bw) / f64::from(iw)).min(f64::from(bh) / f64::from(ih));
    let w = (f64::from(iw) * scale).round().clamp(1.0, f64::from(bw)) as u32;
    let h = (f64::from(ih) * scale).round().clamp(1.0, f64::from(bh)) as u32;
    Some((w, h))
}

/// Window title with the 1-based position, e.g. `PDF Image Viewer - Fig.3 / 10`.
pub fn window_title(base: &str, state: &ViewerState) -> String {
    match state.current() {
        Some(index) => format!("{} - Fig.{} / {}", base, index + 1, state.len()),
        None => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::{ViewerEvent, transition};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fit_landscape_into_square() {
        assert_eq!(fit_within((400, 200), (100, 100)), Some((100, 50)));
    }

    #[test]
    fn test_fit_portrait_into_wide() {
        assert_eq!(fit_within((300, 600), (800, 300)), Some((150, 300)));
    }

    #[test]
    fn test_fit_scales_small_images_up() {
        assert_eq!(fit_within((10, 20), (100, 100)), Some((50, 100)));
    }

    #[test]
    fn test_fit_never_exceeds_bounds() {
        for image in [(1, 1000), (1000, 1), (333, 777), (1920, 1080)] {
            for bounds in [(1, 1), (17, 3), (640, 480), (1000, 1000)] {
                let (w, h) = fit_within(image, bounds).unwrap();
                assert!(w >= 1 && h >= 1);
                assert!(w <= bounds.0 && h <= bounds.1, "{image:?} in {bounds:?} -> {w}x{h}");
            }
        }
    }

    #[test]
    fn test_fit_empty() {
        assert_eq!(fit_within((0, 10), (10, 10)), None);
        assert_eq!(fit_within((10, 10), (0, 10)), None);
    }

    #[test]
    fn test_window_title() {
        let state = ViewerState::new(10);
        assert_eq!(window_title("PDF Image Viewer", &state), "PDF Image Viewer - Fig.1 / 10");

        let (state, _) = transition(state, ViewerEvent::KeyEnd);
        assert_eq!(window_title("PDF Image Viewer", &state), "PDF Image Viewer - Fig.10 / 10");

        assert_eq!(window_title("PDF Image Viewer", &ViewerState::new(0)), "PDF Image Viewer");
    }
}
