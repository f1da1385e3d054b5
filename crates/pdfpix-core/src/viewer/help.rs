//! Help dialog content.

/// Every control and what it does, in display order.
pub const CONTROLS: &[(&str, &str)] = &[
    ("Mouse wheel", "navigate through images"),
    ("Left / Up", "previous image"),
    ("Right / Down", "next image"),
    ("Space / PageDown", "next image"),
    ("PageUp", "previous image"),
    ("R", "refresh the current image"),
    ("T / A", "toggle always-on-top mode"),
    ("Home", "go to the first image"),
    ("End", "go to the last image"),
    ("Esc / Q", "quit the viewer"),
    ("H", "show this help dialog"),
];

/// The help text as a single block.
pub fn help_text() -> String {
    let mut text = String::from("PDF Image Viewer Help:\n\n");
    for (keys, action) in CONTROLS {
        text.push_str(&format!("- {keys}: {action}.\n"));
    }
    text.pop();
    text
}
