//! Platform-specific key bindings

use crossterm::event::KeyModifiers;

/// Modifier for the form shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Copy-JSON shortcut display
#[cfg(target_os = "macos")]
pub const COPY_SHORTCUT: &str = "Cmd+Y";

#[cfg(not(target_os = "macos"))]
pub const COPY_SHORTCUT: &str = "Ctrl+Y";

/// Export shortcut display
#[cfg(target_os = "macos")]
pub const EXPORT_SHORTCUT: &str = "Cmd+E";

#[cfg(not(target_os = "macos"))]
pub const EXPORT_SHORTCUT: &str = "Ctrl+E";

/// Preview shortcut display
#[cfg(target_os = "macos")]
pub const PREVIEW_SHORTCUT: &str = "Cmd+P";

#[cfg(not(target_os = "macos"))]
pub const PREVIEW_SHORTCUT: &str = "Ctrl+P";

/// Reset shortcut display
#[cfg(target_os = "macos")]
pub const RESET_SHORTCUT: &str = "Cmd+R";

#[cfg(not(target_os = "macos"))]
pub const RESET_SHORTCUT: &str = "Ctrl+R";
