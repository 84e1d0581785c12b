//! Rendering surface the form controller reports to

use super::review::ReviewProjection;
use super::validator::{ErrorKind, PasswordRequirement, PasswordStrength};

/// Uploaded file shown next to its field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreview {
    pub file_name: String,
    pub size_bytes: u64,
}

impl FilePreview {
    /// e.g. `avatar.png (12.34 KB)`
    pub fn describe(&self) -> String {
        format!("{} ({:.2} KB)", self.file_name, self.size_bytes as f64 / 1024.0)
    }
}

/// What the confirmation shows after a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuccessSummary {
    pub name: String,
    pub email: String,
    pub username: String,
    pub created_at: String,
    pub reference: String,
}

/// Everything the controller needs to reflect its state somewhere visible.
///
/// Implementations only display; they never feed values back.
#[cfg_attr(test, mockall::automock)]
pub trait Renderer {
    /// Show step `index` of `total` and mark earlier indicators completed
    fn activate_step(&mut self, index: usize, total: usize);

    fn set_progress(&mut self, percent: f64);

    fn set_field_error(&mut self, field: &str, error: ErrorKind);

    fn clear_field_error(&mut self, field: &str);

    fn set_password_strength(&mut self, strength: PasswordStrength);

    fn set_requirement(&mut self, requirement: PasswordRequirement, satisfied: bool);

    fn set_password_match(&mut self, matches: bool);

    fn render_review(&mut self, review: &ReviewProjection);

    fn show_success(&mut self, summary: &SuccessSummary);

    fn hide_success(&mut self);

    /// Whole-form notice (submission failed, fix errors first)
    fn show_notice(&mut self, message: &str);

    fn render_preview(&mut self, json: &str);

    fn hide_preview(&mut self);

    /// Submit control disabled while a submission is in flight
    fn set_submitting(&mut self, busy: bool);

    fn render_file_preview(&mut self, field: &str, preview: Option<FilePreview>);

    /// Strength meter, checklist, match indicator and file previews back to blank
    fn reset_feedback(&mut self);
}
