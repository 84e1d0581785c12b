//! View model the terminal UI draws from

use super::forms::{
    ErrorKind, FilePreview, PasswordRequirement, PasswordStrength, Renderer, ReviewProjection,
    SuccessSummary,
};
use super::progress_animation::ProgressAnimation;
use std::collections::{BTreeMap, HashMap};

/// Everything the controller has reported, held until the next frame
#[derive(Debug, Default)]
pub struct ScreenState {
    pub active_step: usize,
    pub total_steps: usize,
    pub progress: ProgressAnimation,
    pub field_errors: BTreeMap<String, ErrorKind>,
    pub strength: Option<PasswordStrength>,
    pub requirements: HashMap<PasswordRequirement, bool>,
    /// `None` until both password fields have input
    pub password_match: Option<bool>,
    pub review: Option<ReviewProjection>,
    pub success: Option<SuccessSummary>,
    pub notice: Option<String>,
    pub preview: Option<String>,
    pub preview_scroll: u16,
    pub submitting: bool,
    pub file_previews: BTreeMap<String, FilePreview>,
}

impl ScreenState {
    pub fn new(animate_progress: bool) -> Self {
        Self {
            progress: ProgressAnimation::new(animate_progress),
            ..Self::default()
        }
    }

    pub fn is_completed(&self, index: usize) -> bool {
        index < self.active_step
    }

    pub fn error_for(&self, field: &str) -> Option<ErrorKind> {
        self.field_errors.get(field).copied()
    }

    pub fn requirement_met(&self, requirement: PasswordRequirement) -> bool {
        self.requirements.get(&requirement).copied().unwrap_or(false)
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn scroll_preview(&mut self, delta: i16) {
        self.preview_scroll = self.preview_scroll.saturating_add_signed(delta);
    }
}

impl Renderer for ScreenState {
    fn activate_step(&mut self, index: usize, total: usize) {
        self.active_step = index;
        self.total_steps = total;
        self.notice = None;
    }

    fn set_progress(&mut self, percent: f64) {
        self.progress.set_target(percent);
    }

    fn set_field_error(&mut self, field: &str, error: ErrorKind) {
        self.field_errors.insert(field.to_string(), error);
    }

    fn clear_field_error(&mut self, field: &str) {
        self.field_errors.remove(field);
    }

    fn set_password_strength(&mut self, strength: PasswordStrength) {
        self.strength = Some(strength);
    }

    fn set_requirement(&mut self, requirement: PasswordRequirement, satisfied: bool) {
        self.requirements.insert(requirement, satisfied);
    }

    fn set_password_match(&mut self, matches: bool) {
        self.password_match = Some(matches);
    }

    fn render_review(&mut self, review: &ReviewProjection) {
        self.review = Some(review.clone());
    }

    fn show_success(&mut self, summary: &SuccessSummary) {
        self.success = Some(summary.clone());
    }

    fn hide_success(&mut self) {
        self.success = None;
    }

    fn show_notice(&mut self, message: &str) {
        self.notice = Some(message.to_string());
    }

    fn render_preview(&mut self, json: &str) {
        self.preview = Some(json.to_string());
        self.preview_scroll = 0;
    }

    fn hide_preview(&mut self) {
        self.preview = None;
    }

    fn set_submitting(&mut self, busy: bool) {
        self.submitting = busy;
    }

    fn render_file_preview(&mut self, field: &str, preview: Option<FilePreview>) {
        match preview {
            Some(preview) => {
                self.file_previews.insert(field.to_string(), preview);
            }
            None => {
                self.file_previews.remove(field);
            }
        }
    }

    fn reset_feedback(&mut self) {
        self.strength = None;
        self.requirements.clear();
        self.password_match = None;
        self.file_previews.clear();
        self.review = None;
        self.notice = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activate_step_clears_notice() {
        let mut screen = ScreenState::default();
        screen.show_notice("Please fix all errors before submitting");
        screen.activate_step(2, 4);
        assert!(screen.notice.is_none());
        assert!(screen.is_completed(1));
        assert!(!screen.is_completed(2));
    }

    #[test]
    fn test_field_errors_set_and_clear() {
        let mut screen = ScreenState::default();
        screen.set_field_error("email", ErrorKind::InvalidEmailFormat);
        assert_eq!(screen.error_for("email"), Some(ErrorKind::InvalidEmailFormat));
        screen.clear_field_error("email");
        assert_eq!(screen.error_for("email"), None);
    }

    #[test]
    fn test_reset_feedback_blanks_indicators() {
        let mut screen = ScreenState::default();
        screen.set_requirement(PasswordRequirement::Number, true);
        screen.set_password_match(false);
        screen.render_file_preview(
            "profilePic",
            Some(FilePreview {
                file_name: "a.png".into(),
                size_bytes: 1,
            }),
        );
        screen.reset_feedback();
        assert!(!screen.requirement_met(PasswordRequirement::Number));
        assert_eq!(screen.password_match, None);
        assert!(screen.file_previews.is_empty());
    }

    #[test]
    fn test_preview_scroll_saturates() {
        let mut screen = ScreenState::default();
        screen.render_preview("{}");
        screen.scroll_preview(-3);
        assert_eq!(screen.preview_scroll, 0);
        screen.scroll_preview(5);
        assert_eq!(screen.preview_scroll, 5);
        screen.render_preview("{}");
        assert_eq!(screen.preview_scroll, 0);
    }
}
