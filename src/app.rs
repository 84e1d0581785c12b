//! Application state and core logic

use crate::config::TuiConfig;
use crate::debounce::Debouncer;
use crate::platform::SHORTCUT_MODIFIER;
use crate::state::{
    FieldKind, FileUpload, Form, FormController, FormDefinition, FormPhase, InputShape,
    ScreenState,
};
use crate::submission::SimulatedSubmissionClient;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use std::path::Path;
use tokio::sync::mpsc::UnboundedReceiver;

pub type RegistrationForm = FormController<ScreenState, SimulatedSubmissionClient>;

/// Main application struct
pub struct App {
    /// Registration form and the screen it reports to
    pub form: RegistrationForm,
    pub config: TuiConfig,
    /// Whether the app should quit
    quit: bool,
    /// One-line feedback shown in the status bar
    pub status_message: Option<String>,
    /// Path typed into the focused file field
    pub file_path_input: String,
    /// Set by the submit key; run by the event loop after the next frame
    submit_requested: bool,
    email_debouncer: Debouncer<String>,
    email_checks: UnboundedReceiver<String>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: TuiConfig) -> Result<Self> {
        let client = SimulatedSubmissionClient::new(config.submit_delay());
        let screen = ScreenState::new(config.animate_progress());
        let form = FormController::new(FormDefinition::registration(), screen, client)?;
        let (email_debouncer, email_checks) = Debouncer::new(config.email_debounce());

        Ok(Self {
            form,
            config,
            quit: false,
            status_message: None,
            file_path_input: String::new(),
            submit_requested: false,
            email_debouncer,
            email_checks,
        })
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Faster redraws while the progress bar is moving
    pub fn is_animating(&self) -> bool {
        self.form.renderer().progress.is_running()
    }

    pub fn screen(&self) -> &ScreenState {
        self.form.renderer()
    }

    fn active_field_name(&self) -> Option<String> {
        self.form.step().active_field_name().map(str::to_string)
    }

    /// Re-check fields whose typing pause elapsed
    pub fn drain_debounced(&mut self) {
        while let Ok(name) = self.email_checks.try_recv() {
            self.form.revalidate_live(&name);
        }
    }

    /// Handle a key press
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Confirmation is modal
        if self.form.phase() == FormPhase::Submitted {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.form.acknowledge_success();
                self.file_path_input.clear();
                self.status_message = Some("Ready for a new registration".to_string());
            }
            return Ok(());
        }

        // JSON preview overlay is modal
        if self.form.is_preview_visible() {
            match key.code {
                KeyCode::Up | KeyCode::Char('k') => self.form.renderer_mut().scroll_preview(-1),
                KeyCode::Down | KeyCode::Char('j') => self.form.renderer_mut().scroll_preview(1),
                KeyCode::Esc => {
                    self.form.toggle_preview()?;
                }
                KeyCode::Char('p') if key.modifiers.contains(SHORTCUT_MODIFIER) => {
                    self.form.toggle_preview()?;
                }
                _ => {}
            }
            return Ok(());
        }

        // Any key closes a notice
        if self.screen().notice.is_some() {
            self.form.renderer_mut().dismiss_notice();
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        if key.modifiers.contains(SHORTCUT_MODIFIER) {
            self.handle_shortcut(key)?;
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => self.move_focus(true),
            KeyCode::BackTab => self.move_focus(false),
            KeyCode::F(n @ 1..=12) => {
                if self.form.jump_to_indicator(usize::from(n) - 1) {
                    self.file_path_input.clear();
                }
            }
            KeyCode::PageDown => self.next_step(),
            KeyCode::PageUp | KeyCode::Esc => self.previous_step(),
            _ => self.handle_field_key(key)?,
        }
        Ok(())
    }

    fn handle_shortcut(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('s') => self.request_submit(),
            KeyCode::Char('p') => {
                self.form.toggle_preview()?;
            }
            KeyCode::Char('e') => self.export_to_file(),
            KeyCode::Char('y') => self.copy_json(),
            KeyCode::Char('r') => {
                self.email_debouncer.cancel();
                self.file_path_input.clear();
                self.form.reset();
                self.status_message = Some("Form cleared".to_string());
            }
            KeyCode::Char('q') => self.quit = true,
            _ => {}
        }
        Ok(())
    }

    /// Keys that edit the focused input
    fn handle_field_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(name) = self.active_field_name() else {
            if key.code == KeyCode::Enter {
                self.next_step();
            }
            return Ok(());
        };
        let Some(field) = self.form.field(&name) else {
            return Ok(());
        };
        let shape = field.shape.clone();
        let kind = field.kind;

        match (&shape, key.code) {
            (InputShape::Multiline, KeyCode::Enter) => {
                self.form.update_field(&name, |f| f.push_char('\n'))?;
            }
            (InputShape::File, KeyCode::Enter) if !self.file_path_input.is_empty() => {
                self.attach_typed_file(&name);
            }
            (_, KeyCode::Enter) => self.next_step(),
            (InputShape::Text | InputShape::Multiline, KeyCode::Char(c)) => {
                self.form.update_field(&name, |f| f.push_char(c))?;
                if kind == FieldKind::Email {
                    self.email_debouncer.schedule(name);
                }
            }
            (InputShape::Text | InputShape::Multiline, KeyCode::Backspace) => {
                self.form.update_field(&name, |f| f.pop_char())?;
                if kind == FieldKind::Email {
                    self.email_debouncer.schedule(name);
                }
            }
            (InputShape::Choice(_), KeyCode::Right | KeyCode::Char(' ')) => {
                self.form.update_field(&name, |f| f.cycle_choice(true))?;
            }
            (InputShape::Choice(_), KeyCode::Left) => {
                self.form.update_field(&name, |f| f.cycle_choice(false))?;
            }
            (InputShape::MultiChoice(_), KeyCode::Char(c @ '1'..='9')) => {
                let index = c as usize - '1' as usize;
                self.form.update_field(&name, |f| f.toggle_option(index))?;
            }
            (InputShape::Checkbox, KeyCode::Char(' ')) => {
                self.form.update_field(&name, |f| f.toggle_flag())?;
            }
            (InputShape::File, KeyCode::Char(c)) => self.file_path_input.push(c),
            (InputShape::File, KeyCode::Backspace) => {
                if self.file_path_input.pop().is_none() {
                    self.form.remove_file(&name)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn move_focus(&mut self, forward: bool) {
        if let Some(name) = self.active_field_name() {
            self.form.blur(&name);
        }
        let step = self.form.step_mut();
        if forward {
            step.next_field();
        } else {
            step.prev_field();
        }
        self.file_path_input.clear();
        if let Some(name) = self.active_field_name() {
            self.form.focus(&name);
        }
    }

    fn next_step(&mut self) {
        if self.form.is_last_step() {
            self.request_submit();
            return;
        }
        let target = self.form.current_step() + 1;
        if let Err(e) = self.form.advance(target) {
            tracing::debug!("Advance refused: {e}");
            self.status_message = Some("Please fix the highlighted fields".to_string());
        } else {
            self.file_path_input.clear();
        }
    }

    fn previous_step(&mut self) {
        let Some(target) = self.form.current_step().checked_sub(1) else {
            return;
        };
        if self.form.retreat(target).is_ok() {
            self.file_path_input.clear();
        }
    }

    fn attach_typed_file(&mut self, name: &str) {
        let path = std::mem::take(&mut self.file_path_input);
        let upload = match FileUpload::from_path(Path::new(path.trim())) {
            Ok(upload) => upload,
            Err(e) => {
                tracing::warn!("Cannot read {path}: {e:#}");
                self.status_message = Some(format!("Cannot read {path}"));
                return;
            }
        };
        if let Err(e) = self.form.attach_file(name, upload) {
            self.status_message = Some(e.to_string());
        }
    }

    fn request_submit(&mut self) {
        if self.form.phase() != FormPhase::Editing {
            return;
        }
        self.email_debouncer.cancel();
        match self.form.begin_submit() {
            Ok(()) => {
                self.submit_requested = true;
                self.status_message = Some("Submitting...".to_string());
            }
            Err(e) => {
                tracing::debug!("Submission refused: {e}");
                self.status_message = Some(e.to_string());
            }
        }
    }

    /// Run a submission requested by the last key press
    pub async fn run_pending_submit(&mut self) {
        if !std::mem::take(&mut self.submit_requested) {
            return;
        }
        self.status_message = None;
        if let Err(e) = self.form.submit().await {
            tracing::debug!("Submission refused: {e}");
            self.status_message = Some(e.to_string());
        }
    }

    fn export_to_file(&mut self) {
        let message = match self.write_export() {
            Ok(path) => format!("Exported to {path}"),
            Err(e) => {
                tracing::warn!("Export failed: {e:#}");
                "Export failed".to_string()
            }
        };
        self.status_message = Some(message);
    }

    fn write_export(&mut self) -> Result<String> {
        self.form.save_step();
        let export = self.form.export()?;
        let dir = self.config.export_dir();
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(&export.file_name);
        std::fs::write(&path, export.contents)?;
        Ok(path.display().to_string())
    }

    fn copy_json(&mut self) {
        let message = match self
            .form
            .preview_snapshot()
            .map_err(anyhow::Error::from)
            .and_then(|json| copy_to_clipboard(&json).map(|()| json.len()))
        {
            Ok(len) => format!("Copied {len} chars of JSON"),
            Err(e) => {
                tracing::warn!("Clipboard copy failed: {e:#}");
                "Clipboard unavailable".to_string()
            }
        };
        self.status_message = Some(message);
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
