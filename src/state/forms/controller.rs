//! Step-wise form controller
//!
//! Owns the step index, the live inputs and the accumulated [`FormRecord`].
//! Every transition takes `&mut self`, so one instance only ever has a single
//! transition in flight; `submit` keeps that exclusive borrow across its one
//! await point.

use super::errors::{FieldError, FormError, SubmitError, TransitionError};
use super::field::{FieldKind, FieldValue, FormField, InputShape};
use super::form_state::{FieldRelation, FormDefinition, StepDefinition};
use super::record::{ExportFile, FormRecord};
use super::renderer::{FilePreview, Renderer, SuccessSummary};
use super::review::ReviewProjection;
use super::validator::{self, ErrorKind, PasswordRequirement};
use crate::submission::{SubmissionClientTrait, SubmissionReceipt};
use chrono::{DateTime, Local, Utc};
use std::collections::BTreeMap;
use std::path::Path;

/// Image types accepted for file fields
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif"];

/// Largest accepted upload
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Counter limit for fields that declare none
const DEFAULT_MAX_LENGTH: usize = 999;

/// Where the form is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Editing,
    Submitting,
    /// Confirmation shown; waiting for `acknowledge_success`
    Submitted,
}

/// A file picked for a file field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl FileUpload {
    /// Describe a file on disk, guessing the type from its extension
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_ascii_lowercase())
            .unwrap_or_default();
        let mime_type = match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            _ => "application/octet-stream",
        };
        Ok(Self {
            file_name,
            mime_type: mime_type.to_string(),
            size_bytes: metadata.len(),
        })
    }
}

/// How close a text field is to its length limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterLevel {
    Normal,
    /// Over 70% of the limit
    Warning,
    /// Over 90% of the limit
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharacterCount {
    pub length: usize,
    pub max: usize,
    pub level: CounterLevel,
}

impl CharacterCount {
    fn new(length: usize, max: usize) -> Self {
        let level = if length as f64 > max as f64 * 0.9 {
            CounterLevel::Critical
        } else if length as f64 > max as f64 * 0.7 {
            CounterLevel::Warning
        } else {
            CounterLevel::Normal
        };
        Self { length, max, level }
    }
}

/// Validation outcome of one field during a step check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub field: String,
    pub result: Result<(), ErrorKind>,
}

/// Multi-step form state machine
pub struct FormController<R, C> {
    definition: FormDefinition,
    record: FormRecord,
    current_step: usize,
    errors: BTreeMap<String, ErrorKind>,
    phase: FormPhase,
    preview_visible: bool,
    review: Option<ReviewProjection>,
    renderer: R,
    client: C,
}

impl<R: Renderer, C: SubmissionClientTrait> FormController<R, C> {
    /// Build a controller showing the first step
    pub fn new(definition: FormDefinition, renderer: R, client: C) -> Result<Self, FormError> {
        if definition.steps.is_empty() {
            return Err(FormError::NoSteps);
        }
        let record = FormRecord::for_fields(definition.fields());
        let mut controller = Self {
            definition,
            record,
            current_step: 0,
            errors: BTreeMap::new(),
            phase: FormPhase::Editing,
            preview_visible: false,
            review: None,
            renderer,
            client,
        };
        controller.show_step(0);
        Ok(controller)
    }

    // ----- queries -----

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn step_count(&self) -> usize {
        self.definition.step_count()
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step + 1 == self.step_count()
    }

    /// Earlier steps count as completed
    pub fn is_completed(&self, index: usize) -> bool {
        index < self.current_step
    }

    /// `current / (N-1) * 100`
    pub fn progress(&self) -> f64 {
        let last = self.step_count().saturating_sub(1);
        if last == 0 {
            return 100.0;
        }
        self.current_step as f64 / last as f64 * 100.0
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn record(&self) -> &FormRecord {
        &self.record
    }

    pub fn definition(&self) -> &FormDefinition {
        &self.definition
    }

    pub fn step(&self) -> &StepDefinition {
        &self.definition.steps[self.current_step]
    }

    /// Mutable access for focus movement within the current step
    pub fn step_mut(&mut self) -> &mut StepDefinition {
        &mut self.definition.steps[self.current_step]
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.definition.field(name)
    }

    /// Currently flagged fields
    pub fn errors(&self) -> &BTreeMap<String, ErrorKind> {
        &self.errors
    }

    pub fn field_error(&self, name: &str) -> Option<ErrorKind> {
        self.errors.get(name).copied()
    }

    pub fn review(&self) -> Option<&ReviewProjection> {
        self.review.as_ref()
    }

    pub fn is_preview_visible(&self) -> bool {
        self.preview_visible
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Character counter for fields with a length limit
    pub fn character_count(&self, name: &str) -> Option<CharacterCount> {
        let field = self.field(name)?;
        if !field.accepts_typing() {
            return None;
        }
        let max = field.max_length.unwrap_or(DEFAULT_MAX_LENGTH);
        Some(CharacterCount::new(field.as_text().chars().count(), max))
    }

    // ----- validation -----

    /// Fresh validation of every required field on `index`, plus the relations
    /// whose two fields both live there. Touches nothing.
    pub fn validate_step(&self, index: usize) -> Vec<FieldCheck> {
        let Some(step) = self.definition.steps.get(index) else {
            return Vec::new();
        };

        let mut checks: Vec<FieldCheck> = step
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| FieldCheck {
                field: f.name.clone(),
                result: validator::validate(f.kind, &f.value, f.required),
            })
            .collect();

        for relation in &self.definition.relations {
            let FieldRelation::Matches {
                field,
                confirm,
                error,
            } = relation;
            let (Some(original), Some(repeated)) = (step.field(field), step.field(confirm)) else {
                continue;
            };
            let (a, b) = (original.as_text(), repeated.as_text());
            if a.is_empty() || b.is_empty() || a == b {
                continue;
            }
            match checks.iter_mut().find(|c| &c.field == confirm) {
                Some(check) => check.result = Err(*error),
                None => checks.push(FieldCheck {
                    field: confirm.clone(),
                    result: Err(*error),
                }),
            }
        }

        checks
    }

    /// Validate a step and reflect every outcome; returns the failures
    fn check_step(&mut self, index: usize) -> Vec<FieldError> {
        let mut failures = Vec::new();
        for check in self.validate_step(index) {
            match check.result {
                Ok(()) => self.unflag(&check.field),
                Err(error) => {
                    self.flag(&check.field, error);
                    failures.push(FieldError::new(&check.field, error));
                }
            }
        }
        tracing::debug!("Step {index} checked: {} invalid field(s)", failures.len());
        failures
    }

    fn flag(&mut self, field: &str, error: ErrorKind) {
        self.errors.insert(field.to_string(), error);
        self.renderer.set_field_error(field, error);
    }

    fn unflag(&mut self, field: &str) {
        self.errors.remove(field);
        self.renderer.clear_field_error(field);
    }

    // ----- transitions -----

    fn show_step(&mut self, index: usize) {
        self.current_step = index;
        let total = self.step_count();
        self.renderer.activate_step(index, total);
        self.renderer.set_progress(self.progress());
        if index + 1 == total {
            let review = ReviewProjection::from_record(&self.record);
            self.renderer.render_review(&review);
            self.review = Some(review);
        }
    }

    fn ensure_editable(&self) -> Result<(), TransitionError> {
        if self.phase == FormPhase::Submitted {
            return Err(TransitionError::Locked);
        }
        Ok(())
    }

    /// Move forward one step after validating the current one
    pub fn advance(&mut self, target: usize) -> Result<(), TransitionError> {
        self.ensure_editable()?;
        let from = self.current_step;
        if target != from + 1 || target >= self.step_count() {
            return Err(TransitionError::InvalidTarget { from, to: target });
        }

        let errors = self.check_step(from);
        if !errors.is_empty() {
            return Err(TransitionError::StepInvalid { step: from, errors });
        }

        self.save_step();
        self.show_step(target);
        tracing::info!("Advanced from step {from} to step {target}");
        Ok(())
    }

    /// Go back without validating; the record is kept
    pub fn retreat(&mut self, target: usize) -> Result<(), TransitionError> {
        self.ensure_editable()?;
        let from = self.current_step;
        if target > from {
            return Err(TransitionError::InvalidTarget { from, to: target });
        }
        self.show_step(target);
        tracing::info!("Went back from step {from} to step {target}");
        Ok(())
    }

    /// Jump to a completed step's indicator. Returns false (and changes
    /// nothing) unless `index` is behind the current step.
    pub fn jump_to_indicator(&mut self, index: usize) -> bool {
        if self.phase == FormPhase::Submitted || index >= self.current_step {
            return false;
        }
        self.show_step(index);
        true
    }

    /// Merge the current step's inputs into the record
    pub fn save_step(&mut self) {
        let step = &self.definition.steps[self.current_step];
        for field in &step.fields {
            self.record.save(field);
        }
    }

    /// Validate everything, check the terms and hand the record to the client
    pub async fn submit(&mut self) -> Result<SubmissionReceipt, SubmitError> {
        self.begin_submit()?;

        let outcome = self.client.submit(&self.record).await;
        self.renderer.set_submitting(false);

        match outcome {
            Ok(receipt) => {
                self.phase = FormPhase::Submitted;
                let summary = self.success_summary(&receipt);
                self.renderer.show_success(&summary);
                tracing::info!("Registration submitted for {}", summary.username);
                Ok(receipt)
            }
            Err(e) => {
                self.phase = FormPhase::Editing;
                tracing::warn!("Submission error: {e:#}");
                let err = SubmitError::Failed(e.to_string());
                self.renderer.show_notice(&err.to_string());
                Err(err)
            }
        }
    }

    /// The checks `submit` runs before the client is called. On success the
    /// form is `Submitting` and the renderer shows it busy; a later `submit`
    /// goes straight to the client.
    pub fn begin_submit(&mut self) -> Result<(), SubmitError> {
        match self.phase {
            FormPhase::Submitted => return Err(SubmitError::AlreadySubmitted),
            FormPhase::Submitting => return Ok(()),
            FormPhase::Editing => {}
        }

        for index in 0..self.step_count() {
            self.show_step(index);
            let errors = self.check_step(index);
            if !errors.is_empty() {
                let err = SubmitError::StepInvalid {
                    step: index,
                    errors,
                };
                self.renderer.show_notice(&err.to_string());
                return Err(err);
            }
            self.save_step();
        }

        let terms = self.definition.terms_field.clone();
        if !self.record.flag(&terms) {
            self.flag(&terms, ErrorKind::TermsNotAccepted);
            return Err(SubmitError::TermsNotAccepted);
        }
        self.unflag(&terms);

        self.phase = FormPhase::Submitting;
        self.renderer.set_submitting(true);
        Ok(())
    }

    fn success_summary(&self, receipt: &SubmissionReceipt) -> SuccessSummary {
        SuccessSummary {
            name: format!(
                "{} {}",
                self.record.text("firstName"),
                self.record.text("lastName")
            ),
            email: self.record.text("email").to_string(),
            username: self.record.text("username").to_string(),
            created_at: receipt
                .received_at
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            reference: receipt.id.to_string(),
        }
    }

    /// Close the confirmation and start over
    pub fn acknowledge_success(&mut self) {
        if self.phase != FormPhase::Submitted {
            return;
        }
        self.renderer.hide_success();
        self.reset();
    }

    /// Back to an empty first step
    pub fn reset(&mut self) {
        self.record.reset();
        for step in &mut self.definition.steps {
            step.active_field_index = 0;
            for field in &mut step.fields {
                field.clear();
            }
        }
        let flagged: Vec<String> = self.errors.keys().cloned().collect();
        for field in flagged {
            self.unflag(&field);
        }
        self.renderer.reset_feedback();
        if self.preview_visible {
            self.preview_visible = false;
            self.renderer.hide_preview();
        }
        self.review = None;
        self.phase = FormPhase::Editing;
        self.show_step(0);
        tracing::info!("Form reset");
    }

    // ----- live input -----

    /// Edit a field in place, then run its live feedback
    pub fn update_field(
        &mut self,
        name: &str,
        edit: impl FnOnce(&mut FormField),
    ) -> Result<(), FormError> {
        let step = self
            .definition
            .step_of(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        let field = self.definition.steps[step]
            .field_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        edit(&mut *field);
        if step == self.current_step {
            self.record.save(field);
        }
        self.live_feedback(name);
        Ok(())
    }

    /// Replace a field's value
    pub fn set_value(&mut self, name: &str, value: FieldValue) -> Result<(), FormError> {
        let mut fits = true;
        self.update_field(name, |field| fits = field.set_value(value))?;
        if fits {
            Ok(())
        } else {
            Err(FormError::ValueShape(name.to_string()))
        }
    }

    fn live_feedback(&mut self, name: &str) {
        let Some(field) = self.definition.field(name) else {
            return;
        };

        if field.kind == FieldKind::Password {
            let raw = field.as_text().to_string();
            self.renderer
                .set_password_strength(validator::password_strength(&raw));
            for requirement in PasswordRequirement::ALL {
                self.renderer
                    .set_requirement(requirement, requirement.is_met(&raw));
            }
        }

        self.apply_relations(name);
    }

    /// Re-check every relation `name` takes part in
    fn apply_relations(&mut self, name: &str) {
        let relations: Vec<FieldRelation> = self
            .definition
            .relations
            .iter()
            .filter(|r| {
                let (a, b) = r.fields();
                a == name || b == name
            })
            .cloned()
            .collect();
        for FieldRelation::Matches {
            field,
            confirm,
            error,
        } in relations
        {
            let a = self.definition.field(&field).map(FormField::as_text).unwrap_or("");
            let b = self.definition.field(&confirm).map(FormField::as_text).unwrap_or("");
            if a.is_empty() || b.is_empty() {
                continue;
            }
            if a == b {
                self.unflag(&confirm);
                self.renderer.set_password_match(true);
            } else {
                self.flag(&confirm, error);
                self.renderer.set_password_match(false);
            }
        }
    }

    /// Focusing a field clears its error
    pub fn focus(&mut self, name: &str) {
        if self.errors.contains_key(name) {
            self.unflag(name);
        }
    }

    /// Leaving a non-empty field validates it
    pub fn blur(&mut self, name: &str) {
        let Some(field) = self.definition.field(name) else {
            return;
        };
        if field.value.is_blank() {
            return;
        }
        match validator::validate(field.kind, &field.value, field.required) {
            Ok(()) => self.unflag(name),
            Err(error) => self.flag(name, error),
        }
        self.apply_relations(name);
    }

    /// Quiet-period check while typing: only ever clears an error
    pub fn revalidate_live(&mut self, name: &str) {
        let Some(field) = self.definition.field(name) else {
            return;
        };
        if field.value.is_blank() {
            return;
        }
        if validator::validate(field.kind, &field.value, field.required).is_ok()
            && self.errors.contains_key(name)
        {
            self.unflag(name);
        }
    }

    // ----- files -----

    /// Attach an image to a file field
    pub fn attach_file(&mut self, name: &str, upload: FileUpload) -> Result<(), FormError> {
        let field = self
            .field(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))?;
        if field.shape != InputShape::File {
            return Err(FormError::ValueShape(name.to_string()));
        }

        let rejection = if !ACCEPTED_IMAGE_TYPES.contains(&upload.mime_type.as_str()) {
            Some(FormError::UnsupportedFileType(upload.mime_type.clone()))
        } else if upload.size_bytes > MAX_UPLOAD_BYTES {
            Some(FormError::FileTooLarge(upload.size_bytes))
        } else {
            None
        };
        if let Some(err) = rejection {
            tracing::debug!("Rejected upload {}: {err}", upload.file_name);
            self.remove_file(name)?;
            return Err(err);
        }

        let file_name = upload.file_name.clone();
        self.set_value(name, FieldValue::Text(file_name.clone()))?;
        self.renderer.render_file_preview(
            name,
            Some(FilePreview {
                file_name,
                size_bytes: upload.size_bytes,
            }),
        );
        Ok(())
    }

    pub fn remove_file(&mut self, name: &str) -> Result<(), FormError> {
        self.update_field(name, FormField::clear)?;
        self.renderer.render_file_preview(name, None);
        Ok(())
    }

    // ----- preview & export -----

    /// Show or hide the JSON preview; returns whether it is now visible
    pub fn toggle_preview(&mut self) -> Result<bool, FormError> {
        self.save_step();
        if self.preview_visible {
            self.preview_visible = false;
            self.renderer.hide_preview();
        } else {
            let json = self.record.to_json()?;
            self.preview_visible = true;
            self.renderer.render_preview(&json);
        }
        Ok(self.preview_visible)
    }

    /// Saves the current step, then returns the record as JSON
    pub fn preview_snapshot(&mut self) -> Result<String, FormError> {
        self.save_step();
        self.record.to_json()
    }

    /// Snapshot of the record as it stands, named for download
    pub fn export(&self) -> Result<ExportFile, FormError> {
        self.export_at(Utc::now())
    }

    pub fn export_at(&self, at: DateTime<Utc>) -> Result<ExportFile, FormError> {
        let file = ExportFile::new(&self.record, at)?;
        tracing::info!("Exported form data as {}", file.file_name);
        Ok(file)
    }
}
