//! Form-level errors returned by the controller

use super::validator::ErrorKind;
use thiserror::Error;

/// A flagged field and why
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub error: ErrorKind,
}

impl FieldError {
    pub fn new(field: &str, error: ErrorKind) -> Self {
        Self {
            field: field.to_string(),
            error,
        }
    }
}

/// Misuse of the controller API or a rejected upload
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("a form needs at least one step")]
    NoSteps,
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("value does not fit field `{0}`")]
    ValueShape(String),
    #[error("Please upload a valid image file (JPEG, PNG, or GIF)")]
    UnsupportedFileType(String),
    #[error("File size must be less than 5MB")]
    FileTooLarge(u64),
    #[error("failed to serialize form data: {0}")]
    Export(String),
}

/// Why a step change was refused
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot move from step {from} to step {to}")]
    InvalidTarget { from: usize, to: usize },
    #[error("step {step} has {} invalid field(s)", errors.len())]
    StepInvalid { step: usize, errors: Vec<FieldError> },
    #[error("the form was submitted and is waiting to be acknowledged")]
    Locked,
}

/// Why a submission did not go through
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please fix all errors before submitting")]
    StepInvalid { step: usize, errors: Vec<FieldError> },
    #[error("You must agree to the terms and conditions")]
    TermsNotAccepted,
    #[error("There was an error submitting the form. Please try again.")]
    Failed(String),
    #[error("the form was already submitted")]
    AlreadySubmitted,
}
