//! Form domain layer
//!
//! Field model, validation rules, step definitions and the controller that
//! walks a form from the first step to submission.

mod controller;
mod errors;
mod field;
mod form_state;
mod record;
mod renderer;
mod review;
mod validator;

pub use controller::{CharacterCount, CounterLevel, FileUpload, FormController, FormPhase};
pub use field::{FieldKind, FieldValue, FormField, InputShape};
pub use form_state::{Form, FormDefinition};
pub use record::FormRecord;
pub use renderer::{FilePreview, Renderer, SuccessSummary};
pub use review::ReviewProjection;
pub use validator::{ErrorKind, PasswordRequirement, PasswordStrength, StrengthBand};
