//! Form rendering module
//!
//! This module contains UI components for rendering the registration form:
//! - `field_renderer`: Field rendering utilities
//! - `step_form`: The active step with its password panel
//! - `review`: Summary shown on the last step

mod field_renderer;
mod review;
mod step_form;

pub use step_form::draw_step;
