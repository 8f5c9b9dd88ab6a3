//! Type definitions exchanged with the presentation layer

pub mod request;
pub mod response;

pub use request::{FormDescriptor, FormSubmission, HiddenField, VisibleField};
pub use response::{Diagnosis, PredictionResponse};
