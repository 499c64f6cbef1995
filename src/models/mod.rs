pub mod contact;

pub use contact::{ContactResponse, ContactSubmission, HealthResponse, ValidSubmission};
