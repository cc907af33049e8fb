pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{IdentityError, MedicalHistory, Patient, RegisterPatientRequest};
pub use services::{IdentityService, SessionStore};
