pub mod auth;
pub mod department;
pub mod error;

pub use auth::{AuthSession, PatientIdentity, Role};
pub use department::Department;
pub use error::AppError;
