pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{daily_slot_template, DirectoryError, Doctor, TimeSlot};
pub use services::DirectoryService;
