// libs/dashboard-cell/src/lib.rs
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{AgeBracket, DashboardError, DashboardStats, DepartmentCount};
pub use router::dashboard_routes;
pub use services::DashboardService;
