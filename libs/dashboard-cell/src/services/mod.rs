// libs/dashboard-cell/src/services/mod.rs
pub mod dashboard;

pub use dashboard::DashboardService;
