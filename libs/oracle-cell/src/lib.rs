// libs/oracle-cell/src/lib.rs
pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{FindingStatus, LabAnalysis, LabFinding, OracleError, TriageSuggestion};
pub use router::oracle_routes;
pub use services::{LabOracle, TriageOracle};
