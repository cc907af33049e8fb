// libs/oracle-cell/src/services/mod.rs
pub mod gemini;
pub mod lab;
pub mod triage;

pub use lab::LabOracle;
pub use triage::TriageOracle;
