//! Command implementations

pub mod audit;
pub mod simple;

pub use audit::{AuditReport, Violation, check_pair, run_audit};
pub use simple::run_simple;
