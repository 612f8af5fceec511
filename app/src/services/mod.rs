//! Business logic services
//!
//! Services encapsulate the screen workflows and coordinate between
//! repositories and the external ports.

pub mod dashboard;
pub mod report;

pub use dashboard::DashboardService;
pub use report::ReportService;
