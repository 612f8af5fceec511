//! Database repositories
//!
//! Map domain records onto the structured database's path layout.

pub mod profile;
pub mod reports;

pub use profile::ProfileRepository;
pub use reports::ReportRepository;
