//! Screen controllers
//!
//! Each screen owns its local state and talks to the backend only through
//! the services it was constructed with.

mod home;
mod report;
pub mod view;

pub use home::HomeScreen;
pub use report::{ReportScreen, ReportScreenState};
pub use view::{DashboardView, ReportListItem};
