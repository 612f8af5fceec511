//! Port interfaces for the external collaborators
//!
//! These traits define the boundary between the report pipeline and the
//! backend-as-a-service it talks to. Every component receives its ports
//! explicitly, so tests can substitute the in-memory adapters.

pub mod auth;
pub mod database;
pub mod picker;
pub mod storage;

pub use auth::AuthProvider;
pub use database::StructuredDatabase;
pub use picker::{ImagePicker, PickOutcome};
pub use storage::{ImageSource, ObjectStorage};
