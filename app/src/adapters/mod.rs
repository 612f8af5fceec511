//! Port implementations
//!
//! - `memory`: in-process fakes used by tests and offline runs
//! - `rest`: the hosted realtime database and object storage
//! - `fs`: local image files

pub mod fs;
pub mod memory;
pub mod rest;

pub use fs::FsImageSource;
pub use memory::{
    InMemoryDatabase, InMemoryImageSource, InMemoryStorage, ScriptedPicker, StaticAuth,
};
pub use rest::{http_client, RestDatabase, RestStorage};
