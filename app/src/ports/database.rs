use crate::error::DatabaseResult;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;

/// JSON document database addressed by slash-separated paths
///
/// Paths follow `reports/{user_id}` for reports and `users/{user_id}` for
/// the profile snapshot.
#[async_trait]
pub trait StructuredDatabase: Send + Sync {
    /// All children under `path`, keyed by their backend-assigned key
    async fn read_all(&self, path: &str) -> DatabaseResult<BTreeMap<String, Value>>;

    /// The value stored at `path`, if any
    async fn read(&self, path: &str) -> DatabaseResult<Option<Value>>;

    /// Store `record` as a new child of `path` and return its unique key
    async fn write_new(&self, path: &str, record: Value) -> DatabaseResult<String>;
}
