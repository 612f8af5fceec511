//! In-memory adapters
//!
//! Substitutable fakes for every port. They back the unit and integration
//! tests and let the screens run without a network connection. Each fake
//! exposes a few knobs (rejected payloads, failing reads/writes, latency)
//! so failure paths can be exercised.

use crate::error::{DatabaseError, DatabaseResult, PickerError, StorageError, StorageResult};
use crate::ports::{AuthProvider, ImagePicker, ImageSource, ObjectStorage, PickOutcome, StructuredDatabase};
use async_trait::async_trait;
use progress_tracker_shared::{AuthError, LocalImage};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Auth provider with a fixed (or absent) user
#[derive(Debug, Clone)]
pub struct StaticAuth {
    user_id: Option<String>,
}

impl StaticAuth {
    pub fn signed_in(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
        }
    }

    pub fn signed_out() -> Self {
        Self { user_id: None }
    }
}

#[async_trait]
impl AuthProvider for StaticAuth {
    async fn current_user_id(&self) -> Result<String, AuthError> {
        self.user_id.clone().ok_or(AuthError::MissingToken)
    }
}

/// Object storage kept in a map, returning `memory://` URLs
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    objects: Mutex<BTreeMap<String, Vec<u8>>>,
    rejected_payloads: Mutex<Vec<Vec<u8>>>,
    latency: Option<Duration>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every upload, to keep a submission in flight
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Fail any upload whose payload equals `payload`
    pub fn reject_payload(&self, payload: impl Into<Vec<u8>>) {
        lock(&self.rejected_payloads).push(payload.into());
    }

    pub fn object_count(&self) -> usize {
        lock(&self.objects).len()
    }

    pub fn object(&self, path: &str) -> Option<Vec<u8>> {
        lock(&self.objects).get(path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        lock(&self.objects).keys().cloned().collect()
    }
}

#[async_trait]
impl ObjectStorage for InMemoryStorage {
    async fn upload(&self, path: &str, payload: Vec<u8>) -> StorageResult<String> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        if lock(&self.rejected_payloads).contains(&payload) {
            return Err(StorageError::Rejected(format!("payload for {path} refused")));
        }
        lock(&self.objects).insert(path.to_string(), payload);
        Ok(format!("memory://{path}"))
    }
}

/// Structured database kept in a map of full paths to JSON values
#[derive(Debug, Default)]
pub struct InMemoryDatabase {
    documents: Mutex<BTreeMap<String, Value>>,
    next_key: AtomicU64,
    writes: AtomicUsize,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value at an exact path, e.g. `users/{user_id}`
    pub fn put(&self, path: &str, value: Value) {
        lock(&self.documents).insert(path.to_string(), value);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `write_new` calls
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    fn check_reads(&self) -> DatabaseResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("reads disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl StructuredDatabase for InMemoryDatabase {
    async fn read_all(&self, path: &str) -> DatabaseResult<BTreeMap<String, Value>> {
        self.check_reads()?;
        let prefix = format!("{}/", path.trim_end_matches('/'));
        let children = lock(&self.documents)
            .iter()
            .filter_map(|(full_path, value)| {
                let key = full_path.strip_prefix(&prefix)?;
                (!key.contains('/')).then(|| (key.to_string(), value.clone()))
            })
            .collect();
        Ok(children)
    }

    async fn read(&self, path: &str) -> DatabaseResult<Option<Value>> {
        self.check_reads()?;
        Ok(lock(&self.documents).get(path).cloned())
    }

    async fn write_new(&self, path: &str, record: Value) -> DatabaseResult<String> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DatabaseError::Unavailable("writes disabled".to_string()));
        }
        let key = format!("r{:06}", self.next_key.fetch_add(1, Ordering::SeqCst));
        lock(&self.documents).insert(format!("{}/{}", path.trim_end_matches('/'), key), record);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(key)
    }
}

/// Image bytes registered by URI
#[derive(Debug, Default)]
pub struct InMemoryImageSource {
    images: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, uri: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        lock(&self.images).insert(uri.into(), bytes.into());
    }
}

#[async_trait]
impl ImageSource for InMemoryImageSource {
    async fn read(&self, image: &LocalImage) -> StorageResult<Vec<u8>> {
        lock(&self.images)
            .get(image.uri())
            .cloned()
            .ok_or_else(|| StorageError::ImageRead {
                uri: image.uri().to_string(),
                reason: "no such image".to_string(),
            })
    }
}

/// Picker that replays queued outcomes; an empty queue behaves as a cancel
#[derive(Debug, Default)]
pub struct ScriptedPicker {
    outcomes: Mutex<VecDeque<Result<PickOutcome, PickerError>>>,
}

impl ScriptedPicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, outcome: Result<PickOutcome, PickerError>) {
        lock(&self.outcomes).push_back(outcome);
    }

    pub fn push_image(&self, uri: impl Into<String>) {
        self.push(Ok(PickOutcome::Picked(LocalImage::new(uri))));
    }
}

#[async_trait]
impl ImagePicker for ScriptedPicker {
    async fn pick(&self) -> Result<PickOutcome, PickerError> {
        lock(&self.outcomes)
            .pop_front()
            .unwrap_or(Ok(PickOutcome::Cancelled))
    }
}
