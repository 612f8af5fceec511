//! Common test utilities for integration tests
//!
//! Builds a `Backend` wired entirely to in-memory adapters and exposes the
//! concrete fakes so tests can seed data and inject failures.

#![allow(dead_code)]

use progress_tracker_app::adapters::{
    InMemoryDatabase, InMemoryImageSource, InMemoryStorage, ScriptedPicker, StaticAuth,
};
use progress_tracker_app::config::AppConfig;
use progress_tracker_app::ports::AuthProvider;
use progress_tracker_app::screens::{HomeScreen, ReportScreen};
use progress_tracker_app::services::{DashboardService, ReportService};
use progress_tracker_app::state::Backend;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

pub const USER_ID: &str = "user-1";

/// Test application wrapper
pub struct TestApp {
    pub backend: Backend,
    pub storage: Arc<InMemoryStorage>,
    pub database: Arc<InMemoryDatabase>,
    pub images: Arc<InMemoryImageSource>,
    pub picker: Arc<ScriptedPicker>,
}

impl TestApp {
    /// Signed in as [`USER_ID`]
    pub fn new() -> Self {
        Self::build(StaticAuth::signed_in(USER_ID), InMemoryStorage::new())
    }

    pub fn signed_out() -> Self {
        Self::build(StaticAuth::signed_out(), InMemoryStorage::new())
    }

    /// Every upload sleeps for `latency` before completing
    pub fn with_upload_latency(latency: Duration) -> Self {
        Self::build(
            StaticAuth::signed_in(USER_ID),
            InMemoryStorage::new().with_latency(latency),
        )
    }

    fn build(auth: impl AuthProvider + 'static, storage: InMemoryStorage) -> Self {
        let storage = Arc::new(storage);
        let database = Arc::new(InMemoryDatabase::new());
        let images = Arc::new(InMemoryImageSource::new());
        let backend = Backend::new(
            Arc::new(auth),
            storage.clone(),
            database.clone(),
            images.clone(),
            AppConfig::default(),
        );

        Self {
            backend,
            storage,
            database,
            images,
            picker: Arc::new(ScriptedPicker::new()),
        }
    }

    /// Register a local image and queue it on the picker
    pub fn queue_image(&self, uri: &str, bytes: &[u8]) {
        self.images.insert(uri, bytes.to_vec());
        self.picker.push_image(uri);
    }

    /// Write a raw report record for the test user
    pub fn seed_report(&self, key: &str, weight: f64, date: &str) {
        self.database.put(
            &format!("reports/{USER_ID}/{key}"),
            json!({
                "images": [],
                "weight": weight,
                "customFields": [],
                "date": date,
            }),
        );
    }

    pub fn seed_profile(&self, profile: Value) {
        self.database.put(&format!("users/{USER_ID}"), profile);
    }

    pub fn report_screen(&self) -> ReportScreen {
        ReportScreen::new(
            ReportService::new(&self.backend),
            self.picker.clone(),
            self.backend.config().reports.weight_unit,
        )
    }

    pub async fn mount_report_screen(&self) -> ReportScreen {
        ReportScreen::mount(
            ReportService::new(&self.backend),
            self.picker.clone(),
            self.backend.config().reports.weight_unit,
        )
        .await
    }

    pub fn home_screen(&self) -> HomeScreen {
        HomeScreen::new(
            DashboardService::new(&self.backend),
            self.backend.config().dashboard.weight_unit,
        )
    }
}
