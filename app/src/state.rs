//! Backend handles shared by the screens
//!
//! The hosted backend is never reached through global state. Everything a
//! screen or service needs is bundled here and passed in explicitly, so
//! tests can swap any port for an in-memory fake.

use crate::adapters::{http_client, FsImageSource, RestDatabase, RestStorage};
use crate::auth::TokenAuth;
use crate::config::AppConfig;
use crate::ports::{AuthProvider, ImageSource, ObjectStorage, StructuredDatabase};
use anyhow::Result;
use std::sync::Arc;

/// Shared backend handles
///
/// All fields are `Arc`s, so cloning is O(1) and clones can move into
/// spawned tasks.
#[derive(Clone)]
pub struct Backend {
    pub auth: Arc<dyn AuthProvider>,
    pub storage: Arc<dyn ObjectStorage>,
    pub database: Arc<dyn StructuredDatabase>,
    pub images: Arc<dyn ImageSource>,
    pub config: Arc<AppConfig>,
}

impl Backend {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        storage: Arc<dyn ObjectStorage>,
        database: Arc<dyn StructuredDatabase>,
        images: Arc<dyn ImageSource>,
        config: AppConfig,
    ) -> Self {
        Self {
            auth,
            storage,
            database,
            images,
            config: Arc::new(config),
        }
    }

    /// Connect to the hosted backend described by `config`
    pub fn connect(config: AppConfig) -> Result<Self> {
        let client = http_client(config.backend.request_timeout())?;
        let token = config.auth.id_token.clone();

        let auth = TokenAuth::new(token.clone(), config.auth.project_id.as_deref());
        let database = RestDatabase::new(client.clone(), &config.backend.database_url, token.clone());
        let storage = RestStorage::new(client, &config.backend.storage_url, token);

        Ok(Self::new(
            Arc::new(auth),
            Arc::new(storage),
            Arc::new(database),
            Arc::new(FsImageSource),
            config,
        ))
    }

    /// Get a reference to the configuration
    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}
