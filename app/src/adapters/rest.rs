//! REST adapters for the hosted backend
//!
//! `RestDatabase` speaks the realtime-database REST shape: every path is
//! addressed as `{base}/{path}.json`, reads return JSON (or `null`), and a
//! `POST` creates a child with a generated key returned as `{"name": key}`.
//!
//! `RestStorage` uploads raw bytes to `{base}/o?name={path}` and builds the
//! retrieval URL `{base}/o/{encoded path}?alt=media[&token=...]` from the
//! returned object metadata.

use crate::error::{DatabaseError, DatabaseResult, StorageError, StorageResult};
use crate::ports::{ObjectStorage, StructuredDatabase};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::debug;

/// Build the HTTP client shared by both adapters
pub fn http_client(timeout: Duration) -> reqwest::Result<Client> {
    Client::builder().timeout(timeout).build()
}

/// Realtime database over REST
#[derive(Clone)]
pub struct RestDatabase {
    client: Client,
    base_url: String,
    id_token: Option<SecretString>,
}

#[derive(Deserialize)]
struct PushResponse {
    name: String,
}

impl RestDatabase {
    pub fn new(client: Client, base_url: impl Into<String>, id_token: Option<SecretString>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            id_token,
        }
    }

    fn url(&self, path: &str) -> DatabaseResult<Url> {
        let raw = format!(
            "{}/{}.json",
            self.base_url.trim_end_matches('/'),
            path.trim_matches('/')
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| DatabaseError::Unavailable(format!("invalid database URL {raw}: {e}")))?;
        if let Some(token) = &self.id_token {
            url.query_pairs_mut()
                .append_pair("auth", token.expose_secret());
        }
        Ok(url)
    }
}

#[async_trait]
impl StructuredDatabase for RestDatabase {
    async fn read_all(&self, path: &str) -> DatabaseResult<BTreeMap<String, Value>> {
        match self.read(path).await? {
            None => Ok(BTreeMap::new()),
            Some(Value::Object(children)) => Ok(children.into_iter().collect()),
            Some(other) => Err(DatabaseError::UnexpectedPayload(format!(
                "expected an object at {path}, got {other}"
            ))),
        }
    }

    async fn read(&self, path: &str) -> DatabaseResult<Option<Value>> {
        debug!(path, "Reading from database");
        let response = self.client.get(self.url(path)?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DatabaseError::Status(status.as_u16()));
        }
        let value: Value = response.json().await?;
        Ok((!value.is_null()).then_some(value))
    }

    async fn write_new(&self, path: &str, record: Value) -> DatabaseResult<String> {
        debug!(path, "Writing new child to database");
        let response = self
            .client
            .post(self.url(path)?)
            .json(&record)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(DatabaseError::Status(status.as_u16()));
        }
        let pushed: PushResponse = response.json().await?;
        Ok(pushed.name)
    }
}

/// Object storage over REST
#[derive(Clone)]
pub struct RestStorage {
    client: Client,
    base_url: String,
    id_token: Option<SecretString>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadedObject {
    name: String,
    #[serde(default)]
    download_tokens: Option<String>,
}

impl RestStorage {
    pub fn new(client: Client, base_url: impl Into<String>, id_token: Option<SecretString>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            id_token,
        }
    }

    fn objects_url(&self) -> StorageResult<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| StorageError::InvalidUrl(format!("{}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push("o");
        Ok(url)
    }

    fn download_url(&self, object: &UploadedObject) -> StorageResult<String> {
        let mut url = self.objects_url()?;
        url.path_segments_mut()
            .map_err(|_| StorageError::InvalidUrl(self.base_url.clone()))?
            .push(&object.name);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("alt", "media");
            // Several tokens may be returned comma-separated; any one works.
            if let Some(token) = object
                .download_tokens
                .as_deref()
                .and_then(|tokens| tokens.split(',').next())
            {
                query.append_pair("token", token);
            }
        }
        Ok(url.into())
    }
}

#[async_trait]
impl ObjectStorage for RestStorage {
    async fn upload(&self, path: &str, payload: Vec<u8>) -> StorageResult<String> {
        let mut url = self.objects_url()?;
        url.query_pairs_mut().append_pair("name", path);

        let mut request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(payload);
        if let Some(token) = &self.id_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StorageError::Rejected(format!("status {status} for {path}")));
        }
        let object: UploadedObject = response.json().await?;
        self.download_url(&object)
    }
}
