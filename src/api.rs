use std::time::Duration;

use reqwest::{Method, RequestBuilder, Response};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{ApiError, ImportError};
use crate::import::document::BlogDocument;
use crate::import::session::DocumentSink;
use crate::resource::screen::PendingWrite;
use crate::resource::blog::DETAILS_COLLECTION;
use crate::resource::{BlogDetails, Record, Resource};

/// Thin REST client for the admin backend. One request per call, no retries.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    blog_collection: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: &str, blog_collection: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            blog_collection: blog_collection.to_string(),
            timeout,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.api_base_url,
            &config.blog_collection,
            config.request_timeout(),
        )
    }

    /// `<base>/<collection>/` or `<base>/<collection>/<id>/`.
    fn url(&self, collection: &str, id: Option<i64>) -> String {
        let collection = collection.trim_matches('/');
        match id {
            Some(id) => format!("{}/{}/{}/", self.base_url, collection, id),
            None => format!("{}/{}/", self.base_url, collection),
        }
    }

    async fn send(&self, method: Method, url: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!("{} {} failed: {}", method, url, e);
            if e.is_timeout() {
                ApiError::Timeout(self.timeout)
            } else {
                ApiError::Transport(e)
            }
        })?;

        let status = response.status();
        info!("{} {} -> {}", method, url, status);
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }
        Ok(response)
    }

    async fn write_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: &T,
    ) -> Result<(), ApiError> {
        let request = self.http.request(method.clone(), url).json(body);
        self.send(method, url, request).await?;
        Ok(())
    }

    pub async fn list<R: Resource>(&self) -> Result<Vec<Record<R>>, ApiError> {
        let url = self.url(R::COLLECTION, None);
        let response = self.send(Method::GET, &url, self.http.get(&url)).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    /// One published post from the read-only details endpoint.
    pub async fn blog_details(&self, id: i64) -> Result<BlogDetails, ApiError> {
        let url = self.url(DETAILS_COLLECTION, Some(id));
        let response = self.send(Method::GET, &url, self.http.get(&url)).await?;
        response.json().await.map_err(ApiError::Decode)
    }

    pub async fn create<R: Resource>(&self, item: &R) -> Result<(), ApiError> {
        self.write_json(Method::POST, &self.url(R::COLLECTION, None), item)
            .await
    }

    pub async fn update<R: Resource>(&self, id: i64, item: &R) -> Result<(), ApiError> {
        self.write_json(Method::PATCH, &self.url(R::COLLECTION, Some(id)), item)
            .await
    }

    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        let url = self.url(R::COLLECTION, Some(id));
        self.send(Method::DELETE, &url, self.http.delete(&url)).await?;
        Ok(())
    }

    pub async fn apply<R: Resource>(&self, write: &PendingWrite<R>) -> Result<(), ApiError> {
        match write {
            PendingWrite::Create(item) => self.create(item).await,
            PendingWrite::Update { id, form } => self.update(*id, form).await,
            PendingWrite::Delete { id } => self.delete::<R>(*id).await,
        }
    }
}

impl DocumentSink for ApiClient {
    async fn submit_document(&self, document: &BlogDocument) -> Result<(), ImportError> {
        let url = self.url(&self.blog_collection, None);
        self.write_json(Method::POST, &url, document)
            .await
            .map_err(ImportError::from)
    }
}

// ── Tests ──
