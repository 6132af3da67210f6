// src/infrastructure/http.rs
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};
use url::Url;

use crate::application::NotesApi;
use crate::domain::{DomainError, Note, NotesPage};

#[derive(Serialize)]
struct NoteBody<'a> {
    title: &'a str,
    content: &'a str,
}

/// [`NotesApi`] over the backend's JSON REST interface
#[derive(Debug, Clone)]
pub struct HttpNotesApi {
    client: Client,
    base_url: Url,
}

impl HttpNotesApi {
    /// Create a client for `base_url`.
    ///
    /// Without `timeout` the transport defaults apply.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut base_url =
            Url::parse(base_url).with_context(|| format!("Invalid base URL: {}", base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Base URL cannot carry a path: {}", base_url);
        }
        // Keep a trailing slash so joined paths extend the base path
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        debug!(%base_url, ?timeout, "Created HTTP notes client");
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn notes_url(&self) -> Url {
        self.url(&["notes"])
    }

    pub fn note_url(&self, id: i64) -> Url {
        let id = id.to_string();
        self.url(&["notes", id.as_str()])
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, DomainError> {
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;
        let status = response.status();
        debug!(%status, url = %response.url(), "Received response");
        if !status.is_success() {
            return Err(DomainError::Request(format!(
                "{} returned {}",
                response.url().path(),
                status
            )));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, DomainError> {
        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::Network(e.to_string()))?;
        serde_json::from_slice(&body)
            .map_err(|e| DomainError::Request(format!("Malformed response body: {}", e)))
    }
}

#[async_trait]
impl NotesApi for HttpNotesApi {
    #[instrument(level = "debug", skip(self))]
    async fn list_notes(&self, page: u32, page_size: u32) -> Result<NotesPage, DomainError> {
        let mut url = self.notes_url();
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("pageSize", &page_size.to_string());
        let response = self.send(self.client.get(url)).await?;
        Self::decode(response).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn get_note(&self, id: i64) -> Result<Note, DomainError> {
        let response = self.send(self.client.get(self.note_url(id))).await?;
        Self::decode(response).await
    }

    #[instrument(level = "debug", skip(self, content))]
    async fn create_note(&self, title: &str, content: &str) -> Result<Note, DomainError> {
        let request = self
            .client
            .post(self.notes_url())
            .json(&NoteBody { title, content });
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    #[instrument(level = "debug", skip(self, content))]
    async fn update_note(&self, id: i64, title: &str, content: &str) -> Result<Note, DomainError> {
        let request = self
            .client
            .put(self.note_url(id))
            .json(&NoteBody { title, content });
        let response = self.send(request).await?;
        Self::decode(response).await
    }

    #[instrument(level = "debug", skip(self))]
    async fn delete_note(&self, id: i64) -> Result<(), DomainError> {
        // Any 2xx confirms; the body (if any) is ignored
        self.send(self.client.delete(self.note_url(id))).await?;
        Ok(())
    }
}
