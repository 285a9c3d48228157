//! Typed consumer of the content API, used by the site and the admin tooling.
//!
//! Every call trusts the envelope's `success` flag over the HTTP status.

use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{
    admin::{AuthResponse, CredentialsPayload},
    response::ApiResponse,
    Resource,
};

pub mod settings;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (status {status})")]
    Api { status: u16, message: String },

    #[error("response carried no data")]
    MissingData,
}

#[derive(Debug, Clone)]
pub struct ContentClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ContentClient {
    /// `base_url` is the server root, e.g. `http://localhost:8080`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Logs in and keeps the issued token for later admin calls.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        let req = self
            .request(Method::POST, "/admin/login")
            .json(&CredentialsPayload::new(username, password));
        let auth: AuthResponse = self
            .send(req)
            .await?
            .data
            .ok_or(ClientError::MissingData)?;
        self.token = Some(auth.token.clone());
        Ok(auth)
    }

    pub async fn list<R: Resource>(&self) -> Result<Vec<R>, ClientError> {
        let req = self.request(Method::GET, &format!("/{}", R::PATH));
        self.send(req).await?.data.ok_or(ClientError::MissingData)
    }

    pub async fn get<R: Resource>(&self, id: i64) -> Result<R, ClientError> {
        let req = self.request(Method::GET, &format!("/{}/{id}", R::PATH));
        self.send(req).await?.data.ok_or(ClientError::MissingData)
    }

    pub async fn create<R: Resource>(&self, payload: &R::Create) -> Result<R, ClientError> {
        let req = self
            .request(Method::POST, &format!("/{}", R::PATH))
            .json(payload);
        self.send(req).await?.data.ok_or(ClientError::MissingData)
    }

    pub async fn update<R: Resource>(&self, id: i64, patch: &R::Patch) -> Result<R, ClientError> {
        let req = self
            .request(Method::PUT, &format!("/{}/{id}", R::PATH))
            .json(patch);
        self.send(req).await?.data.ok_or(ClientError::MissingData)
    }

    pub async fn delete<R: Resource>(&self, id: i64) -> Result<(), ClientError> {
        let req = self.request(Method::DELETE, &format!("/{}/{id}", R::PATH));
        self.send::<serde_json::Value>(req).await?;
        Ok(())
    }

    pub(crate) fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let req = self
            .http
            .request(method, format!("{}/api{endpoint}", self.base_url));
        match &self.token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
    ) -> Result<ApiResponse<T>, ClientError> {
        let response = req.send().await?;
        let status = response.status().as_u16();
        let envelope: ApiResponse<T> = response.json().await?;

        if !envelope.success {
            return Err(ClientError::Api {
                status,
                message: envelope.error.unwrap_or_else(|| "request failed".to_string()),
            });
        }
        Ok(envelope)
    }
}

/// Locally held list of one resource, reconciled from the rows the server returns
/// instead of re-fetching after each edit.
#[derive(Debug, Clone)]
pub struct ContentState<R> {
    items: Vec<R>,
}

impl<R: Resource> ContentState<R> {
    pub fn new(items: Vec<R>) -> Self {
        Self { items }
    }

    pub async fn load(client: &ContentClient) -> Result<Self, ClientError> {
        Ok(Self::new(client.list::<R>().await?))
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    // Newest first, like the list endpoint
    pub fn apply_created(&mut self, row: R) {
        self.items.insert(0, row);
    }

    pub fn apply_updated(&mut self, row: R) {
        match self.items.iter_mut().find(|item| item.id() == row.id()) {
            Some(slot) => *slot = row,
            None => self.items.insert(0, row),
        }
    }

    pub fn apply_deleted(&mut self, id: i64) {
        self.items.retain(|item| item.id() != id);
    }

    pub async fn create(
        &mut self,
        client: &ContentClient,
        payload: &R::Create,
    ) -> Result<(), ClientError> {
        let row = client.create::<R>(payload).await?;
        self.apply_created(row);
        Ok(())
    }

    pub async fn update(
        &mut self,
        client: &ContentClient,
        id: i64,
        patch: &R::Patch,
    ) -> Result<(), ClientError> {
        let row = client.update::<R>(id, patch).await?;
        self.apply_updated(row);
        Ok(())
    }

    pub async fn delete(&mut self, client: &ContentClient, id: i64) -> Result<(), ClientError> {
        client.delete::<R>(id).await?;
        self.apply_deleted(id);
        Ok(())
    }
}
