//! HTTP plumbing shared by every endpoint module.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use orderlink_auth::{BearerToken, ProfileApi, ProfileFetchError, UserProfile};

use crate::config::ClientConfig;
use crate::error::ApiError;

/// Client for the OrderLink backend.
///
/// Holds no credential. Calls that need one go through
/// [`ApiClient::authorized`], which borrows the token for the duration of the
/// call.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    /// Calls made on behalf of the holder of `token`.
    pub fn authorized<'a>(&'a self, token: &'a BearerToken) -> AuthorizedClient<'a> {
        AuthorizedClient { api: self, token }
    }
}

/// [`ApiClient`] paired with the bearer token of the current session.
#[derive(Debug, Clone, Copy)]
pub struct AuthorizedClient<'a> {
    api: &'a ApiClient,
    token: &'a BearerToken,
}

impl AuthorizedClient<'_> {
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.api
            .request(method, path)
            .bearer_auth(self.token.expose())
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        execute(self.request(Method::GET, path)).await
    }

    pub(crate) async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        execute(self.request(method, path).json(body)).await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        execute_empty(self.request(Method::DELETE, path)).await
    }
}

/// Send a request and decode a JSON body from a 2xx answer.
pub(crate) async fn execute<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = checked(request).await?;
    response.json::<T>().await.map_err(|e| {
        if e.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Parse(e.to_string())
        }
    })
}

/// Send a request whose answer body is irrelevant.
pub(crate) async fn execute_empty(request: RequestBuilder) -> Result<(), ApiError> {
    checked(request).await.map(|_| ())
}

async fn checked(request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
    let response = request.send().await.map_err(ApiError::from_transport)?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), "request rejected");
    Err(ApiError::from_status(status.as_u16(), &body))
}

#[async_trait]
impl ProfileApi for ApiClient {
    async fn fetch_profile(&self, token: &BearerToken) -> Result<UserProfile, ProfileFetchError> {
        Ok(self.authorized(token).get("profile/me").await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_join_without_double_slashes() {
        let api = ApiClient::new(&ClientConfig::default().with_api_url("http://backend/api/")).unwrap();
        assert_eq!(api.base_url(), "http://backend/api");
        assert_eq!(api.url("/auth/login"), "http://backend/api/auth/login");
        assert_eq!(api.url("profile/me"), "http://backend/api/profile/me");
    }

    #[test]
    fn authorized_requests_carry_bearer_header() {
        let api = ApiClient::new(&ClientConfig::default()).unwrap();
        let token = BearerToken::new("abc");
        let request = api
            .authorized(&token)
            .request(Method::GET, "orders")
            .build()
            .unwrap();
        let header = request.headers().get(reqwest::header::AUTHORIZATION).unwrap();
        assert_eq!(header.to_str().unwrap(), "Bearer abc");
    }
}
