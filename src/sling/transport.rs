//! HTTP plumbing shared by `Session` calls.

use crate::error::SlingError;
use std::time::Duration;

use super::reply::HttpReply;
use super::session::Credentials;

/// Build the HTTP client used for every request of one session.
pub(super) fn build_http_client(timeout: Duration) -> Result<reqwest::Client, SlingError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("portal/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| SlingError::Client(e.to_string()))
}

/// Send a request as `credentials` and buffer the full reply.
pub(super) async fn send(
    request: reqwest::RequestBuilder,
    credentials: &Credentials,
) -> Result<HttpReply, SlingError> {
    let response = request
        .basic_auth(&credentials.name, Some(&credentials.password))
        .send()
        .await?;
    let code = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let body = response.text().await?;
    Ok(HttpReply {
        code,
        content_type,
        body,
    })
}
