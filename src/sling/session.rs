//! The session handle (`$s`).

use crate::config::ServerConfig;
use crate::error::SlingError;
use reqwest::Url;
use std::sync::RwLock;
use std::time::Duration;

use super::reply::HttpReply;
use super::transport;

/// Account a request is made as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub name: String,
    pub password: String,
}

impl Credentials {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

/// Configured access to one Sling server.
///
/// Requests are authenticated as the current user, which starts out as the
/// configured admin and can be changed with [`Session::switch_user`].
#[derive(Debug)]
pub struct Session {
    http: reqwest::Client,
    base_url: Url,
    admin: Credentials,
    current: RwLock<Credentials>,
}

impl Session {
    /// Validate the server configuration and build the HTTP client.
    ///
    /// No request is made; an unreachable server surfaces on first use.
    pub fn connect(config: &ServerConfig) -> Result<Self, SlingError> {
        let base_url = parse_base_url(&config.url)?;
        let http = transport::build_http_client(Duration::from_secs(config.timeout_secs.max(1)))?;
        let admin = Credentials::new(&config.admin_user, &config.admin_password);
        tracing::info!(server = %base_url, user = %admin.name, "session created");
        Ok(Self {
            http,
            base_url,
            current: RwLock::new(admin.clone()),
            admin,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a server path (or absolute URL) against the base URL.
    pub fn url_for(&self, path: &str) -> Result<Url, SlingError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path).map_err(|e| SlingError::InvalidUrl(format!("{path}: {e}")));
        }
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| SlingError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Credentials requests are currently made with.
    pub fn current_user(&self) -> Credentials {
        self.current
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Make subsequent requests as `credentials`.
    pub fn switch_user(&self, credentials: Credentials) {
        tracing::info!(user = %credentials.name, "switching session user");
        *self
            .current
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = credentials;
    }

    /// Go back to the configured admin account.
    pub fn switch_to_admin(&self) {
        self.switch_user(self.admin.clone());
    }

    /// `GET` a path and return the reply whatever its status.
    pub async fn execute_get(&self, path: &str) -> Result<HttpReply, SlingError> {
        let url = self.url_for(path)?;
        let reply = transport::send(self.http.get(url.clone()), &self.current_user()).await?;
        tracing::debug!(method = "GET", %url, status = reply.code, "sling request");
        Ok(reply)
    }

    /// `POST` form fields to a path and return the reply whatever its status.
    pub async fn execute_post(
        &self,
        path: &str,
        form: &[(String, String)],
    ) -> Result<HttpReply, SlingError> {
        let url = self.url_for(path)?;
        let reply =
            transport::send(self.http.post(url.clone()).form(form), &self.current_user()).await?;
        tracing::debug!(method = "POST", %url, status = reply.code, "sling request");
        Ok(reply)
    }

    /// Properties of the node at `path`, read through the `.json` rendering.
    pub async fn get_node_props(&self, path: &str) -> Result<serde_json::Value, SlingError> {
        let path = format!("{}.json", path.trim_end_matches('/'));
        self.execute_get(&path).await?.error_for_status()?.json()
    }

    /// Create a node (or set properties on an existing one).
    pub async fn create_node(
        &self,
        path: &str,
        props: &[(String, String)],
    ) -> Result<HttpReply, SlingError> {
        self.execute_post(path, props).await?.error_for_status()
    }

    /// Set properties on the node at `path`.
    pub async fn update_node_props(
        &self,
        path: &str,
        props: &[(String, String)],
    ) -> Result<HttpReply, SlingError> {
        self.execute_post(path, props).await?.error_for_status()
    }

    /// Delete the node at `path` through the Sling POST servlet.
    pub async fn delete_node(&self, path: &str) -> Result<HttpReply, SlingError> {
        let form = [(":operation".to_string(), "delete".to_string())];
        self.execute_post(path, &form).await?.error_for_status()
    }
}

/// Parse the configured URL, forcing a trailing slash so `join` appends.
fn parse_base_url(raw: &str) -> Result<Url, SlingError> {
    let raw = raw.trim();
    let mut url = Url::parse(raw).map_err(|e| SlingError::InvalidUrl(format!("{raw}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SlingError::InvalidUrl(format!(
            "{raw}: unsupported scheme `{}`",
            url.scheme()
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testsupport::FakeServer;

    fn config_for(url: &str) -> ServerConfig {
        ServerConfig {
            url: url.to_string(),
            timeout_secs: 5,
            ..ServerConfig::default()
        }
    }

    #[test]
    fn connect_rejects_malformed_urls() {
        let err = Session::connect(&config_for("not a url")).unwrap_err();
        assert!(matches!(err, SlingError::InvalidUrl(_)), "got: {err}");
        let err = Session::connect(&config_for("ftp://example.com/")).unwrap_err();
        assert!(err.to_string().contains("unsupported scheme"), "got: {err}");
    }

    #[test]
    fn url_for_joins_under_base_path() {
        let session = Session::connect(&config_for("http://localhost:8080/nakamura")).unwrap();
        assert_eq!(session.base_url().as_str(), "http://localhost:8080/nakamura/");
        assert_eq!(
            session.url_for("/system/me.json").unwrap().as_str(),
            "http://localhost:8080/nakamura/system/me.json"
        );
        assert_eq!(
            session.url_for("https://other/x").unwrap().as_str(),
            "https://other/x"
        );
    }

    #[test]
    fn switch_user_and_back_to_admin() {
        let session = Session::connect(&config_for("http://localhost:8080/")).unwrap();
        assert_eq!(session.current_user().name, "admin");
        session.switch_user(Credentials::new("alice", "pw"));
        assert_eq!(session.current_user(), Credentials::new("alice", "pw"));
        session.switch_to_admin();
        assert_eq!(session.current_user().name, "admin");
    }

    #[tokio::test]
    async fn requests_carry_current_user_basic_auth() {
        let server = FakeServer::start(vec![(200, "ok"), (200, "ok")]).await;
        let session = Session::connect(&config_for(&server.url())).unwrap();

        session.execute_get("/system/me.json").await.unwrap();
        session.switch_user(Credentials::new("alice", "pw"));
        session.execute_get("/system/me.json").await.unwrap();

        let requests = server.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].header("authorization"),
            Some("Basic YWRtaW46YWRtaW4=")
        );
        assert_eq!(requests[1].header("authorization"), Some("Basic YWxpY2U6cHc="));
    }

    #[tokio::test]
    async fn execute_get_returns_non_success_replies() {
        let server = FakeServer::start(vec![(404, "missing")]).await;
        let session = Session::connect(&config_for(&server.url())).unwrap();
        let reply = session.execute_get("/nothing").await.unwrap();
        assert_eq!(reply.code, 404);
        assert_eq!(reply.body, "missing");
    }

    #[tokio::test]
    async fn get_node_props_reads_json_rendering() {
        let server = FakeServer::start(vec![(200, r#"{"jcr:primaryType":"nt:unstructured"}"#)]).await;
        let session = Session::connect(&config_for(&server.url())).unwrap();
        let props = session.get_node_props("/content/a/").await.unwrap();
        assert_eq!(props["jcr:primaryType"], "nt:unstructured");
        assert_eq!(server.requests()[0].path, "/content/a.json");
    }

    #[tokio::test]
    async fn delete_node_posts_delete_operation() {
        let server = FakeServer::start(vec![(200, "")]).await;
        let session = Session::connect(&config_for(&server.url())).unwrap();
        session.delete_node("/content/a").await.unwrap();
        let request = &server.requests()[0];
        assert_eq!(request.method, "POST");
        assert_eq!(request.path, "/content/a");
        assert_eq!(request.form_value(":operation").as_deref(), Some("delete"));
    }

    #[tokio::test]
    async fn update_node_props_fails_on_error_status() {
        let server = FakeServer::start(vec![(500, "boom")]).await;
        let session = Session::connect(&config_for(&server.url())).unwrap();
        let props = vec![("title".to_string(), "x".to_string())];
        let err = session.update_node_props("/content/a", &props).await.unwrap_err();
        assert_eq!(err.status_code(), Some(500));
    }
}
