//! The user-manager handle (`$um`).

use crate::error::SlingError;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::fmt;
use std::sync::Arc;

use super::reply::HttpReply;
use super::session::{Credentials, Session};

/// Password given to users created without an explicit one.
pub const DEFAULT_USER_PASSWORD: &str = "testuser";

const USER_MANAGER_ROOT: &str = "system/userManager";

/// Bytes escaped when a principal name becomes a path segment.
const NAME_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'@');

/// Principal type, as it appears in user-manager paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalKind {
    User,
    Group,
}

impl PrincipalKind {
    fn segment(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }

    /// Parse `"user"` / `"group"`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Self::User),
            "group" => Some(Self::Group),
            _ => None,
        }
    }
}

impl fmt::Display for PrincipalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

/// A user created through the user manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub password: String,
}

impl User {
    /// Credentials for switching the session to this user.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.name, &self.password)
    }
}

/// User administration bound to one session.
///
/// Holds the session alive; there is no way to build one without it.
#[derive(Debug, Clone)]
pub struct UserManager {
    session: Arc<Session>,
}

impl UserManager {
    pub fn new(session: Arc<Session>) -> Self {
        Self { session }
    }

    /// The session this manager issues requests through.
    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    /// Create a user. `password` defaults to [`DEFAULT_USER_PASSWORD`].
    pub async fn create_user(
        &self,
        name: &str,
        password: Option<&str>,
        props: &[(String, String)],
    ) -> Result<User, SlingError> {
        let password = password.unwrap_or(DEFAULT_USER_PASSWORD);
        let mut form = vec![
            (":name".to_string(), name.to_string()),
            ("pwd".to_string(), password.to_string()),
            ("pwdConfirm".to_string(), password.to_string()),
        ];
        form.extend(props.iter().cloned());
        self.post(&create_path(PrincipalKind::User), &form).await?;
        tracing::info!(user = name, "created user");
        Ok(User {
            name: name.to_string(),
            password: password.to_string(),
        })
    }

    pub async fn delete_user(&self, name: &str) -> Result<HttpReply, SlingError> {
        self.post(&principal_path(PrincipalKind::User, name, "delete")?, &[])
            .await
    }

    pub async fn create_group(&self, name: &str) -> Result<HttpReply, SlingError> {
        let form = [(":name".to_string(), name.to_string())];
        self.post(&create_path(PrincipalKind::Group), &form).await
    }

    pub async fn delete_group(&self, name: &str) -> Result<HttpReply, SlingError> {
        self.post(&principal_path(PrincipalKind::Group, name, "delete")?, &[])
            .await
    }

    /// Add a user or group to `group`.
    pub async fn add_member(
        &self,
        group: &str,
        member: &str,
        kind: PrincipalKind,
    ) -> Result<HttpReply, SlingError> {
        let form = [(":member".to_string(), member_path(kind, member)?)];
        self.post(&principal_path(PrincipalKind::Group, group, "update")?, &form)
            .await
    }

    /// Remove a user or group from `group`.
    pub async fn remove_member(
        &self,
        group: &str,
        member: &str,
        kind: PrincipalKind,
    ) -> Result<HttpReply, SlingError> {
        let form = [(":member@Delete".to_string(), member_path(kind, member)?)];
        self.post(&principal_path(PrincipalKind::Group, group, "update")?, &form)
            .await
    }

    pub async fn get_user_props(&self, name: &str) -> Result<serde_json::Value, SlingError> {
        self.get_props(PrincipalKind::User, name).await
    }

    pub async fn get_group_props(&self, name: &str) -> Result<serde_json::Value, SlingError> {
        self.get_props(PrincipalKind::Group, name).await
    }

    pub async fn change_password(
        &self,
        name: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<HttpReply, SlingError> {
        let form = [
            ("oldPwd".to_string(), old_password.to_string()),
            ("newPwd".to_string(), new_password.to_string()),
            ("newPwdConfirm".to_string(), new_password.to_string()),
        ];
        self.post(&principal_path(PrincipalKind::User, name, "changePassword")?, &form)
            .await
    }

    async fn get_props(
        &self,
        kind: PrincipalKind,
        name: &str,
    ) -> Result<serde_json::Value, SlingError> {
        let path = format!("{USER_MANAGER_ROOT}/{kind}/{}.json", name_segment(name)?);
        self.session.execute_get(&path).await?.error_for_status()?.json()
    }

    async fn post(&self, path: &str, form: &[(String, String)]) -> Result<HttpReply, SlingError> {
        self.session.execute_post(path, form).await?.error_for_status()
    }
}

fn create_path(kind: PrincipalKind) -> String {
    format!("{USER_MANAGER_ROOT}/{kind}.create.html")
}

fn principal_path(kind: PrincipalKind, name: &str, selector: &str) -> Result<String, SlingError> {
    Ok(format!(
        "{USER_MANAGER_ROOT}/{kind}/{}.{selector}.html",
        name_segment(name)?
    ))
}

fn member_path(kind: PrincipalKind, name: &str) -> Result<String, SlingError> {
    Ok(format!("/{USER_MANAGER_ROOT}/{kind}/{}", name_segment(name)?))
}

/// A principal name escaped so it stays one segment under its kind.
fn name_segment(name: &str) -> Result<String, SlingError> {
    if matches!(name.trim(), "" | "." | "..") {
        return Err(SlingError::InvalidName(name.to_string()));
    }
    Ok(utf8_percent_encode(name, NAME_SEGMENT).to_string())
}
