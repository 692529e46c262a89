//! The console's pre-bound globals: `$s` (session) and `$um` (user manager).

use crate::error::{EvalError, StartupError};
use crate::eval::{Args, Environment, Value};
use crate::sling::{Credentials, HttpReply, PrincipalKind, Session, User, UserManager};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

pub const SESSION_GLOBAL: &str = "$s";
pub const USER_MANAGER_GLOBAL: &str = "$um";

/// The two handles, built once, in order.
pub struct Globals<S, U> {
    session: Arc<S>,
    user_manager: U,
}

impl<S, U> Globals<S, U> {
    /// Build the session, then the user manager from it.
    ///
    /// The user manager is never constructed when the session fails.
    pub fn bind<ES, EU>(
        make_session: impl FnOnce() -> Result<S, ES>,
        make_user_manager: impl FnOnce(Arc<S>) -> Result<U, EU>,
    ) -> Result<Self, StartupError>
    where
        ES: fmt::Display,
        EU: fmt::Display,
    {
        let session = make_session()
            .map(Arc::new)
            .map_err(|e| StartupError::Bind(format!("{SESSION_GLOBAL}: {e}")))?;
        let user_manager = make_user_manager(Arc::clone(&session))
            .map_err(|e| StartupError::Bind(format!("{USER_MANAGER_GLOBAL}: {e}")))?;
        tracing::debug!(
            globals = ?[SESSION_GLOBAL, USER_MANAGER_GLOBAL],
            "console globals bound"
        );
        Ok(Self {
            session,
            user_manager,
        })
    }

    pub fn session(&self) -> &Arc<S> {
        &self.session
    }

    pub fn user_manager(&self) -> &U {
        &self.user_manager
    }
}

/// Evaluation environment exposing a Sling session and its user manager.
pub struct SlingEnvironment {
    globals: Globals<Session, UserManager>,
}

impl SlingEnvironment {
    pub fn new(globals: Globals<Session, UserManager>) -> Self {
        Self { globals }
    }

    async fn call_session(&self, args: Args<'_>, method: &str) -> Result<Value, EvalError> {
        let session = self.globals.session();
        match method {
            "url_for" => {
                let path = args.arity(1, 1)?.string(0)?;
                Ok(Value::Str(session.url_for(&path)?.to_string()))
            }
            "base_url" => {
                args.arity(0, 0)?;
                Ok(Value::Str(session.base_url().to_string()))
            }
            "execute_get" => {
                let path = args.arity(1, 1)?.string(0)?;
                Ok(reply_value(session.execute_get(&path).await?))
            }
            "execute_post" => {
                let path = args.arity(1, 2)?.string(0)?;
                let form = args.form(1)?;
                Ok(reply_value(session.execute_post(&path, &form).await?))
            }
            "get_node_props" => {
                let path = args.arity(1, 1)?.string(0)?;
                Ok(Value::from(session.get_node_props(&path).await?))
            }
            "create_node" => {
                let path = args.arity(1, 2)?.string(0)?;
                let props = args.form(1)?;
                Ok(reply_value(session.create_node(&path, &props).await?))
            }
            "update_node_props" => {
                let path = args.arity(2, 2)?.string(0)?;
                let props = args.form(1)?;
                Ok(reply_value(session.update_node_props(&path, &props).await?))
            }
            "delete_node" => {
                let path = args.arity(1, 1)?.string(0)?;
                Ok(reply_value(session.delete_node(&path).await?))
            }
            "switch_user" => {
                let credentials = credentials_arg(args.arity(1, 2)?)?;
                session.switch_user(credentials.clone());
                Ok(credentials_value(&credentials))
            }
            "switch_to_admin" => {
                args.arity(0, 0)?;
                session.switch_to_admin();
                Ok(credentials_value(&session.current_user()))
            }
            "current_user" => {
                args.arity(0, 0)?;
                Ok(credentials_value(&session.current_user()))
            }
            _ => Err(no_method(SESSION_GLOBAL, method)),
        }
    }

    async fn call_user_manager(&self, args: Args<'_>, method: &str) -> Result<Value, EvalError> {
        let um = self.globals.user_manager();
        match method {
            "create_user" => {
                let name = args.arity(1, 3)?.string(0)?;
                let password = args.opt_string(1)?;
                let props = args.form(2)?;
                let user = um.create_user(&name, password.as_deref(), &props).await?;
                Ok(user_value(&user))
            }
            "delete_user" => {
                let name = args.arity(1, 1)?.string(0)?;
                Ok(reply_value(um.delete_user(&name).await?))
            }
            "create_group" => {
                let name = args.arity(1, 1)?.string(0)?;
                Ok(reply_value(um.create_group(&name).await?))
            }
            "delete_group" => {
                let name = args.arity(1, 1)?.string(0)?;
                Ok(reply_value(um.delete_group(&name).await?))
            }
            "add_member" | "remove_member" => {
                let group = args.arity(2, 3)?.string(0)?;
                let member = args.string(1)?;
                let kind = principal_kind_arg(&args, 2)?;
                let reply = if method == "add_member" {
                    um.add_member(&group, &member, kind).await?
                } else {
                    um.remove_member(&group, &member, kind).await?
                };
                Ok(reply_value(reply))
            }
            "get_user_props" => {
                let name = args.arity(1, 1)?.string(0)?;
                Ok(Value::from(um.get_user_props(&name).await?))
            }
            "get_group_props" => {
                let name = args.arity(1, 1)?.string(0)?;
                Ok(Value::from(um.get_group_props(&name).await?))
            }
            "change_password" => {
                let name = args.arity(3, 3)?.string(0)?;
                let old = args.string(1)?;
                let new = args.string(2)?;
                Ok(reply_value(um.change_password(&name, &old, &new).await?))
            }
            _ => Err(no_method(USER_MANAGER_GLOBAL, method)),
        }
    }
}

#[async_trait]
impl Environment for SlingEnvironment {
    fn global_names(&self) -> Vec<String> {
        vec![SESSION_GLOBAL.to_string(), USER_MANAGER_GLOBAL.to_string()]
    }

    fn help(&self) -> Vec<String> {
        [
            "$s   session with the Sling server",
            "  url_for(path)  base_url  current_user",
            "  execute_get(path)  execute_post(path, {form})",
            "  get_node_props(path)  create_node(path, {props})",
            "  update_node_props(path, {props})  delete_node(path)",
            "  switch_user(user | name, password)  switch_to_admin",
            "$um  user manager bound to $s",
            "  create_user(name[, password[, {props}]])  delete_user(name)",
            "  create_group(name)  delete_group(name)",
            "  add_member(group, name[, kind])  remove_member(group, name[, kind])",
            "  get_user_props(name)  get_group_props(name)",
            "  change_password(name, old, new)",
        ]
        .iter()
        .map(|line| line.to_string())
        .collect()
    }

    async fn call(
        &mut self,
        global: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, EvalError> {
        let args = Args::new(method, args);
        match global {
            SESSION_GLOBAL => self.call_session(args, method).await,
            USER_MANAGER_GLOBAL => self.call_user_manager(args, method).await,
            other => Err(EvalError::UndefinedGlobal(other.to_string())),
        }
    }
}

fn no_method(global: &str, method: &str) -> EvalError {
    EvalError::NoMethod {
        receiver: global.to_string(),
        method: method.to_string(),
    }
}

fn reply_value(reply: HttpReply) -> Value {
    let mut map = BTreeMap::new();
    map.insert("code".to_string(), Value::Int(i64::from(reply.code)));
    map.insert(
        "content_type".to_string(),
        reply.content_type.map(Value::Str).unwrap_or_default(),
    );
    map.insert("body".to_string(), Value::Str(reply.body));
    Value::Map(map)
}

fn user_value(user: &User) -> Value {
    credentials_value(&user.credentials())
}

fn credentials_value(credentials: &Credentials) -> Value {
    let mut map = BTreeMap::new();
    map.insert("name".to_string(), Value::Str(credentials.name.clone()));
    map.insert(
        "password".to_string(),
        Value::Str(credentials.password.clone()),
    );
    Value::Map(map)
}

/// `switch_user(user)` with a user map, or `switch_user(name, password)`.
fn credentials_arg(args: &Args<'_>) -> Result<Credentials, EvalError> {
    if args.len() == 2 {
        return Ok(Credentials::new(args.string(0)?, args.string(1)?));
    }
    match args.value(0) {
        Some(Value::Map(map)) => {
            let field = |key: &str| {
                map.get(key).and_then(Value::as_str).map(str::to_string).ok_or_else(|| {
                    EvalError::Type(format!("`switch_user` user is missing `{key}`"))
                })
            };
            Ok(Credentials::new(field("name")?, field("password")?))
        }
        _ => Err(EvalError::Type(
            "`switch_user` takes a user or a name and password".to_string(),
        )),
    }
}

fn principal_kind_arg(args: &Args<'_>, index: usize) -> Result<PrincipalKind, EvalError> {
    match args.opt_string(index)? {
        None => Ok(PrincipalKind::User),
        Some(raw) => PrincipalKind::parse(&raw).ok_or_else(|| {
            EvalError::Type(format!(
                "member kind must be \"user\" or \"group\", got {raw:?}"
            ))
        }),
    }
}
