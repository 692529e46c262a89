//! Runtime values of the console language.

use std::collections::BTreeMap;
use std::fmt::Write as _;

/// A value produced by evaluating an expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Reference to a bound global, by name (`$s`, `$um`).
    Handle(String),
}

impl Value {
    /// Class-like name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Bool(_) => "boolean",
            Self::Int(_) => "integer",
            Self::Str(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Handle(_) => "handle",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Self::Nil)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// String form used by `puts` and `to_s`.
    pub fn to_display(&self) -> String {
        match self {
            Self::Nil => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Str(s) => s.clone(),
            Self::List(items) => items
                .iter()
                .map(Value::to_display)
                .collect::<Vec<_>>()
                .join("\n"),
            Self::Map(_) | Self::Handle(_) => self.inspect(),
        }
    }

    /// Developer form used by `p`, `inspect` and result echo.
    pub fn inspect(&self) -> String {
        match self {
            Self::Nil => "nil".to_string(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Str(s) => quote(s),
            Self::List(items) => format!(
                "[{}]",
                items
                    .iter()
                    .map(Value::inspect)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
            Self::Map(entries) => {
                if entries.is_empty() {
                    return "{}".to_string();
                }
                let body = entries
                    .iter()
                    .map(|(key, value)| format!("{} => {}", quote(key), value.inspect()))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{{{body}}}")
            }
            Self::Handle(name) => format!("#<{name}>"),
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Nil,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                // No float type in the console; keep the textual form.
                None => Self::Str(n.to_string()),
            },
            serde_json::Value::String(s) => Self::Str(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{{{:04x}}}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
