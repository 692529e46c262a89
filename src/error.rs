//! Error types for the console.
//!
//! Startup failures (`StartupError`) are fatal and end the process; evaluation
//! failures (`EvalError`) are rendered by the read-eval loop, which carries on.

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// SlingError
// ---------------------------------------------------------------------------

/// Errors from the Sling HTTP client.
#[derive(Debug)]
pub enum SlingError {
    /// Network / reqwest-level error.
    Http(reqwest::Error),
    /// Non-2xx status from the server.
    Status { code: u16, body: String },
    /// Configured server URL could not be parsed.
    InvalidUrl(String),
    /// The HTTP client could not be constructed.
    Client(String),
    /// A user or group name that cannot address a principal node.
    InvalidName(String),
    /// The server answered with a body we could not interpret.
    InvalidResponse(String),
}

impl SlingError {
    /// HTTP status code, when the failure came from a server response.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for SlingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(e) => write!(f, "http: {e}"),
            Self::Status { code, body } => {
                if body.trim().is_empty() {
                    write!(f, "status {code}")
                } else {
                    write!(f, "status {code}: {}", body.trim())
                }
            }
            Self::InvalidUrl(msg) => write!(f, "invalid server url: {msg}"),
            Self::Client(msg) => write!(f, "http client: {msg}"),
            Self::InvalidName(name) => write!(f, "invalid principal name: {name:?}"),
            Self::InvalidResponse(msg) => write!(f, "invalid response: {msg}"),
        }
    }
}

impl std::error::Error for SlingError {}

impl From<reqwest::Error> for SlingError {
    fn from(e: reqwest::Error) -> Self {
        Self::Http(e)
    }
}

// ---------------------------------------------------------------------------
// EvalError
// ---------------------------------------------------------------------------

/// Errors raised while evaluating one console line. Never fatal.
#[derive(Debug)]
pub enum EvalError {
    /// The line could not be parsed.
    Syntax(String),
    /// The line ends inside a string or an open bracket; more input is needed.
    Incomplete,
    UndefinedGlobal(String),
    UndefinedLocal(String),
    /// `receiver` does not understand `method`.
    NoMethod { receiver: String, method: String },
    /// Wrong number of arguments for a method call.
    Arity {
        method: String,
        expected: String,
        given: usize,
    },
    /// A value had the wrong type for the operation.
    Type(String),
    /// A remote call through a bound handle failed.
    Remote(SlingError),
    /// Writing printed output failed.
    Output(std::io::Error),
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax(msg) => write!(f, "syntax error: {msg}"),
            Self::Incomplete => write!(f, "syntax error: unexpected end of input"),
            Self::UndefinedGlobal(name) => write!(f, "undefined global `{name}`"),
            Self::UndefinedLocal(name) => {
                write!(f, "undefined local variable or method `{name}`")
            }
            Self::NoMethod { receiver, method } => {
                write!(f, "undefined method `{method}` for {receiver}")
            }
            Self::Arity {
                method,
                expected,
                given,
            } => write!(
                f,
                "wrong number of arguments for `{method}` (given {given}, expected {expected})"
            ),
            Self::Type(msg) => write!(f, "type error: {msg}"),
            Self::Remote(e) => write!(f, "remote: {e}"),
            Self::Output(e) => write!(f, "output: {e}"),
        }
    }
}

impl std::error::Error for EvalError {}

impl From<SlingError> for EvalError {
    fn from(e: SlingError) -> Self {
        Self::Remote(e)
    }
}

impl From<std::io::Error> for EvalError {
    fn from(e: std::io::Error) -> Self {
        Self::Output(e)
    }
}

// ---------------------------------------------------------------------------
// ReplError
// ---------------------------------------------------------------------------

/// Errors from the REPL engine's input/output plumbing.
#[derive(Debug)]
pub enum ReplError {
    Io(std::io::Error),
    /// Line editor failure other than Ctrl-C / Ctrl-D.
    Readline(String),
}

impl fmt::Display for ReplError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Readline(msg) => write!(f, "readline: {msg}"),
        }
    }
}

impl std::error::Error for ReplError {}

impl From<std::io::Error> for ReplError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<rustyline::error::ReadlineError> for ReplError {
    fn from(e: rustyline::error::ReadlineError) -> Self {
        match e {
            rustyline::error::ReadlineError::Io(io) => Self::Io(io),
            other => Self::Readline(other.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// StartupError
// ---------------------------------------------------------------------------

/// Fatal errors: anything that prevents the console from reaching its prompt.
#[derive(Debug)]
pub enum StartupError {
    Config(ConfigError),
    /// Constructing one of the bound handles failed.
    Bind(String),
    /// The REPL engine's one-time setup failed.
    Init(String),
    Repl(ReplError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Bind(msg) => write!(f, "failed to bind console globals: {msg}"),
            Self::Init(msg) => write!(f, "console initialization failed: {msg}"),
            Self::Repl(e) => write!(f, "console: {e}"),
        }
    }
}

impl std::error::Error for StartupError {}

impl From<ConfigError> for StartupError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<ReplError> for StartupError {
    fn from(e: ReplError) -> Self {
        Self::Repl(e)
    }
}
