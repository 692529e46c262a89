//! The console's expression language.
//!
//! A small Ruby-flavoured statement language: method calls on bound globals
//! (`$um.create_user "alice"`), locals (`u = ...`), list and map literals, and
//! the `puts` / `p` / `print` / `help` / `exit` built-ins. Each line is parsed
//! and evaluated on its own; see [`Interpreter::eval`].

mod args;
mod interp;
mod lexer;
mod parser;
mod value;

pub use args::Args;
pub use interp::{Environment, EvalOutcome, Interpreter};
pub use value::Value;
