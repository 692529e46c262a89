//! Statement evaluation against an [`Environment`] of bound globals.

use crate::error::EvalError;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::future::Future;
use std::io::Write;
use std::pin::Pin;

use super::parser::{parse_statement, Expr, PrintKind, Stmt};
use super::value::Value;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of evaluating one statement.
///
/// Leaving the console is an ordinary outcome, not an error path.
#[derive(Debug)]
pub enum EvalOutcome {
    Value(Value),
    Error(EvalError),
    Exit,
}

/// The globals a console session evaluates against.
#[async_trait]
pub trait Environment: Send {
    /// Names of the bound globals, including the `$` sigil.
    fn global_names(&self) -> Vec<String>;

    /// Lines describing the globals and their methods, for `help`.
    fn help(&self) -> Vec<String>;

    /// Invoke `method` on the global named `global`.
    async fn call(
        &mut self,
        global: &str,
        method: &str,
        args: Vec<Value>,
    ) -> Result<Value, EvalError>;
}

/// Evaluator state: the environment plus local variables.
pub struct Interpreter<E> {
    env: E,
    locals: BTreeMap<String, Value>,
}

impl<E: Environment> Interpreter<E> {
    pub fn new(env: E) -> Self {
        Self {
            env,
            locals: BTreeMap::new(),
        }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn local(&self, name: &str) -> Option<&Value> {
        self.locals.get(name)
    }

    /// True when `source` stops inside a string or open bracket.
    pub fn needs_more_input(source: &str) -> bool {
        matches!(parse_statement(source), Err(EvalError::Incomplete))
    }

    /// Parse and evaluate one statement, printing to `out`.
    ///
    /// The last value is kept in the `_` local.
    pub async fn eval(&mut self, source: &str, out: &mut (dyn Write + Send)) -> EvalOutcome {
        let stmt = match parse_statement(source) {
            Ok(stmt) => stmt,
            Err(e) => return EvalOutcome::Error(e),
        };
        match self.exec(stmt, out).await {
            Ok(Some(value)) => {
                self.locals.insert("_".to_string(), value.clone());
                EvalOutcome::Value(value)
            }
            Ok(None) => EvalOutcome::Exit,
            Err(e) => EvalOutcome::Error(e),
        }
    }

    /// `Ok(None)` means the statement asked to leave.
    async fn exec(
        &mut self,
        stmt: Stmt,
        out: &mut (dyn Write + Send),
    ) -> Result<Option<Value>, EvalError> {
        match stmt {
            Stmt::Empty => Ok(Some(Value::Nil)),
            Stmt::Exit => Ok(None),
            Stmt::Help => {
                for line in self.help_lines() {
                    writeln!(out, "{line}")?;
                }
                Ok(Some(Value::Nil))
            }
            Stmt::Assign(name, expr) => {
                let value = self.eval_expr(&expr).await?;
                self.locals.insert(name, value.clone());
                Ok(Some(value))
            }
            Stmt::Print(kind, exprs) => {
                let mut values = Vec::with_capacity(exprs.len());
                for expr in &exprs {
                    values.push(self.eval_expr(expr).await?);
                }
                print_values(kind, &values, out)?;
                out.flush()?;
                Ok(Some(match kind {
                    PrintKind::P if values.len() == 1 => values.remove(0),
                    PrintKind::P if values.len() > 1 => Value::List(values),
                    _ => Value::Nil,
                }))
            }
            Stmt::Expr(expr) => self.eval_expr(&expr).await.map(Some),
        }
    }

    fn help_lines(&self) -> Vec<String> {
        let mut lines = self.env.help();
        lines.push(String::new());
        lines.push("Built-ins:".to_string());
        lines.push("  puts <expr>, ...    print values".to_string());
        lines.push("  p <expr>            print inspected value".to_string());
        lines.push("  name = <expr>       bind a local (`_` holds the last value)".to_string());
        lines.push("  help                show this help".to_string());
        lines.push("  exit | quit         leave the console".to_string());
        lines
    }

    fn eval_expr<'a>(&'a mut self, expr: &'a Expr) -> BoxFuture<'a, Result<Value, EvalError>> {
        Box::pin(async move {
            match expr {
                Expr::Nil => Ok(Value::Nil),
                Expr::Bool(b) => Ok(Value::Bool(*b)),
                Expr::Int(n) => Ok(Value::Int(*n)),
                Expr::Str(s) => Ok(Value::Str(s.clone())),
                Expr::Global(name) => {
                    if self.env.global_names().iter().any(|g| g == name) {
                        Ok(Value::Handle(name.clone()))
                    } else {
                        Err(EvalError::UndefinedGlobal(name.clone()))
                    }
                }
                Expr::Local(name) => self
                    .locals
                    .get(name)
                    .cloned()
                    .ok_or_else(|| EvalError::UndefinedLocal(name.clone())),
                Expr::List(items) => {
                    let mut values = Vec::with_capacity(items.len());
                    for item in items {
                        values.push(self.eval_expr(item).await?);
                    }
                    Ok(Value::List(values))
                }
                Expr::Map(pairs) => {
                    let mut map = BTreeMap::new();
                    for (key, value) in pairs {
                        let key = match self.eval_expr(key).await? {
                            Value::Str(s) => s,
                            Value::Int(n) => n.to_string(),
                            other => {
                                return Err(EvalError::Type(format!(
                                    "map keys must be strings, got {}",
                                    other.type_name()
                                )))
                            }
                        };
                        let value = self.eval_expr(value).await?;
                        map.insert(key, value);
                    }
                    Ok(Value::Map(map))
                }
                Expr::Index { target, index } => {
                    let target = self.eval_expr(target).await?;
                    let index = self.eval_expr(index).await?;
                    index_value(&target, &index)
                }
                Expr::Call {
                    receiver,
                    method,
                    args,
                } => {
                    let receiver = self.eval_expr(receiver).await?;
                    let mut values = Vec::with_capacity(args.len());
                    for arg in args {
                        values.push(self.eval_expr(arg).await?);
                    }
                    match receiver {
                        Value::Handle(global) if !is_universal(method) => {
                            self.env.call(&global, method, values).await
                        }
                        other => call_builtin(&other, method, values),
                    }
                }
            }
        })
    }
}

fn print_values(
    kind: PrintKind,
    values: &[Value],
    out: &mut (dyn Write + Send),
) -> std::io::Result<()> {
    match kind {
        PrintKind::Puts => {
            if values.is_empty() {
                writeln!(out)?;
            }
            for value in values {
                match value {
                    Value::List(items) if items.is_empty() => {}
                    other => writeln!(out, "{}", other.to_display())?,
                }
            }
        }
        PrintKind::P => {
            for value in values {
                writeln!(out, "{}", value.inspect())?;
            }
        }
        PrintKind::Print => {
            for value in values {
                write!(out, "{}", value.to_display())?;
            }
        }
    }
    Ok(())
}

/// Methods every value understands, handles included.
fn is_universal(method: &str) -> bool {
    matches!(method, "inspect" | "to_s" | "nil?")
}

fn call_builtin(receiver: &Value, method: &str, args: Vec<Value>) -> Result<Value, EvalError> {
    let no_method = || EvalError::NoMethod {
        receiver: receiver_label(receiver),
        method: method.to_string(),
    };
    let fetch = matches!((receiver, method), (Value::Map(_), "fetch"));
    let expected = usize::from(fetch);
    if args.len() != expected {
        return Err(EvalError::Arity {
            method: method.to_string(),
            expected: expected.to_string(),
            given: args.len(),
        });
    }

    match (receiver, method) {
        (_, "inspect") => Ok(Value::Str(receiver.inspect())),
        (_, "to_s") => Ok(Value::Str(receiver.to_display())),
        (_, "nil?") => Ok(Value::Bool(receiver.is_nil())),
        (Value::Str(s), "length" | "size") => Ok(Value::Int(s.chars().count() as i64)),
        (Value::List(items), "length" | "size") => Ok(Value::Int(items.len() as i64)),
        (Value::Map(map), "length" | "size") => Ok(Value::Int(map.len() as i64)),
        (Value::Str(s), "empty?") => Ok(Value::Bool(s.is_empty())),
        (Value::List(items), "empty?") => Ok(Value::Bool(items.is_empty())),
        (Value::Map(map), "empty?") => Ok(Value::Bool(map.is_empty())),
        (Value::List(items), "first") => Ok(items.first().cloned().unwrap_or_default()),
        (Value::List(items), "last") => Ok(items.last().cloned().unwrap_or_default()),
        (Value::Map(map), "keys") => Ok(Value::List(
            map.keys().map(|k| Value::Str(k.clone())).collect(),
        )),
        (Value::Map(map), "values") => Ok(Value::List(map.values().cloned().collect())),
        (Value::Map(_), "fetch") => index_value(receiver, &args[0]),
        // Record-style access: `reply.body`.
        (Value::Map(map), key) => map.get(key).cloned().ok_or_else(no_method),
        _ => Err(no_method()),
    }
}

fn index_value(target: &Value, index: &Value) -> Result<Value, EvalError> {
    match (target, index) {
        (Value::List(items), Value::Int(i)) => {
            let len = items.len() as i64;
            let pos = if *i < 0 { len + i } else { *i };
            Ok(usize::try_from(pos)
                .ok()
                .and_then(|p| items.get(p))
                .cloned()
                .unwrap_or_default())
        }
        (Value::Map(map), Value::Str(key)) => Ok(map.get(key).cloned().unwrap_or_default()),
        (Value::Map(map), Value::Int(n)) => Ok(map.get(&n.to_string()).cloned().unwrap_or_default()),
        (target, index) => Err(EvalError::Type(format!(
            "cannot index {} with {}",
            target.type_name(),
            index.type_name()
        ))),
    }
}

fn receiver_label(value: &Value) -> String {
    match value {
        Value::Handle(name) => name.clone(),
        Value::Nil => "nil".to_string(),
        other => format!("{} {}", other.type_name(), other.inspect()),
    }
}
