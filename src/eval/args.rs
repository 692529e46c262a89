//! Argument checking for handle methods.

use crate::error::EvalError;

use super::value::Value;

/// Positional arguments of one method call.
#[derive(Debug)]
pub struct Args<'a> {
    method: &'a str,
    values: Vec<Value>,
}

impl<'a> Args<'a> {
    pub fn new(method: &'a str, values: Vec<Value>) -> Self {
        Self { method, values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Require between `min` and `max` arguments, inclusive.
    pub fn arity(&self, min: usize, max: usize) -> Result<&Self, EvalError> {
        let given = self.values.len();
        if given < min || given > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{min}..{max}")
            };
            return Err(EvalError::Arity {
                method: self.method.to_string(),
                expected,
                given,
            });
        }
        Ok(self)
    }

    /// Argument `index` as a string; integers are accepted and formatted.
    pub fn string(&self, index: usize) -> Result<String, EvalError> {
        match self.values.get(index) {
            Some(Value::Str(s)) => Ok(s.clone()),
            Some(Value::Int(n)) => Ok(n.to_string()),
            Some(other) => Err(self.type_error(index, "a string", other)),
            None => Err(EvalError::Arity {
                method: self.method.to_string(),
                expected: format!("at least {}", index + 1),
                given: self.values.len(),
            }),
        }
    }

    /// Optional string argument; absent or `nil` gives `None`.
    pub fn opt_string(&self, index: usize) -> Result<Option<String>, EvalError> {
        match self.values.get(index) {
            None | Some(Value::Nil) => Ok(None),
            Some(_) => self.string(index).map(Some),
        }
    }

    /// Optional map argument flattened to form fields.
    ///
    /// List values become repeated fields, as Sling expects for multi-value
    /// properties.
    pub fn form(&self, index: usize) -> Result<Vec<(String, String)>, EvalError> {
        match self.values.get(index) {
            None | Some(Value::Nil) => Ok(Vec::new()),
            Some(Value::Map(entries)) => {
                let mut fields = Vec::with_capacity(entries.len());
                for (key, value) in entries {
                    match value {
                        Value::List(items) => fields.extend(
                            items
                                .iter()
                                .map(|item| (key.clone(), item.to_display())),
                        ),
                        other => fields.push((key.clone(), other.to_display())),
                    }
                }
                Ok(fields)
            }
            Some(other) => Err(self.type_error(index, "a map", other)),
        }
    }

    fn type_error(&self, index: usize, expected: &str, got: &Value) -> EvalError {
        EvalError::Type(format!(
            "`{}` argument {} must be {expected}, got {}",
            self.method,
            index + 1,
            got.type_name()
        ))
    }
}
