//! Prompt styles.

use std::fmt;
use std::str::FromStr;

/// Which prompt the console shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptMode {
    /// `portal(main):001:0> `, with `*` on continuation lines.
    #[default]
    Default,
    /// `>> ` on every line.
    Simple,
}

impl FromStr for PromptMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "simple" => Ok(Self::Simple),
            other => Err(format!(
                "unknown prompt mode `{other}` (expected `default` or `simple`)"
            )),
        }
    }
}

impl fmt::Display for PromptMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Simple => f.write_str("simple"),
        }
    }
}

/// Prompt text for the next line.
///
/// `line_no` is 1-based; `pending` is the statement accumulated so far.
pub fn prompt_text(mode: PromptMode, app_name: &str, line_no: usize, pending: &str) -> String {
    match mode {
        PromptMode::Simple => ">> ".to_string(),
        PromptMode::Default => {
            let marker = if pending.is_empty() { '>' } else { '*' };
            format!(
                "{app_name}(main):{line_no:03}:{}{marker} ",
                nesting_depth(pending)
            )
        }
    }
}

/// Open brackets and braces in `source`, ignoring those inside strings
/// and comments.
pub fn nesting_depth(source: &str) -> usize {
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut chars = source.chars();
    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            match c {
                '\\' => {
                    chars.next();
                }
                c if c == q => quote = None,
                _ => {}
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '#' => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        break;
                    }
                }
            }
            '(' | '[' | '{' => depth += 1,
            ')' | ']' | '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}
