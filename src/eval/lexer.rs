//! Tokenizer for one console statement.

use crate::error::EvalError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Bare name; may end in `?` or `!`.
    Ident(String),
    /// `$name`, including the sigil.
    Global(String),
    Str(String),
    Int(i64),
    Dot,
    Comma,
    Colon,
    Assign,
    FatArrow,
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
}

/// A token plus whether whitespace preceded it.
///
/// `x[0]` indexes while `x [0]` passes a list argument, as in Ruby.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub spaced: bool,
}

/// Split `input` into tokens, dropping whitespace and `#` comments.
///
/// An unterminated string yields `EvalError::Incomplete` so the caller can
/// read another line.
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;
    let mut spaced = false;

    while i < chars.len() {
        let c = chars[i];
        if c.is_whitespace() {
            spaced = true;
            i += 1;
            continue;
        }
        if c == '#' {
            while i < chars.len() && chars[i] != '\n' {
                i += 1;
            }
            continue;
        }

        let token = match c {
            '.' => {
                i += 1;
                Token::Dot
            }
            ',' => {
                i += 1;
                Token::Comma
            }
            ':' => {
                i += 1;
                Token::Colon
            }
            '(' => {
                i += 1;
                Token::LParen
            }
            ')' => {
                i += 1;
                Token::RParen
            }
            '[' => {
                i += 1;
                Token::LBracket
            }
            ']' => {
                i += 1;
                Token::RBracket
            }
            '{' => {
                i += 1;
                Token::LBrace
            }
            '}' => {
                i += 1;
                Token::RBrace
            }
            '=' => {
                if chars.get(i + 1) == Some(&'>') {
                    i += 2;
                    Token::FatArrow
                } else {
                    i += 1;
                    Token::Assign
                }
            }
            '"' | '\'' => {
                let (text, next) = read_string(&chars, i)?;
                i = next;
                Token::Str(text)
            }
            '$' => {
                let start = i;
                i += 1;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                if i == start + 1 {
                    return Err(EvalError::Syntax("expected a name after `$`".into()));
                }
                Token::Global(chars[start..i].iter().collect())
            }
            '-' if chars.get(i + 1).is_some_and(char::is_ascii_digit) => {
                let (n, next) = read_int(&chars, i + 1)?;
                i = next;
                Token::Int(-n)
            }
            c if c.is_ascii_digit() => {
                let (n, next) = read_int(&chars, i)?;
                i = next;
                Token::Int(n)
            }
            c if is_ident_start(c) => {
                let start = i;
                while i < chars.len() && is_ident_char(chars[i]) {
                    i += 1;
                }
                if i < chars.len() && matches!(chars[i], '?' | '!') {
                    i += 1;
                }
                Token::Ident(chars[start..i].iter().collect())
            }
            other => {
                return Err(EvalError::Syntax(format!("unexpected character `{other}`")));
            }
        };
        tokens.push(Spanned { token, spaced });
        spaced = false;
    }

    Ok(tokens)
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn read_int(chars: &[char], start: usize) -> Result<(i64, usize), EvalError> {
    let mut i = start;
    while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '_') {
        i += 1;
    }
    let digits: String = chars[start..i].iter().filter(|c| **c != '_').collect();
    let n = digits
        .parse::<i64>()
        .map_err(|_| EvalError::Syntax(format!("integer out of range: {digits}")))?;
    Ok((n, i))
}

/// Read a quoted string starting at `start` (the opening quote).
///
/// Double quotes understand `\n`, `\t`, `\r`, `\0` and escaped quotes;
/// single quotes only `\'` and `\\`.
fn read_string(chars: &[char], start: usize) -> Result<(String, usize), EvalError> {
    let quote = chars[start];
    let mut out = String::new();
    let mut i = start + 1;
    while i < chars.len() {
        let c = chars[i];
        if c == quote {
            return Ok((out, i + 1));
        }
        if c == '\\' {
            let Some(&next) = chars.get(i + 1) else {
                return Err(EvalError::Incomplete);
            };
            if quote == '"' {
                out.push(match next {
                    'n' => '\n',
                    't' => '\t',
                    'r' => '\r',
                    '0' => '\0',
                    other => other,
                });
            } else if next == '\'' || next == '\\' {
                out.push(next);
            } else {
                out.push('\\');
                out.push(next);
            }
            i += 2;
            continue;
        }
        out.push(c);
        i += 1;
    }
    Err(EvalError::Incomplete)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<Token> {
        tokenize(input)
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn tokenizes_a_method_call_with_bare_args() {
        assert_eq!(
            kinds(r#"$um.create_user "alice", 'pw'"#),
            vec![
                Token::Global("$um".into()),
                Token::Dot,
                Token::Ident("create_user".into()),
                Token::Str("alice".into()),
                Token::Comma,
                Token::Str("pw".into()),
            ]
        );
    }

    #[test]
    fn tracks_whitespace_before_tokens() {
        let tokens = tokenize("x[0] y [1]").unwrap();
        assert!(!tokens[1].spaced, "x[ is adjacent");
        assert!(tokens[5].spaced, "y [ is spaced");
    }

    #[test]
    fn strings_handle_escapes_per_quote_style() {
        assert_eq!(kinds(r#""a\n\"b\"""#), vec![Token::Str("a\n\"b\"".into())]);
        assert_eq!(kinds(r#"'a\n\'b'"#), vec![Token::Str("a\\n'b".into())]);
    }

    #[test]
    fn unterminated_string_is_incomplete() {
        assert!(matches!(tokenize("puts \"abc"), Err(EvalError::Incomplete)));
    }

    #[test]
    fn comments_and_negative_numbers() {
        assert_eq!(
            kinds("x = -12 # trailing note"),
            vec![Token::Ident("x".into()), Token::Assign, Token::Int(-12)]
        );
    }

    #[test]
    fn hash_pairs_and_predicates() {
        assert_eq!(
            kinds("{a: 1, 'b' => 2}.empty?"),
            vec![
                Token::LBrace,
                Token::Ident("a".into()),
                Token::Colon,
                Token::Int(1),
                Token::Comma,
                Token::Str("b".into()),
                Token::FatArrow,
                Token::Int(2),
                Token::RBrace,
                Token::Dot,
                Token::Ident("empty?".into()),
            ]
        );
    }

    #[test]
    fn rejects_stray_characters() {
        assert!(matches!(tokenize("1 + 2"), Err(EvalError::Syntax(_))));
        assert!(matches!(tokenize("$ x"), Err(EvalError::Syntax(_))));
    }
}
