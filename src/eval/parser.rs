//! Recursive-descent parser producing one [`Stmt`] per line.

use crate::error::EvalError;

use super::lexer::{tokenize, Spanned, Token};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Nil,
    Bool(bool),
    Int(i64),
    Str(String),
    Global(String),
    Local(String),
    List(Vec<Expr>),
    Map(Vec<(Expr, Expr)>),
    Call {
        receiver: Box<Expr>,
        method: String,
        args: Vec<Expr>,
    },
    Index {
        target: Box<Expr>,
        index: Box<Expr>,
    },
}

/// Built-in printing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintKind {
    /// `puts`: display form, newline after each value.
    Puts,
    /// `p`: inspect form, returns its argument.
    P,
    /// `print`: display form, no newline.
    Print,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Empty,
    Assign(String, Expr),
    Print(PrintKind, Vec<Expr>),
    Exit,
    Help,
    Expr(Expr),
}

/// Parse one complete statement.
pub fn parse_statement(input: &str) -> Result<Stmt, EvalError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser { tokens, pos: 0 };
    let stmt = parser.statement()?;
    if let Some(extra) = parser.peek() {
        return Err(EvalError::Syntax(format!(
            "unexpected {} after statement",
            describe(extra)
        )));
    }
    Ok(stmt)
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset).map(|s| &s.token)
    }

    fn peek_spaced(&self) -> bool {
        self.tokens.get(self.pos).is_some_and(|s| s.spaced)
    }

    fn next(&mut self) -> Result<Token, EvalError> {
        let token = self
            .tokens
            .get(self.pos)
            .map(|s| s.token.clone())
            .ok_or(EvalError::Incomplete)?;
        self.pos += 1;
        Ok(token)
    }

    fn expect(&mut self, expected: Token) -> Result<(), EvalError> {
        let token = self.next()?;
        if token == expected {
            Ok(())
        } else {
            Err(EvalError::Syntax(format!(
                "expected {}, found {}",
                describe(&expected),
                describe(&token)
            )))
        }
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn statement(&mut self) -> Result<Stmt, EvalError> {
        let Some(first) = self.peek().cloned() else {
            return Ok(Stmt::Empty);
        };

        if let Token::Ident(name) = &first {
            match name.as_str() {
                "exit" | "quit" if self.peek_at(1).is_none() => {
                    self.pos += 1;
                    return Ok(Stmt::Exit);
                }
                "help" if self.peek_at(1).is_none() => {
                    self.pos += 1;
                    return Ok(Stmt::Help);
                }
                "puts" | "p" | "print"
                    if !matches!(self.peek_at(1), Some(Token::Dot | Token::Assign)) =>
                {
                    let kind = match name.as_str() {
                        "puts" => PrintKind::Puts,
                        "p" => PrintKind::P,
                        _ => PrintKind::Print,
                    };
                    self.pos += 1;
                    let args = if self.peek().is_some() {
                        self.comma_list()?
                    } else {
                        Vec::new()
                    };
                    return Ok(Stmt::Print(kind, args));
                }
                _ => {}
            }
            if self.peek_at(1) == Some(&Token::Assign) {
                let name = name.clone();
                self.pos += 2;
                return Ok(Stmt::Assign(name, self.expr()?));
            }
        }

        Ok(Stmt::Expr(self.expr()?))
    }

    fn comma_list(&mut self) -> Result<Vec<Expr>, EvalError> {
        let mut items = vec![self.expr()?];
        while self.eat(&Token::Comma) {
            items.push(self.expr()?);
        }
        Ok(items)
    }

    fn expr(&mut self) -> Result<Expr, EvalError> {
        let mut expr = self.primary()?;
        loop {
            match self.peek() {
                Some(Token::Dot) => {
                    self.pos += 1;
                    let method = match self.next()? {
                        Token::Ident(name) => name,
                        other => {
                            return Err(EvalError::Syntax(format!(
                                "expected method name, found {}",
                                describe(&other)
                            )))
                        }
                    };
                    let args = self.call_args()?;
                    expr = Expr::Call {
                        receiver: Box::new(expr),
                        method,
                        args,
                    };
                }
                Some(Token::LBracket) if !self.peek_spaced() => {
                    self.pos += 1;
                    let index = self.expr()?;
                    self.expect(Token::RBracket)?;
                    expr = Expr::Index {
                        target: Box::new(expr),
                        index: Box::new(index),
                    };
                }
                _ => return Ok(expr),
            }
        }
    }

    /// Arguments after `.method`: parenthesized when `(` is adjacent,
    /// otherwise a bare comma list when the next token starts an expression.
    fn call_args(&mut self) -> Result<Vec<Expr>, EvalError> {
        if self.peek() == Some(&Token::LParen) && !self.peek_spaced() {
            self.pos += 1;
            if self.eat(&Token::RParen) {
                return Ok(Vec::new());
            }
            let args = self.comma_list()?;
            self.expect(Token::RParen)?;
            return Ok(args);
        }
        if self.peek_spaced() && self.peek().is_some_and(starts_expr) {
            return self.comma_list();
        }
        Ok(Vec::new())
    }

    fn primary(&mut self) -> Result<Expr, EvalError> {
        match self.next()? {
            Token::Int(n) => Ok(Expr::Int(n)),
            Token::Str(s) => Ok(Expr::Str(s)),
            Token::Global(name) => Ok(Expr::Global(name)),
            Token::Ident(name) => Ok(match name.as_str() {
                "nil" => Expr::Nil,
                "true" => Expr::Bool(true),
                "false" => Expr::Bool(false),
                _ => Expr::Local(name),
            }),
            Token::LParen => {
                let inner = self.expr()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::LBracket => {
                if self.eat(&Token::RBracket) {
                    return Ok(Expr::List(Vec::new()));
                }
                let items = self.comma_list()?;
                self.expect(Token::RBracket)?;
                Ok(Expr::List(items))
            }
            Token::LBrace => {
                let mut pairs = Vec::new();
                if self.eat(&Token::RBrace) {
                    return Ok(Expr::Map(pairs));
                }
                loop {
                    pairs.push(self.pair()?);
                    if self.eat(&Token::Comma) {
                        continue;
                    }
                    self.expect(Token::RBrace)?;
                    return Ok(Expr::Map(pairs));
                }
            }
            other => Err(EvalError::Syntax(format!("unexpected {}", describe(&other)))),
        }
    }

    /// `key => value` or `name: value`.
    fn pair(&mut self) -> Result<(Expr, Expr), EvalError> {
        if let (Some(Token::Ident(name)), Some(Token::Colon)) = (self.peek(), self.peek_at(1)) {
            let key = Expr::Str(name.clone());
            self.pos += 2;
            return Ok((key, self.expr()?));
        }
        let key = self.expr()?;
        self.expect(Token::FatArrow)?;
        Ok((key, self.expr()?))
    }
}

fn starts_expr(token: &Token) -> bool {
    matches!(
        token,
        Token::Ident(_)
            | Token::Global(_)
            | Token::Str(_)
            | Token::Int(_)
            | Token::LParen
            | Token::LBracket
            | Token::LBrace
    )
}

fn describe(token: &Token) -> String {
    match token {
        Token::Ident(name) => format!("`{name}`"),
        Token::Global(name) => format!("`{name}`"),
        Token::Str(_) => "string".to_string(),
        Token::Int(n) => format!("`{n}`"),
        Token::Dot => "`.`".to_string(),
        Token::Comma => "`,`".to_string(),
        Token::Colon => "`:`".to_string(),
        Token::Assign => "`=`".to_string(),
        Token::FatArrow => "`=>`".to_string(),
        Token::LParen => "`(`".to_string(),
        Token::RParen => "`)`".to_string(),
        Token::LBracket => "`[`".to_string(),
        Token::RBracket => "`]`".to_string(),
        Token::LBrace => "`{`".to_string(),
        Token::RBrace => "`}`".to_string(),
    }
}
