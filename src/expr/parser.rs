//! Recursive-descent parser for placeholder expressions
//!
//! Grammar (all binary operators are left-associative):
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := '-' unary | primary
//! primary := NUMBER | STRING | IDENT | '(' expr ')'
//! ```

use indexmap::IndexSet;

use super::lexer::{Lexer, Spanned, Token};
use super::ExprError;

/// Deepest syntax tree the parser will build; chained operators count too
pub const MAX_DEPTH: usize = 128;

/// Binary arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
        }
    }
}

/// Expression syntax tree
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Str(String),
    /// Parameter reference
    Ident(String),
    /// Unary minus
    Neg(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
}

impl Expr {
    /// Parse an expression from source text
    pub fn parse(source: &str) -> Result<Expr, ExprError> {
        let tokens = Lexer::new(source).tokenize()?;
        Parser::new(tokens, source.chars().count()).parse()
    }

    /// Distinct parameter names referenced by this expression, in order of first appearance
    pub fn params(&self) -> Vec<String> {
        let mut names = IndexSet::new();
        self.collect_params(&mut names);
        names.into_iter().collect()
    }

    fn collect_params(&self, names: &mut IndexSet<String>) {
        match self {
            Expr::Number(_) | Expr::Str(_) => {}
            Expr::Ident(name) => {
                names.insert(name.clone());
            }
            Expr::Neg(inner) => inner.collect_params(names),
            Expr::Binary { lhs, rhs, .. } => {
                lhs.collect_params(names);
                rhs.collect_params(names);
            }
        }
    }
}

/// Parser over a token stream
pub struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    /// Character length of the source, reported for errors at end of input
    end: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Spanned>, end: usize) -> Self {
        Self {
            tokens,
            pos: 0,
            end,
            depth: 0,
        }
    }

    /// Parse a single expression spanning the whole token stream
    pub fn parse(&mut self) -> Result<Expr, ExprError> {
        if self.tokens.is_empty() {
            return Err(ExprError::Malformed {
                position: 0,
                message: "empty expression".to_string(),
            });
        }

        let expr = self.parse_expr()?;

        if let Some(extra) = self.tokens.get(self.pos) {
            return Err(ExprError::Malformed {
                position: extra.pos,
                message: format!("unexpected {:?} after expression", extra.token),
            });
        }

        Ok(expr)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|s| &s.token)
    }

    fn position(&self) -> usize {
        self.tokens.get(self.pos).map(|s| s.pos).unwrap_or(self.end)
    }

    /// Enter one more tree level, failing past `MAX_DEPTH`
    fn descend(&mut self) -> Result<(), ExprError> {
        if self.depth >= MAX_DEPTH {
            return Err(ExprError::Malformed {
                position: self.position(),
                message: "expression nested too deeply".to_string(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    fn parse_expr(&mut self) -> Result<Expr, ExprError> {
        let base = self.depth;
        let mut lhs = self.parse_term()?;
        loop {
            let op = match self.peek() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => {
                    self.depth = base;
                    return Ok(lhs);
                }
            };
            self.pos += 1;
            self.descend()?;
            let rhs = self.parse_term()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn parse_term(&mut self) -> Result<Expr, ExprError> {
        let base = self.depth;
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                _ => {
                    self.depth = base;
                    return Ok(lhs);
                }
            };
            self.pos += 1;
            self.descend()?;
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn parse_unary(&mut self) -> Result<Expr, ExprError> {
        if self.peek() == Some(&Token::Minus) {
            self.pos += 1;
            self.descend()?;
            let inner = self.parse_unary()?;
            self.depth -= 1;
            return Ok(Expr::Neg(Box::new(inner)));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ExprError> {
        let position = self.position();
        let token = match self.tokens.get(self.pos) {
            Some(spanned) => spanned.token.clone(),
            None => {
                return Err(ExprError::Malformed {
                    position,
                    message: "unexpected end of expression".to_string(),
                })
            }
        };
        self.pos += 1;

        match token {
            Token::Number(n) => Ok(Expr::Number(n)),
            Token::Str(s) => Ok(Expr::Str(s)),
            Token::Ident(name) => Ok(Expr::Ident(name)),
            Token::LParen => {
                self.descend()?;
                let inner = self.parse_expr()?;
                self.depth -= 1;
                if self.peek() != Some(&Token::RParen) {
                    return Err(ExprError::Malformed {
                        position: self.position(),
                        message: "expected ')'".to_string(),
                    });
                }
                self.pos += 1;
                Ok(inner)
            }
            other => Err(ExprError::Malformed {
                position,
                message: format!("unexpected {:?}", other),
            }),
        }
    }
}
