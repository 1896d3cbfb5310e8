//! Placeholder expression lexer

use super::ExprError;

/// Token types produced by the lexer
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Numeric literal: `12`, `3.5`
    Number(f64),
    /// Quoted string literal, escapes already resolved
    Str(String),
    /// Parameter reference
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    LParen,
    RParen,
}

/// A token together with the character offset it starts at
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub pos: usize,
}

/// Lexer for placeholder bodies - uses character-based iteration to handle Unicode
pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
}

impl Lexer {
    pub fn new(input: &str) -> Self {
        Self {
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Spanned>, ExprError> {
        let mut tokens = Vec::new();

        while let Some(c) = self.current_char() {
            if c.is_whitespace() {
                self.pos += 1;
                continue;
            }

            let start = self.pos;
            let token = match c {
                '+' => self.single(Token::Plus),
                '-' => self.single(Token::Minus),
                '*' => self.single(Token::Star),
                '/' => self.single(Token::Slash),
                '(' => self.single(Token::LParen),
                ')' => self.single(Token::RParen),
                '"' | '\'' => self.read_string(c)?,
                c if c.is_ascii_digit() => self.read_number()?,
                c if is_ident_start(c) => self.read_ident(),
                other => {
                    return Err(ExprError::Malformed {
                        position: start,
                        message: format!("unexpected character '{}'", other),
                    })
                }
            };

            tokens.push(Spanned { token, pos: start });
        }

        Ok(tokens)
    }

    fn current_char(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn single(&mut self, token: Token) -> Token {
        self.pos += 1;
        token
    }

    fn read_ident(&mut self) -> Token {
        let mut name = String::new();
        while let Some(c) = self.current_char() {
            if !is_ident_continue(c) {
                break;
            }
            name.push(c);
            self.pos += 1;
        }
        Token::Ident(name)
    }

    fn read_number(&mut self) -> Result<Token, ExprError> {
        let start = self.pos;
        let mut text = self.read_digits();

        if self.current_char() == Some('.') {
            self.pos += 1;
            let fraction = self.read_digits();
            if fraction.is_empty() {
                return Err(ExprError::Malformed {
                    position: self.pos,
                    message: "expected digits after decimal point".to_string(),
                });
            }
            text.push('.');
            text.push_str(&fraction);
        }

        // `12abc` is neither a number nor an identifier
        if matches!(self.current_char(), Some(c) if is_ident_continue(c)) {
            return Err(ExprError::Malformed {
                position: self.pos,
                message: "identifier cannot start with a digit".to_string(),
            });
        }

        text.parse::<f64>()
            .map(Token::Number)
            .map_err(|e| ExprError::Malformed {
                position: start,
                message: format!("invalid number '{}': {}", text, e),
            })
    }

    fn read_digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(c) = self.current_char() {
            if !c.is_ascii_digit() {
                break;
            }
            digits.push(c);
            self.pos += 1;
        }
        digits
    }

    fn read_string(&mut self, quote: char) -> Result<Token, ExprError> {
        let start = self.pos;
        self.pos += 1; // Skip opening quote
        let mut value = String::new();

        while let Some(c) = self.current_char() {
            self.pos += 1;
            match c {
                '\\' => {
                    let position = self.pos;
                    let escaped = self.current_char().ok_or_else(|| ExprError::Malformed {
                        position,
                        message: "dangling escape in string literal".to_string(),
                    })?;
                    self.pos += 1;
                    value.push(match escaped {
                        'n' => '\n',
                        't' => '\t',
                        other => other,
                    });
                }
                c if c == quote => return Ok(Token::Str(value)),
                c => value.push(c),
            }
        }

        Err(ExprError::Malformed {
            position: start,
            message: "unterminated string literal".to_string(),
        })
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Whether `name` is a valid parameter name
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_continue),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        Lexer::new(input)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|s| s.token)
            .collect()
    }

    #[test]
    fn test_lexer_sum() {
        assert_eq!(
            tokens("a + b_2"),
            vec![
                Token::Ident("a".to_string()),
                Token::Plus,
                Token::Ident("b_2".to_string())
            ]
        );
    }

    #[test]
    fn test_lexer_literals() {
        assert_eq!(
            tokens(r#"3.25 * 'it\'s' - "x""#),
            vec![
                Token::Number(3.25),
                Token::Star,
                Token::Str("it's".to_string()),
                Token::Minus,
                Token::Str("x".to_string())
            ]
        );
    }

    #[test]
    fn test_lexer_positions() {
        let spanned = Lexer::new("  (x)").tokenize().unwrap();
        assert_eq!(spanned[0].pos, 2);
        assert_eq!(spanned[1].pos, 3);
        assert_eq!(spanned[2].pos, 4);
    }

    #[test]
    fn test_lexer_rejects_braces() {
        let err = Lexer::new("a{{b").tokenize().unwrap_err();
        assert!(matches!(err, ExprError::Malformed { position: 1, .. }));
    }

    #[test]
    fn test_lexer_rejects_bad_numbers() {
        assert!(Lexer::new("1.").tokenize().is_err());
        assert!(Lexer::new("12abc").tokenize().is_err());
        assert!(Lexer::new("'open").tokenize().is_err());
        assert!(matches!(
            Lexer::new("'a\\").tokenize(),
            Err(ExprError::Malformed { position: 3, .. })
        ));
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("score"));
        assert!(is_identifier("_x1"));
        assert!(!is_identifier("1x"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
    }
}
