extern crate log;
use log::{trace, warn};

use super::Span;

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorToken {
    pub text: String,
    pub line: usize,
    pub col: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub span: Span,
    pub kind: TokenKind,
}

#[derive(Debug, Clone, PartialEq, EnumAsInner)]
pub enum TokenKind {
    LParen,
    RParen,

    Add,
    Sub,
    Asterix,
    Div,

    Assign,
    Comma,
    SemiColon,

    Int,
    Char,

    Ident(String),
    Character(char),
    Str(String),
    Number(String),
}

#[derive(Clone)]
pub struct Lexer<'a> {
    pub line: usize,
    pub col: usize,
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Lexer<'a> {
    /// Lexes a single physical line, tagging tokens with `line`
    pub fn at_line(chars: &'a str, line: usize) -> Lexer<'a> {
        Lexer {
            line: line,
            col: 1,
            chars: chars.chars().peekable(),
        }
    }

    /// Collects every token, stopping at the first malformed one
    pub fn tokenize(self) -> Result<Vec<Token>, ErrorToken> {
        self.collect()
    }

    fn move_next(&mut self) {
        match self.chars.next() {
            Some('\n') => {
                self.line += 1;
                self.col = 1;
            },
            Some(c) => {
                self.col += c.len_utf8();
            },
            None => {}
        }
    }

    fn peek(&mut self) -> Option<char> {
        loop {
            match self.chars.peek() {
                Some(c) => {
                    if !c.is_whitespace() {
                        return Some(*c);
                    } else {
                        self.move_next();
                    }
                },
                None => return None
            }
        }
    }

    fn next(&mut self) -> Option<char> {
        let c = self.peek();
        self.move_next();
        c
    }

    fn parse_simple_num(&mut self) -> String {
        let mut num = String::new();
        loop {
            match self.chars.peek() {
                Some(c) if c.is_ascii_digit() => {
                    num.push(*c);
                    self.move_next();
                },
                _ => break,
            }
        }
        num
    }

    fn parse_num(&mut self, start: char) -> Result<TokenKind, ErrorToken> {
        let mut num = start.to_string();
        num += &self.parse_simple_num();

        match self.chars.peek() {
            Some(c) if Self::valid_identifier_continuer(*c) => {
                warn!("Invalid Number ... can't have identifier tokens");
                num.push(*c);
                return Err(ErrorToken::new(num, self.line, self.col));
            }
            _ => {}
        }

        Ok(TokenKind::Number(num))
    }

    fn parse_escape(&mut self) -> Option<char> {
        let c = match self.chars.peek() {
            Some('n') => '\n',
            Some('\\') => '\\',
            Some('t') => '\t',
            Some('r') => '\r',
            Some('0') => '\0',
            Some('\'') => '\'',
            Some('"') => '"',
            _ => return None
        };
        self.move_next();
        Some(c)
    }

    fn parse_character(&mut self) -> Result<TokenKind, ErrorToken> {
        let c = match self.chars.peek() {
            Some('\\') => {
                self.move_next();
                match self.parse_escape() {
                    Some(c) => c,
                    None => return Err(ErrorToken::new("'\\".to_string(), self.line, self.col))
                }
            },
            // '' has nothing to take the ordinal of
            Some('\'') | None => return Err(ErrorToken::new("'".to_string(), self.line, self.col)),
            Some(c) => {
                let c = *c;
                self.move_next();
                c
            }
        };

        if self.chars.peek() != Some(&'\'') {
            return Err(ErrorToken::new(format!("'{}", c), self.line, self.col));
        }
        self.move_next();
        Ok(TokenKind::Character(c))
    }

    fn parse_string(&mut self) -> Result<TokenKind, ErrorToken> {
        let mut string = String::new();
        loop {
            match self.chars.peek() {
                Some('"') => { self.move_next(); break; },
                Some('\\') => {
                    self.move_next();
                    match self.parse_escape() {
                        Some(c) => string.push(c),
                        None => return Err(ErrorToken::new(string, self.line, self.col))
                    }
                }
                Some(c) => {
                    string.push(*c);
                    self.move_next();
                }
                None => return Err(ErrorToken::new(string, self.line, self.col))
            }
        }
        Ok(TokenKind::Str(string))
    }

    fn valid_identifier_continuer(c: char) -> bool {
        c.is_ascii_digit() || c.is_ascii_alphabetic() || c == '_'
    }

    // Won't work if you try to match it to something that contains a newline
    fn matches(&mut self, to: &str) -> bool {
        let chars = self.chars.clone();
        let mut to_chars = to.chars().peekable();
        while to_chars.peek().is_some() {
            if to_chars.next() != self.chars.next() {
                self.chars = chars;
                return false;
            }
        }

        // we have to make sure the next character isn't a valid identifier
        match self.chars.peek() {
            Some(c) if Self::valid_identifier_continuer(*c) => {
                self.chars = chars;
                false
            },
            _ => {
                self.col += to.len();
                true
            }
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::Add => write!(f, "+"),
            TokenKind::Sub => write!(f, "-"),
            TokenKind::Asterix => write!(f, "*"),
            TokenKind::Div => write!(f, "/"),
            TokenKind::Assign => write!(f, "="),
            TokenKind::Comma => write!(f, ","),
            TokenKind::SemiColon => write!(f, ";"),
            TokenKind::Int => write!(f, "int"),
            TokenKind::Char => write!(f, "char"),
            TokenKind::Ident(id) => write!(f, "{}", id),
            TokenKind::Character(c) => write!(f, "'{}'", c.escape_default()),
            TokenKind::Str(s) => write!(f, "\"{}\"", s.escape_default()),
            TokenKind::Number(n) => write!(f, "{}", n),
        }
    }
}

impl ErrorToken {
    pub fn new(text: String, line: usize, col: usize) -> ErrorToken {
        ErrorToken {
            text: text,
            line: line,
            col: col
        }
    }
}

impl std::fmt::Display for ErrorToken {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "unexpected '{}' at column {}", self.text, self.col)
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, ErrorToken>;

    fn next(&mut self) -> Option<Self::Item> {
        // skip leading whitespace first so the span starts on the token
        if self.peek().is_none() {
            return None;
        }
        let start = self.col;

        let kind = match self.next() {
            Some('+') => TokenKind::Add,
            Some('-') => TokenKind::Sub,
            Some('*') => TokenKind::Asterix,
            Some('/') => match self.chars.peek() {
                Some('/') => {
                    // comment runs till the end of the line
                    let line = self.line;
                    while self.chars.peek().is_some() && line == self.line { self.move_next(); }
                    return Iterator::next(self)
                },
                _ => TokenKind::Div
            }
            Some('(') => TokenKind::LParen,
            Some(')') => TokenKind::RParen,
            Some('=') => TokenKind::Assign,
            Some(',') => TokenKind::Comma,
            Some(';') => TokenKind::SemiColon,
            Some('i') if self.matches("nt") => TokenKind::Int,
            Some('c') if self.matches("har") => TokenKind::Char,
            Some('"') => match self.parse_string() {
                Err(e) => return Some(Err(e)),
                Ok(tok) => tok
            },
            Some('\'') => match self.parse_character() {
                Err(e) => return Some(Err(e)),
                Ok(tok) => tok
            },
            Some(c) if c.is_ascii_digit() => match self.parse_num(c) {
                Err(e) => return Some(Err(e)),
                Ok(tok) => tok
            },
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                let mut id = c.to_string();
                loop {
                    match self.chars.peek() {
                        Some(c) if Self::valid_identifier_continuer(*c) => {
                            id.push(*c);
                            self.move_next();
                        },
                        _ => break,
                    }
                }
                TokenKind::Ident(id)
            }
            Some(other) => return Some(Err(ErrorToken::new(other.to_string(), self.line, start))),
            None => return None
        };
        trace!("Lexed {:?} at {}:{}", kind, self.line, start);
        Some(Ok(Token { span: Span::new(self.line, start, self.col), kind }))
    }
}
