use super::lexer::*;
use super::ast::*;
use super::error::*;
use super::session::Session;
use super::symbol_table::{SymbolTable, VarKind};
use super::Span;
use crate::logger::*;

extern crate log;
use log::trace;

/// Deepest run of parentheses / unary minus we will recurse through
pub const MAX_NESTING: usize = 256;
/// Most operators a single expression may hold, this also bounds how deep
/// a flat chain like `1 + 1 + ... + 1` can grow
pub const MAX_OPERATORS: usize = 1024;

pub struct Parser<'a> {
    it: std::iter::Peekable<std::vec::IntoIter<Token>>,
    line: usize,
    text: &'a str,
    depth: usize,
    /// End column of the last token we consumed
    last_end: usize,
    /// Operators built so far in the current expression
    operators: usize,
    /// Set once the current expression was cut short, its tail was skipped
    abandoned: bool,
}

macro_rules! peek_expect {
    ($self:ident, $wanted:pat) => {
        match $self.it.peek() {
            Some(Token { kind: $wanted, .. }) => true,
            _ => false
        }
    };
}

macro_rules! try_expect {
    ($self:ident, $wanted:pat) => {
        if peek_expect!($self, $wanted) {
            $self.bump()
        } else {
            None
        }
    };
}

macro_rules! expect {
    ($self:ident, $wanted:pat, $err:expr) => {
        match $self.it.peek() {
            Some(Token { kind: $wanted, .. }) => $self.bump(),
            Some(Token { kind, .. }) => {
                log_expected_token($err, kind);
                None
            }
            None => {
                log_expected_token_but_eof($err);
                None
            }
        }
    };
}

macro_rules! eat {
    ($self:ident, $wanted:pat, $err:expr) => {
        if expect!($self, $wanted, $err).is_none() { return None; }
    };
}

macro_rules! expect_match {
    ($self:ident, $capture:ident, { $($($key:pat)|* => $action:expr),+; _ => $else_action:expr } ) => {
        match $self.it.peek() {
            $(
                $(Some(Token { kind: $key, .. }))|* => match $self.bump() {
                    #[allow(unused)]
                    $(Some($capture @ Token { kind: $key, .. }))|* => $action,
                    // can't occur, we just peeked it
                    _ => unreachable!(),
                },
            )+
            _ => $else_action
        }
    };
}

// Same precedence operators fold to the left so `a - b - c` is `(a - b) - c`
macro_rules! parse_binop {
    ($self:ident, $symbols:ident, $errors:ident, $operand:ident => $($key:pat => $op:expr),+) => {{
        let mut lhs = $self.$operand($symbols, $errors);
        loop {
            let op = match $self.it.peek() {
                $(Some(Token { kind: $key, .. }) => $op,)+
                _ => break
            };
            $self.bump();
            let rhs = $self.$operand($symbols, $errors);
            lhs = $self.combine(op, lhs, rhs, $errors);
        }
        lhs
    }};
}

/// Parses a standalone expression i.e. `2 + 3 * 4`.
/// Errors are logged against `line` and a safe tree is always returned.
pub fn parse_expression(text: &str, line: usize, symbols: &SymbolTable, errors: &mut ErrorLog) -> Expr {
    let tokens = match Lexer::at_line(text, line).tokenize() {
        Ok(tokens) => tokens,
        Err(e) => {
            errors.report(line, ErrorKind::SyntaxError, e.to_string());
            return Expr::Number(0);
        }
    };

    let mut parser = Parser::new(tokens, line, text);
    let expr = parser.parse_expression(symbols, errors);
    if let Some(col) = parser.peek_col() {
        let trailing = text.get(col - 1..).unwrap_or("").trim();
        errors.report(line, ErrorKind::SyntaxError, format!("unexpected trailing input '{}'", trailing));
    }
    expr
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, line: usize, text: &'a str) -> Parser<'a> {
        Parser {
            it: tokens.into_iter().peekable(),
            line: line,
            text: text,
            depth: 0,
            last_end: 1,
            operators: 0,
            abandoned: false,
        }
    }

    fn bump(&mut self) -> Option<Token> {
        let tok = self.it.next();
        if let Some(ref tok) = tok {
            self.last_end = tok.span.col.1;
        }
        tok
    }

    fn peek_col(&mut self) -> Option<usize> {
        self.it.peek().map(|tok| tok.span.col.0)
    }

    fn fragment(&self, start: usize) -> String {
        Span::new(self.line, start, self.last_end).fragment(self.text).trim().to_string()
    }

    /// Processes every statement on this line, registering the results with `session`
    pub fn parse_line(&mut self, session: &mut Session) {
        while let Some(start) = self.peek_col() {
            if self.parse_statement(start, session).is_none() {
                self.recover(start, &mut session.errors);
            }
        }
    }

    /// Skips the rest of a malformed statement (through the next ';')
    fn recover(&mut self, start: usize, errors: &mut ErrorLog) {
        while let Some(tok) = self.bump() {
            if tok.kind == TokenKind::SemiColon {
                break;
            }
        }
        errors.report(self.line, ErrorKind::SyntaxError, self.fragment(start));
    }

    fn parse_statement(&mut self, start: usize, session: &mut Session) -> Option<()> {
        expect_match!(self, tok, {
            TokenKind::Int => self.parse_declaration(VarKind::Int, session),
            TokenKind::Char => self.parse_declaration(VarKind::Char, session),
            TokenKind::Ident(_) => {
                let target = tok.kind.as_ident()?.clone();
                self.parse_assignment(target, start, session)
            };
            _ => None
        })
    }

    fn parse_declaration(&mut self, kind: VarKind, session: &mut Session) -> Option<()> {
        loop {
            let decl_start = self.peek_col()?;
            let name = expect!(self, TokenKind::Ident(_), "identifier")?.kind.as_ident()?.clone();
            let expr = if try_expect!(self, TokenKind::Assign).is_some() {
                Some(self.parse_expression(&session.symbols, &mut session.errors))
            } else {
                None
            };
            let source = format!("{} {};", kind, self.fragment(decl_start));

            // the name only comes into scope once its declarator is complete
            let done = expect_match!(self, _tok, {
                TokenKind::Comma => false,
                TokenKind::SemiColon => true;
                _ => {
                    match self.it.peek() {
                        Some(tok) => log_expected_token("',' or ';'", &tok.kind),
                        None => log_expected_token_but_eof("',' or ';'"),
                    }
                    return None;
                }
            });

            session.declare(self.line, kind, &name, expr, source);
            if done {
                return Some(());
            }
        }
    }

    fn parse_assignment(&mut self, target: String, start: usize, session: &mut Session) -> Option<()> {
        eat!(self, TokenKind::Assign, "'='");
        let expr = self.parse_expression(&session.symbols, &mut session.errors);
        eat!(self, TokenKind::SemiColon, "';'");

        let source = self.fragment(start);
        session.assign(self.line, &target, expr, source);
        Some(())
    }

    /// Parses one full expression, limits are counted per call
    pub fn parse_expression(&mut self, symbols: &SymbolTable, errors: &mut ErrorLog) -> Expr {
        self.operators = 0;
        self.abandoned = false;
        self.parse_sum(symbols, errors)
    }

    /// expression := term (('+' | '-') term)*
    fn parse_sum(&mut self, symbols: &SymbolTable, errors: &mut ErrorLog) -> Expr {
        parse_binop!(self, symbols, errors, parse_term
            => TokenKind::Add => BinopKind::Add,
               TokenKind::Sub => BinopKind::Sub)
    }

    /// term := atom (('*' | '/') atom)*
    fn parse_term(&mut self, symbols: &SymbolTable, errors: &mut ErrorLog) -> Expr {
        parse_binop!(self, symbols, errors, parse_atom
            => TokenKind::Asterix => BinopKind::Mul,
               TokenKind::Div => BinopKind::Div)
    }

    /// Drops the rest of the expression, the statement boundary is kept
    fn abandon(&mut self) {
        self.abandoned = true;
        loop {
            match self.it.peek() {
                Some(Token { kind: TokenKind::Comma, .. }) |
                Some(Token { kind: TokenKind::SemiColon, .. }) | None => break,
                Some(_) => { self.bump(); }
            }
        }
    }

    fn combine(&mut self, op: BinopKind, lhs: Expr, rhs: Expr, errors: &mut ErrorLog) -> Expr {
        if self.abandoned {
            return Expr::Number(0);
        }
        self.operators += 1;
        if self.operators > MAX_OPERATORS {
            errors.report(self.line, ErrorKind::ExpressionTooComplex,
                          format!("expression has more than {} operators", MAX_OPERATORS));
            self.abandon();
            return Expr::Number(0);
        }
        Expr::binop(op, lhs, rhs)
    }

    fn parse_nested<F>(&mut self, errors: &mut ErrorLog, parse: F) -> Expr
        where F: FnOnce(&mut Self, &mut ErrorLog) -> Expr {
        if self.abandoned {
            return Expr::Number(0);
        }
        if self.depth >= MAX_NESTING {
            errors.report(self.line, ErrorKind::SyntaxError,
                          format!("expression nested deeper than {} levels", MAX_NESTING));
            self.abandon();
            return Expr::Number(0);
        }

        self.depth += 1;
        let expr = parse(self, errors);
        self.depth -= 1;
        expr
    }

    fn parse_number(&mut self, digits: &str, negative: bool, errors: &mut ErrorLog) -> Expr {
        let text = if negative { format!("-{}", digits) } else { digits.to_string() };
        match text.parse::<i64>() {
            Ok(n) => Expr::Number(n),
            Err(_) => {
                errors.report(self.line, ErrorKind::SyntaxError,
                              format!("number literal {} is out of range", text));
                Expr::Number(0)
            }
        }
    }

    /// atom := NUMBER | CHAR_LITERAL | IDENTIFIER | '(' expression ')' | '-' atom
    fn parse_atom(&mut self, symbols: &SymbolTable, errors: &mut ErrorLog) -> Expr {
        trace!("Parsing atom at {:?}", self.it.peek());
        expect_match!(self, tok, {
            TokenKind::Number(_) => match tok.kind.as_number() {
                Some(digits) => self.parse_number(digits, false, errors),
                None => Expr::Number(0)
            },
            TokenKind::Character(_) => match tok.kind.as_character() {
                Some(c) => Expr::Number(*c as i64),
                None => Expr::Number(0)
            },
            TokenKind::Ident(_) => match tok.kind.as_ident() {
                Some(id) if symbols.contains(id) => Expr::Variable(id.clone()),
                Some(id) => {
                    errors.report(self.line, ErrorKind::UndeclaredVariable, id.clone());
                    Expr::Number(0)
                },
                None => Expr::Number(0)
            },
            TokenKind::Str(_) => {
                errors.report(self.line, ErrorKind::TypeMismatch,
                              format!("string literal {} used as a number", tok.kind));
                Expr::Number(0)
            },
            TokenKind::LParen => self.parse_nested(errors, |parser, errors| {
                let inner = parser.parse_sum(symbols, errors);
                if try_expect!(parser, TokenKind::RParen).is_none() && !parser.abandoned {
                    // carry on as if the ')' was there
                    errors.report(parser.line, ErrorKind::SyntaxError,
                                  format!("missing ')' after {}", inner));
                }
                inner
            }),
            TokenKind::Sub => {
                // a literal takes the sign directly, anything else is 0 - atom
                if let Some(tok) = try_expect!(self, TokenKind::Number(_)) {
                    match tok.kind.as_number() {
                        Some(digits) => self.parse_number(digits, true, errors),
                        None => Expr::Number(0)
                    }
                } else {
                    self.parse_nested(errors, |parser, errors| {
                        let atom = parser.parse_atom(symbols, errors);
                        parser.combine(BinopKind::Sub, Expr::Number(0), atom, errors)
                    })
                }
            };
            _ => {
                let found = match self.it.peek() {
                    Some(tok) => format!("'{}'", tok.kind),
                    None => "end of line".to_string(),
                };
                errors.report(self.line, ErrorKind::SyntaxError,
                              format!("expected a number, character or variable but found {}", found));
                Expr::Number(0)
            }
        })
    }
}
