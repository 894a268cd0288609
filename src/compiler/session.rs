use super::ast::*;
use super::error::*;
use super::lexer::Lexer;
use super::parser::Parser;
use super::symbol_table::{SymbolTable, VarKind};
use crate::interpreter::evaluate;

extern crate log;
use log::{debug, info};

/// Everything one compilation run knows about the program.
/// Built fresh per run, there is no state shared between runs.
#[derive(Debug, Default)]
pub struct Session {
    pub symbols: SymbolTable,
    pub errors: ErrorLog,
    pub history: History,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /// Runs the front end over a whole source file
    pub fn compile_source(text: &str) -> Session {
        let mut session = Session::new();
        session.process_source(text);
        session
    }

    pub fn process_source(&mut self, text: &str) {
        for (i, line) in text.lines().enumerate() {
            self.process_line(i + 1, line);
        }
        info!("Front end finished: {} symbols, {} operations, {} errors",
              self.symbols.len(), self.history.len(), self.errors.len());
    }

    pub fn process_line(&mut self, line_no: usize, line: &str) {
        if line.trim().is_empty() {
            return;
        }

        let tokens = match Lexer::at_line(line, line_no).tokenize() {
            Ok(tokens) => tokens,
            Err(e) => {
                debug!("Line {} failed to lex: {}", line_no, e);
                self.errors.report(line_no, ErrorKind::SyntaxError, line.trim());
                return;
            }
        };

        Parser::new(tokens, line_no, line).parse_line(self);
    }

    /// Registers one declarator, the initialiser was parsed before `name` existed
    pub fn declare(&mut self, line: usize, kind: VarKind, name: &str, expr: Option<Expr>, source: String) {
        let value = match expr {
            Some(ref expr) => match evaluate(expr, &self.symbols, line) {
                Ok(value) => Some(kind.narrow(value)),
                Err(e) => {
                    self.errors.push(e);
                    // still declared, just without its value or a history entry
                    if self.symbols.declare(name, kind).is_none() {
                        self.errors.report(line, ErrorKind::Redeclaration, source);
                    }
                    return;
                }
            },
            None => None
        };

        if self.symbols.declare(name, kind).is_none() {
            self.errors.report(line, ErrorKind::Redeclaration, source);
            return;
        }
        if let Some(value) = value {
            self.symbols.assign(name, value);
        }

        self.history.push(Operation {
            line,
            kind: OperationKind::Declaration,
            target: name.to_string(),
            var_kind: kind,
            expr,
            value,
            source,
        });
    }

    pub fn assign(&mut self, line: usize, name: &str, expr: Expr, source: String) {
        let var_kind = match self.symbols.lookup(name) {
            Some(symbol) => symbol.kind,
            None => {
                self.errors.report(line, ErrorKind::UndeclaredVariable, source);
                return;
            }
        };

        let value = match evaluate(&expr, &self.symbols, line) {
            Ok(value) => var_kind.narrow(value),
            Err(e) => {
                self.errors.push(e);
                return;
            }
        };
        self.symbols.assign(name, value);

        self.history.push(Operation {
            line,
            kind: OperationKind::Assignment,
            target: name.to_string(),
            var_kind,
            expr: Some(expr),
            value: Some(value),
            source,
        });
    }
}
