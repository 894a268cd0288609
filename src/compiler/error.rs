use thiserror::Error;

extern crate log;
use log::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SyntaxError,
    UndeclaredVariable,
    Redeclaration,
    TypeMismatch,
    DivisionByZero,
    /// Too many operators to parse, or ran out of temporary registers
    ExpressionTooComplex,
}

impl ErrorKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ErrorKind::SyntaxError => "Syntax error",
            ErrorKind::UndeclaredVariable => "Undeclared variable",
            ErrorKind::Redeclaration => "Variable redeclaration",
            ErrorKind::TypeMismatch => "Type mismatch",
            ErrorKind::DivisionByZero => "Division by zero",
            ErrorKind::ExpressionTooComplex => "Expression too complex",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.describe())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("LINE {line}: {kind}: {detail}")]
pub struct CompileError {
    pub line: usize,
    pub kind: ErrorKind,
    /// The offending fragment or statement text
    pub detail: String,
}

impl CompileError {
    pub fn new<S: Into<String>>(line: usize, kind: ErrorKind, detail: S) -> CompileError {
        CompileError { line, kind, detail: detail.into() }
    }
}

/// Every error discovered during a run, in discovery order
#[derive(Debug, Default)]
pub struct ErrorLog {
    errors: Vec<CompileError>,
}

impl ErrorLog {
    pub fn new() -> ErrorLog {
        ErrorLog::default()
    }

    pub fn push(&mut self, error: CompileError) {
        warn!("{}", error);
        self.errors.push(error);
    }

    pub fn report<S: Into<String>>(&mut self, line: usize, kind: ErrorKind, detail: S) {
        self.push(CompileError::new(line, kind, detail));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn count(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind == kind).count()
    }

    pub fn iter(&self) -> std::slice::Iter<CompileError> {
        self.errors.iter()
    }
}

impl<'a> IntoIterator for &'a ErrorLog {
    type Item = &'a CompileError;
    type IntoIter = std::slice::Iter<'a, CompileError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
