pub mod lexer;
pub mod ast;
pub mod error;
pub mod parser;
pub mod session;
pub mod symbol_table;

pub type Ident = String;

#[derive(Clone, Copy, Default, Eq, PartialEq, Hash)]
pub struct Span {
    pub line: usize,
    pub col: (usize, usize)
}

impl Span {
    pub fn new(line: usize, start: usize, end: usize) -> Span {
        Span {
            line: line,
            col: (start, end)
        }
    }

    /// Slices the text this span covers out of its (single) source line
    pub fn fragment<'a>(&self, line_text: &'a str) -> &'a str {
        let start = self.col.0.saturating_sub(1);
        let end = self.col.1.saturating_sub(1).min(line_text.len());
        line_text.get(start..end).unwrap_or("")
    }
}

impl std::fmt::Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Line {}:{} to {}", self.line, self.col.0, self.col.1)
    }
}
