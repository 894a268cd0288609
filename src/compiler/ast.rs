/*
 * The AST for minic statements
 * Expressions are a plain owned tree (no sharing), each statement
 * owns its expression through its Operation record.
 */

use crate::compiler::Ident;
use crate::compiler::symbol_table::VarKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinopKind {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinopKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            BinopKind::Add => "+",
            BinopKind::Sub => "-",
            BinopKind::Mul => "*",
            BinopKind::Div => "/",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(i64),
    Variable(Ident),
    Binop(BinopKind, Box<Expr>, Box<Expr>),
}

impl Expr {
    pub fn binop(op: BinopKind, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binop(op, Box::new(lhs), Box::new(rhs))
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Expr::Number(_) | Expr::Variable(_) => 1,
            Expr::Binop(_, lhs, rhs) => 1 + lhs.size() + rhs.size(),
        }
    }
}

/// Renders fully parenthesised infix i.e. `(x + (y * 2))`
impl std::fmt::Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Variable(id) => write!(f, "{}", id),
            Expr::Binop(op, lhs, rhs) => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Declaration,
    Assignment,
}

impl OperationKind {
    pub fn name(&self) -> &'static str {
        match self {
            OperationKind::Declaration => "DECLARE",
            OperationKind::Assignment => "ASSIGN",
        }
    }
}

/// One accepted statement (or one declarator of a declaration list)
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    pub line: usize,
    pub kind: OperationKind,
    pub target: Ident,
    pub var_kind: VarKind,
    /// None for a bare declaration i.e. `int x;`
    pub expr: Option<Expr>,
    /// What `expr` evaluated to when the statement was processed
    pub value: Option<i64>,
    /// The statement text as written
    pub source: String,
}

/// Accepted operations in source order, replayed as is by codegen
#[derive(Debug, Default)]
pub struct History {
    operations: Vec<Operation>,
}

impl History {
    pub fn new() -> History {
        History::default()
    }

    pub fn push(&mut self, operation: Operation) {
        self.operations.push(operation);
    }

    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<Operation> {
        self.operations.iter()
    }

    /// The declaration record of `name`, if it was recorded
    pub fn declaration_of(&self, name: &str) -> Option<&Operation> {
        self.operations.iter()
            .find(|op| op.kind == OperationKind::Declaration && op.target == name)
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    fn into_iter(self) -> Self::IntoIter {
        self.operations.iter()
    }
}
