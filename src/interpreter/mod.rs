use crate::compiler::ast::*;
use crate::compiler::error::*;
use crate::compiler::symbol_table::SymbolTable;
use crate::logger::log_uninitialised_read;

/// Folds an expression down to the value it would leave in a register.
///
/// Arithmetic wraps on overflow (as the 64 bit registers would) and
/// division truncates towards zero.  A divisor that evaluates to 0 aborts
/// the evaluation; the generated code does no such check.
pub fn evaluate(expr: &Expr, symbols: &SymbolTable, line: usize) -> Result<i64, CompileError> {
    match expr {
        Expr::Number(n) => Ok(*n),
        Expr::Variable(id) => match symbols.lookup(id) {
            Some(symbol) => match symbol.value {
                Some(value) => Ok(value),
                None => {
                    log_uninitialised_read(id);
                    Ok(0)
                }
            },
            None => Err(CompileError::new(line, ErrorKind::UndeclaredVariable, id.clone())),
        },
        Expr::Binop(op, lhs, rhs) => {
            let lhs_val = evaluate(lhs, symbols, line)?;
            let rhs_val = evaluate(rhs, symbols, line)?;
            match op {
                BinopKind::Add => Ok(lhs_val.wrapping_add(rhs_val)),
                BinopKind::Sub => Ok(lhs_val.wrapping_sub(rhs_val)),
                BinopKind::Mul => Ok(lhs_val.wrapping_mul(rhs_val)),
                BinopKind::Div if rhs_val == 0 => {
                    Err(CompileError::new(line, ErrorKind::DivisionByZero, format!("{}", expr)))
                },
                BinopKind::Div => Ok(lhs_val.wrapping_div(rhs_val)),
            }
        }
    }
}
