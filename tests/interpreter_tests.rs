extern crate minic_lib;

use minic_lib::interpreter::evaluate;
use minic_lib::*;

macro_rules! test_eval {
    { $($expr:expr => $value:expr),+ $(,)? } => {
        $({
            let mut symbols = SymbolTable::new();
            symbols.declare("x", VarKind::Int);
            symbols.assign("x", 7);
            symbols.declare("u", VarKind::Int);
            assert_eq!(evaluate(&$expr, &symbols, 1), $value);
        })+
    };
}

fn num(n: i64) -> Expr {
    Expr::Number(n)
}

fn var(id: &str) -> Expr {
    Expr::Variable(id.to_string())
}

#[test]
fn arithmetic() {
    test_eval! {
        Expr::binop(BinopKind::Add, var("x"), num(1)) => Ok(8),
        Expr::binop(BinopKind::Div, num(-7), num(2)) => Ok(-3),
        Expr::binop(BinopKind::Mul, var("u"), var("x")) => Ok(0),
        Expr::binop(BinopKind::Add, num(i64::MAX), num(1)) => Ok(i64::MIN),
        Expr::binop(BinopKind::Div, num(i64::MIN), num(-1)) => Ok(i64::MIN),
    }
}

#[test]
fn failures() {
    test_eval! {
        Expr::binop(BinopKind::Div, var("x"), Expr::binop(BinopKind::Sub, num(2), num(2)))
            => Err(CompileError::new(1, ErrorKind::DivisionByZero, "(x / (2 - 2))")),
        var("nope") => Err(CompileError::new(1, ErrorKind::UndeclaredVariable, "nope")),
    }
}
