extern crate minic_lib;

use minic_lib::interpreter::evaluate;
use minic_lib::*;

macro_rules! test_expr {
    { $($text:expr => $rendered:expr, $value:expr);+ $(;)? } => {
        $({
            let symbols = SymbolTable::new();
            let mut errors = ErrorLog::new();
            let expr = parse_expression($text, 1, &symbols, &mut errors);
            assert!(errors.is_empty(), "{} reported {:?}", $text, errors);
            assert_eq!(expr.to_string(), $rendered, "rendering of {}", $text);
            assert_eq!(evaluate(&expr, &symbols, 1), Ok($value), "value of {}", $text);
        })+
    };
}

macro_rules! test_expr_errors {
    { $($text:expr => [$($kind:ident : $count:expr),*], $value:expr);+ $(;)? } => {
        $({
            let symbols = SymbolTable::new();
            let mut errors = ErrorLog::new();
            let expr = parse_expression($text, 1, &symbols, &mut errors);
            $(assert_eq!(errors.count(ErrorKind::$kind), $count, "{} errors for {}",
                         stringify!($kind), $text);)*
            assert_eq!(evaluate(&expr, &symbols, 1), Ok($value), "value of {}", $text);
        })+
    };
}

#[test]
fn precedence_and_associativity() {
    test_expr! {
        "2 + 3 * 4" => "(2 + (3 * 4))", 14;
        "10 - 3 - 2" => "((10 - 3) - 2)", 5;
        "8 / 2 / 2" => "((8 / 2) / 2)", 2;
        "(1 + 2) * 3" => "((1 + 2) * 3)", 9;
        "2 * 3 + 4 * 5" => "((2 * 3) + (4 * 5))", 26;
        "7 / -2" => "(7 / -2)", -3;
        "((((5))))" => "5", 5;
    }
}

#[test]
fn unary_minus() {
    test_expr! {
        "-5 + 3" => "(-5 + 3)", -2;
        "-(2 + 3)" => "(0 - (2 + 3))", -5;
        "--3" => "(0 - -3)", 3;
        "4 - -4" => "(4 - -4)", 8;
    }
}

#[test]
fn character_literals_are_ordinals() {
    test_expr! {
        "'a' + 1" => "(97 + 1)", 98;
        "'\\n'" => "10", 10;
    }
}

#[test]
fn recovers_from_bad_expressions() {
    test_expr_errors! {
        "x + 1" => [UndeclaredVariable: 1, SyntaxError: 0], 1;
        "(1 + 2" => [SyntaxError: 1], 3;
        "1 2" => [SyntaxError: 1], 1;
        "1 +" => [SyntaxError: 1], 1;
        "\"hi\" * 2" => [TypeMismatch: 1], 0;
    }
}

#[test]
fn deep_nesting_is_bounded() {
    let text = format!("{}1{}", "(".repeat(MAX_NESTING + 10), ")".repeat(MAX_NESTING + 10));
    let symbols = SymbolTable::new();
    let mut errors = ErrorLog::new();
    parse_expression(&text, 1, &symbols, &mut errors);
    assert!(errors.count(ErrorKind::SyntaxError) >= 1);
}

#[test]
fn variables_resolve_against_the_table() {
    let mut symbols = SymbolTable::new();
    symbols.declare("x", VarKind::Int);
    symbols.assign("x", 6);
    let mut errors = ErrorLog::new();

    let expr = parse_expression("x * x - 1", 1, &symbols, &mut errors);
    assert!(errors.is_empty());
    assert_eq!(expr.to_string(), "((x * x) - 1)");
    assert_eq!(evaluate(&expr, &symbols, 1), Ok(35));
}

#[test]
fn operator_count_is_bounded() {
    let symbols = SymbolTable::new();

    let mut errors = ErrorLog::new();
    let at_limit = format!("1{}", " + 1".repeat(MAX_OPERATORS));
    let expr = parse_expression(&at_limit, 1, &symbols, &mut errors);
    assert!(errors.is_empty());
    assert_eq!(expr.size(), 2 * MAX_OPERATORS + 1);
    assert_eq!(evaluate(&expr, &symbols, 1), Ok(MAX_OPERATORS as i64 + 1));

    let mut errors = ErrorLog::new();
    let flat = format!("1{}", " * 1 - 1".repeat(20_000));
    let expr = parse_expression(&flat, 1, &symbols, &mut errors);
    assert_eq!(errors.count(ErrorKind::ExpressionTooComplex), 1);
    assert_eq!(errors.len(), 1);
    assert!(expr.size() <= 2 * MAX_OPERATORS + 1);
}
