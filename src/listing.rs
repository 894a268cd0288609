// Human readable reports printed at the end of a run
use crate::compiler::ast::History;
use crate::compiler::error::ErrorLog;
use crate::compiler::symbol_table::{SymbolTable, VarKind};
use crate::mips::reader::MachineRow;
use crate::mips::*;

const TABLE_RULE: &str =
    "+----+------------------------+-------------------------------------------+------------+------------------------+";

fn render_value(kind: VarKind, value: Option<i64>) -> String {
    match (kind, value) {
        (_, None) => String::from("(uninitialized)"),
        (VarKind::Char, Some(v)) if (0x20..0x7F).contains(&v) => format!("'{}' ({})", v as u8 as char, v),
        (_, Some(v)) => v.to_string(),
    }
}

pub fn symbol_table(symbols: &SymbolTable) -> String {
    let mut builder = String::from("\n=== Symbol Table ===\n");
    if symbols.is_empty() {
        builder += "(empty)\n";
        return builder;
    }

    builder += &format!("{:<15} {:<10} {:<10} {:<15}\n", "Variable", "Type", "Offset", "Value");
    builder += &"-".repeat(56);
    builder.push('\n');
    for symbol in symbols.iter() {
        builder += &format!("{:<15} {:<10} {:<10} {}\n", symbol.name, symbol.kind.name(), symbol.slot,
                            render_value(symbol.kind, symbol.value));
    }
    builder
}

pub fn history(history: &History) -> String {
    let mut builder = String::from("\n=== Operation History ===\n");
    if history.is_empty() {
        builder += "(empty)\n";
        return builder;
    }

    builder += &format!("{:<6} {:<10} {:<12} {:<6} {:<20} {}\n",
                        "Line", "Operation", "Variable", "Type", "Value", "Expression");
    builder += &"-".repeat(80);
    builder.push('\n');
    for op in history {
        let expr = match op.expr {
            Some(ref expr) => expr.to_string(),
            None => String::from("-"),
        };
        builder += &format!("{:<6} {:<10} {:<12} {:<6} {:<20} {}\n", op.line, op.kind.name(),
                            op.target, op.var_kind.name(), render_value(op.var_kind, op.value), expr);
    }
    builder
}

pub fn errors(errors: &ErrorLog) -> String {
    if errors.is_empty() {
        return String::from("\n=== No Errors Found ===\n");
    }

    let mut builder = String::from("\n=== Error List ===\n");
    builder += &format!("{:<10} {:<30} {}\n", "Line", "Error Type", "Details");
    builder += &"-".repeat(73);
    builder.push('\n');
    for error in errors {
        builder += &format!("{:<10} {:<30} {}\n", error.line, error.kind.describe(), error.detail);
    }
    builder
}

/// The bin/hex table, unreadable lines get an UNKNOWN row but keep their number.
/// The last column is decoded back from the word.
pub fn machine_table(rows: &[MachineRow]) -> String {
    let mut builder = String::from("\n=== MIPS64 Code with Instruction Field Format ===\n");
    builder += TABLE_RULE;
    builder += &format!("\n| {:<2} | {:<22} | {:<41} | {:<10} | {:<22} |\n",
                        "No", "Instruction", "Binary Fields", "Hex", "Decoded");
    builder += TABLE_RULE;
    builder.push('\n');

    for (i, row) in rows.iter().enumerate() {
        match row.word() {
            Some(word) => {
                let decoded = match decode(word) {
                    Some(instr) => instr.to_string(),
                    None => String::from("unknown"),
                };
                builder += &format!("| {:<2} | {:<22} | {:<41} | 0x{:08X} | {:<22} |\n", i + 1, row.text,
                                    format_fields(word, format_of(word)), word, decoded);
            },
            None => {
                builder += &format!("| {:<2} | {:<22} | {:<41} | {:<10} | {:<22} |\n", i + 1, row.text,
                                    "UNKNOWN", "UNKNOWN", "unknown");
            }
        }
    }
    builder += TABLE_RULE;
    builder += "\n\n=== Instruction Format Legend ===\n";
    builder += &format!("{}: opcode(6) | rs(5) | rt(5) | immediate(16)\n", Format::I.name());
    builder += &format!("{}: opcode(6) | rs(5) | rt(5) | rd(5) | shamt(5) | funct(6)\n", Format::R.name());
    builder
}

/// Every readable word concatenated in execution order
pub fn digest(words: &[u32]) -> String {
    let mut builder = String::new();
    if words.is_empty() {
        return builder;
    }

    builder += "\n=== Merged Binary (Execution Order) ===\n";
    for word in words {
        builder += &to_binary(*word);
    }
    builder += "\n\n=== Merged Hexadecimal ===\n";
    for word in words {
        builder += &format!("{:08X}", word);
    }
    builder.push('\n');
    builder
}

pub fn row_words(rows: &[MachineRow]) -> Vec<u32> {
    rows.iter().filter_map(MachineRow::word).collect()
}
