extern crate minic_lib;

use minic_lib::listing;
use minic_lib::mips::reader::MachineRow;
use minic_lib::mips::*;
use minic_lib::*;

const EXPECTED_ASM: &str = "\
.data
x: .space 8

.text
main:
    daddiu r8, r0, 2
    daddiu r9, r0, 3
    daddiu r10, r0, 4
    dmult r9, r10
    mflo r9
    daddu r8, r8, r9
    sd r8, x(r0)

    syscall
";

#[test]
fn end_to_end() {
    let build = build("int x = 2 + 3 * 4;", &Config::default());
    assert!(build.succeeded());
    assert_eq!(build.session.symbols.lookup("x").and_then(|s| s.value), Some(14));
    assert_eq!(build.assembly.as_ref().map(String::as_str), Some(EXPECTED_ASM));

    let stream = build.stream.as_ref().unwrap();
    let mnemonics: Vec<Mnemonic> = stream.instructions().map(Instruction::mnemonic).collect();
    assert_eq!(mnemonics, vec![
        Mnemonic::Daddiu, Mnemonic::Daddiu, Mnemonic::Daddiu, Mnemonic::Dmult,
        Mnemonic::Mflo, Mnemonic::Daddu, Mnemonic::Sd, Mnemonic::Syscall,
    ]);
}

#[test]
fn reading_back_matches_the_generated_words() {
    let src = "int a = 5; char c = 'A';\nint b = a * 2 - c / 5;\nc = c + b;";
    let build = build(src, &Config::default());
    assert!(build.succeeded());

    let rows = binhex(build.assembly.as_ref().unwrap());
    assert!(rows.iter().all(|row| row.instruction().is_some()));
    assert_eq!(listing::row_words(&rows), build.stream.unwrap().words());
}

#[test]
fn digest_is_deterministic() {
    let src = "int a = 1, b = 2;\na = a + b * 3;";
    let digest = || {
        let build = build(src, &Config::default());
        let rows = binhex(build.assembly.as_ref().unwrap());
        listing::digest(&listing::row_words(&rows))
    };
    let first = digest();
    assert_eq!(first, digest());
    assert!(first.contains("=== Merged Binary (Execution Order) ==="));
    assert!(first.contains("=== Merged Hexadecimal ===\n64080001FC08000064080002FC080008"));
}

#[test]
fn errors_skip_generation() {
    let build = build("int x = y;\nint z = 1;", &Config::default());
    assert!(!build.succeeded());
    assert!(build.stream.is_none());
    assert!(build.assembly.is_none());
    assert_eq!(build.session.errors.count(ErrorKind::UndeclaredVariable), 1);
    // the front end still processed everything
    assert_eq!(build.session.symbols.len(), 2);
}

#[test]
fn codegen_errors_withhold_the_assembly() {
    let config = Config { last_temp: Register::new(8).unwrap(), ..Config::default() };
    let build = build("int x = 1 + 2;", &config);
    assert!(build.stream.is_some());
    assert!(build.assembly.is_none());
    assert_eq!(build.session.errors.count(ErrorKind::ExpressionTooComplex), 1);
}

#[test]
fn preinitialised_data() {
    let config = Config { preinit_data: true, emit_exit: false, ..Config::default() };
    let build = build("int x = 5; char c = 'A'; int y; c = 'B';", &config);
    let asm = build.assembly.unwrap();
    assert!(asm.starts_with(".data\nx: .word 5\nc: .byte 65\n.align 3\ny: .space 8\n\n.text\nmain:\n"));
    assert!(!asm.contains("syscall"));

    let rows = binhex(&asm);
    let sb = rows.iter().find(|row| row.text == "sb r8, c(r0)").unwrap();
    assert_eq!(sb.word(), Some(0xA008_0008));
}

#[test]
fn listings() {
    let build = build("int x = 3; char c = 'A'; int u;", &Config::default());

    let symbols = listing::symbol_table(&build.session.symbols);
    assert!(symbols.contains("=== Symbol Table ==="));
    assert!(symbols.contains("'A' (65)"));
    assert!(symbols.contains("(uninitialized)"));

    let history = listing::history(&build.session.history);
    assert!(history.contains("DECLARE"));
    assert!(history.lines().any(|l| l.starts_with("1") && l.trim_end().ends_with("-")));

    assert!(listing::errors(&build.session.errors).contains("=== No Errors Found ==="));
    assert!(listing::symbol_table(&SymbolTable::new()).contains("(empty)"));

    let rows = binhex("daddiu r8, r0, 2\nnope r1\n");
    let table = listing::machine_table(&rows);
    assert!(table.contains("0x64080002"));
    assert!(table.contains("011001 00000 01000 0000000000000010"));
    assert!(table.contains("UNKNOWN"));
    assert!(table.contains("| daddiu r8, r0, 2 "));
    assert!(table.contains("R-type: opcode(6) | rs(5) | rt(5) | rd(5) | shamt(5) | funct(6)"));
    assert_eq!(listing::row_words(&rows), vec![0x6408_0002]);
}

#[test]
fn error_listing() {
    let build = build("int x; int x;\nq = 1;", &Config::default());
    let errors = listing::errors(&build.session.errors);
    assert!(errors.contains("=== Error List ==="));
    assert!(errors.contains("Variable redeclaration"));
    assert!(errors.contains("Undeclared variable"));
}

#[test]
fn machine_table_decodes_words() {
    let rows = vec![
        MachineRow { text: "ld r8, x(r0)".to_string(), encoded: Ok(0xDC08_0008) },
        MachineRow { text: "raw".to_string(), encoded: Ok(0x0400_0000) },
        MachineRow { text: "raw".to_string(), encoded: Ok(0x0000_0001) },
    ];
    let table = listing::machine_table(&rows);
    let lines: Vec<&str> = table.lines().filter(|l| l.starts_with("| ") && !l.starts_with("| No")).collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("0xDC080008") && lines[0].contains("| ld r8, 8(r0) "));
    assert!(lines[1].contains("0x04000000") && lines[1].trim_end().ends_with("| unknown                |"));
    assert!(lines[2].contains("0x00000001") && lines[2].contains("| unknown "));
}

#[test]
fn long_flat_chains_are_rejected() {
    let src = format!("int x = 1{};\nint y = 2;", " + 1".repeat(20_000));
    let build = build(&src, &Config::default());
    assert_eq!(build.session.errors.count(ErrorKind::ExpressionTooComplex), 1);
    assert_eq!(build.session.errors.len(), 1);
    assert!(build.assembly.is_none());
    assert_eq!(build.session.symbols.lookup("y").and_then(|s| s.value), Some(2));
}
