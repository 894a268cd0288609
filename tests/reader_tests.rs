extern crate minic_lib;

use minic_lib::mips::modules::load_edumips64_module;
use minic_lib::mips::reader::{AsmReader, ReadError};
use minic_lib::mips::*;

const LISTING: &str = "\
.data
x: .space 8
c: .space 1
.align 3
y: .space 8
w: .word 1, 2
z:
  .byte 7

.text
main:
    # comments and blank lines are skipped

    ld r8, y(r0)
    sb r8, c(r0)       ; trailing comment
    bogus r1, r2
    ld r8, nowhere(r0)
    daddiu r9, r0, 0x10
    daddu r8, r9
    dmult r8, r40
    lb r8, (r0)
    syscall
";

macro_rules! test_rows {
    { $rows:expr; $($i:expr => $expected:expr),+ $(,)? } => {
        $({
            let expected: Result<Instruction, ReadError> = $expected;
            assert_eq!($rows[$i].encoded.clone().map(decode), expected.clone().map(Some), "row {}", $i);
            assert_eq!($rows[$i].instruction(), expected.ok(), "row {}", $i);
        })+
    };
}

#[test]
fn data_labels_get_offsets() {
    let module = load_edumips64_module();
    let mut reader = AsmReader::new(&module);
    reader.read(LISTING);

    let labels = reader.labels();
    assert_eq!(labels.get("x"), Some(&0));
    assert_eq!(labels.get("c"), Some(&8));
    assert_eq!(labels.get("y"), Some(&16));
    assert_eq!(labels.get("w"), Some(&24));
    assert_eq!(labels.get("z"), Some(&40));
    assert_eq!(labels.get("main"), None);
}

#[test]
fn text_lines_become_rows() {
    let module = load_edumips64_module();
    let rows = AsmReader::new(&module).read(LISTING);
    assert_eq!(rows.len(), 9);
    assert_eq!(rows[0].text, "ld r8, y(r0)");
    assert_eq!(rows[1].text, "sb r8, c(r0)");

    let r = |n| Register::new(n).unwrap();
    test_rows! { rows;
        0 => Ok(Instruction::memory(Mnemonic::Ld, r(8), 16, Register::ZERO)),
        1 => Ok(Instruction::memory(Mnemonic::Sb, r(8), 8, Register::ZERO)),
        2 => Err(ReadError::UnknownInstruction("bogus".to_string())),
        3 => Err(ReadError::UnknownLabel("nowhere".to_string())),
        4 => Ok(Instruction::daddiu(r(9), Register::ZERO, 16)),
        5 => Err(ReadError::OperandCount { mnemonic: Mnemonic::Daddu, expected: 3, found: 2 }),
        6 => Err(ReadError::BadRegister("r40".to_string())),
        7 => Ok(Instruction::memory(Mnemonic::Lb, r(8), 0, Register::ZERO)),
        8 => Ok(Instruction::syscall()),
    }

    let words: Vec<u32> = rows.iter().filter_map(|row| row.word()).collect();
    assert_eq!(words.len(), 5);
    assert_eq!(words[4], 0x0000_000C);
}

#[test]
fn single_instructions() {
    let module = load_edumips64_module();
    let reader = AsmReader::new(&module);
    let r = |n| Register::new(n).unwrap();

    assert_eq!(reader.parse_instruction("DADDU R8, R8, R9"),
               Ok(Instruction::arith(Mnemonic::Daddu, r(8), r(8), r(9))));
    assert_eq!(reader.parse_instruction("sd $8, -8($29)"),
               Ok(Instruction::memory(Mnemonic::Sd, r(8), -8, r(29))));
    assert_eq!(reader.parse_instruction("ld r8, 8"),
               Err(ReadError::BadMemoryOperand("8".to_string())));
    assert_eq!(reader.parse_instruction("daddiu r8, r0, ten"),
               Err(ReadError::BadImmediate("ten".to_string())));
    assert_eq!(reader.parse_instruction("syscall 0"),
               Err(ReadError::OperandCount { mnemonic: Mnemonic::Syscall, expected: 0, found: 1 }));
}

#[test]
fn module_vocabulary() {
    let module = load_edumips64_module();
    assert!(module.supports_instruction("DMULTU"));
    assert!(!module.supports_instruction("j"));
    assert!(module.supports_directive("space"));
    assert!(module.supports_directive("ALIGN"));
    assert!(!module.supports_directive("globl"));
}

#[test]
fn oversized_data_is_skipped() {
    let module = load_edumips64_module();
    let mut reader = AsmReader::new(&module);
    let rows = reader.read("\
.data
a: .space 4294967295
b: .space 8
c: .space 99999999999999999999
d: .space -4
.text
ld r8, a(r0)
ld r8, b(r0)
ld r8, d(r0)
daddiu r8, r0, 1
");

    assert_eq!(reader.labels().get("a"), Some(&0));
    assert_eq!(reader.labels().get("b"), None);
    assert_eq!(reader.labels().get("c"), None);
    assert_eq!(reader.labels().get("d"), None);
    assert_eq!(rows.len(), 4);
    assert!(rows[0].encoded.is_ok());
    assert_eq!(rows[1].encoded, Err(ReadError::UnknownLabel("b".to_string())));
    assert_eq!(rows[2].encoded, Err(ReadError::UnknownLabel("d".to_string())));
    assert_eq!(rows[3].word(), Some(0x6408_0001));
}

#[test]
fn alignment_near_the_top_of_the_segment() {
    let module = load_edumips64_module();
    let mut reader = AsmReader::new(&module);
    reader.read(".data\na: .space 4294967295\n.align 3\nb: .byte 1\n");
    assert_eq!(reader.labels().get("a"), Some(&0));
    assert_eq!(reader.labels().get("b"), None);
}
