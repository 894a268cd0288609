extern crate minic_lib;

use minic_lib::mips::*;

fn reg(n: u8) -> Register {
    Register::new(n).unwrap()
}

macro_rules! test_encode {
    { $($instr:expr => $word:expr),+ $(,)? } => {
        $({
            let instr = $instr;
            assert_eq!(encode(&instr), $word, "encoding of {}", instr);
            assert_eq!(decode($word), Some(instr));
        })+
    };
}

#[test]
fn known_words() {
    test_encode! {
        Instruction::daddiu(reg(8), Register::ZERO, 2) => 0x6408_0002,
        Instruction::daddiu(reg(8), Register::ZERO, -1) => 0x6408_FFFF,
        Instruction::memory(Mnemonic::Sd, reg(8), 0, Register::ZERO) => 0xFC08_0000,
        Instruction::memory(Mnemonic::Ld, reg(9), 8, Register::ZERO) => 0xDC09_0008,
        Instruction::memory(Mnemonic::Lb, reg(8), 1, Register::ZERO) => 0x8008_0001,
        Instruction::memory(Mnemonic::Sb, reg(8), 1, Register::ZERO) => 0xA008_0001,
        Instruction::arith(Mnemonic::Daddu, reg(8), reg(8), reg(9)) => 0x0109_402D,
        Instruction::arith(Mnemonic::Dsubu, reg(8), reg(8), reg(9)) => 0x0109_402F,
        Instruction::mul_div(Mnemonic::Dmult, reg(9), reg(10)) => 0x012A_001C,
        Instruction::mul_div(Mnemonic::Ddiv, reg(9), reg(10)) => 0x012A_001E,
        Instruction::mflo(reg(9)) => 0x0000_4812,
        Instruction::syscall() => 0x0000_000C,
    }
}

fn sample(op: Mnemonic, a: Register, b: Register, c: Register, imm: i16) -> Instruction {
    match op.shape() {
        Shape::RegRegImm => Instruction::daddiu(a, b, imm),
        Shape::Memory => Instruction::memory(op, a, imm, b),
        Shape::ThreeReg => Instruction::arith(op, a, b, c),
        Shape::TwoReg => Instruction::mul_div(op, a, b),
        Shape::OneReg => Instruction::mflo(a),
        Shape::Bare => Instruction::syscall(),
    }
}

#[test]
fn decode_inverts_encode() {
    for op in Mnemonic::ALL.iter() {
        for &(a, b, c) in &[(0, 0, 0), (31, 31, 31), (8, 17, 25), (1, 30, 2)] {
            for &imm in &[i16::MIN, -1, 0, 1, i16::MAX] {
                let instr = sample(*op, reg(a), reg(b), reg(c), imm);
                assert_eq!(decode(encode(&instr)), Some(instr), "{}", instr);
            }
        }
    }
}

#[test]
fn unknown_words() {
    assert_eq!(decode(0x0400_0000), None);
    assert_eq!(decode(0x0000_0001), None);
    assert_eq!(decode(0x0000_003F), None);
}

#[test]
fn immediates() {
    assert_eq!(truncate_immediate(70000), 4464);
    assert_eq!(truncate_immediate(-1), -1);
    assert_eq!(truncate_immediate(65535), -1);
    assert!(fits_immediate(65535));
    assert!(fits_immediate(-32768));
    assert!(!fits_immediate(65536));
    assert!(!fits_immediate(-32769));
}

#[test]
fn field_formatting() {
    assert_eq!(format_fields(0x6408_0002, Format::I), "011001 00000 01000 0000000000000010");
    assert_eq!(format_fields(0x0109_402D, Format::R), "000000 01000 01001 01000 00000 101101");
    assert_eq!(format_of(0x0109_402D), Format::R);
    assert_eq!(format_of(0x6408_0002), Format::I);
    assert_eq!(to_binary(0x0000_000C), "00000000000000000000000000001100");
}

#[test]
fn mnemonic_lookup() {
    assert_eq!(Mnemonic::from_name("DADDIU"), Some(Mnemonic::Daddiu));
    assert_eq!(Mnemonic::from_name("mflo"), Some(Mnemonic::Mflo));
    assert_eq!(Mnemonic::from_name("addi"), None);
    assert_eq!(Register::parse("$31"), Register::new(31));
    assert_eq!(Register::parse("r32"), None);
}
