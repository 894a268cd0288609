// Represents the MIPS64 subset we emit
// The vocabulary is what the code generator needs plus the unsigned
// multiply/divide variants

pub mod encoding;
pub mod modules;
pub mod reader;

pub use encoding::*;

use std::collections::HashMap;

/// One of the 32 general purpose registers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Register(u8);

impl Register {
    /// r0 is hardwired to zero
    pub const ZERO: Register = Register(0);
    /// Default window handed to the temp allocator
    pub const T_FIRST: Register = Register(8);
    pub const T_LAST: Register = Register(25);

    pub fn new(number: u8) -> Option<Register> {
        if number < 32 {
            Some(Register(number))
        } else {
            None
        }
    }

    /// Takes the low 5 bits of a field
    pub fn from_field(bits: u32) -> Register {
        Register((bits & 0x1F) as u8)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// Accepts `r8`, `R8` and `$8`
    pub fn parse(text: &str) -> Option<Register> {
        let text = text.trim();
        let digits = text.strip_prefix('r')
            .or_else(|| text.strip_prefix('R'))
            .or_else(|| text.strip_prefix('$'))?;
        Register::new(digits.parse().ok()?)
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "r{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// opcode(6) | rs(5) | rt(5) | rd(5) | shamt(5) | funct(6)
    R,
    /// opcode(6) | rs(5) | rt(5) | immediate(16)
    I,
}

impl Format {
    pub fn name(&self) -> &'static str {
        match self {
            Format::R => "R-type",
            Format::I => "I-type",
        }
    }
}

/// How the operands of an instruction are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `daddiu rt, rs, imm`
    RegRegImm,
    /// `ld rt, offset(base)`
    Memory,
    /// `daddu rd, rs, rt`
    ThreeReg,
    /// `dmult rs, rt`
    TwoReg,
    /// `mflo rd`
    OneReg,
    /// `syscall`
    Bare,
}

impl Shape {
    pub fn operand_count(&self) -> usize {
        match self {
            Shape::RegRegImm | Shape::ThreeReg => 3,
            Shape::Memory | Shape::TwoReg => 2,
            Shape::OneReg => 1,
            Shape::Bare => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mnemonic {
    Daddiu,
    Ld,
    Sd,
    Lb,
    Sb,
    Daddu,
    Dsubu,
    Dmult,
    Dmultu,
    Ddiv,
    Ddivu,
    Mflo,
    Syscall,
}

lazy_static! {
    static ref MNEMONICS_BY_NAME: HashMap<&'static str, Mnemonic> =
        Mnemonic::ALL.iter().map(|m| (m.name(), *m)).collect();
}

impl Mnemonic {
    pub const ALL: [Mnemonic; 13] = [
        Mnemonic::Daddiu, Mnemonic::Ld, Mnemonic::Sd, Mnemonic::Lb, Mnemonic::Sb,
        Mnemonic::Daddu, Mnemonic::Dsubu, Mnemonic::Dmult, Mnemonic::Dmultu,
        Mnemonic::Ddiv, Mnemonic::Ddivu, Mnemonic::Mflo, Mnemonic::Syscall,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Mnemonic::Daddiu => "daddiu",
            Mnemonic::Ld => "ld",
            Mnemonic::Sd => "sd",
            Mnemonic::Lb => "lb",
            Mnemonic::Sb => "sb",
            Mnemonic::Daddu => "daddu",
            Mnemonic::Dsubu => "dsubu",
            Mnemonic::Dmult => "dmult",
            Mnemonic::Dmultu => "dmultu",
            Mnemonic::Ddiv => "ddiv",
            Mnemonic::Ddivu => "ddivu",
            Mnemonic::Mflo => "mflo",
            Mnemonic::Syscall => "syscall",
        }
    }

    /// Case insensitive
    pub fn from_name(name: &str) -> Option<Mnemonic> {
        MNEMONICS_BY_NAME.get(name.to_ascii_lowercase().as_str()).copied()
    }

    pub fn format(&self) -> Format {
        match self {
            Mnemonic::Daddiu | Mnemonic::Ld | Mnemonic::Sd | Mnemonic::Lb | Mnemonic::Sb => Format::I,
            _ => Format::R,
        }
    }

    /// The primary opcode, every R-type lives under SPECIAL (0)
    pub fn opcode(&self) -> u8 {
        match self {
            Mnemonic::Daddiu => 0x19,
            Mnemonic::Ld => 0x37,
            Mnemonic::Sd => 0x3F,
            Mnemonic::Lb => 0x20,
            Mnemonic::Sb => 0x28,
            _ => 0x00,
        }
    }

    pub fn funct(&self) -> Option<u8> {
        match self {
            Mnemonic::Daddu => Some(0x2D),
            Mnemonic::Dsubu => Some(0x2F),
            Mnemonic::Dmult => Some(0x1C),
            Mnemonic::Dmultu => Some(0x1D),
            Mnemonic::Ddiv => Some(0x1E),
            Mnemonic::Ddivu => Some(0x1F),
            Mnemonic::Mflo => Some(0x12),
            Mnemonic::Syscall => Some(0x0C),
            _ => None,
        }
    }

    pub fn from_opcode(opcode: u8) -> Option<Mnemonic> {
        Mnemonic::ALL.iter().copied()
            .find(|m| m.format() == Format::I && m.opcode() == opcode)
    }

    pub fn from_funct(funct: u8) -> Option<Mnemonic> {
        Mnemonic::ALL.iter().copied().find(|m| m.funct() == Some(funct))
    }

    pub fn shape(&self) -> Shape {
        match self {
            Mnemonic::Daddiu => Shape::RegRegImm,
            Mnemonic::Ld | Mnemonic::Sd | Mnemonic::Lb | Mnemonic::Sb => Shape::Memory,
            Mnemonic::Daddu | Mnemonic::Dsubu => Shape::ThreeReg,
            Mnemonic::Dmult | Mnemonic::Dmultu | Mnemonic::Ddiv | Mnemonic::Ddivu => Shape::TwoReg,
            Mnemonic::Mflo => Shape::OneReg,
            Mnemonic::Syscall => Shape::Bare,
        }
    }
}

impl std::fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A symbolic instruction with every operand resolved.
/// Fields an instruction doesn't use are kept at zero so that
/// encoding then decoding gives back an identical value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    R { op: Mnemonic, rs: Register, rt: Register, rd: Register, shamt: u8 },
    I { op: Mnemonic, rs: Register, rt: Register, imm: i16 },
}

impl Instruction {
    /// `rt = rs + imm`
    pub fn daddiu(rt: Register, rs: Register, imm: i16) -> Instruction {
        Instruction::I { op: Mnemonic::Daddiu, rs, rt, imm }
    }

    /// Any of ld/sd/lb/sb, `rt` is loaded from / stored to `offset(base)`
    pub fn memory(op: Mnemonic, rt: Register, offset: i16, base: Register) -> Instruction {
        debug_assert_eq!(op.shape(), Shape::Memory);
        Instruction::I { op, rs: base, rt, imm: offset }
    }

    /// daddu/dsubu, `rd = rs op rt`
    pub fn arith(op: Mnemonic, rd: Register, rs: Register, rt: Register) -> Instruction {
        debug_assert_eq!(op.shape(), Shape::ThreeReg);
        Instruction::R { op, rs, rt, rd, shamt: 0 }
    }

    /// dmult(u)/ddiv(u), the result lands in lo/hi
    pub fn mul_div(op: Mnemonic, rs: Register, rt: Register) -> Instruction {
        debug_assert_eq!(op.shape(), Shape::TwoReg);
        Instruction::R { op, rs, rt, rd: Register::ZERO, shamt: 0 }
    }

    pub fn mflo(rd: Register) -> Instruction {
        Instruction::R { op: Mnemonic::Mflo, rs: Register::ZERO, rt: Register::ZERO, rd, shamt: 0 }
    }

    pub fn syscall() -> Instruction {
        Instruction::R {
            op: Mnemonic::Syscall,
            rs: Register::ZERO, rt: Register::ZERO, rd: Register::ZERO, shamt: 0
        }
    }

    pub fn mnemonic(&self) -> Mnemonic {
        match self {
            Instruction::R { op, .. } | Instruction::I { op, .. } => *op,
        }
    }

    pub fn format(&self) -> Format {
        match self {
            Instruction::R { .. } => Format::R,
            Instruction::I { .. } => Format::I,
        }
    }

    /// Renders a memory operand against a data label instead of the raw offset
    /// i.e. `ld r8, x(r0)`.  Other instructions render as usual.
    pub fn with_label(&self, label: &str) -> String {
        match self {
            Instruction::I { op, rs, rt, .. } if op.shape() == Shape::Memory => {
                format!("{} {}, {}({})", op, rt, label, rs)
            },
            _ => self.to_string()
        }
    }
}

impl std::fmt::Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            Instruction::I { op, rs, rt, imm } => match op.shape() {
                Shape::Memory => write!(f, "{} {}, {}({})", op, rt, imm, rs),
                _ => write!(f, "{} {}, {}, {}", op, rt, rs, imm),
            },
            Instruction::R { op, rs, rt, rd, .. } => match op.shape() {
                Shape::ThreeReg => write!(f, "{} {}, {}, {}", op, rd, rs, rt),
                Shape::TwoReg => write!(f, "{} {}, {}", op, rs, rt),
                Shape::OneReg => write!(f, "{} {}", op, rd),
                _ => write!(f, "{}", op),
            }
        }
    }
}
