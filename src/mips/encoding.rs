use super::*;

const OPCODE_SHIFT: u32 = 26;
const RS_SHIFT: u32 = 21;
const RT_SHIFT: u32 = 16;
const RD_SHIFT: u32 = 11;
const SHAMT_SHIFT: u32 = 6;

const OPCODE_MASK: u32 = 0x3F;
const REG_MASK: u32 = 0x1F;
const FUNCT_MASK: u32 = 0x3F;
const IMM_MASK: u32 = 0xFFFF;

/// Wraps a value into the 16 bit immediate field, overflow is not an error
pub fn truncate_immediate(value: i64) -> i16 {
    value as i16
}

pub fn fits_immediate(value: i64) -> bool {
    value >= i16::MIN as i64 && value <= u16::MAX as i64
}

pub fn encode(instr: &Instruction) -> u32 {
    match *instr {
        Instruction::R { op, rs, rt, rd, shamt } => {
            let funct = op.funct().unwrap_or(0) as u32;
            ((op.opcode() as u32 & OPCODE_MASK) << OPCODE_SHIFT)
                | ((rs.number() as u32 & REG_MASK) << RS_SHIFT)
                | ((rt.number() as u32 & REG_MASK) << RT_SHIFT)
                | ((rd.number() as u32 & REG_MASK) << RD_SHIFT)
                | ((shamt as u32 & REG_MASK) << SHAMT_SHIFT)
                | (funct & FUNCT_MASK)
        },
        Instruction::I { op, rs, rt, imm } => {
            ((op.opcode() as u32 & OPCODE_MASK) << OPCODE_SHIFT)
                | ((rs.number() as u32 & REG_MASK) << RS_SHIFT)
                | ((rt.number() as u32 & REG_MASK) << RT_SHIFT)
                | (imm as u16 as u32 & IMM_MASK)
        }
    }
}

/// None when the opcode (or funct under SPECIAL) isn't one we know
pub fn decode(word: u32) -> Option<Instruction> {
    let opcode = ((word >> OPCODE_SHIFT) & OPCODE_MASK) as u8;
    let rs = Register::from_field(word >> RS_SHIFT);
    let rt = Register::from_field(word >> RT_SHIFT);

    if opcode == 0 {
        let op = Mnemonic::from_funct((word & FUNCT_MASK) as u8)?;
        Some(Instruction::R {
            op,
            rs,
            rt,
            rd: Register::from_field(word >> RD_SHIFT),
            shamt: ((word >> SHAMT_SHIFT) & REG_MASK) as u8,
        })
    } else {
        let op = Mnemonic::from_opcode(opcode)?;
        Some(Instruction::I { op, rs, rt, imm: (word & IMM_MASK) as u16 as i16 })
    }
}

/// The format a word would decode as, going purely off its opcode
pub fn format_of(word: u32) -> Format {
    if (word >> OPCODE_SHIFT) & OPCODE_MASK == 0 {
        Format::R
    } else {
        Format::I
    }
}

fn push_bits(out: &mut String, value: u32, width: u32) {
    for i in (0..width).rev() {
        out.push(if value & (1 << i) != 0 { '1' } else { '0' });
    }
}

/// All 32 bits, MSB first
pub fn to_binary(word: u32) -> String {
    let mut out = String::with_capacity(32);
    push_bits(&mut out, word, 32);
    out
}

/// Groups the bits by field i.e. `011001 00000 01000 0000000000000010`
pub fn format_fields(word: u32, format: Format) -> String {
    let widths: &[(u32, u32)] = match format {
        Format::I => &[(OPCODE_SHIFT, 6), (RS_SHIFT, 5), (RT_SHIFT, 5), (0, 16)],
        Format::R => &[(OPCODE_SHIFT, 6), (RS_SHIFT, 5), (RT_SHIFT, 5),
                       (RD_SHIFT, 5), (SHAMT_SHIFT, 5), (0, 6)],
    };

    let mut out = String::new();
    for (i, &(shift, width)) in widths.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        push_bits(&mut out, (word >> shift) & ((1u32 << width) - 1), width);
    }
    out
}
