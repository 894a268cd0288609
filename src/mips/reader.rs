// Reads assembly text back into instructions
// This is what the bin/hex listing is built from, it accepts the same
// dialect the code generator writes (plus hand written variations) and
// reports anything it can't make sense of instead of failing.

use super::*;
use super::modules::MipsModule;

use std::collections::HashMap;
use std::convert::TryFrom;

use thiserror::Error;

extern crate log;
use log::{debug, warn};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReadError {
    #[error("unknown instruction '{0}'")]
    UnknownInstruction(String),
    #[error("'{mnemonic}' takes {expected} operands but {found} were given")]
    OperandCount { mnemonic: Mnemonic, expected: usize, found: usize },
    #[error("invalid register '{0}'")]
    BadRegister(String),
    #[error("invalid immediate '{0}'")]
    BadImmediate(String),
    #[error("invalid memory operand '{0}'")]
    BadMemoryOperand(String),
    #[error("unknown label '{0}'")]
    UnknownLabel(String),
}

/// One `.text` line and the word it assembled to
#[derive(Debug, Clone, PartialEq)]
pub struct MachineRow {
    pub text: String,
    pub encoded: Result<u32, ReadError>,
}

impl MachineRow {
    pub fn word(&self) -> Option<u32> {
        self.encoded.as_ref().ok().copied()
    }

    /// Decoded back from the word, None for lines that didn't assemble
    /// and for words outside the vocabulary
    pub fn instruction(&self) -> Option<Instruction> {
        self.word().and_then(decode)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Data,
    Text,
}

pub struct AsmReader<'a> {
    module: &'a MipsModule,
    /// Data label -> byte offset into the data segment
    labels: HashMap<String, u32>,
}

fn strip_comment(line: &str) -> &str {
    match line.find(|c: char| c == '#' || c == ';') {
        Some(i) => &line[..i],
        None => line,
    }
}

/// Splits `label: rest` returning the label if there is one
fn split_label(line: &str) -> (Option<&str>, &str) {
    if let Some(i) = line.find(':') {
        let label = line[..i].trim();
        if !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return (Some(label), line[i + 1..].trim());
        }
    }
    (None, line)
}

fn split_first_word(line: &str) -> (&str, &str) {
    match line.find(char::is_whitespace) {
        Some(i) => (&line[..i], line[i..].trim()),
        None => (line, ""),
    }
}

fn parse_number(text: &str) -> Option<i64> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let value = match digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        Some(hex) => i64::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<i64>().ok()?,
    };
    Some(if negative { -value } else { value })
}

fn parse_register(text: &str) -> Result<Register, ReadError> {
    Register::parse(text).ok_or_else(|| ReadError::BadRegister(text.to_string()))
}

impl<'a> AsmReader<'a> {
    pub fn new(module: &'a MipsModule) -> AsmReader<'a> {
        AsmReader {
            module,
            labels: HashMap::new(),
        }
    }

    pub fn labels(&self) -> &HashMap<String, u32> {
        &self.labels
    }

    /// Reads a whole listing; data labels are collected first so they can
    /// be referenced from anywhere in `.text`
    pub fn read(&mut self, text: &str) -> Vec<MachineRow> {
        self.scan_data(text);

        let mut rows = vec![];
        let mut section = Section::Text;
        for raw in text.lines() {
            let line = strip_comment(raw).trim();
            if line.is_empty() {
                continue;
            }

            let (_, body) = split_label(line);
            if body.is_empty() {
                continue;
            }
            if body.starts_with('.') {
                if let Some(next) = self.switch_section(body) {
                    section = next;
                }
                continue;
            }
            if section == Section::Data {
                continue;
            }

            let encoded = self.parse_instruction(body).map(|instr| encode(&instr));
            if let Err(ref e) = encoded {
                debug!("Couldn't read '{}': {}", body, e);
            }
            rows.push(MachineRow { text: body.to_string(), encoded });
        }
        rows
    }

    fn switch_section(&self, directive: &str) -> Option<Section> {
        let (name, _) = split_first_word(&directive[1..]);
        if !self.module.supports_directive(name) {
            warn!("Directive .{} isn't supported by {}, skipping it", name, self.module.name);
            return None;
        }
        match name {
            "data" => Some(Section::Data),
            "text" | "code" => Some(Section::Text),
            _ => None,
        }
    }

    /// Bytes a data directive takes at `offset`, None if it can't be represented
    fn directive_size(&self, name: &str, args: &str, offset: u32) -> Option<u32> {
        let count = u32::try_from(args.split(',').filter(|a| !a.trim().is_empty()).count()).ok()?;
        match name {
            "space" => parse_number(args).and_then(|n| u32::try_from(n).ok()),
            "byte" => Some(count),
            "word16" => count.checked_mul(2),
            "word32" => count.checked_mul(4),
            "word" | "double" => count.checked_mul(8),
            "ascii" | "asciiz" => {
                let len = u32::try_from(args.trim().trim_matches('"').len()).ok()?;
                if name == "asciiz" { len.checked_add(1) } else { Some(len) }
            },
            "align" => {
                let align = 1u32 << parse_number(args).unwrap_or(0).max(0).min(16);
                let aligned = offset.checked_add(align - 1)? / align * align;
                Some(aligned - offset)
            },
            _ => Some(0),
        }
    }

    fn scan_data(&mut self, text: &str) {
        let mut section = Section::Text;
        let mut offset = 0u32;
        let mut pending: Vec<String> = vec![];

        for raw in text.lines() {
            let line = strip_comment(raw).trim();
            let (label, body) = split_label(line);
            if let Some(label) = label {
                if section == Section::Data {
                    pending.push(label.to_string());
                }
            }
            if !body.starts_with('.') {
                continue;
            }

            if let Some(next) = self.switch_section(body) {
                section = next;
                continue;
            }
            if section != Section::Data {
                continue;
            }

            let (name, args) = split_first_word(&body[1..]);
            let end = match self.directive_size(name, args, offset)
                .and_then(|size| offset.checked_add(size)) {
                Some(end) => end,
                None => {
                    // its labels stay unknown, so anything using them is reported
                    warn!("'{}' doesn't fit in the data segment, skipping it", body);
                    pending.clear();
                    continue;
                }
            };
            if name == "align" {
                offset = end;
            }
            for label in pending.drain(..) {
                debug!("Data label {} at offset {}", label, offset);
                self.labels.insert(label, offset);
            }
            offset = end;
        }
    }

    fn parse_memory_operand(&self, text: &str) -> Result<(i16, Register), ReadError> {
        let bad = || ReadError::BadMemoryOperand(text.to_string());
        let open = text.find('(').ok_or_else(bad)?;
        let inner = text[open + 1..].strip_suffix(')').ok_or_else(bad)?;
        let base = parse_register(inner)?;

        let offset_text = text[..open].trim();
        let offset = if offset_text.is_empty() {
            0
        } else if let Some(n) = parse_number(offset_text) {
            n
        } else {
            match self.labels.get(offset_text) {
                Some(offset) => *offset as i64,
                None => return Err(ReadError::UnknownLabel(offset_text.to_string())),
            }
        };
        Ok((truncate_immediate(offset), base))
    }

    /// Parses a single instruction i.e. `sd r8, x(r0)`
    pub fn parse_instruction(&self, line: &str) -> Result<Instruction, ReadError> {
        let (name, rest) = split_first_word(line.trim());
        let op = match Mnemonic::from_name(name) {
            Some(op) if self.module.supports_instruction(name) => op,
            _ => return Err(ReadError::UnknownInstruction(name.to_string())),
        };

        let operands: Vec<&str> = if rest.is_empty() {
            vec![]
        } else {
            rest.split(',').map(str::trim).collect()
        };
        let shape = op.shape();
        if operands.len() != shape.operand_count() {
            return Err(ReadError::OperandCount {
                mnemonic: op,
                expected: shape.operand_count(),
                found: operands.len(),
            });
        }

        Ok(match shape {
            Shape::RegRegImm => {
                let imm = parse_number(operands[2])
                    .ok_or_else(|| ReadError::BadImmediate(operands[2].to_string()))?;
                Instruction::I {
                    op,
                    rt: parse_register(operands[0])?,
                    rs: parse_register(operands[1])?,
                    imm: truncate_immediate(imm),
                }
            },
            Shape::Memory => {
                let rt = parse_register(operands[0])?;
                let (offset, base) = self.parse_memory_operand(operands[1])?;
                Instruction::memory(op, rt, offset, base)
            },
            Shape::ThreeReg => Instruction::arith(op, parse_register(operands[0])?,
                                                  parse_register(operands[1])?,
                                                  parse_register(operands[2])?),
            Shape::TwoReg => Instruction::mul_div(op, parse_register(operands[0])?,
                                                  parse_register(operands[1])?),
            Shape::OneReg => Instruction::R {
                op,
                rs: Register::ZERO,
                rt: Register::ZERO,
                rd: parse_register(operands[0])?,
                shamt: 0,
            },
            Shape::Bare => Instruction::R {
                op,
                rs: Register::ZERO,
                rt: Register::ZERO,
                rd: Register::ZERO,
                shamt: 0,
            },
        })
    }
}
