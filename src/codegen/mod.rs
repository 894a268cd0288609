// Walks the accepted statements and emits MIPS64
// Every expression is evaluated into a small stack of temporaries,
// the stack is reset at the start of every statement.

pub mod asm;

use crate::compiler::ast::*;
use crate::compiler::error::*;
use crate::compiler::symbol_table::{SymbolTable, VarKind};
use crate::config::Config;
use crate::logger::log_truncated_immediate;
use crate::mips::*;

extern crate log;
use log::{debug, info, trace};

/// Stack style allocator over a contiguous register window
#[derive(Debug, Clone)]
pub struct TempRegisters {
    first: u8,
    last: u8,
    next: u8,
    peak: usize,
}

impl TempRegisters {
    pub fn new(first: Register, last: Register) -> TempRegisters {
        TempRegisters {
            first: first.number(),
            last: last.number(),
            next: first.number(),
            peak: 0,
        }
    }

    /// None once the window is exhausted
    pub fn alloc(&mut self) -> Option<Register> {
        if self.next > self.last {
            return None;
        }
        let reg = Register::new(self.next)?;
        self.next += 1;
        self.peak = self.peak.max(self.in_use());
        trace!("Allocated {} ({} live)", reg, self.in_use());
        Some(reg)
    }

    /// Releases the most recently allocated register
    pub fn free(&mut self) {
        if self.next > self.first {
            self.next -= 1;
        }
    }

    pub fn reset(&mut self) {
        self.next = self.first;
        self.peak = 0;
    }

    pub fn in_use(&self) -> usize {
        (self.next - self.first) as usize
    }

    /// Most registers live at once since the last reset
    pub fn peak(&self) -> usize {
        self.peak
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// `# line N: source`
    Comment(String),
    Instr { instr: Instruction, text: String },
    /// End of a statement, rendered as a blank line
    Separator,
}

impl Record {
    pub fn is_comment(&self) -> bool {
        match self {
            Record::Comment(_) => true,
            _ => false,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Record::Comment(text) | Record::Instr { text, .. } => text,
            Record::Separator => "",
        }
    }

    /// Only instructions have a machine word
    pub fn word(&self) -> Option<u32> {
        match self {
            Record::Instr { instr, .. } => Some(encode(instr)),
            _ => None,
        }
    }
}

/// The generated program in execution order
#[derive(Debug, Default, Clone)]
pub struct InstructionStream {
    records: Vec<Record>,
}

impl InstructionStream {
    pub fn new() -> InstructionStream {
        InstructionStream::default()
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn instructions(&self) -> impl Iterator<Item = &Instruction> {
        self.records.iter().filter_map(|r| match r {
            Record::Instr { instr, .. } => Some(instr),
            _ => None,
        })
    }

    pub fn words(&self) -> Vec<u32> {
        self.instructions().map(encode).collect()
    }

    pub fn len(&self) -> usize {
        self.instructions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct Codegen<'a> {
    config: &'a Config,
    temps: TempRegisters,
    stream: InstructionStream,
    /// Instructions of the statement being generated, only kept if it completes
    current: Vec<Record>,
    line: usize,
}

impl<'a> Codegen<'a> {
    pub fn new(config: &'a Config) -> Codegen<'a> {
        Codegen {
            config,
            temps: TempRegisters::new(config.first_temp, config.last_temp),
            stream: InstructionStream::new(),
            current: vec![],
            line: 0,
        }
    }

    pub fn temps(&self) -> &TempRegisters {
        &self.temps
    }

    pub fn stream(&self) -> &InstructionStream {
        &self.stream
    }

    pub fn into_stream(self) -> InstructionStream {
        self.stream
    }

    fn emit(&mut self, instr: Instruction) {
        self.emit_text(instr, instr.to_string());
    }

    fn emit_text(&mut self, instr: Instruction, text: String) {
        trace!("{}", text);
        self.current.push(Record::Instr { instr, text });
    }

    fn alloc(&mut self, expr: &Expr) -> Result<Register, CompileError> {
        match self.temps.alloc() {
            Some(reg) => Ok(reg),
            None => Err(CompileError::new(self.line, ErrorKind::ExpressionTooComplex,
                                          format!("{} needs more than {} temporaries",
                                                  expr, self.config.temp_count()))),
        }
    }

    /// Generates `expr` leaving its value in the returned register
    pub fn generate(&mut self, expr: &Expr, symbols: &SymbolTable) -> Result<Register, CompileError> {
        match expr {
            Expr::Number(value) => {
                let reg = self.alloc(expr)?;
                let imm = truncate_immediate(*value);
                if !fits_immediate(*value) {
                    log_truncated_immediate(*value, imm);
                }
                self.emit(Instruction::daddiu(reg, Register::ZERO, imm));
                Ok(reg)
            },
            Expr::Variable(name) => {
                let symbol = match symbols.lookup(name) {
                    Some(symbol) => symbol,
                    None => return Err(CompileError::new(self.line, ErrorKind::UndeclaredVariable,
                                                         name.clone())),
                };
                let (kind, slot) = (symbol.kind, symbol.slot);
                let reg = self.alloc(expr)?;
                let op = match kind {
                    VarKind::Int => Mnemonic::Ld,
                    VarKind::Char => Mnemonic::Lb,
                };
                let instr = Instruction::memory(op, reg, truncate_immediate(slot as i64), Register::ZERO);
                self.emit_text(instr, instr.with_label(name));
                Ok(reg)
            },
            Expr::Binop(op, lhs, rhs) => {
                let l = self.generate(lhs, symbols)?;
                let r = self.generate(rhs, symbols)?;
                match op {
                    BinopKind::Add => self.emit(Instruction::arith(Mnemonic::Daddu, l, l, r)),
                    BinopKind::Sub => self.emit(Instruction::arith(Mnemonic::Dsubu, l, l, r)),
                    BinopKind::Mul => {
                        self.emit(Instruction::mul_div(Mnemonic::Dmult, l, r));
                        self.emit(Instruction::mflo(l));
                    },
                    BinopKind::Div => {
                        self.emit(Instruction::mul_div(Mnemonic::Ddiv, l, r));
                        self.emit(Instruction::mflo(l));
                    },
                }
                self.temps.free();
                Ok(l)
            }
        }
    }

    /// Generates one accepted operation, nothing is kept if it fails
    pub fn generate_operation(&mut self, op: &Operation, symbols: &SymbolTable) -> Result<(), CompileError> {
        let expr = match op.expr {
            Some(ref expr) => expr,
            None => return Ok(()),
        };

        self.line = op.line;
        self.temps.reset();
        self.current.clear();
        if self.config.emit_comments {
            self.current.push(Record::Comment(format!("line {}: {}", op.line, op.source)));
        }

        let reg = self.generate(expr, symbols)?;
        let slot = match symbols.lookup(&op.target) {
            Some(symbol) => symbol.slot,
            None => return Err(CompileError::new(op.line, ErrorKind::UndeclaredVariable,
                                                 op.target.clone())),
        };
        let store = match op.var_kind {
            VarKind::Int => Mnemonic::Sd,
            VarKind::Char => Mnemonic::Sb,
        };
        let instr = Instruction::memory(store, reg, truncate_immediate(slot as i64), Register::ZERO);
        self.emit_text(instr, instr.with_label(&op.target));
        debug!("Line {}: {} used {} temporaries", op.line, op.target, self.temps.peak());

        self.stream.records.extend(self.current.drain(..));
        self.stream.push(Record::Separator);
        Ok(())
    }

    /// Replays the whole history in order, failed statements are logged and skipped
    pub fn generate_program(&mut self, history: &History, symbols: &SymbolTable, errors: &mut ErrorLog) {
        for op in history {
            if let Err(e) = self.generate_operation(op, symbols) {
                self.current.clear();
                errors.push(e);
            }
        }
        if self.config.emit_exit {
            self.stream.push(Record::Instr {
                instr: Instruction::syscall(),
                text: Instruction::syscall().to_string(),
            });
        }
        info!("Generated {} instructions", self.stream.len());
    }
}
