// Renders the assembly text EduMips64 loads
use super::{InstructionStream, Record};
use crate::compiler::ast::History;
use crate::compiler::symbol_table::{SymbolTable, VarKind};
use crate::config::Config;

pub struct AsmWriter<'a> {
    config: &'a Config,
    builder: String,
}

impl<'a> AsmWriter<'a> {
    pub fn new(config: &'a Config) -> AsmWriter<'a> {
        AsmWriter { config, builder: String::new() }
    }

    pub fn into_output(self) -> String {
        self.builder
    }

    fn line(&mut self, text: &str) {
        self.builder += text;
        self.builder.push('\n');
    }

    /// One directive per variable in declaration order
    pub fn write_data(&mut self, symbols: &SymbolTable, history: &History) {
        self.line(".data");
        let mut offset = 0;
        for symbol in symbols.iter() {
            if symbol.slot > offset {
                self.line(".align 3");
            }
            offset = symbol.slot + symbol.kind.size();

            let initial = if self.config.preinit_data {
                history.declaration_of(&symbol.name).and_then(|op| op.value)
            } else {
                None
            };
            let directive = match (symbol.kind, initial) {
                (VarKind::Int, Some(value)) => format!(".word {}", value),
                (VarKind::Char, Some(value)) => format!(".byte {}", value as i8),
                (kind, None) => format!(".space {}", kind.size()),
            };
            self.line(&format!("{}: {}", symbol.name, directive));
        }
    }

    pub fn write_text(&mut self, stream: &InstructionStream) {
        self.line("");
        self.line(".text");
        self.line("main:");
        for record in stream.records() {
            match record {
                Record::Comment(text) => self.line(&format!("    # {}", text)),
                Record::Instr { text, .. } => self.line(&format!("    {}", text)),
                Record::Separator => self.line(""),
            }
        }
    }
}

pub fn render_program(config: &Config, symbols: &SymbolTable, history: &History,
                      stream: &InstructionStream) -> String {
    let mut writer = AsmWriter::new(config);
    writer.write_data(symbols, history);
    writer.write_text(stream);
    writer.into_output()
}
