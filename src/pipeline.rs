// Ties the phases together for the driver
use crate::codegen::asm::render_program;
use crate::codegen::{Codegen, InstructionStream};
use crate::compiler::session::Session;
use crate::config::Config;
use crate::mips::modules::load_edumips64_module;
use crate::mips::reader::{AsmReader, MachineRow};

extern crate log;
use log::info;

/// Everything a build produced
#[derive(Debug)]
pub struct Build {
    pub session: Session,
    /// None when the front end reported errors
    pub stream: Option<InstructionStream>,
    /// None unless both the front end and codegen finished cleanly
    pub assembly: Option<String>,
}

impl Build {
    pub fn succeeded(&self) -> bool {
        self.session.errors.is_empty() && self.assembly.is_some()
    }
}

pub fn build(text: &str, config: &Config) -> Build {
    let mut session = Session::compile_source(text);
    if !session.errors.is_empty() {
        info!("Skipping code generation, the front end reported {} errors",
              session.errors.len());
        return Build { session, stream: None, assembly: None };
    }

    let mut codegen = Codegen::new(config);
    codegen.generate_program(&session.history, &session.symbols, &mut session.errors);
    let stream = codegen.into_stream();

    let assembly = if session.errors.is_empty() {
        Some(render_program(config, &session.symbols, &session.history, &stream))
    } else {
        None
    };
    Build { session, stream: Some(stream), assembly }
}

/// Reads assembly text back into machine words using the EduMips64 dialect
pub fn binhex(assembly: &str) -> Vec<MachineRow> {
    let module = load_edumips64_module();
    AsmReader::new(&module).read(assembly)
}
