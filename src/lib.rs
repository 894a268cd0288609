#[macro_use]
extern crate enum_as_inner;
#[macro_use]
extern crate lazy_static;

mod logger;
pub mod codegen;
pub mod compiler;
pub mod config;
pub mod interpreter;
pub mod listing;
pub mod mips;
pub mod pipeline;

pub use compiler::lexer::*;
pub use compiler::parser::*;
pub use compiler::ast::*;
pub use compiler::error::*;
pub use compiler::session::Session;
pub use compiler::symbol_table::*;
pub use config::Config;
pub use pipeline::{binhex, build, Build};
