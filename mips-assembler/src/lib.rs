#[macro_use]
extern crate lalrpop_util;

lalrpop_mod!(#[allow(clippy::all)] parser);

pub mod ast;
mod error;
pub mod ir;
mod lower_ast;
mod lower_ir;

pub use error::{AssemblerError, ErrorKind};
pub use lower_ast::Program;

/// Assemble source text into instruction words, in source order.
///
/// The whole program is rejected on the first error; nothing is emitted for
/// a partially valid program.
pub fn assemble(source: &str) -> Result<Vec<u32>, AssemblerError> {
    let program = Program::parse(source)?;
    let ir_program = program.lower()?;

    Ok(ir_program.lower())
}

/// Assemble source text into 32-character binary strings
pub fn assemble_to_strings(source: &str) -> Result<Vec<String>, AssemblerError> {
    Ok(assemble(source)?.into_iter().map(format_binary).collect())
}

/// Format an instruction word as a 32-character binary string
pub fn format_binary(word: u32) -> String {
    format!("{:032b}", word)
}

/// Format an instruction word as `0x` followed by eight upper-case hex digits
pub fn format_hex(word: u32) -> String {
    format!("0x{:08X}", word)
}
