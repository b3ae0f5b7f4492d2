//! Lower the AST to IR

use crate::ast::{ITypeOp, Instruction, Line, OpCode, Operand, RTypeOp};
use crate::error::{AssemblerError, ErrorKind};
use crate::ir::{IrInstruction, IrProgram, SymbolTable};
use crate::parser::LineParser;
use mips_types::constants::TEXT_OFFSET;

/// A parsed source line along with where it came from
#[derive(Debug)]
pub struct SourceLine {
    /// 1-based line number
    pub number: usize,
    pub text: String,
    pub line: Line,
}

impl SourceLine {
    fn error(&self, kind: ErrorKind) -> AssemblerError {
        AssemblerError {
            line: self.number,
            text: self.text.clone(),
            kind,
        }
    }
}

#[derive(Debug)]
pub struct Program {
    pub lines: Vec<SourceLine>,
}

impl Program {
    /// Strip comments and blank lines, then parse every remaining line
    pub fn parse(source: &str) -> Result<Self, AssemblerError> {
        let parser = LineParser::new();
        let mut lines = Vec::new();

        for (index, raw_line) in source.lines().enumerate() {
            let text = match raw_line.find('#') {
                Some(comment_start) => &raw_line[..comment_start],
                None => raw_line,
            }
            .trim();

            if text.is_empty() {
                continue;
            }

            let line = parser.parse(text).map_err(|error| AssemblerError {
                line: index + 1,
                text: text.to_string(),
                kind: ErrorKind::Syntax(error.to_string()),
            })?;

            lines.push(SourceLine {
                number: index + 1,
                text: text.to_string(),
                line,
            });
        }

        Ok(Program { lines })
    }

    pub fn lower(self) -> Result<IrProgram, AssemblerError> {
        // First pass: find the address of every label
        let mut symbol_table = SymbolTable::new();
        let mut instruction_count: u32 = 0;

        for source_line in &self.lines {
            if let Some(label) = &source_line.line.label {
                let address = TEXT_OFFSET + 4 * instruction_count;

                if symbol_table.map.insert(label.clone(), address).is_some() {
                    return Err(source_line.error(ErrorKind::DuplicateLabel(label.clone())));
                }
            }

            if source_line.line.instruction.is_some() {
                instruction_count += 1;
            }
        }

        log::trace!("Symbols: {:#?}", symbol_table);

        // Second pass: generate instruction IR
        let mut instructions = Vec::with_capacity(instruction_count as usize);

        for source_line in &self.lines {
            if let Some(instruction) = &source_line.line.instruction {
                let current_address = TEXT_OFFSET + 4 * instructions.len() as u32;
                let lowered = instruction
                    .lower(current_address, &symbol_table)
                    .map_err(|kind| source_line.error(kind))?;

                instructions.push(lowered);
            }
        }

        log::debug!(
            "Lowered {} instructions and {} labels",
            instructions.len(),
            symbol_table.map.len()
        );

        Ok(IrProgram {
            instructions,
            symbol_table,
        })
    }
}

impl Instruction {
    /// Resolve the mnemonic and operands. `current_address` is the address
    /// this instruction will be loaded at, which branch offsets are relative to.
    pub fn lower(
        &self,
        current_address: u32,
        symbol_table: &SymbolTable,
    ) -> Result<IrInstruction, ErrorKind> {
        let op_code = OpCode::from_mnemonic(&self.mnemonic)
            .ok_or_else(|| ErrorKind::UnknownInstruction(self.mnemonic.clone()))?;
        let expected = op_code.operand_count();

        if self.operands.len() != expected {
            return Err(ErrorKind::OperandCount {
                mnemonic: self.mnemonic.clone(),
                expected,
                found: self.operands.len(),
            });
        }

        let operands = &self.operands;

        Ok(match op_code {
            OpCode::RType(op_code) => match op_code {
                RTypeOp::Jr => IrInstruction::RType {
                    op_code,
                    rs: register(operands, 0)?,
                    rt: 0,
                    rd: 0,
                    shift: 0,
                },
                RTypeOp::Sll | RTypeOp::Srl => IrInstruction::RType {
                    op_code,
                    rs: 0,
                    rt: register(operands, 1)?,
                    rd: register(operands, 0)?,
                    shift: number(operands, 2, "shift amount", 0, 31)? as u8,
                },
                RTypeOp::Add | RTypeOp::And | RTypeOp::Or | RTypeOp::Slt | RTypeOp::Sub => {
                    IrInstruction::RType {
                        op_code,
                        rs: register(operands, 1)?,
                        rt: register(operands, 2)?,
                        rd: register(operands, 0)?,
                        shift: 0,
                    }
                }
            },
            OpCode::IType(op_code) => match op_code {
                // Branching instructions need offsets
                ITypeOp::Beq | ITypeOp::Bne => {
                    let target = label(operands, 2, symbol_table)?;
                    // Counted in instructions, relative to the instruction after this one
                    let offset = (target as i64 - (current_address as i64 + 4)) / 4;
                    let offset = check_range(
                        "branch offset",
                        offset,
                        i16::MIN as i64,
                        i16::MAX as i64,
                    )?;

                    IrInstruction::IType {
                        op_code,
                        rs: register(operands, 0)?,
                        rt: register(operands, 1)?,
                        immediate: offset as i16,
                    }
                }
                ITypeOp::Lw | ITypeOp::Sw => {
                    let (offset, base) = offset_register(operands, 1)?;

                    IrInstruction::IType {
                        op_code,
                        rs: base,
                        rt: register(operands, 0)?,
                        immediate: offset,
                    }
                }
                ITypeOp::Addi => IrInstruction::IType {
                    op_code,
                    rs: register(operands, 1)?,
                    rt: register(operands, 0)?,
                    immediate: number(
                        operands,
                        2,
                        "immediate",
                        i16::MIN as i64,
                        i16::MAX as i64,
                    )? as i16,
                },
            },
            OpCode::JType(op_code) => {
                let address = label(operands, 0, symbol_table)?;

                IrInstruction::JType {
                    op_code,
                    pseudo_address: pseudo_address(address),
                }
            }
        })
    }
}

/// Calculate the pseudo-address of an absolute address
/// (upper four bits and lower two bits removed)
pub(crate) fn pseudo_address(address: u32) -> u32 {
    (address >> 2) & 0x03FF_FFFF
}

fn register(operands: &[Operand], position: usize) -> Result<u8, ErrorKind> {
    match &operands[position] {
        Operand::Register(register) => register
            .index()
            .ok_or_else(|| ErrorKind::UnknownRegister(register.to_string())),
        other => Err(invalid_operand(position, "a register", other)),
    }
}

fn number(
    operands: &[Operand],
    position: usize,
    field: &'static str,
    min: i64,
    max: i64,
) -> Result<i64, ErrorKind> {
    match &operands[position] {
        Operand::Number(text) => check_range(field, parse_number(text)?, min, max),
        other => Err(invalid_operand(position, "a number", other)),
    }
}

fn label(
    operands: &[Operand],
    position: usize,
    symbol_table: &SymbolTable,
) -> Result<u32, ErrorKind> {
    match &operands[position] {
        Operand::Label(name) => symbol_table
            .get(name)
            .ok_or_else(|| ErrorKind::UndefinedLabel(name.clone())),
        other => Err(invalid_operand(position, "a label", other)),
    }
}

fn offset_register(operands: &[Operand], position: usize) -> Result<(i16, u8), ErrorKind> {
    match &operands[position] {
        Operand::Offset { offset, base } => {
            let offset = check_range(
                "offset",
                parse_number(offset)?,
                i16::MIN as i64,
                i16::MAX as i64,
            )?;
            let base = base
                .index()
                .ok_or_else(|| ErrorKind::UnknownRegister(base.to_string()))?;

            Ok((offset as i16, base))
        }
        other => Err(invalid_operand(position, "an offset(register) operand", other)),
    }
}

fn invalid_operand(position: usize, expected: &'static str, found: &Operand) -> ErrorKind {
    ErrorKind::InvalidOperand {
        position: position + 1,
        expected,
        found: found.kind(),
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal number, with an optional sign
fn parse_number(text: &str) -> Result<i64, ErrorKind> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text),
    };
    let value = match digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => digits.parse::<i64>(),
    }
    .map_err(|_| ErrorKind::InvalidNumber(text.to_string()))?;

    Ok(if negative { -value } else { value })
}

fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<i64, ErrorKind> {
    if value < min || value > max {
        return Err(ErrorKind::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }

    Ok(value)
}
