//! Intermediate Representation

use crate::ast::{ITypeOp, JTypeOp, RTypeOp};
use std::collections::HashMap;

#[derive(Debug)]
pub struct IrProgram {
    pub instructions: Vec<IrInstruction>,
    pub symbol_table: SymbolTable,
}

/// An instruction with every operand resolved to its field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IrInstruction {
    RType {
        op_code: RTypeOp,
        rs: u8,
        rt: u8,
        rd: u8,
        shift: u8,
    },
    IType {
        op_code: ITypeOp,
        rs: u8,
        rt: u8,
        immediate: i16,
    },
    JType {
        op_code: JTypeOp,
        pseudo_address: u32,
    },
}

/// Maps labels to the absolute address of the instruction they mark
#[derive(Debug, Default)]
pub struct SymbolTable {
    pub map: HashMap<String, u32>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, label: &str) -> Option<u32> {
        self.map.get(label).copied()
    }
}
