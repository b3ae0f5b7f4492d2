//! Lower IR instructions into MIPS

use crate::ast::{ITypeOp, JTypeOp, RTypeOp};
use crate::ir::{IrInstruction, IrProgram};
use mips_types::constants::{
    FUNCTION_ADD, FUNCTION_AND, FUNCTION_JR, FUNCTION_OR, FUNCTION_SLL, FUNCTION_SLT,
    FUNCTION_SRL, FUNCTION_SUB, OP_ADDI, OP_BEQ, OP_BNE, OP_J, OP_JAL, OP_LW, OP_R_TYPE, OP_SW,
};

impl IrProgram {
    /// Encode every instruction, in program order
    pub fn lower(self) -> Vec<u32> {
        self.instructions
            .into_iter()
            .map(IrInstruction::lower)
            .collect()
    }
}

impl IrInstruction {
    pub fn lower(self) -> u32 {
        match self {
            IrInstruction::RType {
                op_code,
                rs,
                rt,
                rd,
                shift,
            } => {
                (OP_R_TYPE as u32) << 26
                    | (rs as u32 & 0x1F) << 21
                    | (rt as u32 & 0x1F) << 16
                    | (rd as u32 & 0x1F) << 11
                    | (shift as u32 & 0x1F) << 6
                    | op_code.function_code() as u32
            }
            IrInstruction::IType {
                op_code,
                rs,
                rt,
                immediate,
            } => {
                (op_code.code() as u32) << 26
                    | (rs as u32 & 0x1F) << 21
                    | (rt as u32 & 0x1F) << 16
                    | (immediate as u16 as u32)
            }
            IrInstruction::JType {
                op_code,
                pseudo_address,
            } => (op_code.code() as u32) << 26 | (pseudo_address & 0x03FF_FFFF),
        }
    }
}

impl RTypeOp {
    /// Get the MIPS function code for this R-type instruction
    pub fn function_code(&self) -> u8 {
        match self {
            RTypeOp::Add => FUNCTION_ADD,
            RTypeOp::And => FUNCTION_AND,
            RTypeOp::Jr => FUNCTION_JR,
            RTypeOp::Or => FUNCTION_OR,
            RTypeOp::Sll => FUNCTION_SLL,
            RTypeOp::Slt => FUNCTION_SLT,
            RTypeOp::Srl => FUNCTION_SRL,
            RTypeOp::Sub => FUNCTION_SUB,
        }
    }
}

impl ITypeOp {
    /// Get the MIPS op code for this I-type instruction
    pub fn code(&self) -> u8 {
        match self {
            ITypeOp::Addi => OP_ADDI,
            ITypeOp::Beq => OP_BEQ,
            ITypeOp::Bne => OP_BNE,
            ITypeOp::Lw => OP_LW,
            ITypeOp::Sw => OP_SW,
        }
    }
}

impl JTypeOp {
    /// Get the MIPS op code for this J-type instruction
    pub fn code(&self) -> u8 {
        match self {
            JTypeOp::Jump => OP_J,
            JTypeOp::Jal => OP_JAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn r_type_fields() {
        // add $t2, $t0, $t1
        let word = IrInstruction::RType {
            op_code: RTypeOp::Add,
            rs: 8,
            rt: 9,
            rd: 10,
            shift: 0,
        }
        .lower();

        assert_eq!(format!("{:032b}", word), "00000001000010010101000000100000");
    }

    #[test]
    fn shift_fields() {
        // sll $t0, $t1, 4
        let word = IrInstruction::RType {
            op_code: RTypeOp::Sll,
            rs: 0,
            rt: 9,
            rd: 8,
            shift: 4,
        }
        .lower();

        assert_eq!(format!("{:032b}", word), "00000000000010010100000100000000");
    }

    #[test]
    fn jr_only_sets_rs() {
        let word = IrInstruction::RType {
            op_code: RTypeOp::Jr,
            rs: 31,
            rt: 0,
            rd: 0,
            shift: 0,
        }
        .lower();

        assert_eq!(word, 0x03E0_0008);
    }

    #[test]
    fn negative_immediates_only_fill_the_low_half() {
        // addi $t0, $zero, -1
        let word = IrInstruction::IType {
            op_code: ITypeOp::Addi,
            rs: 0,
            rt: 8,
            immediate: -1,
        }
        .lower();

        assert_eq!(word, 0x2008_FFFF);
    }

    #[test]
    fn jump_fields() {
        let word = IrInstruction::JType {
            op_code: JTypeOp::Jal,
            pseudo_address: 0x0040_0010 >> 2,
        }
        .lower();

        assert_eq!(word, 0x0C10_0004);
    }
}
