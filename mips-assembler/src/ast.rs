//! Abstract Syntax Tree

/// One non-empty source line, after comments have been stripped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub label: Option<String>,
    pub instruction: Option<Instruction>,
}

/// An instruction as written: a mnemonic followed by its operands. The
/// mnemonic is resolved during lowering so unknown mnemonics can be reported
/// with the line they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    pub mnemonic: String,
    pub operands: Vec<Operand>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Register(Register),
    /// Numbers are kept as written and checked against their field's range
    /// when lowered
    Number(String),
    Label(String),
    /// `offset(register)`, used by `lw` and `sw`
    Offset {
        offset: String,
        base: Register,
    },
}

impl Operand {
    /// A short description of the operand kind, for error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Operand::Register(_) => "a register",
            Operand::Number(_) => "a number",
            Operand::Label(_) => "a label",
            Operand::Offset { .. } => "an offset(register) operand",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Register {
    Number(u8),
    Name(String),
}

impl Register {
    /// Build a register from a `$`-prefixed token
    pub fn from_token(token: &str) -> Self {
        let name = token.trim_start_matches('$');

        match name.parse::<u8>() {
            Ok(num) => Register::Number(num),
            Err(_) => Register::Name(name.to_string()),
        }
    }

    /// Get the register index. If the register is invalid, None is returned.
    pub fn index(&self) -> Option<u8> {
        match self {
            Register::Number(num) => Some(*num).filter(|num| *num < 32),
            Register::Name(name) => match name.as_str() {
                "zero" => Some(0),
                "at" => Some(1),
                "v0" => Some(2),
                "v1" => Some(3),
                "a0" => Some(4),
                "a1" => Some(5),
                "a2" => Some(6),
                "a3" => Some(7),
                "t0" => Some(8),
                "t1" => Some(9),
                "t2" => Some(10),
                "t3" => Some(11),
                "t4" => Some(12),
                "t5" => Some(13),
                "t6" => Some(14),
                "t7" => Some(15),
                "s0" => Some(16),
                "s1" => Some(17),
                "s2" => Some(18),
                "s3" => Some(19),
                "s4" => Some(20),
                "s5" => Some(21),
                "s6" => Some(22),
                "s7" => Some(23),
                "t8" => Some(24),
                "t9" => Some(25),
                "k0" => Some(26),
                "k1" => Some(27),
                "gp" => Some(28),
                "sp" => Some(29),
                "fp" => Some(30),
                "ra" => Some(31),
                _ => None,
            },
        }
    }
}

impl std::fmt::Display for Register {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Register::Number(num) => write!(f, "${}", num),
            Register::Name(name) => write!(f, "${}", name),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RTypeOp {
    Add,
    And,
    Jr,
    Or,
    Sll,
    Slt,
    Srl,
    Sub,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ITypeOp {
    Addi,
    Beq,
    Bne,
    Lw,
    Sw,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum JTypeOp {
    Jump,
    Jal,
}

/// A resolved mnemonic
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpCode {
    RType(RTypeOp),
    IType(ITypeOp),
    JType(JTypeOp),
}

impl OpCode {
    pub fn from_mnemonic(mnemonic: &str) -> Option<Self> {
        Some(match mnemonic {
            "add" => OpCode::RType(RTypeOp::Add),
            "sub" => OpCode::RType(RTypeOp::Sub),
            "and" => OpCode::RType(RTypeOp::And),
            "or" => OpCode::RType(RTypeOp::Or),
            "slt" => OpCode::RType(RTypeOp::Slt),
            "sll" => OpCode::RType(RTypeOp::Sll),
            "srl" => OpCode::RType(RTypeOp::Srl),
            "jr" => OpCode::RType(RTypeOp::Jr),
            "addi" => OpCode::IType(ITypeOp::Addi),
            "lw" => OpCode::IType(ITypeOp::Lw),
            "sw" => OpCode::IType(ITypeOp::Sw),
            "beq" => OpCode::IType(ITypeOp::Beq),
            "bne" => OpCode::IType(ITypeOp::Bne),
            "j" => OpCode::JType(JTypeOp::Jump),
            "jal" => OpCode::JType(JTypeOp::Jal),
            _ => return None,
        })
    }

    /// The number of operands the instruction is written with
    pub fn operand_count(&self) -> usize {
        match self {
            OpCode::RType(RTypeOp::Jr) => 1,
            OpCode::RType(_) => 3,
            OpCode::IType(ITypeOp::Lw) | OpCode::IType(ITypeOp::Sw) => 2,
            OpCode::IType(_) => 3,
            OpCode::JType(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_names_and_numbers_resolve() {
        assert_eq!(Register::from_token("$zero").index(), Some(0));
        assert_eq!(Register::from_token("$sp").index(), Some(29));
        assert_eq!(Register::from_token("$ra").index(), Some(31));
        assert_eq!(Register::from_token("$8").index(), Some(8));
        assert_eq!(Register::from_token("$32").index(), None);
        assert_eq!(Register::from_token("$t10").index(), None);
    }

    #[test]
    fn operand_counts_follow_the_instruction_format() {
        assert_eq!(OpCode::from_mnemonic("add").unwrap().operand_count(), 3);
        assert_eq!(OpCode::from_mnemonic("jr").unwrap().operand_count(), 1);
        assert_eq!(OpCode::from_mnemonic("sw").unwrap().operand_count(), 2);
        assert_eq!(OpCode::from_mnemonic("jal").unwrap().operand_count(), 1);
        assert_eq!(OpCode::from_mnemonic("mul"), None);
    }
}
