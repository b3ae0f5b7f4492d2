use crate::error::SimulatorError;
use mips_types::constants::*;
use std::fmt;
use std::fmt::{Display, Formatter};

/// A MIPS instruction
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Instruction(pub u32);

/// A decoded instruction, with its operands pulled out of the word
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operation {
    Add { rd: u8, rs: u8, rt: u8 },
    Sub { rd: u8, rs: u8, rt: u8 },
    And { rd: u8, rs: u8, rt: u8 },
    Or { rd: u8, rs: u8, rt: u8 },
    Slt { rd: u8, rs: u8, rt: u8 },
    Sll { rd: u8, rt: u8, shift: u8 },
    Srl { rd: u8, rt: u8, shift: u8 },
    Jr { rs: u8 },
    Addi { rt: u8, rs: u8, immediate: i32 },
    Lw { rt: u8, rs: u8, offset: i32 },
    Sw { rt: u8, rs: u8, offset: i32 },
    Beq { rs: u8, rt: u8, offset: i32 },
    Bne { rs: u8, rt: u8, offset: i32 },
    J { pseudo_address: u32 },
    Jal { pseudo_address: u32 },
}

impl Instruction {
    /// Get the operation code
    pub fn op_code(&self) -> u8 {
        ((self.0 & 0xFC000000) >> 26) as u8
    }

    /// Get the s register (for R and I type instructions)
    pub fn s_register(&self) -> u8 {
        ((self.0 & 0x03E00000) >> 21) as u8
    }

    /// Get the t register (for R and I type instructions)
    pub fn t_register(&self) -> u8 {
        ((self.0 & 0x001F0000) >> 16) as u8
    }

    /// Get the d register (For R type instructions)
    pub fn d_register(&self) -> u8 {
        ((self.0 & 0x0000F800) >> 11) as u8
    }

    /// Get the shift amount (for R type instructions)
    pub fn shift_amount(&self) -> u8 {
        ((self.0 & 0x000007C0) >> 6) as u8
    }

    /// Get the ALU function (for R type instructions)
    pub fn function(&self) -> u8 {
        (self.0 & 0x0000003F) as u8
    }

    /// Get the immediate value (for I type instructions)
    pub fn immediate(&self) -> i16 {
        (self.0 & 0x0000FFFF) as i16
    }

    /// Get the pseudo address (for J type instructions)
    pub fn pseudo_address(&self) -> u32 {
        self.0 & 0x03FFFFFF
    }

    /// Convert the pseudo address to a full address.
    /// The first four bits are taken from the program counter, and the lower
    /// two bits are zeros.
    pub fn real_address(&self, program_counter: u32) -> u32 {
        jump_target(program_counter, self.pseudo_address())
    }

    /// Decode the instruction into an operation. The immediate is
    /// sign-extended to 32 bits.
    pub fn decode(&self) -> Result<Operation, SimulatorError> {
        let rs = self.s_register();
        let rt = self.t_register();
        let rd = self.d_register();
        let immediate = self.immediate() as i32;

        Ok(match self.op_code() {
            OP_R_TYPE => match self.function() {
                FUNCTION_ADD => Operation::Add { rd, rs, rt },
                FUNCTION_SUB => Operation::Sub { rd, rs, rt },
                FUNCTION_AND => Operation::And { rd, rs, rt },
                FUNCTION_OR => Operation::Or { rd, rs, rt },
                FUNCTION_SLT => Operation::Slt { rd, rs, rt },
                FUNCTION_SLL => Operation::Sll {
                    rd,
                    rt,
                    shift: self.shift_amount(),
                },
                FUNCTION_SRL => Operation::Srl {
                    rd,
                    rt,
                    shift: self.shift_amount(),
                },
                FUNCTION_JR => Operation::Jr { rs },
                function => return Err(SimulatorError::UnknownFunction(function)),
            },
            OP_ADDI => Operation::Addi { rt, rs, immediate },
            OP_LW => Operation::Lw {
                rt,
                rs,
                offset: immediate,
            },
            OP_SW => Operation::Sw {
                rt,
                rs,
                offset: immediate,
            },
            OP_BEQ => Operation::Beq {
                rs,
                rt,
                offset: immediate,
            },
            OP_BNE => Operation::Bne {
                rs,
                rt,
                offset: immediate,
            },
            OP_J => Operation::J {
                pseudo_address: self.pseudo_address(),
            },
            OP_JAL => Operation::Jal {
                pseudo_address: self.pseudo_address(),
            },
            op_code => return Err(SimulatorError::UnknownOpCode(op_code)),
        })
    }

    /// Decode and format the instruction. Unsupported encodings are shown as
    /// a raw `.word`.
    pub fn stringify(&self, program_counter: u32) -> String {
        let dst = |name: &str, rd: u8, rs: u8, rt: u8| {
            format!("{} {}, {}, {}", name, Register(rd), Register(rs), Register(rt))
        };
        let dtsh = |name: &str, rd: u8, rt: u8, shift: u8| {
            format!("{} {}, {}, {}", name, Register(rd), Register(rt), shift)
        };
        let tis = |name: &str, rt: u8, offset: i32, rs: u8| {
            format!("{} {}, {}({})", name, Register(rt), offset, Register(rs))
        };
        let sti = |name: &str, rs: u8, rt: u8, offset: i32| {
            format!("{} {}, {}, {}", name, Register(rs), Register(rt), offset)
        };

        match self.decode() {
            Ok(Operation::Add { rd, rs, rt }) => dst("add", rd, rs, rt),
            Ok(Operation::Sub { rd, rs, rt }) => dst("sub", rd, rs, rt),
            Ok(Operation::And { rd, rs, rt }) => dst("and", rd, rs, rt),
            Ok(Operation::Or { rd, rs, rt }) => dst("or", rd, rs, rt),
            Ok(Operation::Slt { rd, rs, rt }) => dst("slt", rd, rs, rt),
            Ok(Operation::Sll { rd, rt, shift }) => {
                if self.0 == 0 {
                    "noop".to_string()
                } else {
                    dtsh("sll", rd, rt, shift)
                }
            }
            Ok(Operation::Srl { rd, rt, shift }) => dtsh("srl", rd, rt, shift),
            Ok(Operation::Jr { rs }) => format!("jr {}", Register(rs)),
            Ok(Operation::Addi { rt, rs, immediate }) => {
                format!("addi {}, {}, {}", Register(rt), Register(rs), immediate)
            }
            Ok(Operation::Lw { rt, rs, offset }) => tis("lw", rt, offset, rs),
            Ok(Operation::Sw { rt, rs, offset }) => tis("sw", rt, offset, rs),
            Ok(Operation::Beq { rs, rt, offset }) => sti("beq", rs, rt, offset),
            Ok(Operation::Bne { rs, rt, offset }) => sti("bne", rs, rt, offset),
            Ok(Operation::J { .. }) => format!("j 0x{:08x}", self.real_address(program_counter)),
            Ok(Operation::Jal { .. }) => {
                format!("jal 0x{:08x}", self.real_address(program_counter))
            }
            Err(_) => format!(".word 0x{:08x}", self.0),
        }
    }
}

/// Combine the top four bits of the program counter with a 26-bit pseudo
/// address
pub fn jump_target(program_counter: u32, pseudo_address: u32) -> u32 {
    (program_counter & 0xF0000000) | ((pseudo_address & 0x03FFFFFF) << 2)
}

/// Pretty-print the register using its name
struct Register(u8);

impl Display for Register {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match REGISTER_NAMES.get(self.0 as usize) {
            Some(name) => f.write_str(name),
            None => write!(f, "${}", self.0),
        }
    }
}
