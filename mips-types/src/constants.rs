// Operation codes
pub const OP_R_TYPE: u8 = 0;
pub const OP_J: u8 = 0x02;
pub const OP_JAL: u8 = 0x03;
pub const OP_BEQ: u8 = 0x04;
pub const OP_BNE: u8 = 0x05;
pub const OP_ADDI: u8 = 0x08;
pub const OP_LW: u8 = 0x23;
pub const OP_SW: u8 = 0x2B;

// R-type function codes
pub const FUNCTION_SLL: u8 = 0x00;
pub const FUNCTION_SRL: u8 = 0x02;
pub const FUNCTION_JR: u8 = 0x08;
pub const FUNCTION_ADD: u8 = 0x20;
pub const FUNCTION_SUB: u8 = 0x22;
pub const FUNCTION_AND: u8 = 0x24;
pub const FUNCTION_OR: u8 = 0x25;
pub const FUNCTION_SLT: u8 = 0x2A;

// Register numbers
pub const REG_ZERO: u8 = 0;
/// The stack pointer register
pub const REG_SP: u8 = 29;
pub const REG_RA: u8 = 31;
pub const REGISTER_COUNT: usize = 32;

pub static REGISTER_NAMES: [&str; REGISTER_COUNT] = [
    "$zero", "$at", "$v0", "$v1", "$a0", "$a1", "$a2", "$a3", "$t0", "$t1", "$t2", "$t3",
    "$t4", "$t5", "$t6", "$t7", "$s0", "$s1", "$s2", "$s3", "$s4", "$s5", "$s6", "$s7",
    "$t8", "$t9", "$k0", "$k1", "$gp", "$sp", "$fp", "$ra",
];

// Memory offsets
/// The first instruction address. Instruction memory grows upward from here.
pub const TEXT_OFFSET: u32 = 0x0040_0000;
/// The highest data address. Data memory grows downward from here.
pub const DATA_BASE: u32 = 0xFFFF_FFFF;
/// The top of the stack
pub const STACK_START: u32 = DATA_BASE;

// Memory sizes (in bytes)
pub const DEFAULT_INSTRUCTION_MEMORY_SIZE: usize = 512;
pub const DEFAULT_DATA_MEMORY_SIZE: usize = 512;
pub const MAX_MEMORY_SIZE: usize = 1024 * 1024;
