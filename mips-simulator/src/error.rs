use mips_assembler::AssemblerError;
use std::fmt;
use thiserror::Error;

/// The address spaces the processor can access
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Segment {
    Instruction,
    Data,
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Instruction => f.write_str("instruction"),
            Segment::Data => f.write_str("data"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimulatorError {
    #[error("invalid register number {0}")]
    RegisterOutOfRange(u8),

    #[error("address 0x{address:08X} is outside of {segment} memory")]
    AddressOutOfRange { segment: Segment, address: u32 },

    #[error("address 0x{address:08X} is not word-aligned in {segment} memory")]
    MisalignedAddress { segment: Segment, address: u32 },

    #[error("unknown op code 0x{0:02x}")]
    UnknownOpCode(u8),

    #[error("unknown R-type function 0x{0:02x}")]
    UnknownFunction(u8),

    #[error("memory size must be a non-zero multiple of 4 bytes, at most 1 MiB (got {0})")]
    InvalidMemorySize(usize),

    #[error("program has {count} instructions but instruction memory only holds {capacity}")]
    ProgramTooLarge { count: usize, capacity: usize },

    #[error(transparent)]
    Assembler(#[from] AssemblerError),
}
