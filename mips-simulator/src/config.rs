use crate::error::SimulatorError;
use mips_types::constants::{
    DEFAULT_DATA_MEMORY_SIZE, DEFAULT_INSTRUCTION_MEMORY_SIZE, MAX_MEMORY_SIZE,
};

/// The config for `Processor`
#[derive(Debug, Clone)]
pub struct Config {
    /// Instruction memory size in bytes
    pub instruction_memory_size: usize,
    /// Data memory size in bytes
    pub data_memory_size: usize,
    /// Skip over instructions that fail at runtime instead of stopping on them.
    /// The failure is still reported by `Processor::step`.
    pub permissive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            instruction_memory_size: DEFAULT_INSTRUCTION_MEMORY_SIZE,
            data_memory_size: DEFAULT_DATA_MEMORY_SIZE,
            permissive: false,
        }
    }
}

/// Check that a memory size is usable and convert it to a word count
pub(crate) fn memory_size_in_words(size: usize) -> Result<usize, SimulatorError> {
    if size == 0 || size % 4 != 0 || size > MAX_MEMORY_SIZE {
        return Err(SimulatorError::InvalidMemorySize(size));
    }

    Ok(size / 4)
}
