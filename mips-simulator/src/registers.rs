use crate::error::SimulatorError;
use mips_types::constants::{REGISTER_COUNT, REGISTER_NAMES, REG_SP, REG_ZERO};

/// Holds the processor's registers
#[derive(Debug)]
pub struct Registers {
    registers: [u32; REGISTER_COUNT],
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            registers: [0; REGISTER_COUNT],
        }
    }

    /// Get the value of a register
    pub fn get(&self, register: u8) -> Result<u32, SimulatorError> {
        self.registers
            .get(register as usize)
            .copied()
            .ok_or(SimulatorError::RegisterOutOfRange(register))
    }

    /// Set the value of a register. Writes to `$zero` are discarded.
    pub fn set(&mut self, register: u8, value: u32) -> Result<(), SimulatorError> {
        let slot = self
            .registers
            .get_mut(register as usize)
            .ok_or(SimulatorError::RegisterOutOfRange(register))?;

        if register != REG_ZERO {
            *slot = value;
        }

        Ok(())
    }

    /// Zero every register except `$sp`, which is set to `stack_pointer`
    pub fn reset(&mut self, stack_pointer: u32) {
        self.registers = [0; REGISTER_COUNT];
        self.registers[REG_SP as usize] = stack_pointer;
    }

    /// The name and value of every register, in register order
    pub fn state(&self) -> Vec<(&'static str, u32)> {
        REGISTER_NAMES
            .iter()
            .copied()
            .zip(self.registers.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registers_are_zero() {
        let registers = Registers::new();

        for register in 0..32 {
            assert_eq!(registers.get(register), Ok(0));
        }
    }

    #[test]
    fn zero_register_ignores_writes() {
        let mut registers = Registers::new();

        for value in [1, 0xFFFF_FFFF, 0x8000_0000].iter() {
            assert_eq!(registers.set(0, *value), Ok(()));
            assert_eq!(registers.get(0), Ok(0));
        }
    }

    #[test]
    fn read_back_written_values() {
        let mut registers = Registers::new();

        registers.set(8, 42).unwrap();
        registers.set(31, 0xDEAD_BEEF).unwrap();

        assert_eq!(registers.get(8), Ok(42));
        assert_eq!(registers.get(31), Ok(0xDEAD_BEEF));
    }

    #[test]
    fn out_of_range_registers() {
        let mut registers = Registers::new();

        assert_eq!(registers.get(32), Err(SimulatorError::RegisterOutOfRange(32)));
        assert_eq!(
            registers.set(255, 1),
            Err(SimulatorError::RegisterOutOfRange(255))
        );
    }

    #[test]
    fn state_pairs_names_with_values() {
        let mut registers = Registers::new();
        registers.set(29, 0xFFFF_FFFF).unwrap();
        let state = registers.state();

        assert_eq!(state.len(), 32);
        assert_eq!(state[0], ("$zero", 0));
        assert_eq!(state[29], ("$sp", 0xFFFF_FFFF));
        assert_eq!(state[31], ("$ra", 0));
    }

    #[test]
    fn reset_zeroes_everything_but_the_stack_pointer() {
        let mut registers = Registers::new();
        registers.set(5, 5).unwrap();
        registers.set(31, 7).unwrap();
        registers.reset(0x7FFF_FFFC);

        assert_eq!(registers.get(5), Ok(0));
        assert_eq!(registers.get(31), Ok(0));
        assert_eq!(registers.get(29), Ok(0x7FFF_FFFC));
        assert_eq!(registers.get(0), Ok(0));
    }
}
