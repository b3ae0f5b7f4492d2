use crate::error::SimulatorError;
use crate::instruction::jump_target;
use crate::Processor;
use mips_types::constants::REG_RA;

impl Processor {
    /// Jump
    pub(crate) fn op_j(&mut self, pseudo_address: u32) {
        self.jump_to(jump_target(self.program_counter, pseudo_address));
    }

    /// Jump and link
    pub(crate) fn op_jal(&mut self, pseudo_address: u32) -> Result<(), SimulatorError> {
        self.registers
            .set(REG_RA, self.program_counter.wrapping_add(4))?;
        self.jump_to(jump_target(self.program_counter, pseudo_address));
        Ok(())
    }
}
