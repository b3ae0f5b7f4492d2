use crate::error::SimulatorError;
use crate::math::add_unsigned;
use crate::Processor;

impl Processor {
    /// Add immediate (overflow wraps)
    pub(crate) fn op_addi(&mut self, rt: u8, rs: u8, immediate: i32) -> Result<(), SimulatorError> {
        let value = add_unsigned(self.registers.get(rs)?, immediate);
        self.registers.set(rt, value)?;
        self.advance_program_counter();
        Ok(())
    }

    /// Load word. The offset is subtracted from the base, since data memory
    /// grows down from its base address.
    pub(crate) fn op_lw(&mut self, rt: u8, rs: u8, offset: i32) -> Result<(), SimulatorError> {
        let address = add_unsigned(self.registers.get(rs)?, -offset);
        let value = self.data_memory.load_word(address)?;
        self.registers.set(rt, value)?;
        self.advance_program_counter();
        Ok(())
    }

    /// Store word. The offset is subtracted from the base, like `lw`.
    pub(crate) fn op_sw(&mut self, rt: u8, rs: u8, offset: i32) -> Result<(), SimulatorError> {
        let address = add_unsigned(self.registers.get(rs)?, -offset);
        let value = self.registers.get(rt)?;
        self.data_memory.store_word(address, value)?;
        self.advance_program_counter();
        Ok(())
    }

    /// Branch on equal
    pub(crate) fn op_beq(&mut self, rs: u8, rt: u8, offset: i32) -> Result<(), SimulatorError> {
        let taken = self.registers.get(rs)? == self.registers.get(rt)?;
        self.branch(taken, offset);
        Ok(())
    }

    /// Branch on not equal
    pub(crate) fn op_bne(&mut self, rs: u8, rt: u8, offset: i32) -> Result<(), SimulatorError> {
        let taken = self.registers.get(rs)? != self.registers.get(rt)?;
        self.branch(taken, offset);
        Ok(())
    }

    /// Move to the branch target if the branch is taken. The offset is in
    /// words, relative to the next instruction.
    fn branch(&mut self, taken: bool, offset: i32) {
        if taken {
            let address = add_unsigned(self.program_counter.wrapping_add(4), offset << 2);
            self.jump_to(address);
        } else {
            self.advance_program_counter();
        }
    }
}
