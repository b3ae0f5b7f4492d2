use crate::error::SimulatorError;
use crate::Processor;

impl Processor {
    /// Add (overflow wraps)
    pub(crate) fn op_add(&mut self, rd: u8, rs: u8, rt: u8) -> Result<(), SimulatorError> {
        let a = self.registers.get(rs)?;
        let b = self.registers.get(rt)?;
        self.registers.set(rd, a.wrapping_add(b))?;
        self.advance_program_counter();
        Ok(())
    }

    /// Subtract (overflow wraps)
    pub(crate) fn op_sub(&mut self, rd: u8, rs: u8, rt: u8) -> Result<(), SimulatorError> {
        let a = self.registers.get(rs)?;
        let b = self.registers.get(rt)?;
        self.registers.set(rd, a.wrapping_sub(b))?;
        self.advance_program_counter();
        Ok(())
    }

    /// Bitwise And
    pub(crate) fn op_and(&mut self, rd: u8, rs: u8, rt: u8) -> Result<(), SimulatorError> {
        let a = self.registers.get(rs)?;
        let b = self.registers.get(rt)?;
        self.registers.set(rd, a & b)?;
        self.advance_program_counter();
        Ok(())
    }

    /// Bitwise Or
    pub(crate) fn op_or(&mut self, rd: u8, rs: u8, rt: u8) -> Result<(), SimulatorError> {
        let a = self.registers.get(rs)?;
        let b = self.registers.get(rt)?;
        self.registers.set(rd, a | b)?;
        self.advance_program_counter();
        Ok(())
    }

    /// Set on less than (signed)
    pub(crate) fn op_slt(&mut self, rd: u8, rs: u8, rt: u8) -> Result<(), SimulatorError> {
        let a = self.registers.get(rs)? as i32;
        let b = self.registers.get(rt)? as i32;
        self.registers.set(rd, if a < b { 1 } else { 0 })?;
        self.advance_program_counter();
        Ok(())
    }

    /// Shift left logical
    pub(crate) fn op_sll(&mut self, rd: u8, rt: u8, shift: u8) -> Result<(), SimulatorError> {
        let value = self.registers.get(rt)? << (shift & 0x1F);
        self.registers.set(rd, value)?;
        self.advance_program_counter();
        Ok(())
    }

    /// Shift right logical
    pub(crate) fn op_srl(&mut self, rd: u8, rt: u8, shift: u8) -> Result<(), SimulatorError> {
        let value = self.registers.get(rt)? >> (shift & 0x1F);
        self.registers.set(rd, value)?;
        self.advance_program_counter();
        Ok(())
    }

    /// Jump register
    pub(crate) fn op_jr(&mut self, rs: u8) -> Result<(), SimulatorError> {
        let address = self.registers.get(rs)?;
        self.jump_to(address);
        Ok(())
    }
}
