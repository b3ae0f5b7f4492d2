use crate::config::Config;
use crate::error::SimulatorError;
use crate::instruction::{Instruction, Operation};
use crate::memory::{DataMemory, InstructionMemory};
use crate::registers::Registers;
use mips_types::constants::{STACK_START, TEXT_OFFSET};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ProcessorState {
    Running,
    /// The program counter has left the program
    Finished,
}

/// A single-cycle MIPS processor
#[derive(Debug)]
pub struct Processor {
    pub(crate) config: Config,
    pub(crate) registers: Registers,
    pub(crate) program_counter: u32,
    pub(crate) instruction_memory: InstructionMemory,
    pub(crate) data_memory: DataMemory,
    state: ProcessorState,
    steps_executed: u64,
}

impl Processor {
    /// Create a processor with the program loaded into instruction memory
    pub fn new(program: &[u32], config: Config) -> Result<Self, SimulatorError> {
        let instruction_memory = InstructionMemory::new(program, config.instruction_memory_size)?;
        let data_memory = DataMemory::new(config.data_memory_size)?;

        let mut processor = Processor {
            config,
            registers: Registers::new(),
            program_counter: TEXT_OFFSET,
            instruction_memory,
            data_memory,
            state: ProcessorState::Running,
            steps_executed: 0,
        };
        processor.reset();
        debug!(
            "Loaded {} instructions into {:?}",
            processor.instruction_memory.size(),
            processor.instruction_memory
        );

        Ok(processor)
    }

    /// Assemble the source and load it. Nothing is loaded if assembly fails.
    pub fn from_source(source: &str, config: Config) -> Result<Self, SimulatorError> {
        let program = mips_assembler::assemble(source)?;
        Self::new(&program, config)
    }

    /// Return to the initial state. The loaded program is kept.
    pub fn reset(&mut self) {
        self.program_counter = TEXT_OFFSET;
        self.registers.reset(STACK_START);
        self.data_memory.reset();
        self.steps_executed = 0;
        self.update_state();
    }

    /// Execute one instruction. Does nothing once the program has finished.
    ///
    /// A failing instruction leaves the processor as it was, unless the
    /// processor is permissive, in which case the instruction is skipped.
    /// Either way the failure is returned.
    pub fn step(&mut self) -> Result<(), SimulatorError> {
        if self.is_finished() {
            return Ok(());
        }

        let program_counter = self.program_counter;
        let result = self.load_next_instruction().and_then(|instruction| {
            trace!(
                "0x{:08x}: {}",
                program_counter,
                instruction.stringify(program_counter)
            );
            let operation = instruction.decode()?;
            self.execute(operation)
        });

        match &result {
            Ok(()) => self.steps_executed += 1,
            Err(error) if self.config.permissive => {
                warn!(
                    "Skipping instruction at 0x{:08x}: {}",
                    program_counter, error
                );
                self.advance_program_counter();
            }
            Err(error) => {
                debug!("Instruction at 0x{:08x} failed: {}", program_counter, error);
            }
        }

        self.update_state();
        result
    }

    /// Get the instruction at the program counter
    pub fn load_next_instruction(&self) -> Result<Instruction, SimulatorError> {
        self.instruction_memory
            .load_word(self.program_counter)
            .map(Instruction)
    }

    pub fn execute(&mut self, operation: Operation) -> Result<(), SimulatorError> {
        match operation {
            Operation::Add { rd, rs, rt } => self.op_add(rd, rs, rt),
            Operation::Sub { rd, rs, rt } => self.op_sub(rd, rs, rt),
            Operation::And { rd, rs, rt } => self.op_and(rd, rs, rt),
            Operation::Or { rd, rs, rt } => self.op_or(rd, rs, rt),
            Operation::Slt { rd, rs, rt } => self.op_slt(rd, rs, rt),
            Operation::Sll { rd, rt, shift } => self.op_sll(rd, rt, shift),
            Operation::Srl { rd, rt, shift } => self.op_srl(rd, rt, shift),
            Operation::Jr { rs } => self.op_jr(rs),
            Operation::Addi { rt, rs, immediate } => self.op_addi(rt, rs, immediate),
            Operation::Lw { rt, rs, offset } => self.op_lw(rt, rs, offset),
            Operation::Sw { rt, rs, offset } => self.op_sw(rt, rs, offset),
            Operation::Beq { rs, rt, offset } => self.op_beq(rs, rt, offset),
            Operation::Bne { rs, rt, offset } => self.op_bne(rs, rt, offset),
            Operation::J { pseudo_address } => {
                self.op_j(pseudo_address);
                Ok(())
            }
            Operation::Jal { pseudo_address } => self.op_jal(pseudo_address),
        }
    }

    pub(crate) fn advance_program_counter(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(4);
    }

    pub(crate) fn jump_to(&mut self, address: u32) {
        self.program_counter = address;
    }

    fn update_state(&mut self) {
        self.state = if self.instruction_memory.contains(self.program_counter) {
            ProcessorState::Running
        } else {
            ProcessorState::Finished
        };
    }

    pub fn state(&self) -> ProcessorState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == ProcessorState::Finished
    }

    pub fn program_counter(&self) -> u32 {
        self.program_counter
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The number of instructions executed since the last reset
    pub fn steps_executed(&self) -> u64 {
        self.steps_executed
    }

    pub fn register(&self, register: u8) -> Result<u32, SimulatorError> {
        self.registers.get(register)
    }

    /// The name and value of every register
    pub fn register_state(&self) -> Vec<(&'static str, u32)> {
        self.registers.state()
    }

    pub fn load_data_word(&self, address: u32) -> Result<u32, SimulatorError> {
        self.data_memory.load_word(address)
    }

    /// The non-zero data words as (address, value) pairs
    pub fn data_memory_state(&self) -> Vec<(u32, u32)> {
        self.data_memory.state()
    }

    /// Every instruction as (address, word) pairs
    pub fn instruction_memory_state(&self) -> Vec<(u32, u32)> {
        self.instruction_memory.state()
    }

    pub fn instruction_count(&self) -> usize {
        self.instruction_memory.size()
    }

    pub fn instruction_at(&self, address: u32) -> Result<u32, SimulatorError> {
        self.instruction_memory.load_word(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mips_types::constants::{DATA_BASE, REG_RA, REG_SP};

    fn run(source: &str) -> Processor {
        let mut processor = Processor::from_source(source, Config::default()).unwrap();

        while !processor.is_finished() {
            processor.step().unwrap();
        }

        processor
    }

    #[test]
    fn initial_state() {
        let processor = Processor::from_source("add $t0, $t0, $t0", Config::default()).unwrap();

        assert_eq!(processor.program_counter(), TEXT_OFFSET);
        assert_eq!(processor.register(REG_SP), Ok(STACK_START));
        assert_eq!(processor.state(), ProcessorState::Running);
        assert_eq!(processor.instruction_count(), 1);
    }

    #[test]
    fn empty_program_is_finished_immediately() {
        let mut processor = Processor::new(&[], Config::default()).unwrap();

        assert!(processor.is_finished());
        assert_eq!(processor.step(), Ok(()));
        assert_eq!(processor.program_counter(), TEXT_OFFSET);
    }

    #[test]
    fn finishes_on_the_step_that_leaves_the_program() {
        let mut processor =
            Processor::from_source("addi $t0, $zero, 1\naddi $t1, $zero, 2", Config::default())
                .unwrap();

        processor.step().unwrap();
        assert!(!processor.is_finished());
        processor.step().unwrap();
        assert!(processor.is_finished());
        assert_eq!(processor.program_counter(), TEXT_OFFSET + 8);

        // Stepping again changes nothing
        processor.step().unwrap();
        assert!(processor.is_finished());
        assert_eq!(processor.program_counter(), TEXT_OFFSET + 8);
        assert_eq!(processor.steps_executed(), 2);
    }

    #[test]
    fn alu_operations() {
        let processor = run("
            addi $t0, $zero, 12
            addi $t1, $zero, -5
            add $s0, $t0, $t1
            sub $s1, $t0, $t1
            and $s2, $t0, $t1
            or $s3, $t0, $t1
            slt $s4, $t1, $t0
            slt $s5, $t0, $t1
            sll $s6, $t0, 4
            srl $s7, $t1, 28
        ");

        assert_eq!(processor.register(16), Ok(7));
        assert_eq!(processor.register(17), Ok(17));
        assert_eq!(processor.register(18), Ok(12 & -5i32 as u32));
        assert_eq!(processor.register(19), Ok(12 | -5i32 as u32));
        assert_eq!(processor.register(20), Ok(1));
        assert_eq!(processor.register(21), Ok(0));
        assert_eq!(processor.register(22), Ok(192));
        // Logical shift: the sign bit is not copied
        assert_eq!(processor.register(23), Ok(0xF));
    }

    #[test]
    fn arithmetic_wraps() {
        let processor = run("
            addi $t0, $zero, -1
            srl $t0, $t0, 1
            addi $t0, $t0, 1
        ");

        assert_eq!(processor.register(8), Ok(0x8000_0000));
    }

    #[test]
    fn writes_to_zero_are_discarded() {
        let processor = run("addi $zero, $zero, 5\nadd $t0, $zero, $zero");

        assert_eq!(processor.register(0), Ok(0));
        assert_eq!(processor.register(8), Ok(0));
    }

    #[test]
    fn load_and_store_subtract_the_offset() {
        let processor = run("
            addi $t0, $zero, 77
            sw $t0, 8($sp)
            lw $t1, 8($sp)
        ");

        assert_eq!(processor.load_data_word(DATA_BASE - 8), Ok(77));
        assert_eq!(processor.register(9), Ok(77));
        assert_eq!(processor.data_memory_state(), vec![(DATA_BASE - 8, 77)]);
    }

    #[test]
    fn jal_and_jr() {
        let processor = run("
                jal function
                addi $s0, $zero, 1
                j end
            function:
                addi $s1, $zero, 2
                jr $ra
            end:
        ");

        assert_eq!(processor.register(16), Ok(1));
        assert_eq!(processor.register(17), Ok(2));
        assert_eq!(processor.register(REG_RA), Ok(TEXT_OFFSET + 4));
        assert_eq!(processor.program_counter(), TEXT_OFFSET + 20);
    }

    #[test]
    fn beq_taken_and_not_taken() {
        let processor = run("
                addi $t0, $zero, 3
                beq $t0, $zero, skip
                addi $s0, $zero, 1
                beq $t0, $t0, skip
                addi $s1, $zero, 1
            skip:
                addi $s2, $zero, 1
        ");

        assert_eq!(processor.register(16), Ok(1));
        assert_eq!(processor.register(17), Ok(0));
        assert_eq!(processor.register(18), Ok(1));
    }

    #[test]
    fn jr_out_of_the_program_finishes() {
        let mut processor = Processor::from_source("jr $ra", Config::default()).unwrap();

        processor.step().unwrap();

        assert!(processor.is_finished());
        assert_eq!(processor.program_counter(), 0);
    }

    #[test]
    fn runtime_errors_leave_state_untouched() {
        // The stack pointer starts at the top of data memory, so +4 is out of range
        let mut processor = Processor::from_source(
            "addi $t0, $zero, 1\nsw $t0, -4($sp)\naddi $t1, $zero, 1",
            Config::default(),
        )
        .unwrap();

        processor.step().unwrap();
        let error = processor.step().unwrap_err();

        assert!(matches!(error, SimulatorError::AddressOutOfRange { .. }));
        assert_eq!(processor.program_counter(), TEXT_OFFSET + 4);
        assert!(processor.data_memory_state().is_empty());
        assert!(!processor.is_finished());

        // Strict mode stays on the failing instruction
        assert!(processor.step().is_err());
        assert_eq!(processor.program_counter(), TEXT_OFFSET + 4);
    }

    #[test]
    fn permissive_mode_skips_failing_instructions() {
        let config = Config {
            permissive: true,
            ..Config::default()
        };
        // An unknown R-type function (xor) in the middle of the program
        let mut processor = Processor::new(&[0x2008_0001, 0x0109_5026, 0x2009_0002], config).unwrap();

        processor.step().unwrap();
        assert_eq!(processor.step(), Err(SimulatorError::UnknownFunction(0x26)));
        processor.step().unwrap();

        assert!(processor.is_finished());
        assert_eq!(processor.register(8), Ok(1));
        assert_eq!(processor.register(9), Ok(2));
        assert_eq!(processor.register(10), Ok(0));
    }

    #[test]
    fn reset_restores_the_initial_state() {
        let mut processor = run("
            addi $sp, $zero, -5
            addi $t0, $zero, 9
            sw $t0, 0($sp)
        ");
        let program = processor.instruction_memory_state();
        assert!(!processor.data_memory_state().is_empty());

        processor.reset();

        assert_eq!(processor.program_counter(), TEXT_OFFSET);
        assert_eq!(processor.register(REG_SP), Ok(STACK_START));
        assert_eq!(processor.register(8), Ok(0));
        assert!(processor.data_memory_state().is_empty());
        assert_eq!(processor.instruction_memory_state(), program);
        assert!(!processor.is_finished());
        assert_eq!(processor.steps_executed(), 0);
    }

    #[test]
    fn instructions_can_be_read_by_address() {
        let processor =
            Processor::from_source("addi $t0, $zero, 5\njr $ra", Config::default()).unwrap();

        assert_eq!(processor.instruction_at(TEXT_OFFSET), Ok(0x2008_0005));
        assert_eq!(processor.instruction_at(TEXT_OFFSET + 4), Ok(0x03E0_0008));
        assert!(matches!(
            processor.instruction_at(TEXT_OFFSET + 8),
            Err(SimulatorError::AddressOutOfRange { .. })
        ));
        assert_eq!(
            processor.load_next_instruction(),
            Ok(Instruction(0x2008_0005))
        );
    }

    #[test]
    fn assembly_errors_prevent_loading() {
        let error = Processor::from_source("addi $t0, $zero, 40000", Config::default())
            .unwrap_err();

        assert!(matches!(error, SimulatorError::Assembler(_)));
    }
}
