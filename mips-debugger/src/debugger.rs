use mips_simulator::instruction::Instruction;
use mips_simulator::Processor;
use std::io;
use std::io::{BufRead, Write};

/// `run` gives up after this many steps so a looping program can't hang
/// the prompt
const RUN_STEP_LIMIT: u64 = 1_000_000;

/// Registers from this index on are shown in hex since they hold addresses
const FIRST_ADDRESS_REGISTER: usize = 28;

const HELP: &str = "\
step, s       execute one instruction
run, r        execute until the program finishes
reset         restart the program
regs          show the registers
mem           show the data memory in use
text          show the program
pc            show the program counter
trace on|off  print each instruction before it executes
help          show this message
exit          quit";

pub struct Debugger {
    pub processor: Processor,
    pub trace: bool,
}

impl Debugger {
    pub fn new(processor: Processor) -> Self {
        Debugger {
            processor,
            trace: false,
        }
    }

    /// Read commands from stdin until `exit` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            eprint!("> ");
            io::stderr().flush()?;

            let line = match lines.next() {
                Some(line) => line?,
                None => return Ok(()),
            };

            if !self.run_command(&line) {
                return Ok(());
            }
        }
    }

    /// Run a command. Returns true if execution should continue, else false.
    pub fn run_command(&mut self, command: &str) -> bool {
        let command: Vec<_> = command.split_whitespace().collect();

        match command.as_slice() {
            [] => {}
            ["trace", enabled] => match *enabled {
                "on" => {
                    self.trace = true;
                    eprintln!("Instruction tracing is ON");
                }
                "off" => {
                    self.trace = false;
                    eprintln!("Instruction tracing is OFF");
                }
                _ => eprintln!("Unknown input"),
            },
            ["step"] | ["s"] => {
                if self.processor.is_finished() {
                    eprintln!("The program has finished");
                } else {
                    self.step();
                }
            }
            ["run"] | ["r"] => self.run_to_completion(),
            ["reset"] => {
                self.processor.reset();
                eprintln!("Processor reset");
            }
            ["regs"] => print!("{}", format_registers(&self.processor)),
            ["mem"] => print!("{}", format_data_memory(&self.processor)),
            ["text"] => print!("{}", format_text(&self.processor)),
            ["pc"] => println!("0x{:08X}", self.processor.program_counter()),
            ["help"] => eprintln!("{}", HELP),
            ["exit"] => return false,
            _ => eprintln!("Unknown input"),
        }

        true
    }

    /// Step once. Returns false if the instruction failed.
    fn step(&mut self) -> bool {
        let program_counter = self.processor.program_counter();

        if self.trace {
            match self.processor.instruction_at(program_counter) {
                Ok(word) => eprintln!(
                    "0x{:08X}: {}",
                    program_counter,
                    Instruction(word).stringify(program_counter)
                ),
                Err(error) => eprintln!("0x{:08X}: {}", program_counter, error),
            }
        }

        match self.processor.step() {
            Ok(()) => {
                if self.processor.is_finished() {
                    eprintln!("The program has finished");
                }
                true
            }
            Err(error) => {
                error!("0x{:08X}: {}", program_counter, error);
                false
            }
        }
    }

    fn run_to_completion(&mut self) {
        let mut steps = 0;

        while !self.processor.is_finished() {
            if steps == RUN_STEP_LIMIT {
                warn!("Stopped after {} steps", steps);
                return;
            }

            // Strict processors would fail on the same instruction forever
            if !self.step() && !self.processor.config().permissive {
                return;
            }
            steps += 1;
        }
    }
}

/// One register per line. Address registers are shown in hex, the rest as
/// signed decimals.
fn format_registers(processor: &Processor) -> String {
    processor
        .register_state()
        .into_iter()
        .enumerate()
        .map(|(index, (name, value))| {
            if index >= FIRST_ADDRESS_REGISTER {
                format!("{:>5} = 0x{:08X}\n", name, value)
            } else {
                format!("{:>5} = {}\n", name, value as i32)
            }
        })
        .collect()
}

/// The populated data words, split into bytes
fn format_data_memory(processor: &Processor) -> String {
    processor
        .data_memory_state()
        .into_iter()
        .map(|(address, value)| {
            let bytes = value.to_be_bytes();
            format!(
                "0x{:08X}: {:02X} {:02X} {:02X} {:02X} ({})\n",
                address, bytes[0], bytes[1], bytes[2], bytes[3], value as i32
            )
        })
        .collect()
}

/// The program as binary bytes and disassembly, with the PC marked
fn format_text(processor: &Processor) -> String {
    let program_counter = processor.program_counter();

    processor
        .instruction_memory_state()
        .into_iter()
        .map(|(address, word)| {
            let bytes = word.to_be_bytes();
            let marker = if address == program_counter {
                " <- PC"
            } else {
                ""
            };
            format!(
                "0x{:08X}: {:08b} {:08b} {:08b} {:08b}  {}{}\n",
                address,
                bytes[0],
                bytes[1],
                bytes[2],
                bytes[3],
                Instruction(word).stringify(address),
                marker
            )
        })
        .collect()
}
