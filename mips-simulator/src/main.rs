use mips_simulator::config::Config;
use mips_simulator::Processor;
use std::error::Error;
use std::fs;
use std::path::PathBuf;
use structopt::StructOpt;

#[macro_use]
extern crate log;

#[derive(StructOpt)]
struct CliArgs {
    /// Skip instructions that fail at runtime instead of stopping
    #[structopt(long)]
    permissive: bool,

    /// Instruction memory size in bytes
    #[structopt(long, default_value = "512")]
    instruction_memory_size: usize,

    /// Data memory size in bytes
    #[structopt(long, default_value = "512")]
    data_memory_size: usize,

    /// Stop after this many steps, even if the program has not finished
    #[structopt(long)]
    max_steps: Option<u64>,

    #[structopt(parse(from_os_str))]
    file_path: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Setup logging and parse CLI args
    env_logger::init();
    let args = CliArgs::from_args();

    let source = fs::read_to_string(&args.file_path)?;
    let mut processor = Processor::from_source(
        &source,
        Config {
            instruction_memory_size: args.instruction_memory_size,
            data_memory_size: args.data_memory_size,
            permissive: args.permissive,
        },
    )?;
    info!(
        "Loaded {} instructions from {}",
        processor.instruction_count(),
        args.file_path.display()
    );

    let mut steps = 0;
    while !processor.is_finished() {
        if args.max_steps.map_or(false, |max| steps >= max) {
            return Err(format!("program did not finish within {} steps", steps).into());
        }

        // Permissive processors move past the failing instruction
        if let Err(error) = processor.step() {
            if !processor.config().permissive {
                return Err(format!(
                    "0x{:08x}: {}",
                    processor.program_counter(),
                    error
                )
                .into());
            }
        }
        steps += 1;
    }
    info!("Executed {} instructions", processor.steps_executed());

    println!("Registers:");
    for (name, value) in processor.register_state() {
        println!("{:>6} = 0x{:08X} ({})", name, value, value as i32);
    }

    println!("Data memory:");
    for (address, value) in processor.data_memory_state() {
        println!("0x{:08X} = 0x{:08X} ({})", address, value, value as i32);
    }

    Ok(())
}
