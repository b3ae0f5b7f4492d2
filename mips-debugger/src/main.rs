use crate::debugger::Debugger;
use env_logger::Env;
use mips_simulator::config::Config;
use mips_simulator::Processor;
use std::error::Error;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use structopt::StructOpt;

#[macro_use]
extern crate log;

mod debugger;

#[derive(StructOpt)]
struct CliArgs {
    /// Skip instructions that fail at runtime instead of stopping on them
    #[structopt(long)]
    permissive: bool,

    #[structopt(parse(from_os_str))]
    file_path: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Setup logging and parse CLI args
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
    let args = CliArgs::from_args();

    // Assemble the program
    let source = fs::read_to_string(&args.file_path)?;
    let processor = Processor::from_source(
        &source,
        Config {
            permissive: args.permissive,
            ..Config::default()
        },
    )?;
    info!(
        "Loaded {} instructions from {}",
        processor.instruction_count(),
        args.file_path.display()
    );

    // Setup the debugger
    let mut debugger = Debugger::new(processor);
    debugger.run()?;

    Ok(())
}
