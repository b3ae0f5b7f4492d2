use mips_assembler::{assemble, format_binary, format_hex};
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use structopt::StructOpt;

#[macro_use]
extern crate log;

#[derive(StructOpt)]
struct CliArgs {
    /// Print words as hexadecimal instead of binary strings
    #[structopt(long)]
    hex: bool,

    /// Write the machine code here instead of stdout
    #[structopt(parse(from_os_str), long = "output", short = "o")]
    output_file: Option<PathBuf>,

    #[structopt(parse(from_os_str))]
    file_path: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Setup logging and parse CLI args
    env_logger::init();
    let args = CliArgs::from_args();

    let source = fs::read_to_string(&args.file_path)?;
    let words = assemble(&source)?;
    info!(
        "Assembled {} instructions from {}",
        words.len(),
        args.file_path.display()
    );

    let mut output = String::new();
    for word in words {
        let line = if args.hex {
            format_hex(word)
        } else {
            format_binary(word)
        };
        output.push_str(&line);
        output.push('\n');
    }

    match &args.output_file {
        Some(path) => {
            fs::write(path, output)?;
            info!("Wrote machine code to {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(output.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}
