#[macro_use]
extern crate log;

pub mod config;
mod error;
pub mod instruction;
mod math;
pub mod memory;
mod operations;
mod processor;
mod registers;

pub use error::{Segment, SimulatorError};
pub use processor::{Processor, ProcessorState};
