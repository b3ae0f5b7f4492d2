use crate::config::memory_size_in_words;
use crate::error::{Segment, SimulatorError};
use mips_types::constants::{DATA_BASE, TEXT_OFFSET};
use std::fmt;
use std::fmt::{Debug, Formatter};

/// Holds the assembled program. Instructions are stored upward from
/// `TEXT_OFFSET`, one word per slot.
pub struct InstructionMemory {
    words: Vec<u32>,
    capacity: usize,
}

impl InstructionMemory {
    /// Load a program into an instruction memory of `size` bytes
    pub fn new(program: &[u32], size: usize) -> Result<Self, SimulatorError> {
        let capacity = memory_size_in_words(size)?;

        if program.len() > capacity {
            return Err(SimulatorError::ProgramTooLarge {
                count: program.len(),
                capacity,
            });
        }

        Ok(InstructionMemory {
            words: program.to_vec(),
            capacity,
        })
    }

    /// Get the instruction word at the address
    pub fn load_word(&self, address: u32) -> Result<u32, SimulatorError> {
        let index = self.index(address)?;
        Ok(self.words[index])
    }

    /// The number of instructions in the program
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// The number of instructions the memory can hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The address just past the last instruction
    pub fn end_address(&self) -> u32 {
        TEXT_OFFSET.wrapping_add(4 * self.words.len() as u32)
    }

    /// Check if the address falls within the loaded program
    pub fn contains(&self, address: u32) -> bool {
        address >= TEXT_OFFSET && address < self.end_address()
    }

    /// Every instruction slot as (address, word) pairs
    pub fn state(&self) -> Vec<(u32, u32)> {
        self.words
            .iter()
            .enumerate()
            .map(|(index, word)| (TEXT_OFFSET + 4 * index as u32, *word))
            .collect()
    }

    /// Convert an address to a slot index
    fn index(&self, address: u32) -> Result<usize, SimulatorError> {
        let out_of_range = SimulatorError::AddressOutOfRange {
            segment: Segment::Instruction,
            address,
        };
        let offset = address.checked_sub(TEXT_OFFSET).ok_or(out_of_range.clone())?;

        if offset % 4 != 0 {
            return Err(SimulatorError::MisalignedAddress {
                segment: Segment::Instruction,
                address,
            });
        }

        let index = (offset / 4) as usize;
        if index >= self.words.len() {
            return Err(out_of_range);
        }

        Ok(index)
    }
}

impl Debug for InstructionMemory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "InstructionMemory({}/{} words)",
            self.words.len(),
            self.capacity
        )
    }
}

/// Word-addressed data memory. Slot 0 is at `DATA_BASE` and each following
/// slot is four bytes lower, like a stack growing down.
pub struct DataMemory {
    words: Vec<u32>,
}

impl DataMemory {
    /// Create a zeroed data memory of `size` bytes
    pub fn new(size: usize) -> Result<Self, SimulatorError> {
        let capacity = memory_size_in_words(size)?;

        Ok(DataMemory {
            words: vec![0; capacity],
        })
    }

    /// Get the word at the address
    pub fn load_word(&self, address: u32) -> Result<u32, SimulatorError> {
        let index = self.index(address)?;
        Ok(self.words[index])
    }

    /// Set the word at the address
    pub fn store_word(&mut self, address: u32, value: u32) -> Result<(), SimulatorError> {
        let index = self.index(address)?;
        self.words[index] = value;
        Ok(())
    }

    /// The number of words the memory holds
    pub fn size(&self) -> usize {
        self.words.len()
    }

    /// Zero every word
    pub fn reset(&mut self) {
        for word in self.words.iter_mut() {
            *word = 0;
        }
    }

    /// The non-zero words as (address, value) pairs, highest address first
    pub fn state(&self) -> Vec<(u32, u32)> {
        self.words
            .iter()
            .enumerate()
            .filter(|(_, word)| **word != 0)
            .map(|(index, word)| (Self::address(index), *word))
            .collect()
    }

    fn address(index: usize) -> u32 {
        DATA_BASE - 4 * index as u32
    }

    /// Convert an address to a slot index
    fn index(&self, address: u32) -> Result<usize, SimulatorError> {
        // Every u32 is at or below DATA_BASE
        let offset = DATA_BASE - address;

        if offset % 4 != 0 {
            return Err(SimulatorError::MisalignedAddress {
                segment: Segment::Data,
                address,
            });
        }

        let index = (offset / 4) as usize;
        if index >= self.words.len() {
            return Err(SimulatorError::AddressOutOfRange {
                segment: Segment::Data,
                address,
            });
        }

        Ok(index)
    }
}

impl Debug for DataMemory {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "DataMemory({} words)", self.words.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn instruction_memory_is_indexed_up_from_the_text_offset() {
        let memory = InstructionMemory::new(&[10, 20, 30], 512).unwrap();

        assert_eq!(memory.size(), 3);
        assert_eq!(memory.capacity(), 128);
        assert_eq!(memory.load_word(TEXT_OFFSET), Ok(10));
        assert_eq!(memory.load_word(TEXT_OFFSET + 8), Ok(30));
        assert_eq!(memory.end_address(), TEXT_OFFSET + 12);
        assert_eq!(
            memory.state(),
            vec![
                (TEXT_OFFSET, 10),
                (TEXT_OFFSET + 4, 20),
                (TEXT_OFFSET + 8, 30)
            ]
        );
    }

    #[test]
    fn instruction_memory_bounds() {
        let memory = InstructionMemory::new(&[10, 20], 512).unwrap();

        assert!(memory.contains(TEXT_OFFSET + 4));
        assert!(!memory.contains(TEXT_OFFSET + 8));
        assert!(!memory.contains(TEXT_OFFSET - 4));
        assert_eq!(
            memory.load_word(TEXT_OFFSET + 8),
            Err(SimulatorError::AddressOutOfRange {
                segment: Segment::Instruction,
                address: TEXT_OFFSET + 8,
            })
        );
        assert_eq!(
            memory.load_word(0),
            Err(SimulatorError::AddressOutOfRange {
                segment: Segment::Instruction,
                address: 0,
            })
        );
        assert_eq!(
            memory.load_word(TEXT_OFFSET + 2),
            Err(SimulatorError::MisalignedAddress {
                segment: Segment::Instruction,
                address: TEXT_OFFSET + 2,
            })
        );
    }

    #[test]
    fn programs_must_fit() {
        assert_eq!(
            InstructionMemory::new(&[0; 5], 16).unwrap_err(),
            SimulatorError::ProgramTooLarge {
                count: 5,
                capacity: 4
            }
        );
        assert!(InstructionMemory::new(&[0; 4], 16).is_ok());
    }

    #[test]
    fn data_memory_grows_down_from_the_base() {
        let mut memory = DataMemory::new(16).unwrap();

        memory.store_word(DATA_BASE, 1).unwrap();
        memory.store_word(DATA_BASE - 12, 4).unwrap();

        assert_eq!(memory.size(), 4);
        assert_eq!(memory.load_word(DATA_BASE), Ok(1));
        assert_eq!(memory.load_word(DATA_BASE - 4), Ok(0));
        assert_eq!(memory.load_word(DATA_BASE - 12), Ok(4));
        assert_eq!(memory.state(), vec![(DATA_BASE, 1), (DATA_BASE - 12, 4)]);
    }

    #[test]
    fn data_memory_bounds() {
        let mut memory = DataMemory::new(16).unwrap();

        assert_eq!(
            memory.store_word(DATA_BASE - 16, 1),
            Err(SimulatorError::AddressOutOfRange {
                segment: Segment::Data,
                address: DATA_BASE - 16,
            })
        );
        assert_eq!(
            memory.load_word(DATA_BASE - 1),
            Err(SimulatorError::MisalignedAddress {
                segment: Segment::Data,
                address: DATA_BASE - 1,
            })
        );
        assert!(memory.state().is_empty());
    }

    #[test]
    fn data_memory_reset() {
        let mut memory = DataMemory::new(512).unwrap();
        memory.store_word(DATA_BASE - 4, 99).unwrap();
        memory.reset();

        assert_eq!(memory.load_word(DATA_BASE - 4), Ok(0));
        assert!(memory.state().is_empty());
    }
}
