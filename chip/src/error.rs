use thiserror::Error;

use crate::opcode::Opcode;

/// A fault raised while executing a single cycle.
#[derive(Error, Debug, PartialEq, Clone)]
pub enum ProcessError {
    #[error("Invalid opcode state '{0}'.")]
    Opcode(#[from] OpcodeError),
    #[error("Invalid stack state '{0}'.")]
    Stack(#[from] StackError),
    #[error("Invalid memory access '{0}'.")]
    Memory(#[from] MemoryError),
    #[error("The interpreter has been halted.")]
    Halted,
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum OpcodeError {
    #[error("An unsupported opcode was used {0:#06X?}.")]
    InvalidOpcode(Opcode),
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum StackError {
    #[error("Stack is full!")]
    Full,
    #[error("Stack is empty!")]
    Empty,
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum MemoryError {
    #[error("Address {address:#06X} is outside of the memory of size {len:#06X}")]
    OutOfRange { address: usize, len: usize },
}

/// Failures while getting a program image into the machine. These never
/// originate from the cpu itself.
#[derive(Error, Debug)]
pub enum RomError {
    #[error("Unable to read the rom: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unable to extract the rom from the archive: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("The rom is {size} bytes long, but only {max} bytes fit into memory.")]
    TooLarge { size: usize, max: usize },
}

#[derive(Error, Debug, PartialEq, Clone, Copy)]
pub enum ConfigError {
    #[error("The {0} has to be bigger then zero.")]
    ZeroRate(&'static str),
}
