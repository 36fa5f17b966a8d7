//! A CHIP-8 virtual machine core: the machine state and its opcodes, the
//! interpreter driver that paces cycles against the timers, and a frame
//! runner for embedding it into an application.
pub mod chip8;
pub mod config;
pub mod definitions;
pub mod devices;
pub mod interpreter;
pub mod opcode;
pub mod resources;
pub mod runner;
pub mod timer;
mod error;

// reexporting for convinience
pub use error::*;
