//! The pretty print implementation of the [`ChipSet`](super::ChipSet), split up into this file
//! for smaller file sizes and higher cohesion.

use std::{
    convert::TryFrom,
    fmt::{self, UpperHex, Write},
};

use num_traits::Unsigned;
use once_cell::sync::Lazy;

use super::ChipSet;
use crate::{definitions::memory, opcode::Instruction};

/// The amount of values printed per row, has to be bigger then 1
const ROW_SIZE: usize = 8;

const END_OF_LINE: char = '\n';
const INDENT: &str = "\t\t";

/// The values that are used when a row only contains zeros.
const FILLER_BASE: &str = "...";

/// The width of a single formatted value, `0x` and four digits
const INTEGER_LEN: usize = 6;

/// A row of zeros is shortend to the first and last value with a filler in between.
static ZERO_FILLER: Lazy<String> = Lazy::new(|| {
    let mut zero = String::with_capacity(INTEGER_LEN);
    // formatting into a string cannot fail
    let _ = integer(&mut zero, 0u16);

    let width = ROW_SIZE * INTEGER_LEN + (ROW_SIZE - 1);
    let gap = " ".repeat((width - 2 * zero.len() - FILLER_BASE.len()) / 2);
    format!("{0}{1}{2}{1}{0}", zero, gap, FILLER_BASE)
});

/// The boolean values, padded to the integer width so the columns line up.
static TRUE: Lazy<String> = Lazy::new(|| format!("{:<width$}", true, width = INTEGER_LEN));
static FALSE: Lazy<String> = Lazy::new(|| format!("{:<width$}", false, width = INTEGER_LEN));

/// will format all integer types
fn integer<T>(line: &mut String, data: T) -> fmt::Result
where
    T: UpperHex + Unsigned + Copy,
{
    write!(line, "{:#06X}", data)
}

/// will format the offsets of a row
fn range(line: &mut String, from: usize, to: usize) -> fmt::Result {
    line.push_str(INDENT);
    integer(line, from)?;
    line.push_str(" - ");
    integer(line, to)?;
    line.push_str(" :");
    Ok(())
}

/// will pretty print all the integer data given, the offsets are taken
/// from the beginning of the slice
fn integer_rows<T>(data: &[T]) -> Result<String, fmt::Error>
where
    T: UpperHex + Unsigned + Copy,
{
    let mut res = String::new();
    for (row, chunk) in data.chunks(ROW_SIZE).enumerate() {
        let from = row * ROW_SIZE;
        range(&mut res, from, from + chunk.len() - 1)?;
        for value in chunk {
            res.push(' ');
            integer(&mut res, *value)?;
        }
        res.push(END_OF_LINE);
    }
    Ok(res)
}

/// will pretty print all the boolean data given
fn bool_rows(data: &[bool]) -> Result<String, fmt::Error> {
    let mut res = String::new();
    for (row, chunk) in data.chunks(ROW_SIZE).enumerate() {
        let from = row * ROW_SIZE;
        range(&mut res, from, from + chunk.len() - 1)?;
        for value in chunk {
            res.push(' ');
            res.push_str(if *value { TRUE.as_str() } else { FALSE.as_str() });
        }
        // the padding of the last entry is not needed
        res.truncate(res.trim_end().len());
        res.push(END_OF_LINE);
    }
    Ok(res)
}

/// will pretty print the raw memory as opcodes, consecutive rows of zeros
/// are merged into a single one
fn memory_rows(data: &[u8]) -> Result<String, fmt::Error> {
    const BYTES: usize = ROW_SIZE * memory::opcodes::SIZE;

    // (from, to, opcodes) where an empty opcode list is a row of zeros
    let mut rows: Vec<(usize, usize, Vec<u16>)> = Vec::with_capacity(data.len() / BYTES);

    for (row, chunk) in data.chunks(BYTES).enumerate() {
        let from = row * BYTES;
        let to = from + chunk.len() - 1;

        if chunk.iter().all(|byte| *byte == 0) {
            match rows.last_mut() {
                Some((_, last_to, opcodes)) if opcodes.is_empty() => *last_to = to,
                _ => rows.push((from, to, Vec::new())),
            }
            continue;
        }

        let opcodes = chunk
            .chunks(memory::opcodes::SIZE)
            .map(|pair| u16::from_be_bytes([pair[0], pair.get(1).copied().unwrap_or(0)]))
            .collect();
        rows.push((from, to, opcodes));
    }

    let mut res = String::with_capacity(rows.len() * (ZERO_FILLER.len() + 24));
    for (from, to, opcodes) in rows {
        range(&mut res, from, to)?;
        res.push(' ');
        if opcodes.is_empty() {
            res.push_str(&ZERO_FILLER);
        } else {
            for opcode in opcodes {
                integer(&mut res, opcode)?;
                res.push(' ');
            }
            res.pop();
        }
        res.push(END_OF_LINE);
    }
    Ok(res)
}

impl ChipSet {
    /// The raw opcode at the program counter and its mnemonic.
    fn current_instruction(&self) -> Result<String, fmt::Error> {
        let pc = self.program_counter as usize;
        let opcode = u16::from_be_bytes([
            self.memory[pc % memory::SIZE],
            self.memory[(pc + 1) % memory::SIZE],
        ]);

        let mut res = String::from(INDENT);
        integer(&mut res, pc)?;
        res.push_str(" : ");
        integer(&mut res, opcode)?;
        match Instruction::try_from(opcode) {
            Ok(instruction) => write!(res, " {}", instruction)?,
            Err(_) => res.push_str(" ???"),
        }
        res.push(END_OF_LINE);
        Ok(res)
    }
}

impl fmt::Display for ChipSet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut index = String::from(INDENT);
        integer(&mut index, self.index_register)?;

        let mut timers = String::from(INDENT);
        write!(timers, "delay ")?;
        integer(&mut timers, self.get_delay_timer())?;
        write!(timers, " sound ")?;
        integer(&mut timers, self.get_sound_timer())?;

        let stack = if self.stack.is_empty() {
            format!("{}empty{}", INDENT, END_OF_LINE)
        } else {
            integer_rows(self.stack.as_slice())?
        };

        write!(
            f,
            "Chipset {{\n\
                \tProgram Name :\n{}{}\n\
                \tInstruction :\n{}\
                \tIndex Register :\n{}\n\
                \tTimers :\n{}\n\
                \tMemory :\n{}\
                \tKeyboard :\n{}\
                \tStack :\n{}\
                \tRegister :\n{}\
                }}",
            INDENT,
            self.name,
            self.current_instruction()?,
            index,
            timers,
            memory_rows(&self.memory)?,
            bool_rows(self.get_keyboard())?,
            stack,
            integer_rows(&self.registers)?,
        )
    }
}
