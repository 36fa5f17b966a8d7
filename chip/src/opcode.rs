//! Opcode abstractions, functionality and constants.
use std::{convert::TryFrom, fmt};

use crate::{definitions::memory, MemoryError, OpcodeError, ProcessError};

/// the base mask used for generating all the other sub masks
pub(crate) const OPCODE_MASK_FFFF: u16 = u16::MAX;

/// the mask for the first twelve bits
pub(crate) const OPCODE_MASK_FFF0: u16 = OPCODE_MASK_FFFF << 4;

/// the mask for the first eight bits
pub(crate) const OPCODE_MASK_FF00: u16 = OPCODE_MASK_FFFF << 8;

/// the mask for the first four bits
pub(crate) const OPCODE_MASK_F000: u16 = OPCODE_MASK_FFFF << 12;

/// the mask for the last four bits
pub(crate) const OPCODE_MASK_000F: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FFF0;

/// the mask for the last eight bits
pub(crate) const OPCODE_MASK_00FF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_FF00;

/// the mask for the last twelve bits
pub(crate) const OPCODE_MASK_0FFF: u16 = OPCODE_MASK_FFFF ^ OPCODE_MASK_F000;

/// the size of a nibble
const NIBBLE: u16 = 0x4;

/// a wrapper type for u16 to make it clear what is meant to be used
pub type Opcode = u16;

/// An address inside of the chip memory
pub type Address = u16;

/// will build an opcode from data and the given point
/// # Arguments
///
/// - `data` - A slice of u8 data entries used to generate the opcodes
/// - `pointer` - Where in the data the opcode shall be extracted, so `pointer` and `pointer + 1` make
/// the opcode up
///
/// # Example
/// ```rust
/// # use chip8_vm::opcode::*;
/// # use chip8_vm::MemoryError;
///  const OPCODES: [Opcode; 2] = [0x00EE, 0x1EDA];
///  const SPLIT_OPCODE: [u8; 4] = [0x00, 0xEE, 0x1E, 0xDA];
///  for (i, val) in OPCODES.iter().enumerate() {
///      let opcode = build_opcode(&SPLIT_OPCODE, i * 2).expect("This will work.");
///      assert_eq!(opcode, *val);
///  }
/// # let err = MemoryError::OutOfRange { address: 4, len: SPLIT_OPCODE.len() };
/// # assert_eq!(Err(err), build_opcode(&SPLIT_OPCODE, 3));
/// ```
pub fn build_opcode(data: &[u8], pointer: usize) -> Result<Opcode, MemoryError> {
    // controlling that there is no illegal access here
    if pointer + 1 < data.len() {
        Ok(Opcode::from_be_bytes([data[pointer], data[pointer + 1]]))
    } else {
        Err(MemoryError::OutOfRange {
            address: pointer + 1,
            len: data.len(),
        })
    }
}

/// These are special traits used to filter out information
/// from opcodes
pub trait OpcodeTrait {
    /// the opcode family, so the highest nibble `T` of `TNNN`
    fn t(&self) -> u8;

    /// this is an opcode extractor for the opcode type `TNNN`
    /// - `NNN` is an address
    fn nnn(&self) -> Address;

    /// this is an opcode extractor for the opcode type `TXNN`
    /// - `X` is a register index
    /// - `NN` is a constant
    fn xnn(&self) -> (usize, u8);

    /// this is an opcode extractor for the opcode type `TXYN`
    /// - `X` and `Y` are register indices
    /// - `N` is a constant or opcode subtype
    fn xyn(&self) -> (usize, usize, u8);

    /// this is an opcode extractor for the register index `X` of `TXTT`
    fn x(&self) -> usize;
}

impl OpcodeTrait for Opcode {
    /// # Example
    /// ```rust
    /// # use chip8_vm::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.t(), 0x1);
    /// ```
    fn t(&self) -> u8 {
        ((self & OPCODE_MASK_F000) >> (3 * NIBBLE)) as u8
    }

    /// # Example
    /// ```rust
    /// # use chip8_vm::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.nnn(), 0xEDA)
    /// ```
    fn nnn(&self) -> Address {
        self & OPCODE_MASK_0FFF
    }

    /// # Example
    /// ```rust
    /// # use chip8_vm::opcode::*;
    /// const BASE_OPCODE: Opcode = 0x1EDA;
    /// assert_eq!(BASE_OPCODE.xnn(), (0xE, 0xDA));
    /// ```
    fn xnn(&self) -> (usize, u8) {
        (self.x(), (self & OPCODE_MASK_00FF) as u8)
    }

    /// ```rust
    /// # use chip8_vm::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.xyn(), (0xE, 0xD, 0xA));
    /// ```
    fn xyn(&self) -> (usize, usize, u8) {
        const MASK: u16 = OPCODE_MASK_00FF ^ OPCODE_MASK_000F;
        let y = ((self & MASK) >> NIBBLE) as usize;
        let n = (self & OPCODE_MASK_000F) as u8;
        (self.x(), y, n)
    }

    /// # Example
    /// ```rust
    /// # use chip8_vm::opcode::*;
    ///  const BASE_OPCODE: Opcode = 0x1EDA;
    ///  assert_eq!(BASE_OPCODE.x(), 0xE);
    /// ```
    fn x(&self) -> usize {
        ((self & OPCODE_MASK_0FFF & OPCODE_MASK_FF00) >> (2 * NIBBLE)) as usize
    }
}

/// `0NNN` sub operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum System {
    /// `00E0` clears the display
    Clear,
    /// `00EE` returns from the subroutine
    Return,
}

/// A register `X` and a constant `NN`, as used by `3XNN`, `4XNN`, `6XNN`, `7XNN` and `CXNN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterConst {
    pub x: usize,
    pub nn: u8,
}

/// Two registers `X` and `Y`, as used by `5XYN` and `9XYN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterPair {
    pub x: usize,
    pub y: usize,
}

/// `8XYT` sub operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOp {
    /// `8XY0` - `Vx = Vy`
    Assign,
    /// `8XY1` - `Vx |= Vy`
    Or,
    /// `8XY2` - `Vx &= Vy`
    And,
    /// `8XY3` - `Vx ^= Vy`
    Xor,
    /// `8XY4` - `Vx += Vy`, `VF` is the carry
    Add,
    /// `8XY5` - `Vx -= Vy`, `VF` is the no borrow flag
    Sub,
    /// `8XY6` - `Vx >>= 1`, `VF` is the shifted out bit
    ShiftRight,
    /// `8XY7` - `Vx = Vy - Vx`, `VF` is the no borrow flag
    SubReverse,
    /// `8XYE` - `Vx <<= 1`, `VF` is the shifted out bit
    ShiftLeft,
}

impl TryFrom<u8> for ArithmeticOp {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let op = match value {
            0x0 => ArithmeticOp::Assign,
            0x1 => ArithmeticOp::Or,
            0x2 => ArithmeticOp::And,
            0x3 => ArithmeticOp::Xor,
            0x4 => ArithmeticOp::Add,
            0x5 => ArithmeticOp::Sub,
            0x6 => ArithmeticOp::ShiftRight,
            0x7 => ArithmeticOp::SubReverse,
            0xE => ArithmeticOp::ShiftLeft,
            _ => return Err(()),
        };
        Ok(op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arithmetic {
    pub op: ArithmeticOp,
    pub x: usize,
    pub y: usize,
}

/// `DXYN` operands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    pub x: usize,
    pub y: usize,
    /// the height of the sprite in rows
    pub n: usize,
}

/// `EXTT` sub operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOp {
    /// `EX9E` skip if the key `Vx` is pressed
    Pressed,
    /// `EXA1` skip if the key `Vx` is released
    Released,
}

impl TryFrom<u8> for KeyOp {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0x9E => Ok(KeyOp::Pressed),
            0xA1 => Ok(KeyOp::Released),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeySkip {
    pub op: KeyOp,
    pub x: usize,
}

/// `FXTT` sub operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiscOp {
    /// `FX07`
    GetDelayTimer,
    /// `FX0A`
    AwaitKeyPress,
    /// `FX15`
    SetDelayTimer,
    /// `FX18`
    SetSoundTimer,
    /// `FX1E`
    AddToIndex,
    /// `FX29`
    FontGlyph,
    /// `FX33`
    StoreBcd,
    /// `FX55`
    StoreRegisters,
    /// `FX65`
    LoadRegisters,
}

impl TryFrom<u8> for MiscOp {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        let op = match value {
            0x07 => MiscOp::GetDelayTimer,
            0x0A => MiscOp::AwaitKeyPress,
            0x15 => MiscOp::SetDelayTimer,
            0x18 => MiscOp::SetSoundTimer,
            0x1E => MiscOp::AddToIndex,
            0x29 => MiscOp::FontGlyph,
            0x33 => MiscOp::StoreBcd,
            0x55 => MiscOp::StoreRegisters,
            0x65 => MiscOp::LoadRegisters,
            _ => return Err(()),
        };
        Ok(op)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Misc {
    pub op: MiscOp,
    pub x: usize,
}

/// A fully decoded instruction, one variant per opcode family (the highest nibble).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// `00E0`, `00EE`
    System(System),
    /// `1NNN`
    Jump(Address),
    /// `2NNN`
    Call(Address),
    /// `3XNN`
    SkipIfEqual(RegisterConst),
    /// `4XNN`
    SkipIfNotEqual(RegisterConst),
    /// `5XYN`, the low nibble is ignored
    SkipIfRegistersEqual(RegisterPair),
    /// `6XNN`
    Load(RegisterConst),
    /// `7XNN`
    Add(RegisterConst),
    /// `8XYT`
    Arithmetic(Arithmetic),
    /// `9XYN`, the low nibble is ignored
    SkipIfRegistersNotEqual(RegisterPair),
    /// `ANNN`
    SetIndex(Address),
    /// `BNNN`
    JumpOffset(Address),
    /// `CXNN`
    Random(RegisterConst),
    /// `DXYN`
    Draw(Sprite),
    /// `EX9E`, `EXA1`
    KeySkip(KeySkip),
    /// `FXTT`
    Misc(Misc),
}

impl TryFrom<Opcode> for Instruction {
    type Error = OpcodeError;

    fn try_from(value: Opcode) -> Result<Self, Self::Error> {
        let invalid = |_| OpcodeError::InvalidOpcode(value);

        let (x, nn) = value.xnn();
        let (_, y, n) = value.xyn();
        let nnn = value.nnn();

        let instruction = match value.t() {
            0x0 => match value {
                0x00E0 => Instruction::System(System::Clear),
                0x00EE => Instruction::System(System::Return),
                _ => return Err(OpcodeError::InvalidOpcode(value)),
            },
            0x1 => Instruction::Jump(nnn),
            0x2 => Instruction::Call(nnn),
            0x3 => Instruction::SkipIfEqual(RegisterConst { x, nn }),
            0x4 => Instruction::SkipIfNotEqual(RegisterConst { x, nn }),
            0x5 => Instruction::SkipIfRegistersEqual(RegisterPair { x, y }),
            0x6 => Instruction::Load(RegisterConst { x, nn }),
            0x7 => Instruction::Add(RegisterConst { x, nn }),
            0x8 => Instruction::Arithmetic(Arithmetic {
                op: ArithmeticOp::try_from(n).map_err(invalid)?,
                x,
                y,
            }),
            0x9 => Instruction::SkipIfRegistersNotEqual(RegisterPair { x, y }),
            0xA => Instruction::SetIndex(nnn),
            0xB => Instruction::JumpOffset(nnn),
            0xC => Instruction::Random(RegisterConst { x, nn }),
            0xD => Instruction::Draw(Sprite {
                x,
                y,
                n: n as usize,
            }),
            0xE => Instruction::KeySkip(KeySkip {
                op: KeyOp::try_from(nn).map_err(invalid)?,
                x,
            }),
            0xF => Instruction::Misc(Misc {
                op: MiscOp::try_from(nn).map_err(invalid)?,
                x,
            }),
            _ => return Err(OpcodeError::InvalidOpcode(value)),
        };
        Ok(instruction)
    }
}

/// Assembly like mnemonics, mainly used for tracing.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::System(System::Clear) => write!(f, "CLS"),
            Instruction::System(System::Return) => write!(f, "RET"),
            Instruction::Jump(nnn) => write!(f, "JP {:#05X}", nnn),
            Instruction::Call(nnn) => write!(f, "CALL {:#05X}", nnn),
            Instruction::SkipIfEqual(RegisterConst { x, nn }) => {
                write!(f, "SE V{:X}, {:#04X}", x, nn)
            }
            Instruction::SkipIfNotEqual(RegisterConst { x, nn }) => {
                write!(f, "SNE V{:X}, {:#04X}", x, nn)
            }
            Instruction::SkipIfRegistersEqual(RegisterPair { x, y }) => {
                write!(f, "SE V{:X}, V{:X}", x, y)
            }
            Instruction::Load(RegisterConst { x, nn }) => write!(f, "LD V{:X}, {:#04X}", x, nn),
            Instruction::Add(RegisterConst { x, nn }) => write!(f, "ADD V{:X}, {:#04X}", x, nn),
            Instruction::Arithmetic(Arithmetic { op, x, y }) => {
                let name = match op {
                    ArithmeticOp::Assign => "LD",
                    ArithmeticOp::Or => "OR",
                    ArithmeticOp::And => "AND",
                    ArithmeticOp::Xor => "XOR",
                    ArithmeticOp::Add => "ADD",
                    ArithmeticOp::Sub => "SUB",
                    ArithmeticOp::ShiftRight => "SHR",
                    ArithmeticOp::SubReverse => "SUBN",
                    ArithmeticOp::ShiftLeft => "SHL",
                };
                write!(f, "{} V{:X}, V{:X}", name, x, y)
            }
            Instruction::SkipIfRegistersNotEqual(RegisterPair { x, y }) => {
                write!(f, "SNE V{:X}, V{:X}", x, y)
            }
            Instruction::SetIndex(nnn) => write!(f, "LD I, {:#05X}", nnn),
            Instruction::JumpOffset(nnn) => write!(f, "JP V0, {:#05X}", nnn),
            Instruction::Random(RegisterConst { x, nn }) => write!(f, "RND V{:X}, {:#04X}", x, nn),
            Instruction::Draw(Sprite { x, y, n }) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::KeySkip(KeySkip { op, x }) => match op {
                KeyOp::Pressed => write!(f, "SKP V{:X}", x),
                KeyOp::Released => write!(f, "SKNP V{:X}", x),
            },
            Instruction::Misc(Misc { op, x }) => match op {
                MiscOp::GetDelayTimer => write!(f, "LD V{:X}, DT", x),
                MiscOp::AwaitKeyPress => write!(f, "LD V{:X}, K", x),
                MiscOp::SetDelayTimer => write!(f, "LD DT, V{:X}", x),
                MiscOp::SetSoundTimer => write!(f, "LD ST, V{:X}", x),
                MiscOp::AddToIndex => write!(f, "ADD I, V{:X}", x),
                MiscOp::FontGlyph => write!(f, "LD F, V{:X}", x),
                MiscOp::StoreBcd => write!(f, "LD B, V{:X}", x),
                MiscOp::StoreRegisters => write!(f, "LD [I], V{:X}", x),
                MiscOp::LoadRegisters => write!(f, "LD V{:X}, [I]", x),
            },
        }
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents the program steps that the chip
/// can take.
pub enum ProgramCounterStep {
    /// Will not change the program counter
    None,
    /// Will move the program counter to the next instruction
    Next,
    /// Will skip the next instruction
    Skip,
    /// Will simply move the program counter to the given location.
    Jump(Address),
}

impl ProgramCounterStep {
    /// Will return a Skip if the condition is true.
    ///
    /// # Example
    /// ```rust
    /// # use chip8_vm::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::Next, ProgramCounterStep::cond(false));
    /// assert_eq!(ProgramCounterStep::Skip, ProgramCounterStep::cond(true));
    /// ```
    #[inline]
    pub fn cond(cond: bool) -> Self {
        if cond {
            ProgramCounterStep::Skip
        } else {
            ProgramCounterStep::Next
        }
    }

    /// The distance the step moves the program counter by, a jump is not
    /// relative and has none.
    ///
    /// # Example
    /// ```rust
    /// # use chip8_vm::opcode::ProgramCounterStep;
    /// assert_eq!(ProgramCounterStep::None.offset(), Some(0));
    /// assert_eq!(ProgramCounterStep::Skip.offset(), Some(4));
    /// assert_eq!(ProgramCounterStep::Jump(0x345).offset(), None);
    /// ```
    #[inline]
    pub fn offset(&self) -> Option<usize> {
        match *self {
            ProgramCounterStep::None => Some(0),
            ProgramCounterStep::Next => Some(memory::opcodes::SIZE),
            ProgramCounterStep::Skip => Some(2 * memory::opcodes::SIZE),
            ProgramCounterStep::Jump(_) => None,
        }
    }
}

/// Represents a step of the program counter
/// this requires the enum ProgramCounterStep
/// to work.
pub trait ProgramCounter {
    /// will move the program counter forward by a step, fails if the new
    /// location is outside of the memory.
    fn step(&mut self, step: ProgramCounterStep) -> Result<(), MemoryError>;
}

#[derive(Debug, PartialEq, Clone, Copy)]
/// Represents a command from the interpreter up to the driver.
pub enum Operation {
    /// If no action has to be taken.
    None,
    /// The chip is waiting for the next key press
    Wait,
    /// The display content has changed
    Draw,
}

/// These are the traits that have to be full filled for a working opcode
/// table.
///
/// This trait requires the implementation of the [`ProgramCounter`](ProgramCounter) trait, as
/// every handler only returns how the program counter shall move and [`calc`](ChipOpcodes::calc)
/// applies it afterwards.
pub trait ChipOpcodes: ProgramCounter {
    /// will calculate the programs step by a single instruction
    fn calc(&mut self, instruction: &Instruction) -> Result<Operation, ProcessError> {
        let mut operation = Operation::None;
        let mut step_op = |(step, op): (ProgramCounterStep, Operation)| {
            operation = op;
            step
        };

        let step = match *instruction {
            Instruction::System(op) => self.system(op).map(&mut step_op),
            Instruction::Jump(nnn) => self.jump(nnn),
            Instruction::Call(nnn) => self.call(nnn),
            Instruction::SkipIfEqual(op) => self.skip_if_equal(op),
            Instruction::SkipIfNotEqual(op) => self.skip_if_not_equal(op),
            Instruction::SkipIfRegistersEqual(op) => self.skip_if_registers_equal(op),
            Instruction::Load(op) => self.load(op),
            Instruction::Add(op) => self.add(op),
            Instruction::Arithmetic(op) => self.arithmetic(op),
            Instruction::SkipIfRegistersNotEqual(op) => self.skip_if_registers_not_equal(op),
            Instruction::SetIndex(nnn) => self.set_index(nnn),
            Instruction::JumpOffset(nnn) => self.jump_offset(nnn),
            Instruction::Random(op) => self.random(op),
            Instruction::Draw(op) => self.draw(op).map(&mut step_op),
            Instruction::KeySkip(op) => self.key_skip(op),
            Instruction::Misc(op) => self.misc(op).map(&mut step_op),
        }?;

        self.step(step)?;
        Ok(operation)
    }

    /// - `00E0` - Display  - `disp_clear()`        - Clears the screen.
    /// - `00EE` - Flow     - `return;`             - Returns from a subroutine.
    fn system(&mut self, op: System) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `1NNN` - Flow     - `goto NNN;`           - Jumps to address `NNN`.
    fn jump(&self, nnn: Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `2NNN` - Flow     - `*(0xNNN)()`          - Calls subroutine at `NNN`.
    fn call(&mut self, nnn: Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `3XNN` - Cond     - `if(Vx==NN)`          - Skips the next instruction if `VX` equals `NN`.
    fn skip_if_equal(&self, op: RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `4XNN` - Cond     - `if(Vx!=NN)`          - Skips the next instruction if `VX` doesn't equal `NN`.
    fn skip_if_not_equal(&self, op: RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `5XY0` - Cond     - `if(Vx==Vy)`          - Skips the next instruction if `VX` equals `VY`.
    fn skip_if_registers_equal(&self, op: RegisterPair)
        -> Result<ProgramCounterStep, ProcessError>;

    /// - `6XNN` - Const    - `Vx = NN`             - Sets `VX` to `NN`.
    fn load(&mut self, op: RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `7XNN` - Const    - `Vx += NN`            - Adds `NN` to `VX`. (Carry flag is not changed)
    fn add(&mut self, op: RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// A mutiuse opcode base for type `8XYT` (T is a sub opcode), see [`ArithmeticOp`].
    fn arithmetic(&mut self, op: Arithmetic) -> Result<ProgramCounterStep, ProcessError>;

    /// - `9XY0` - Cond     - `if(Vx!=Vy)`          - Skips the next instruction if `VX` doesn't equal `VY`.
    fn skip_if_registers_not_equal(
        &self,
        op: RegisterPair,
    ) -> Result<ProgramCounterStep, ProcessError>;

    /// - `ANNN` - MEM      - `I = NNN`             - Sets `I` to the address `NNN`.
    fn set_index(&mut self, nnn: Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `BNNN` - Flow     - `PC=V0+NNN`           - Jumps to the address `NNN` plus `V0`.
    fn jump_offset(&self, nnn: Address) -> Result<ProgramCounterStep, ProcessError>;

    /// - `CXNN` - Rand     - `Vx=rand()&NN`        - Sets `VX` to a random number and `NN`.
    fn random(&mut self, op: RegisterConst) -> Result<ProgramCounterStep, ProcessError>;

    /// - `DXYN` - Disp     - `draw(Vx,Vy,N)`       - Draws a sprite at coordinate `(VX, VY)` that has a width of `8` pixels and a height of `N` pixels. `VF` is set to `1` if any screen pixels are flipped from set to unset when the sprite is drawn, and to `0` if that doesn’t happen.
    fn draw(&mut self, op: Sprite) -> Result<(ProgramCounterStep, Operation), ProcessError>;

    /// - `EX9E` - KeyOp    - `if(key()==Vx)`       - Skips the next instruction if the key stored in `VX` is pressed.
    /// - `EXA1` - KeyOp    - `if(key()!=Vx)`       - Skips the next instruction if the key stored in `VX` isn't pressed.
    fn key_skip(&self, op: KeySkip) -> Result<ProgramCounterStep, ProcessError>;

    /// A multiuse opcode base for type `FXTT` (T is a sub opcode)
    ///
    /// - `FX07` - Timer    - `Vx = get_delay()`    - Sets `VX` to the value of the delay timer.
    /// - `FX0A` - KeyOp    - `Vx = get_key()`      - A key press is awaited, and then stored in `VX`.
    /// - `FX15` - Timer    - `delay_timer(Vx)`     - Sets the delay timer to `VX`.
    /// - `FX18` - Sound    - `sound_timer(Vx)`     - Sets the sound timer to `VX`.
    /// - `FX1E` - MEM      - `I +=Vx`              - Adds `VX` to `I`. `VF` is not affected.
    /// - `FX29` - MEM      - `I=sprite_addr[Vx]`   - Sets `I` to the location of the font glyph for the low nibble of `VX`.
    /// - `FX33` - BCD      - `set_BCD(Vx)`         - Stores the hundreds, tens and ones of `VX` at `I`, `I+1` and `I+2`.
    /// - `FX55` - MEM      - `reg_dump(Vx,&I)`     - Stores `V0` to `VX` (including `VX`) in memory starting at address `I`.
    /// - `FX65` - MEM      - `reg_load(Vx,&I)`     - Fills `V0` to `VX` (including `VX`) with values from memory starting at address `I`.
    fn misc(&mut self, op: Misc) -> Result<(ProgramCounterStep, Operation), ProcessError>;
}
