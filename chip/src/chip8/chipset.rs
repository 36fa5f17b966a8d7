use std::convert::TryFrom;

use {
    crate::{
        config::AddressMode,
        definitions::{cpu, display, memory},
        devices::{Keyboard, Keys},
        opcode::{
            Address, ChipOpcodes, Instruction, Opcode, Operation, ProgramCounter,
            ProgramCounterStep,
        },
        resources::Rom,
        timer::Timers,
        MemoryError, ProcessError, RomError, StackError,
    },
    rand::RngCore,
    tinyvec::ArrayVec,
};

/// The ChipSet struct represents the current state
/// of the system, it contains all the structures
/// needed for emulating an instant on the
/// Chip8 CPU.
pub struct ChipSet {
    /// name of the loaded rom
    pub(super) name: String,
    /// the last fetched opcode, all two bytes long and stored big-endian
    pub(super) opcode: Opcode,
    /// - `0x000-0x04F` - The built in `4x5` pixel font set (`0-F`)
    /// - `0x050-0x1FF` - Reserved for the interpreter
    /// - `0x200-0xFFF` - Program ROM and work RAM
    pub(super) memory: Vec<u8>,
    /// `8-bit` data registers named `V0` to `VF`. The `VF` register doubles as a flag for some
    /// instructions; thus, it should be avoided. In an addition operation, `VF` is the carry flag,
    /// while in subtraction, it is the "no borrow" flag. In the draw instruction `VF` is set upon
    /// pixel collision.
    pub(super) registers: [u8; cpu::register::SIZE],
    /// The index for the register, this is a special register entry
    /// called index `I`
    pub(super) index_register: Address,
    /// The program counter is a CPU register in the computer processor which has the address of the
    /// next instruction to be executed from memory.
    pub(super) program_counter: Address,
    /// The stack is only used to store return addresses when subroutines are called. The original
    /// [RCA 1802](https://de.wikipedia.org/wiki/RCA1802) version allocated `48` bytes for up to
    /// `12` levels of nesting; modern implementations usually have more.
    /// (here we are using `32`)
    pub(super) stack: ArrayVec<[Address; cpu::stack::SIZE]>,
    /// The delay and the sound timer, both count down at 60 hertz, until they reach 0.
    pub(super) timers: Timers,
    /// The graphics of the Chip 8 are black and white and the screen has a total of `2048` pixels
    /// `(64 x 32)`, stored row by row.
    pub(super) display: Vec<Vec<bool>>,
    /// Is set whenever the display content changed, until the renderer consumed it.
    pub(super) redraw: bool,
    /// The hex keyboard with its `16` keys, as reported by the input collaborator.
    pub(super) keyboard: Keyboard,
    /// The register `X` of an `FX0A` that is still waiting for its key press.
    pub(super) waiting: Option<usize>,
    /// How addresses past the end of the memory are handled.
    pub(super) address_mode: AddressMode,
    /// This stores the random number generator, used by the chipset.
    /// It is stored into the chipset, so as to enable simple mocking
    /// of the given type.
    pub(super) rng: Box<dyn RngCore + Send>,
}

impl Default for ChipSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ChipSet {
    /// will create a new chipset object without a program
    pub fn new() -> Self {
        let mut chip = Self {
            name: String::new(),
            opcode: 0,
            memory: vec![0; memory::SIZE],
            registers: [0; cpu::register::SIZE],
            index_register: 0,
            program_counter: cpu::PROGRAM_COUNTER,
            stack: ArrayVec::new(),
            timers: Timers::default(),
            display: vec![vec![false; display::WIDTH]; display::HEIGHT],
            redraw: false,
            keyboard: Keyboard::new(),
            waiting: None,
            address_mode: AddressMode::default(),
            rng: Box::new(rand::rngs::OsRng),
        };
        chip.reset();
        chip
    }

    /// will create a new chipset with the given rom loaded
    pub fn with_rom(rom: &Rom) -> Self {
        let mut chip = Self::new();
        chip.load(rom);
        chip
    }

    /// Will reset the machine state and install the rom behind the interpreter area.
    pub fn load(&mut self, rom: &Rom) {
        self.reset();

        // the rom has been checked to fit on creation
        let data = rom.get_data();
        let program = &mut self.memory[memory::PROGRAM_START..];
        for byte in program.iter_mut() {
            *byte = 0;
        }
        program[..data.len()].copy_from_slice(data);

        self.name = rom.get_name().to_string();
        log::debug!("loaded rom '{}' with {} bytes", self.name, data.len());
    }

    /// Will load raw program bytes, an image that does not fit is rejected
    /// before anything is changed.
    pub fn load_bytes(&mut self, name: &str, data: &[u8]) -> Result<(), RomError> {
        let rom = Rom::new(name, data)?;
        self.load(&rom);
        Ok(())
    }

    /// Reinitializes the registers, the stack, the timers and the display and
    /// installs the font. The program memory stays untouched.
    pub fn reset(&mut self) {
        self.opcode = 0;
        self.registers = [0; cpu::register::SIZE];
        self.index_register = 0;
        self.program_counter = cpu::PROGRAM_COUNTER;
        self.stack.clear();
        self.timers = Timers::default();
        for row in self.display.iter_mut() {
            for pixel in row.iter_mut() {
                *pixel = false;
            }
        }
        self.redraw = true;
        self.waiting = None;

        // load fonts
        self.memory[display::fontset::LOCATION
            ..(display::fontset::LOCATION + display::fontset::FONTSET.len())]
            .copy_from_slice(&display::fontset::FONTSET);
    }

    /// Replaces the random number generator used by `CXNN`.
    pub fn set_rng(&mut self, rng: Box<dyn RngCore + Send>) {
        self.rng = rng;
    }

    pub fn set_address_mode(&mut self, mode: AddressMode) {
        self.address_mode = mode;
    }

    pub fn get_address_mode(&self) -> AddressMode {
        self.address_mode
    }

    /// will get the next opcode from memory
    pub(super) fn set_opcode(&mut self) -> Result<(), MemoryError> {
        let pc = self.program_counter as usize;
        let high = self.address(pc, 0)?;
        let low = self.address(pc, 1)?;
        self.opcode = Opcode::from_be_bytes([self.memory[high], self.memory[low]]);
        Ok(())
    }

    /// will advance the program by a single step
    pub fn next(&mut self) -> Result<Operation, ProcessError> {
        // get next opcode
        self.set_opcode()?;
        let instruction = Instruction::try_from(self.opcode)?;
        log::trace!(
            "{:#06X}: {:#06X} {}",
            self.program_counter,
            self.opcode,
            instruction
        );
        // run the opcode
        self.calc(&instruction)
    }

    /// Will move past the instruction at the program counter, dropping a
    /// pending key wait.
    pub fn skip_instruction(&mut self) -> Result<(), MemoryError> {
        self.waiting = None;
        self.step(ProgramCounterStep::Next)
    }

    /// Will write keyboard data into internal keyboard representation.
    pub fn set_keyboard(&mut self, keys: &Keys) {
        self.keyboard.set_mult(keys);
    }

    /// Will set the value of the given key
    pub fn set_key(&mut self, key: usize, to: bool) {
        self.keyboard.set_key(key, to)
    }

    /// Will toggle the given key
    pub fn toggle_key(&mut self, key: usize) {
        self.keyboard.toggle_key(key)
    }

    /// Will get the current state of the keyboard
    pub fn get_keyboard(&self) -> &Keys {
        self.keyboard.get_keys()
    }

    /// If an `FX0A` is waiting for its key press
    pub fn is_waiting(&self) -> bool {
        self.waiting.is_some()
    }

    /// Completes a waiting `FX0A` if a key was pressed since the wait began,
    /// the program counter moves on to the next instruction.
    pub fn resolve_key_wait(&mut self) -> Result<bool, MemoryError> {
        if self.take_awaited_key() {
            self.step(ProgramCounterStep::Next)?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Writes the pressed key into the waiting register.
    pub(super) fn take_awaited_key(&mut self) -> bool {
        let x = match self.waiting {
            Some(x) => x,
            None => return false,
        };

        match self.keyboard.take_press() {
            Some(key) => {
                log::debug!("key {:#X} pressed, stored in V{:X}", key, x);
                self.registers[x] = key as u8;
                self.waiting = None;
                true
            }
            None => false,
        }
    }

    /// will return the sound timer
    pub fn get_sound_timer(&self) -> u8 {
        self.timers.sound.get_value()
    }

    /// will return the delay timer
    pub fn get_delay_timer(&self) -> u8 {
        self.timers.delay.get_value()
    }

    /// Counts both timers down by one.
    pub fn tick_timers(&mut self) {
        self.timers.tick();
    }

    /// Will return a immutable slice of the current display configuration
    pub fn get_display(&self) -> &[Vec<bool>] {
        &self.display[..]
    }

    /// If the display changed since the last [`clear_redraw`](ChipSet::clear_redraw).
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Marks the display content as consumed.
    pub fn clear_redraw(&mut self) {
        self.redraw = false;
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_program_counter(&self) -> Address {
        self.program_counter
    }

    pub fn get_index_register(&self) -> Address {
        self.index_register
    }

    pub fn get_registers(&self) -> &[u8] {
        &self.registers
    }

    pub fn get_memory(&self) -> &[u8] {
        &self.memory
    }

    /// The return addresses, the most recent call last
    pub fn get_stack(&self) -> &[Address] {
        &self.stack
    }

    /// Will resolve the address `base + offset` according to the address mode.
    pub(super) fn address(&self, base: usize, offset: usize) -> Result<usize, MemoryError> {
        let address = base + offset;
        match self.address_mode {
            AddressMode::Wrap => Ok(address % memory::SIZE),
            AddressMode::Strict if address < memory::SIZE => Ok(address),
            AddressMode::Strict => Err(MemoryError::OutOfRange {
                address,
                len: memory::SIZE,
            }),
        }
    }

    /// Will resolve `len` consecutive addresses starting at `base`, so that
    /// all of them are checked before any of them is used.
    pub(super) fn addresses(&self, base: usize, len: usize) -> Result<Vec<usize>, MemoryError> {
        (0..len).map(|offset| self.address(base, offset)).collect()
    }

    /// Will push the current pointer to the stack
    pub(super) fn push_stack(&mut self, pointer: Address) -> Result<(), StackError> {
        if self.stack.len() == self.stack.capacity() {
            Err(StackError::Full)
        } else {
            self.stack.push(pointer);
            Ok(())
        }
    }

    /// Will pop from the stack
    pub(super) fn pop_stack(&mut self) -> Result<Address, StackError> {
        self.stack.pop().ok_or(StackError::Empty)
    }
}

impl ProgramCounter for ChipSet {
    fn step(&mut self, step: ProgramCounterStep) -> Result<(), MemoryError> {
        self.program_counter = match step {
            ProgramCounterStep::Jump(pointer) => pointer,
            relative => {
                let offset = relative.offset().unwrap_or_default();
                self.address(self.program_counter as usize, offset)? as Address
            }
        };
        Ok(())
    }
}
