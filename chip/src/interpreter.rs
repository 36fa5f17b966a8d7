//! The interpreter driver, it owns the machine state and decides when
//! timers tick, how faults are handled and how `FX0A` waits for keys.
use std::thread;

use crate::{
    chip8::ChipSet,
    config::{Config, FaultPolicy, KeyWaitStrategy, TimerSource},
    devices::KeyboardCommands,
    opcode::Operation,
    resources::Rom,
    timer::Clock,
    ProcessError, RomError,
};

/// The state of the driver, once halted it stays halted until a new
/// program is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
}

pub struct Interpreter {
    chip: ChipSet,
    config: Config,
    clock: Clock,
    state: State,
}

impl Interpreter {
    /// Will create a new interpreter without a program
    pub fn new(config: Config) -> Self {
        let mut chip = ChipSet::new();
        chip.set_address_mode(config.address_mode);

        Self {
            chip,
            clock: Clock::new(config.instructions_per_second(), config.timer_hertz()),
            config,
            state: State::Running,
        }
    }

    /// Will create a new interpreter with the given rom loaded
    pub fn with_rom(config: Config, rom: &Rom) -> Self {
        let mut interpreter = Self::new(config);
        interpreter.load(rom);
        interpreter
    }

    /// Will load the rom, resetting the machine, the counters and the state.
    /// The address mode of the configuration is applied again.
    pub fn load(&mut self, rom: &Rom) {
        self.chip.load(rom);
        self.chip.set_address_mode(self.config.address_mode);
        self.clock = Clock::new(
            self.config.instructions_per_second(),
            self.config.timer_hertz(),
        );
        self.state = State::Running;
    }

    /// Will load raw program bytes, see [`load`](Interpreter::load).
    pub fn load_bytes(&mut self, name: &str, data: &[u8]) -> Result<(), RomError> {
        let rom = Rom::new(name, data)?;
        self.load(&rom);
        Ok(())
    }

    /// Will run a single cycle without an input collaborator.
    ///
    /// A waiting `FX0A` is always retried here, even with the
    /// [`Block`](KeyWaitStrategy::Block) strategy, as there is nothing to poll.
    pub fn cycle(&mut self) -> Result<Operation, ProcessError> {
        self.step(None)
    }

    /// Will read the keyboard and run a single cycle.
    pub fn cycle_with<K: KeyboardCommands>(
        &mut self,
        keyboard: &mut K,
    ) -> Result<Operation, ProcessError> {
        let keyboard: &mut dyn KeyboardCommands = keyboard;
        self.poll_keyboard(keyboard)?;
        self.step(Some(keyboard))
    }

    /// Will read the keyboard once and run the cycles of a single frame.
    ///
    /// Returns [`Operation::Draw`] if any cycle of the frame changed the
    /// display.
    ///
    /// With [`FaultPolicy::Skip`] the frame runs all of its cycles and ticks
    /// the timers, the first skipped fault is returned afterwards. Once the
    /// interpreter halted the frame ends right away without a timer tick.
    pub fn run_frame<K: KeyboardCommands>(
        &mut self,
        keyboard: &mut K,
    ) -> Result<Operation, ProcessError> {
        let keyboard: &mut dyn KeyboardCommands = keyboard;
        self.poll_keyboard(keyboard)?;

        let mut frame = Operation::None;
        let mut fault = None;
        for _ in 0..self.config.cycles_per_frame() {
            match self.step(Some(&mut *keyboard)) {
                Ok(Operation::Draw) => frame = Operation::Draw,
                Ok(Operation::Wait) if frame == Operation::None => frame = Operation::Wait,
                Ok(_) => {}
                Err(err) if self.is_running() => {
                    fault.get_or_insert(err);
                }
                Err(err) => return Err(err),
            }
        }

        if self.config.timer_source == TimerSource::Frame {
            self.tick_timers();
        }

        match fault {
            Some(err) => Err(err),
            None => Ok(frame),
        }
    }

    /// Will count the timers down by a single tick.
    pub fn tick_timers(&mut self) {
        self.chip.tick_timers();
        self.clock.tick();
    }

    /// Will stop the interpreter, every following cycle fails.
    pub fn halt(&mut self) {
        if self.state == State::Running {
            log::debug!("halting after {} cycles", self.clock.cycles());
        }
        self.state = State::Halted;
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == State::Running
    }

    /// The amount of executed cycles
    pub fn cycles(&self) -> u64 {
        self.clock.cycles()
    }

    /// The amount of timer ticks
    pub fn ticks(&self) -> u64 {
        self.clock.ticks()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn chip(&self) -> &ChipSet {
        &self.chip
    }

    pub fn chip_mut(&mut self) -> &mut ChipSet {
        &mut self.chip
    }

    fn step(
        &mut self,
        keyboard: Option<&mut dyn KeyboardCommands>,
    ) -> Result<Operation, ProcessError> {
        if self.state == State::Halted {
            return Err(ProcessError::Halted);
        }

        let result = match (self.chip.next(), keyboard) {
            (Ok(Operation::Wait), Some(keyboard))
                if self.config.key_wait == KeyWaitStrategy::Block =>
            {
                self.block_on_key(keyboard)
            }
            (result, _) => result,
        };

        match result {
            Ok(operation) => {
                self.advance_clock();
                Ok(operation)
            }
            Err(ProcessError::Halted) => Err(ProcessError::Halted),
            Err(err) => self.fault(err),
        }
    }

    /// Keeps polling the keyboard until the waiting `FX0A` got its key.
    fn block_on_key(
        &mut self,
        keyboard: &mut dyn KeyboardCommands,
    ) -> Result<Operation, ProcessError> {
        loop {
            self.poll_keyboard(keyboard)?;
            if self.chip.resolve_key_wait()? {
                return Ok(Operation::None);
            }
            thread::yield_now();
        }
    }

    fn poll_keyboard(&mut self, keyboard: &mut dyn KeyboardCommands) -> Result<(), ProcessError> {
        match keyboard.get_keyboard() {
            Some(keys) => {
                self.chip.set_keyboard(&keys);
                Ok(())
            }
            None => {
                log::debug!("the keyboard input was closed");
                self.halt();
                Err(ProcessError::Halted)
            }
        }
    }

    fn advance_clock(&mut self) {
        let due = self.clock.cycle();
        if self.config.timer_source == TimerSource::Cycles {
            for _ in 0..due {
                self.tick_timers();
            }
        }
    }

    fn fault(&mut self, err: ProcessError) -> Result<Operation, ProcessError> {
        let pc = self.chip.get_program_counter();
        match self.config.fault_policy {
            FaultPolicy::Halt => {
                log::error!("{:#05X}: {}", pc, err);
                self.halt();
            }
            FaultPolicy::Skip => match self.chip.skip_instruction() {
                Ok(()) => {
                    log::warn!("{:#05X}: {}, skipping the instruction", pc, err);
                    self.advance_clock();
                }
                Err(skip) => {
                    log::error!("{:#05X}: {}, cannot be skipped: {}", pc, err, skip);
                    self.halt();
                }
            },
        }
        Err(err)
    }
}
