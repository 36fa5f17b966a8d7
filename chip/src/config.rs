//! The configuration of the interpreter driver.
use crate::{
    definitions::{cpu, frame, timer},
    ConfigError,
};

/// What drives the 60 hertz timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSource {
    /// The timers are ticked from the executed cycle count, with the ratio
    /// `instructions_per_second / timer_hertz`.
    Cycles,
    /// The timers are ticked once per frame by [`run_frame`](crate::interpreter::Interpreter::run_frame).
    Frame,
}

/// How `FX0A` waits for a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWaitStrategy {
    /// The program counter stays on `FX0A`, every cycle retries it until a key
    /// was pressed. Control returns to the caller after each cycle.
    Retry,
    /// The driver keeps polling the keyboard inside the same cycle until a key
    /// was pressed.
    Block,
}

/// What the driver does with a faulted cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultPolicy {
    /// The interpreter transitions to halted.
    Halt,
    /// The fault is logged and the offending instruction is skipped.
    Skip,
}

/// How addresses beyond the end of memory are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressMode {
    /// Every computed address is taken modulo the memory size.
    Wrap,
    /// An address beyond the memory is a [`MemoryError`](crate::MemoryError).
    Strict,
}

impl Default for AddressMode {
    fn default() -> Self {
        AddressMode::Wrap
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    instructions_per_second: u32,
    timer_hertz: u32,
    frame_rate: u32,
    pub timer_source: TimerSource,
    pub key_wait: KeyWaitStrategy,
    pub fault_policy: FaultPolicy,
    pub address_mode: AddressMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instructions_per_second: cpu::HERTZ,
            timer_hertz: timer::HERTZ,
            frame_rate: frame::RATE,
            timer_source: TimerSource::Cycles,
            key_wait: KeyWaitStrategy::Retry,
            fault_policy: FaultPolicy::Halt,
            address_mode: AddressMode::Wrap,
        }
    }
}

impl Config {
    /// Will create a config with the given rates, all of them have to be
    /// bigger then zero.
    ///
    /// # Example
    /// ```rust
    /// # use chip8_vm::{config::Config, ConfigError};
    /// let config = Config::new(600, 60, 60).expect("valid rates");
    /// assert_eq!(config.cycles_per_frame(), 10);
    /// assert_eq!(Config::new(0, 60, 60), Err(ConfigError::ZeroRate("instruction rate")));
    /// ```
    pub fn new(
        instructions_per_second: u32,
        timer_hertz: u32,
        frame_rate: u32,
    ) -> Result<Self, ConfigError> {
        let check = |value: u32, name| {
            if value == 0 {
                Err(ConfigError::ZeroRate(name))
            } else {
                Ok(value)
            }
        };

        Ok(Self {
            instructions_per_second: check(instructions_per_second, "instruction rate")?,
            timer_hertz: check(timer_hertz, "timer rate")?,
            frame_rate: check(frame_rate, "frame rate")?,
            ..Self::default()
        })
    }

    pub fn with_timer_source(mut self, source: TimerSource) -> Self {
        self.timer_source = source;
        self
    }

    pub fn with_key_wait(mut self, strategy: KeyWaitStrategy) -> Self {
        self.key_wait = strategy;
        self
    }

    pub fn with_fault_policy(mut self, policy: FaultPolicy) -> Self {
        self.fault_policy = policy;
        self
    }

    pub fn with_address_mode(mut self, mode: AddressMode) -> Self {
        self.address_mode = mode;
        self
    }

    pub fn instructions_per_second(&self) -> u32 {
        self.instructions_per_second
    }

    pub fn timer_hertz(&self) -> u32 {
        self.timer_hertz
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    /// The amount of cycles a single frame runs, at least one.
    pub fn cycles_per_frame(&self) -> u32 {
        (self.instructions_per_second / self.frame_rate).max(1)
    }
}
