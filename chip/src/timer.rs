//! The timer unit of the chip and the wall clock worker used by the [`runner`](crate::runner).
use std::{
    sync::{
        mpsc::{self, RecvTimeoutError, SyncSender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

/// Represents a timer inside of the chip
/// infrastruture, it will count down to
/// zero from what ever number given.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    value: u8,
}

impl Timer {
    /// Will create a new timer with the given value.
    pub fn new(value: u8) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: u8) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> u8 {
        self.value
    }

    /// Counts down by one, stopping at zero.
    pub fn tick(&mut self) {
        self.value = self.value.saturating_sub(1);
    }
}

/// Both timers of the chip. They are only ever changed by opcodes and by
/// [`tick`](Timers::tick), the driver decides when a tick is due.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Timers {
    /// Delay timer: This timer is intended to be used for timing the events of games. Its value
    /// can be set and read.
    pub delay: Timer,
    /// Sound timer: This timer is used for sound effects. When its value is nonzero, a beeping
    /// sound is expected from the frontend.
    pub sound: Timer,
}

impl Timers {
    pub fn tick(&mut self) {
        self.delay.tick();
        self.sound.tick();
    }
}

/// Reconciles executed cycles with elapsed timer ticks.
///
/// After `n` cycles exactly `n * timer_hertz / instructions_per_second` ticks
/// are due, so the ratio holds even if it is not a whole number. Whether the
/// due ticks are actually issued is up to the driver, only issued ticks are
/// counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    instructions_per_second: u64,
    timer_hertz: u64,
    cycles: u64,
    /// ticks that became due by the executed cycles
    scheduled: u64,
    ticks: u64,
}

impl Clock {
    /// Both rates have to be bigger then zero, see [`Config::new`](crate::config::Config::new).
    pub fn new(instructions_per_second: u32, timer_hertz: u32) -> Self {
        debug_assert!(instructions_per_second > 0 && timer_hertz > 0);
        Self {
            instructions_per_second: instructions_per_second.max(1) as u64,
            timer_hertz: timer_hertz as u64,
            cycles: 0,
            scheduled: 0,
            ticks: 0,
        }
    }

    /// Registers a single executed cycle and returns the amount of timer
    /// ticks that became due by it.
    pub fn cycle(&mut self) -> u64 {
        self.cycles += 1;
        let due = self.cycles * self.timer_hertz / self.instructions_per_second;
        let ticks = due - self.scheduled;
        self.scheduled = due;
        ticks
    }

    /// Registers an issued timer tick.
    pub fn tick(&mut self) {
        self.ticks += 1;
    }

    /// The amount of executed cycles
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// The amount of timer ticks issued
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

/// A worker that calls a callback at a fixed interval, until stopped.
pub trait TimedWorker {
    fn new() -> Self;
    fn start<T>(&mut self, callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static;
    fn stop(&mut self);
    fn is_alive(&self) -> bool;
}

/// Is the internal worker, that exists on the
/// second thread.
pub struct Worker {
    /// Contains the actuall thread, that is running.
    thread: Option<JoinHandle<()>>,
    /// Contains the sync sender used to gracefull shutdown the thread.
    shutdown: Option<SyncSender<()>>,
    /// Counts the actuall threads used (this is never more then 2, but
    /// is simple to use.) It uses an ```()``` so that it doesn't use
    /// up too much memory.
    alive: Arc<()>,
}

impl TimedWorker for Worker {
    /// Will initialize the new worker.
    fn new() -> Self {
        Self {
            thread: None,
            shutdown: None,
            alive: Arc::new(()),
        }
    }

    /// Will start the worker that will run the callback function
    /// all duration.
    /// Attention the timer assumes the callback will finish
    /// calculation faster then the interval.
    fn start<T>(&mut self, mut callback: T, interval: Duration)
    where
        T: Send + FnMut() + 'static,
    {
        // only a single thread per worker
        self.stop();

        let (send, recv) = mpsc::sync_channel::<()>(1);
        let alive = self.alive.clone();
        let thread = thread::spawn(move || {
            let _alive = alive;
            let mut timeout = interval;
            loop {
                match recv.recv_timeout(timeout) {
                    Err(RecvTimeoutError::Timeout) => {
                        let start = Instant::now();

                        callback();

                        // make sure the system will at most wait the interval
                        timeout = interval
                            .checked_sub(start.elapsed())
                            .unwrap_or_else(|| Duration::from_secs(0));
                    }
                    Ok(_) | Err(_) => break, // shutdown
                }
            }
        });

        self.thread = Some(thread);
        self.shutdown = Some(send);
    }

    /// Will stop the worker.
    fn stop(&mut self) {
        // Will stop the worker, in two steps one by sending an empty message
        // and second by droping the only sender for the given receiver.
        if let Some(sender) = self.shutdown.take() {
            // the thread might already be gone, then there is nobody to notify
            let _ = sender.send(());
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log::error!("The worker thread panicked.");
            }
        }
    }

    /// Checks if the thread is alive.
    fn is_alive(&self) -> bool {
        Arc::strong_count(&self.alive) > 1
    }
}

impl Drop for Worker {
    /// Will drop the worker
    fn drop(&mut self) {
        self.stop();
    }
}
