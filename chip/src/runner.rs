//! A fixed rate frame loop, that wires the [`Interpreter`] to the display and
//! keyboard of the embedding application.
use std::{sync::Arc, time::Duration};

use parking_lot::Mutex;

use crate::{
    config::Config,
    devices::{DisplayCommands, KeyboardCommands},
    interpreter::Interpreter,
    resources::Rom,
    timer::TimedWorker,
};

pub struct Runner<W: TimedWorker> {
    worker: W,
    interpreter: Arc<Mutex<Interpreter>>,
}

impl<W: TimedWorker> Runner<W> {
    /// Will start running the rom on the worker, one frame per
    /// `1 / frame_rate` seconds. Every frame reads the keyboard, runs the
    /// cycles of the frame and hands the display over if it changed.
    pub fn start<D, K>(mut display: D, mut keyboard: K, rom: &Rom, config: Config) -> Self
    where
        D: DisplayCommands + Send + 'static,
        K: KeyboardCommands + Send + 'static,
    {
        let interpreter = Arc::new(Mutex::new(Interpreter::with_rom(config, rom)));
        log::debug!(
            "starting '{}' with {} cycles per frame",
            rom.get_name(),
            config.cycles_per_frame()
        );

        let shared = interpreter.clone();
        let frame = move || {
            let mut interpreter = shared.lock();
            if !interpreter.is_running() {
                return;
            }

            // faults were already logged by the interpreter
            if let Err(err) = interpreter.run_frame(&mut keyboard) {
                log::trace!("frame ended with '{}'", err);
            }

            let chip = interpreter.chip_mut();
            if chip.needs_redraw() {
                display.display(chip.get_display());
                chip.clear_redraw();
            }
        };

        let mut worker = W::new();
        worker.start(frame, Duration::from_secs(1) / config.frame_rate());

        Self {
            worker,
            interpreter,
        }
    }

    /// The interpreter shared with the worker
    pub fn interpreter(&self) -> Arc<Mutex<Interpreter>> {
        self.interpreter.clone()
    }

    /// Will halt the interpreter, the worker keeps running idle frames.
    pub fn halt(&self) {
        self.interpreter.lock().halt();
    }

    /// Will stop the worker.
    pub fn stop(&mut self) {
        self.worker.stop();
    }

    pub fn is_alive(&self) -> bool {
        self.worker.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicUsize, Ordering},
        thread,
    };

    use super::*;
    use crate::{
        definitions::{display, keyboard},
        devices::MockKeyboardCommands,
        timer::Worker,
    };

    /// Counts the displayed frames, the mock can not be inspected once it
    /// was moved into the worker.
    struct CountingDisplay(Arc<AtomicUsize>);

    impl DisplayCommands for CountingDisplay {
        fn display(&mut self, pixels: &[Vec<bool>]) {
            assert_eq!(pixels.len(), display::HEIGHT);
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn released_keyboard() -> MockKeyboardCommands {
        let mut mock = MockKeyboardCommands::new();
        mock.expect_get_keyboard()
            .returning(|| Some([false; keyboard::SIZE]));
        mock
    }

    #[test]
    fn test_runner() {
        let frames = Arc::new(AtomicUsize::new(0));
        // clear the screen and spin
        let rom = Rom::new("CLEAR", vec![0x00, 0xE0, 0x12, 0x02]).unwrap();
        let config = Config::new(1000, 60, 100).unwrap();

        let mut runner: Runner<Worker> = Runner::start(
            CountingDisplay(frames.clone()),
            released_keyboard(),
            &rom,
            config,
        );
        assert!(runner.is_alive());

        thread::sleep(Duration::from_millis(200));
        runner.stop();
        assert!(!runner.is_alive());

        // only the first frame changed the display
        assert_eq!(frames.load(Ordering::SeqCst), 1);

        let interpreter = runner.interpreter();
        let interpreter = interpreter.lock();
        assert!(interpreter.cycles() >= 10);
        assert_eq!(interpreter.cycles() % 10, 0);
        assert_eq!(interpreter.chip().get_program_counter(), 0x202);
    }

    #[test]
    fn test_runner_halt() {
        let rom = Rom::new("SPIN", vec![0x12, 0x00]).unwrap();
        let config = Config::new(100, 60, 100).unwrap();

        let mut runner: Runner<Worker> = Runner::start(
            CountingDisplay(Arc::new(AtomicUsize::new(0))),
            released_keyboard(),
            &rom,
            config,
        );
        runner.halt();
        let cycles = runner.interpreter().lock().cycles();

        thread::sleep(Duration::from_millis(50));
        assert_eq!(runner.interpreter().lock().cycles(), cycles);
        runner.stop();
    }

    #[test]
    fn test_closed_keyboard_halts() {
        let rom = Rom::new("SPIN", vec![0x12, 0x00]).unwrap();
        let mut keyboard = MockKeyboardCommands::new();
        keyboard.expect_get_keyboard().returning(|| None);

        let mut runner: Runner<Worker> = Runner::start(
            CountingDisplay(Arc::new(AtomicUsize::new(0))),
            keyboard,
            &rom,
            Config::new(100, 60, 100).unwrap(),
        );

        thread::sleep(Duration::from_millis(100));
        runner.stop();

        let interpreter = runner.interpreter();
        let interpreter = interpreter.lock();
        assert!(!interpreter.is_running());
        assert_eq!(interpreter.cycles(), 0);
    }
}
