//! A thread which repeatedly calls a callback at a fixed interval.

use atomic::Atomic;
use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc, Mutex,
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};

type Callback = Arc<Mutex<dyn FnMut() + Send + 'static>>;

pub struct TimerThread {
    name: String,
    cb: Callback,
    thread: Option<JoinHandle<()>>,

    interval_secs: Arc<Atomic<f64>>,

    sentinel: Arc<AtomicBool>,
}

impl TimerThread {
    pub fn new<F: FnMut() + Send + 'static>(name: &str, cb: F) -> Self {
        Self {
            name: name.to_owned(),
            cb: Arc::new(Mutex::new(cb)),
            thread: None,

            interval_secs: Arc::new(Atomic::new(0.0)),

            sentinel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Starts calling the callback every `interval_secs` seconds. Does nothing
    /// if the thread is already running.
    pub fn start(&mut self, interval_secs: f64) -> std::io::Result<()> {
        if self.thread.is_some() {
            return Ok(());
        }

        self.interval_secs.store(interval_secs, Ordering::Release);
        self.sentinel.store(true, Ordering::Release);

        let interval = Arc::clone(&self.interval_secs);
        let sentinel = Arc::clone(&self.sentinel);
        let cb = Arc::clone(&self.cb);

        let thread = std::thread::Builder::new()
            .name(self.name.clone())
            .spawn(move || {
                let mut next = Instant::now();

                while sentinel.load(Ordering::Acquire) {
                    if let Ok(mut guard) = cb.lock() {
                        (&mut *guard)();
                    }

                    // schedule from the previous deadline rather than from
                    // "now" so that the rate doesn't drift with callback time
                    next += Duration::from_secs_f64(
                        interval.load(Ordering::Acquire),
                    );

                    let now = Instant::now();
                    if next > now {
                        std::thread::sleep(next - now);
                    }
                    else {
                        next = now;
                    }
                }
            })?;

        log::debug!(target: "cvgen::timer", "started \"{}\" at {interval_secs} s", self.name);

        self.thread = Some(thread);

        Ok(())
    }

    pub fn start_hz(&mut self, interval_rate_hz: f64) -> std::io::Result<()> {
        self.start(interval_rate_hz.recip())
    }

    /// Stops the thread and waits for the current callback to return.
    pub fn stop(&mut self) {
        if let Some(thread) = self.thread.take() {
            self.sentinel.store(false, Ordering::Release);

            if thread.join().is_err() {
                log::error!(target: "cvgen::timer", "\"{}\" panicked", self.name);
            }
            else {
                log::debug!(target: "cvgen::timer", "stopped \"{}\"", self.name);
            }
        }
    }

    pub const fn is_running(&self) -> bool {
        self.thread.is_some()
    }

    pub fn interval(&self) -> f64 {
        self.interval_secs.load(Ordering::Acquire)
    }
}

impl Drop for TimerThread {
    fn drop(&mut self) {
        self.stop();
    }
}
