use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::random::RandomSource;
use crate::{Context, ControlFlow, Error, Worker};

/* ---------- */

/// Replays a script of values, clamped below each requested bound.
pub(crate) struct ScriptedRandom {
    script: Vec<u64>,
    next: Mutex<usize>,
    cycle: bool,
}

impl ScriptedRandom {
    /// Plays `script` once, then yields `0`.
    pub(crate) fn new(script: &[u64]) -> Self {
        Self {
            script: script.to_vec(),
            next: Mutex::new(0),
            cycle: false,
        }
    }

    /// Plays `script` in a loop.
    pub(crate) fn cycle(script: &[u64]) -> Self {
        Self {
            cycle: true,
            ..Self::new(script)
        }
    }
}

impl RandomSource for ScriptedRandom {
    fn below(&self, bound: u64) -> u64 {
        if bound == 0 || self.script.is_empty() {
            return 0;
        }

        let mut next = self.next.lock().expect("script mutex poisoned");
        let index = if self.cycle {
            *next % self.script.len()
        } else {
            *next
        };
        *next += 1;

        self.script
            .get(index)
            .map(|value| (*value).min(bound - 1))
            .unwrap_or(0)
    }
}

/* ---------- */

pub(crate) struct TestTimedWorker {
    timeout: Duration,
    now: Instant,
}

impl TestTimedWorker {
    pub(crate) fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            now: Instant::now(),
        }
    }
}

impl Worker for TestTimedWorker {
    fn on_start(&mut self) {
        self.now = Instant::now();
    }

    fn on_update(&mut self) -> ControlFlow {
        if self.now.elapsed() >= self.timeout {
            return ControlFlow::Break;
        }

        std::thread::sleep(Duration::from_millis(1));
        ControlFlow::Continue
    }
}

/* ---------- */

pub(crate) struct TestCountingWorker(Arc<AtomicUsize>);

impl TestCountingWorker {
    pub(crate) fn new(count: Arc<AtomicUsize>) -> Self {
        Self(count)
    }
}

impl Worker for TestCountingWorker {
    fn on_update(&mut self) -> ControlFlow {
        self.0.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(1));
        ControlFlow::Continue
    }
}

/* ---------- */

pub(crate) struct BadWorkerContext;

impl Context for BadWorkerContext {
    type Target = TestCountingWorker;

    fn into_worker(self) -> Result<Self::Target, Error> {
        Err(Error::config("bad context"))
    }
}
