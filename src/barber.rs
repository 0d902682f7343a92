use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use tracing::{debug, error};

use crate::customer::WaitingRoom;
use crate::item::WorkItem;
use crate::settings::Settings;
use crate::till::Till;
use crate::utils::Shutdown;
use crate::worker::{Context, ControlFlow, Worker};
use crate::Error;

/* ---------- */

/// Where a barber is in its loop.
///
/// `Waiting -> Claimed -> Processing -> Waiting`, and `Waiting -> Stopped` once the
/// waiting room shuts down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum BarberState {
    /// Asleep in the chair until a customer sits down.
    Waiting = 0,
    /// Just took a customer from the waiting room.
    Claimed = 1,
    /// Cutting hair.
    Processing = 2,
    /// Gone home.
    Stopped = 3,
}

impl BarberState {
    #[inline]
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Waiting,
            1 => Self::Claimed,
            2 => Self::Processing,
            _ => Self::Stopped,
        }
    }
}

/// A read-only view on a barber, for observation.
#[derive(Debug, Clone)]
pub struct BarberHandle {
    id: usize,
    state: Arc<AtomicU8>,
}

impl BarberHandle {
    /// Barber id, also found in its thread name.
    #[inline]
    pub fn id(&self) -> usize {
        self.id
    }

    /// Last state the barber went through.
    #[inline]
    pub fn state(&self) -> BarberState {
        BarberState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Returns `true` while the barber waits for a customer.
    #[inline]
    pub fn is_sleeping(&self) -> bool {
        self.state() == BarberState::Waiting
    }
}

/* ---------- */

/// A long-lived consumer of the waiting room.
///
/// Each iteration sleeps until a customer is available, cuts their hair outside any lock,
/// cashes in, and acknowledges the haircut. A failing haircut is logged and counted but
/// never breaks the loop.
pub struct Barber {
    id: usize,
    room: Arc<WaitingRoom>,
    till: Arc<Till>,
    state: Arc<AtomicU8>,
}

impl Barber {
    #[inline]
    fn set_state(&self, state: BarberState) {
        self.state.store(state as u8, Ordering::Release);
        debug!(barber = self.id, ?state, "barber state changed");
    }

    fn serve(&self, item: WorkItem) {
        let (customer, category) = (item.id(), item.category());
        debug!(barber = self.id, customer, %category, "haircut started");

        match item.process() {
            Ok(payment) => {
                self.till.deposit(payment);
                debug!(barber = self.id, customer, payment, "haircut finished");
            }
            Err(err) => {
                self.till.record_failure();
                error!(barber = self.id, customer, %err, "haircut failed");
            }
        }
    }
}

impl Worker for Barber {
    fn on_start(&mut self) {
        debug!(barber = self.id, "barber is in");
    }

    fn on_update(&mut self) -> ControlFlow {
        self.set_state(BarberState::Waiting);

        let Some(item) = self.room.dequeue_blocking() else {
            self.set_state(BarberState::Stopped);
            return ControlFlow::Break;
        };

        self.set_state(BarberState::Claimed);
        self.set_state(BarberState::Processing);
        self.serve(item);
        self.room.acknowledge();

        ControlFlow::Continue
    }

    /// Loops until the waiting room shuts down.
    ///
    /// The closing-time flag is ignored: customers already seated must still be served.
    fn run(&mut self, _shutdown: Shutdown) {
        self.on_start();
        while let ControlFlow::Continue = self.on_update() {}
    }
}

/* ---------- */

/// Everything needed to launch a [`Barber`].
pub struct BarberContext {
    id: usize,
    room: Arc<WaitingRoom>,
    till: Arc<Till>,
    state: Arc<AtomicU8>,
    cores: Option<Vec<usize>>,
}

impl BarberContext {
    /// Returns the context of barber `id`, serving `room` and paying into `till`.
    pub fn new(id: usize, room: Arc<WaitingRoom>, till: Arc<Till>) -> Self {
        Self {
            id,
            room,
            till,
            state: Arc::new(AtomicU8::new(BarberState::Waiting as u8)),
            cores: None,
        }
    }

    /// Pins the barber's thread to `cores`.
    pub fn pinned(mut self, cores: Vec<usize>) -> Self {
        self.cores = Some(cores);
        self
    }

    /// Returns a handle to observe the barber once launched.
    pub fn handle(&self) -> BarberHandle {
        BarberHandle {
            id: self.id,
            state: self.state.clone(),
        }
    }
}

impl Context for BarberContext {
    type Target = Barber;

    fn into_worker(self) -> Result<Self::Target, Error> {
        Ok(Barber {
            id: self.id,
            room: self.room,
            till: self.till,
            state: self.state,
        })
    }

    fn settings(&self) -> Settings {
        Settings::barber(self.id)
    }

    fn core_pinning(&self) -> Option<Vec<usize>> {
        self.cores.clone()
    }
}

/* ---------- */
