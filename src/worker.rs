use crate::settings::Settings;
use crate::utils::Shutdown;
use crate::Error;

/* ---------- */

/// A unit of execution running on its own OS thread.
///
/// The shop runs two kinds of workers: long-lived barbers, which loop until the waiting
/// room shuts down, and short-lived customers, which try to take a seat once and leave.
///
/// Workers are defined by one main method, [`Worker::run`]. Its default implementation first
/// calls [`Worker::on_start`] once, then calls [`Worker::on_update`] in a loop until it returns
/// [`ControlFlow::Break`] or the closing-time flag is raised.
///
/// # Examples
///
/// A worker that greets a few times and leaves:
///
/// ```
/// # use barbershop::{Runtime, Worker, ControlFlow};
/// struct Greeter {
///     left: usize,
/// }
///
/// impl Worker for Greeter {
///     fn on_update(&mut self) -> ControlFlow {
///         if self.left == 0 {
///             return ControlFlow::Break;
///         }
///
///         println!("Hello!");
///         self.left -= 1;
///         ControlFlow::Continue
///     }
/// }
///
/// let mut runtime = Runtime::new();
/// runtime.launch(Greeter { left: 3 }).unwrap();
/// runtime.wait();
/// ```
pub trait Worker: Send {
    /// Called once on the worker's thread before the loop starts.
    ///
    /// By default, this does nothing.
    #[inline]
    fn on_start(&mut self) {}

    /// One iteration of the worker loop.
    ///
    /// By default, this method just returns [`ControlFlow::Break`].
    #[inline]
    fn on_update(&mut self) -> ControlFlow {
        ControlFlow::Break
    }

    /// Main loop, spawned on a new thread by one of the [`Runtime::launch`] functions.
    ///
    /// By default, this calls [`Worker::on_start`] then [`Worker::on_update`] while
    /// [`shutdown.is_running()`] returns `true`.
    ///
    /// [`Runtime::launch`]: crate::Runtime::launch
    /// [`shutdown.is_running()`]: crate::Shutdown::is_running
    #[inline]
    fn run(&mut self, shutdown: Shutdown) {
        self.on_start();

        while shutdown.is_running() {
            if let ControlFlow::Break = self.on_update() {
                break;
            }
        }
    }
}

/* ---------- */

/// Builds a worker before launching it with [`Runtime::launch_from_context`].
///
/// Contexts carry everything a worker needs (queue, till, identity) and decide how its thread
/// is configured, so the shop can prepare its staff before any thread exists.
///
/// [`Runtime::launch_from_context`]: crate::Runtime::launch_from_context
pub trait Context {
    /// The type of [`Worker`] built from this context.
    type Target: Worker;

    /// Consumes `self` to build the targeted [`Worker`].
    fn into_worker(self) -> Result<Self::Target, Error>;

    /// Returns the [`Settings`] of the worker's thread.
    ///
    /// By default, it returns default thread settings.
    #[inline]
    fn settings(&self) -> Settings {
        Settings::default()
    }

    /// Returns some cpu IDs to pin the worker's thread to.
    ///
    /// By default, it returns `None`.
    #[inline]
    fn core_pinning(&self) -> Option<Vec<usize>> {
        None
    }
}

/* ---------- */

/// Defines the control flow of [`Workers`].
///
/// [`Workers`]: crate::Worker
#[derive(Debug, PartialEq)]
pub enum ControlFlow {
    /// Keep looping.
    Continue,
    /// Leave the worker loop.
    Break,
}
