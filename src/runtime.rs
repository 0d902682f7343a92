use std::thread::JoinHandle;

use tracing::error;

use crate::settings::Settings;
use crate::utils::Shutdown;
use crate::worker::{Context, Worker};
use crate::Error;

/* ---------- */

/// A runtime that manages [`Workers`] threads.
///
/// The shop uses one runtime for its barbers and a nested one for the customers walking in,
/// so it can wait for every arrival to be settled before waiting for the barbers.
///
/// When dropped, a runtime stops and waits for all the workers to complete.
///
/// [`Workers`]: crate::Worker
pub struct Runtime {
    shutdown: Shutdown,
    threads: Vec<JoinHandle<()>>,
    nested: bool,
}

impl Runtime {
    /// Returns a new runtime.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a new runtime sharing the closing-time flag of the runtime `shutdown` comes from.
    ///
    /// Dropping a nested runtime doesn't raise the flag.
    #[inline]
    pub fn nested(shutdown: Shutdown) -> Self {
        Self::from(shutdown)
    }

    /// Raises the closing-time flag when a `Ctrl+C` (or any termination signal) is received.
    ///
    /// If it doesn't have any effects, users can still send a second signal to forcefully
    /// kill the process.
    #[inline]
    pub fn enable_graceful_shutdown(&self) {
        crate::utils::enable_graceful_shutdown(&self.shutdown)
    }

    /// Returns a handle on this runtime's closing-time flag.
    #[inline]
    pub fn shutdown_handle(&self) -> Shutdown {
        self.shutdown.clone()
    }

    /// Raises the closing-time flag.
    #[inline]
    pub fn stop(&self) {
        self.shutdown.stop()
    }

    /// Returns the number of threads launched and not yet joined.
    #[inline]
    pub fn len(&self) -> usize {
        self.threads.len()
    }

    /// Returns `true` if no thread is left to join.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }

    /// Runs a [`Worker`] in a new thread.
    ///
    /// # Errors
    ///
    /// On error, the corresponding error is returned and the runtime is stopped.
    #[inline]
    pub fn launch<W: Worker + 'static>(&mut self, worker: W) -> Result<(), Error> {
        self.inner_spawn_thread(worker, Settings::default(), None::<Vec<_>>)
    }

    /// Runs a [`Worker`] in a new thread configured with `settings`.
    ///
    /// # Errors
    ///
    /// On error, the corresponding error is returned and the runtime is stopped.
    #[inline]
    pub fn launch_with_settings<W: Worker + 'static>(
        &mut self,
        worker: W,
        settings: Settings,
    ) -> Result<(), Error> {
        self.inner_spawn_thread(worker, settings, None::<Vec<_>>)
    }

    /// Runs a [`Worker`] built from a [`Context`] in a new thread.
    ///
    /// The thread is configured by [`Context::settings`] and pinned by [`Context::core_pinning`].
    ///
    /// # Errors
    ///
    /// On error, the corresponding error is returned and the runtime is stopped.
    #[inline]
    pub fn launch_from_context<W, C>(&mut self, ctx: C) -> Result<(), Error>
    where
        W: Worker + 'static,
        C: Context<Target = W>,
    {
        let settings = ctx.settings();
        let cores = ctx.core_pinning();
        let worker = ctx.into_worker().inspect_err(|_| self.shutdown.stop())?;

        self.inner_spawn_thread(worker, settings, cores)
    }

    /// Blocks the calling thread until all the runtime's workers stop.
    #[inline]
    pub fn wait(&mut self) {
        for thread in self.threads.drain(..) {
            let name = thread.thread().name().unwrap_or("unnamed").to_owned();
            if thread.join().is_err() {
                error!(thread = %name, "worker thread panicked");
            }
        }
    }

    #[inline]
    fn inner_spawn_thread<W, C>(
        &mut self,
        worker: W,
        settings: Settings,
        cores: Option<C>,
    ) -> Result<(), Error>
    where
        W: Worker + 'static,
        C: AsRef<[usize]> + Send + 'static,
    {
        let thread = crate::utils::spawn_thread(worker, settings, cores, &self.shutdown)
            .inspect_err(|_| self.shutdown.stop())?;

        self.threads.push(thread);
        Ok(())
    }
}

impl Default for Runtime {
    #[inline]
    fn default() -> Self {
        Self {
            shutdown: Shutdown::new(),
            threads: Vec::new(),
            nested: false,
        }
    }
}

impl From<Shutdown> for Runtime {
    #[inline]
    fn from(shutdown: Shutdown) -> Self {
        Self {
            shutdown,
            threads: Vec::new(),
            nested: true,
        }
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        if !self.nested {
            self.shutdown.stop()
        }

        self.wait()
    }
}

/* ---------- */
