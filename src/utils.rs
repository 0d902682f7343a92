use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;

use signal_hook::consts::TERM_SIGNALS;
use signal_hook::flag;
use tracing::warn;

use crate::settings::Settings;
use crate::worker::Worker;
use crate::Error;

/* ---------- */

/// Raises `shutdown` when the process receives a termination signal.
///
/// If for some reasons the shop doesn't close after the first signal,
/// users can send another signal to kill the process ungracefully.
#[inline]
pub(crate) fn enable_graceful_shutdown(shutdown: &Shutdown) {
    for sig in TERM_SIGNALS {
        if let Err(err) = flag::register_conditional_shutdown(*sig, 1, shutdown.as_ref().clone()) {
            warn!(signal = *sig, %err, "failed to register the forced shutdown handler");
        }
        if let Err(err) = flag::register(*sig, shutdown.as_ref().clone()) {
            warn!(signal = *sig, %err, "failed to register the graceful shutdown handler");
        }
    }
}

/// Spawns `worker` on a new thread configured by `settings`, optionally pinned to `cores`.
pub(crate) fn spawn_thread<W, C>(
    mut worker: W,
    settings: Settings,
    cores: Option<C>,
    shutdown: &Shutdown,
) -> Result<JoinHandle<()>, Error>
where
    W: Worker + 'static,
    C: AsRef<[usize]> + Send + 'static,
{
    let shutdown = shutdown.clone();

    let thread = settings.into_inner().spawn(move || {
        if let Some(cores) = cores {
            if let Err(err) = affinity::set_thread_affinity(cores) {
                warn!(%err, "failed to pin the thread, running unpinned");
            }
        }

        worker.run(shutdown)
    })?;

    Ok(thread)
}

/* ---------- */

/// The shop's closing-time flag.
///
/// Raised when the shop stops dispatching new arrivals, either because its [`Runtime`]
/// was stopped or because a termination signal was caught. Barbers already at work
/// aren't interrupted by it: they stop once the queue shuts down.
///
/// [`Runtime`]: crate::Runtime
#[derive(Debug, Default)]
pub struct Shutdown(Arc<AtomicBool>);

impl Shutdown {
    #[inline]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn stop(&self) {
        self.0.store(true, Ordering::SeqCst)
    }

    /// Returns whether or not the shop is still open to new arrivals.
    #[inline]
    pub fn is_running(&self) -> bool {
        !self.0.load(Ordering::SeqCst)
    }
}

impl AsRef<Arc<AtomicBool>> for Shutdown {
    #[inline]
    fn as_ref(&self) -> &Arc<AtomicBool> {
        &self.0
    }
}

impl Clone for Shutdown {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/* ---------- */
