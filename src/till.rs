use std::sync::{Mutex, MutexGuard};

/* ---------- */

/// The shop's earnings accumulator.
///
/// Guarded by its own lock, independent of the waiting room's, so a barber cashing in
/// never holds up customers taking a seat.
#[derive(Debug, Default)]
pub struct Till(Mutex<Ledger>);

/// A snapshot of the [`Till`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Ledger {
    /// Sum of the payments of every haircut served.
    pub earnings: u64,
    /// Haircuts completed and paid.
    pub served: usize,
    /// Haircuts whose routine failed, earning nothing.
    pub failed: usize,
}

impl Till {
    /// Returns an empty till.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cashes in the payment of one haircut.
    pub fn deposit(&self, payment: u32) {
        let mut ledger = self.lock();
        ledger.earnings += u64::from(payment);
        ledger.served += 1;
    }

    /// Records a haircut that failed.
    pub fn record_failure(&self) {
        self.lock().failed += 1;
    }

    /// Returns the current totals.
    pub fn ledger(&self) -> Ledger {
        *self.lock()
    }

    #[inline]
    fn lock(&self) -> MutexGuard<'_, Ledger> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/* ---------- */
