use std::time::Duration;

use crate::Error;

/* ---------- */

/// Shape of a shop run: staff, seats and arrivals.
///
/// Built with chained setters, checked by [`ShopConfig::validate`] before any thread starts.
///
/// # Examples
///
/// ```
/// # use barbershop::ShopConfig;
/// # use std::time::Duration;
/// let config = ShopConfig::new()
///     .barbers(2)
///     .seats(5)
///     .arrivals(10)
///     .max_haircut(Duration::from_millis(50));
///
/// assert!(config.validate().is_ok());
/// assert!(config.barbers(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    pub(crate) barbers: usize,
    pub(crate) seats: usize,
    pub(crate) arrivals: usize,
    pub(crate) max_arrival_gap: Duration,
    pub(crate) max_haircut: Duration,
    pub(crate) pin_cores: Option<Vec<usize>>,
}

impl ShopConfig {
    /// Returns the default configuration: 3 barbers, 15 seats, 10 arrivals,
    /// arrivals less than a second apart and haircuts shorter than 3 seconds.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the number of barbers.
    #[inline]
    pub fn barbers(mut self, barbers: usize) -> Self {
        self.barbers = barbers;
        self
    }

    /// Sets the number of seats in the waiting room.
    #[inline]
    pub fn seats(mut self, seats: usize) -> Self {
        self.seats = seats;
        self
    }

    /// Sets how many customers walk in before closing time.
    #[inline]
    pub fn arrivals(mut self, arrivals: usize) -> Self {
        self.arrivals = arrivals;
        self
    }

    /// Sets the exclusive upper bound of the delay between two arrivals.
    #[inline]
    pub fn max_arrival_gap(mut self, gap: Duration) -> Self {
        self.max_arrival_gap = gap;
        self
    }

    /// Sets the exclusive upper bound of a haircut's length.
    #[inline]
    pub fn max_haircut(mut self, haircut: Duration) -> Self {
        self.max_haircut = haircut;
        self
    }

    /// Pins every barber thread to `cores`.
    #[inline]
    pub fn pin_cores(mut self, cores: Vec<usize>) -> Self {
        self.pin_cores = Some(cores);
        self
    }

    /// Number of barbers.
    #[inline]
    pub fn barber_count(&self) -> usize {
        self.barbers
    }

    /// Number of seats.
    #[inline]
    pub fn seat_count(&self) -> usize {
        self.seats
    }

    /// Number of arrivals.
    #[inline]
    pub fn arrival_count(&self) -> usize {
        self.arrivals
    }

    /// Checks the configuration can run.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] if there are no barbers, no seats, or an empty
    /// list of cores to pin to.
    pub fn validate(&self) -> Result<(), Error> {
        if self.barbers == 0 {
            return Err(Error::config("a shop needs at least one barber"));
        }
        if self.seats == 0 {
            return Err(Error::config("a shop needs at least one seat"));
        }
        if matches!(&self.pin_cores, Some(cores) if cores.is_empty()) {
            return Err(Error::config("cannot pin barbers to an empty set of cores"));
        }

        Ok(())
    }
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            barbers: 3,
            seats: 15,
            arrivals: 10,
            max_arrival_gap: Duration::from_secs(1),
            max_haircut: Duration::from_secs(3),
            pin_cores: None,
        }
    }
}

/* ---------- */
