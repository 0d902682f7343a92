//! The coordinator: opens the shop, lets customers in, closes once every seat is served.

use std::sync::Arc;

use crossbeam_channel::unbounded;
use tracing::{info, warn};

use crate::barber::{BarberContext, BarberHandle, BarberState};
use crate::config::ShopConfig;
use crate::customer::{Arrival, Customer, CustomerId, Visit, WaitingRoom};
use crate::random::{duration_below, RandomSource, ThreadRandom};
use crate::runtime::Runtime;
use crate::settings::Settings;
use crate::till::{Ledger, Till};
use crate::utils::Shutdown;
use crate::Error;

/* ---------- */

/// A barber shop running one finite day.
///
/// [`Shop::run`] starts the barbers, lets the configured number of customers walk in at
/// random intervals, waits until every seated customer has been served, shuts the waiting
/// room, joins the barbers and reports the day.
///
/// # Examples
///
/// ```
/// # use barbershop::{Shop, ShopConfig};
/// # use std::time::Duration;
/// let config = ShopConfig::new()
///     .barbers(2)
///     .seats(5)
///     .arrivals(10)
///     .max_arrival_gap(Duration::from_millis(5))
///     .max_haircut(Duration::from_millis(5));
///
/// let report = Shop::new(config).unwrap().run().unwrap();
///
/// assert_eq!(report.accepted() + report.rejected(), 10);
/// assert_eq!(report.earnings(), report.expected_earnings());
/// ```
pub struct Shop {
    config: ShopConfig,
    random: Arc<dyn RandomSource>,
    room: Arc<WaitingRoom>,
    till: Arc<Till>,
    staff: Runtime,
    barbers: Vec<BarberHandle>,
}

impl Shop {
    /// Returns a shop drawing its randomness from the thread-local generator.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] if `config` doesn't validate. No thread is started.
    #[inline]
    pub fn new(config: ShopConfig) -> Result<Self, Error> {
        Self::with_random(config, Arc::new(ThreadRandom))
    }

    /// Returns a shop drawing categories, haircut lengths and arrival gaps from `random`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidConfiguration`] if `config` doesn't validate. No thread is started.
    pub fn with_random(config: ShopConfig, random: Arc<dyn RandomSource>) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self {
            room: Arc::new(WaitingRoom::new(config.seats)),
            till: Arc::new(Till::new()),
            staff: Runtime::new(),
            barbers: Vec::with_capacity(config.barbers),
            random,
            config,
        })
    }

    /// Stops letting customers in when a termination signal is received.
    ///
    /// Customers already seated are still served.
    #[inline]
    pub fn enable_graceful_shutdown(&self) {
        self.staff.enable_graceful_shutdown()
    }

    /// Returns a handle on the closing-time flag.
    #[inline]
    pub fn closing_handle(&self) -> Shutdown {
        self.staff.shutdown_handle()
    }

    /// Runs the whole day and reports it.
    ///
    /// Returns only once every accepted customer has been served and every barber has
    /// gone home.
    ///
    /// # Errors
    ///
    /// [`Error::ThreadStart`] if a barber or a customer thread couldn't be spawned. Barbers
    /// already launched are still shut down and joined.
    pub fn run(mut self) -> Result<Report, Error> {
        self.open()?;
        let arrivals = self.admit_arrivals();

        self.room.wait_drained();
        self.room.shutdown();
        self.staff.wait();

        let arrivals = arrivals?;
        let report = Report {
            arrivals,
            ledger: self.till.ledger(),
            barbers: self.barbers.iter().map(BarberHandle::state).collect(),
        };

        info!(
            accepted = report.accepted(),
            rejected = report.rejected(),
            served = report.ledger.served,
            failed = report.ledger.failed,
            earnings = report.earnings(),
            "shop closed"
        );

        Ok(report)
    }

    fn open(&mut self) -> Result<(), Error> {
        for id in 0..self.config.barbers {
            let mut ctx = BarberContext::new(id, self.room.clone(), self.till.clone());
            if let Some(cores) = &self.config.pin_cores {
                ctx = ctx.pinned(cores.clone());
            }

            self.barbers.push(ctx.handle());
            self.staff.launch_from_context(ctx)?;
        }

        info!(
            barbers = self.config.barbers,
            seats = self.config.seats,
            "shop is open"
        );
        Ok(())
    }

    fn admit_arrivals(&mut self) -> Result<Vec<Arrival>, Error> {
        let closing = self.staff.shutdown_handle();
        let mut door = Runtime::nested(closing.clone());
        let (to_shop, from_visits) = unbounded();
        let mut launched = Ok(());

        for index in 0..self.config.arrivals {
            let Ok(id) = CustomerId::try_from(index) else {
                break;
            };
            std::thread::sleep(duration_below(&*self.random, self.config.max_arrival_gap));

            if !closing.is_running() {
                warn!(dispatched = id, "closing time, no more customers");
                break;
            }

            let customer = Customer::arrive(id, &*self.random, self.config.max_haircut);
            let visit = Visit::new(customer, self.room.clone(), to_shop.clone());
            if let Err(err) = door.launch_with_settings(visit, Settings::customer(id)) {
                launched = Err(err);
                break;
            }
        }

        // Every visit has reported once the door is empty.
        door.wait();
        drop(to_shop);

        let mut arrivals = from_visits.iter().collect::<Vec<_>>();
        arrivals.sort_by_key(|arrival| arrival.id);

        launched.map(|()| arrivals)
    }
}

impl Drop for Shop {
    fn drop(&mut self) {
        // Lets the staff runtime join its barbers, even when `run` bailed out early.
        self.room.shutdown();
    }
}

/* ---------- */

/// What happened during a shop's day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Every customer that walked in, by id.
    pub arrivals: Vec<Arrival>,
    /// Final state of the till.
    pub ledger: Ledger,
    /// Final state of every barber.
    pub barbers: Vec<BarberState>,
}

impl Report {
    /// Customers that got a seat.
    pub fn accepted(&self) -> usize {
        self.arrivals
            .iter()
            .filter(|arrival| arrival.admission.is_accepted())
            .count()
    }

    /// Customers that left without a haircut.
    pub fn rejected(&self) -> usize {
        self.arrivals.len() - self.accepted()
    }

    /// What the barbers earned.
    #[inline]
    pub fn earnings(&self) -> u64 {
        self.ledger.earnings
    }

    /// What the barbers should have earned: the rates of every accepted customer.
    pub fn expected_earnings(&self) -> u64 {
        self.arrivals
            .iter()
            .filter(|arrival| arrival.admission.is_accepted())
            .map(|arrival| u64::from(arrival.rate()))
            .sum()
    }
}

/* ---------- */

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_utils::ScriptedRandom;

    #[test]
    fn invalid_config_starts_nothing() {
        let config = ShopConfig::new().barbers(0);

        match Shop::new(config) {
            Err(Error::InvalidConfiguration(_)) => (),
            Err(err) => panic!("unexpected error: {err}"),
            Ok(_) => panic!("a shop without barbers shouldn't open"),
        }
    }

    #[test]
    fn empty_day() {
        let shop = Shop::new(ShopConfig::new().barbers(2).arrivals(0)).expect("valid config");
        let report = shop.run().expect("the day should run");

        assert!(report.arrivals.is_empty());
        assert_eq!(report.earnings(), 0);
        assert_eq!(report.barbers, vec![BarberState::Stopped; 2]);
    }

    #[test]
    fn scripted_day_earns_every_accepted_rate() {
        // Zero gaps and haircuts, categories cycling adult, senior, student, child.
        let random = Arc::new(ScriptedRandom::cycle(&[0, 0, 0, 0, 1, 0, 0, 2, 0, 0, 3, 0]));
        let config = ShopConfig::new().barbers(1).seats(8).arrivals(4);

        let report = Shop::with_random(config, random)
            .expect("valid config")
            .run()
            .expect("the day should run");

        let categories = report
            .arrivals
            .iter()
            .map(|arrival| arrival.category)
            .collect::<Vec<_>>();
        assert_eq!(categories, crate::Category::ALL.to_vec());
        assert_eq!(report.accepted(), 4);
        assert_eq!(report.earnings(), 40);
        assert_eq!(report.ledger.served, 4);
    }

    #[test]
    fn closing_time_stops_arrivals() {
        let config = ShopConfig::new()
            .barbers(1)
            .arrivals(50)
            .max_arrival_gap(Duration::from_millis(2))
            .max_haircut(Duration::ZERO);
        let shop = Shop::new(config).expect("valid config");

        shop.closing_handle().stop();
        let report = shop.run().expect("the day should run");

        assert!(report.arrivals.is_empty());
        assert_eq!(report.barbers, vec![BarberState::Stopped]);
    }
}
