use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::Sender;
use tracing::{info, warn};

use crate::item::{Category, WorkItem};
use crate::queue::{BoundedWorkQueue, TryEnqueueError};
use crate::random::{duration_below, RandomSource};
use crate::utils::Shutdown;
use crate::worker::{ControlFlow, Worker};

/* ---------- */

/// Identifies a customer, in order of arrival.
pub type CustomerId = u64;

/// The waiting room: a bounded queue of haircuts.
pub type WaitingRoom = BoundedWorkQueue<WorkItem>;

/* ---------- */

/// A customer walking into the shop.
///
/// Customers never wait for a seat and never come back: if the waiting room is full,
/// they leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Customer {
    id: CustomerId,
    category: Category,
    haircut: Duration,
}

impl Customer {
    /// Returns a customer of the given category whose haircut takes `haircut`.
    #[inline]
    pub fn new(id: CustomerId, category: Category, haircut: Duration) -> Self {
        Self {
            id,
            category,
            haircut,
        }
    }

    /// Returns a customer of a random category needing a haircut shorter than `max_haircut`.
    pub fn arrive(id: CustomerId, random: &dyn RandomSource, max_haircut: Duration) -> Self {
        Self::new(id, Category::pick(random), duration_below(random, max_haircut))
    }

    /// Order of arrival.
    #[inline]
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Category of the customer, which sets the price.
    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    /// How long the haircut keeps a barber busy.
    #[inline]
    pub fn haircut(&self) -> Duration {
        self.haircut
    }

    /// Turns the customer into the haircut a barber will perform.
    ///
    /// The routine sleeps on the barber's thread for the length of the haircut, then pays
    /// the customer's rate.
    pub fn into_work_item(self) -> WorkItem {
        let Self {
            id,
            category,
            haircut,
        } = self;

        WorkItem::new(id, category, move || {
            std::thread::sleep(haircut);
            Ok(category.rate())
        })
    }

    /// Tries to take a seat in the waiting room.
    pub fn attempt_service(self, room: &WaitingRoom) -> Admission {
        let (id, category) = (self.id, self.category);

        match room.try_enqueue(self.into_work_item()) {
            Ok(()) => {
                info!(customer = id, %category, "customer took a seat");
                Admission::Accepted
            }
            Err(TryEnqueueError::Full(_)) => {
                warn!(customer = id, %category, "queue full, customer has left");
                Admission::Rejected(Rejection::Full)
            }
            Err(TryEnqueueError::Closed(_)) => {
                warn!(customer = id, %category, "shop closed, customer has left");
                Admission::Rejected(Rejection::Closed)
            }
        }
    }
}

/* ---------- */

/// Outcome of a customer's attempt to take a seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The customer is waiting for a barber.
    Accepted,
    /// The customer left without a haircut.
    Rejected(Rejection),
}

impl Admission {
    /// Returns `true` if the customer got a seat.
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Why a customer left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Every seat was taken.
    Full,
    /// The waiting room was already shut down.
    Closed,
}

/// What happened to one arrival.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arrival {
    /// Customer id.
    pub id: CustomerId,
    /// Customer category.
    pub category: Category,
    /// Whether the customer got a seat.
    pub admission: Admission,
}

impl Arrival {
    /// Price the customer pays once served.
    #[inline]
    pub fn rate(&self) -> u32 {
        self.category.rate()
    }
}

/* ---------- */

/// The short-lived worker carrying one customer through the door.
///
/// It tries to seat the customer once, reports the outcome, and leaves.
pub(crate) struct Visit {
    customer: Customer,
    room: Arc<WaitingRoom>,
    to_shop: Sender<Arrival>,
}

impl Visit {
    pub(crate) fn new(customer: Customer, room: Arc<WaitingRoom>, to_shop: Sender<Arrival>) -> Self {
        Self {
            customer,
            room,
            to_shop,
        }
    }
}

impl Worker for Visit {
    fn on_update(&mut self) -> ControlFlow {
        let admission = self.customer.attempt_service(&self.room);
        let arrival = Arrival {
            id: self.customer.id(),
            category: self.customer.category(),
            admission,
        };

        if let Err(err) = self.to_shop.send(arrival) {
            warn!(customer = arrival.id, %err, "failed to report the arrival to the shop");
        }

        ControlFlow::Break
    }

    /// Seats the customer once.
    ///
    /// The closing-time flag is ignored: a customer already through the door is always
    /// reported.
    fn run(&mut self, _shutdown: Shutdown) {
        self.on_start();
        self.on_update();
    }
}

/* ---------- */

#[cfg(test)]
mod tests {
    use crossbeam_channel::unbounded;

    use super::*;
    use crate::test_utils::ScriptedRandom;
    use crate::Runtime;

    #[test]
    fn arrive_draws_category_and_haircut() {
        let random = ScriptedRandom::new(&[2, 1_500]);
        let customer = Customer::arrive(9, &random, Duration::from_secs(3));

        assert_eq!(customer.id(), 9);
        assert_eq!(customer.category(), Category::Student);
        assert_eq!(customer.haircut(), Duration::from_micros(1_500));
    }

    #[test]
    fn work_item_pays_the_rate() {
        let customer = Customer::new(1, Category::Adult, Duration::ZERO);
        let item = customer.into_work_item();

        assert_eq!(item.id(), 1);
        assert_eq!(item.process().expect("haircut shouldn't fail"), 16);
    }

    #[test]
    fn full_room_turns_customers_away() {
        let room = WaitingRoom::new(1);

        let first = Customer::new(0, Category::Child, Duration::ZERO);
        let second = Customer::new(1, Category::Senior, Duration::ZERO);

        assert_eq!(first.attempt_service(&room), Admission::Accepted);
        assert_eq!(
            second.attempt_service(&room),
            Admission::Rejected(Rejection::Full)
        );
        assert_eq!(room.len(), 1);
    }

    #[test]
    fn closed_room_turns_customers_away() {
        let room = WaitingRoom::new(4);
        room.shutdown();

        let customer = Customer::new(0, Category::Adult, Duration::ZERO);
        assert_eq!(
            customer.attempt_service(&room),
            Admission::Rejected(Rejection::Closed)
        );
    }

    #[test]
    fn haircut_runs_on_the_claiming_thread() {
        let room = WaitingRoom::new(1);
        Customer::new(0, Category::Adult, Duration::from_millis(30)).attempt_service(&room);

        let item = room.dequeue_blocking().expect("the room shouldn't be closed");
        let started = std::time::Instant::now();
        item.process().expect("haircut shouldn't fail");
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn visit_reports_the_arrival() {
        let room = Arc::new(WaitingRoom::new(2));
        let (to_shop, from_visits) = unbounded();
        let mut door = Runtime::new();

        let customer = Customer::new(5, Category::Senior, Duration::ZERO);
        door.launch(Visit::new(customer, room.clone(), to_shop))
            .expect("failed to launch the visit");
        door.wait();

        let arrival = from_visits
            .recv_timeout(Duration::from_secs(1))
            .expect("the visit never reported");
        assert_eq!(arrival.id, 5);
        assert_eq!(arrival.rate(), 7);
        assert!(arrival.admission.is_accepted());
        assert_eq!(room.in_flight(), 1);
    }

    #[test]
    fn visit_reports_after_closing_time() {
        let room = Arc::new(WaitingRoom::new(2));
        let (to_shop, from_visits) = unbounded();
        let mut door = Runtime::new();
        door.stop();

        let customer = Customer::new(5, Category::Senior, Duration::ZERO);
        door.launch(Visit::new(customer, room.clone(), to_shop))
            .expect("failed to launch the visit");
        door.wait();

        let arrival = from_visits
            .recv_timeout(Duration::from_millis(200))
            .expect("a customer through the door must be reported");
        assert_eq!(arrival.id, 5);
        assert!(arrival.admission.is_accepted());
        assert_eq!(room.in_flight(), 1);
    }
}
