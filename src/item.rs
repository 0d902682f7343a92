//! Customers' pending haircuts, as queued work.

use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::customer::CustomerId;
use crate::random::RandomSource;
use crate::Error;

/* ---------- */

/// The kind of customer, which fixes the price of the haircut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Full price.
    Adult,
    /// Reduced price.
    Senior,
    /// Student discount.
    Student,
    /// Reduced price.
    Child,
}

impl Category {
    /// Every category, in the order [`Category::pick`] indexes them.
    pub const ALL: [Category; 4] = [
        Category::Adult,
        Category::Senior,
        Category::Student,
        Category::Child,
    ];

    /// Price of a haircut for this category.
    #[inline]
    pub const fn rate(self) -> u32 {
        match self {
            Category::Adult => 16,
            Category::Senior => 7,
            Category::Student => 10,
            Category::Child => 7,
        }
    }

    /// Picks a category uniformly.
    #[inline]
    pub fn pick(random: &dyn RandomSource) -> Self {
        let index = random.below(Self::ALL.len() as u64) as usize;
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Adult => "adult",
            Category::Senior => "senior",
            Category::Student => "student",
            Category::Child => "child",
        };
        f.write_str(name)
    }
}

/* ---------- */

/// The routine a barber runs to serve an item, yielding what the barber earns.
pub type Routine = Box<dyn FnOnce() -> Result<u32, Error> + Send>;

/// One customer's pending haircut.
///
/// Owned by the customer until enqueued, by the queue until claimed, then by the barber
/// that processes it.
pub struct WorkItem {
    id: CustomerId,
    category: Category,
    routine: Routine,
}

impl WorkItem {
    /// Returns an item whose processing runs `routine`.
    pub fn new<F>(id: CustomerId, category: Category, routine: F) -> Self
    where
        F: FnOnce() -> Result<u32, Error> + Send + 'static,
    {
        Self {
            id,
            category,
            routine: Box::new(routine),
        }
    }

    /// Id of the customer this item belongs to.
    #[inline]
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Category of the customer.
    #[inline]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Price of the haircut, see [`Category::rate`].
    #[inline]
    pub fn rate(&self) -> u32 {
        self.category.rate()
    }

    /// Runs the routine on the calling thread.
    ///
    /// A panicking routine is reported as [`Error::Processing`].
    pub fn process(self) -> Result<u32, Error> {
        let routine = self.routine;
        match catch_unwind(AssertUnwindSafe(routine)) {
            Ok(result) => result,
            Err(panic) => {
                let msg = if let Some(msg) = panic.downcast_ref::<&str>() {
                    msg.to_string()
                } else if let Some(msg) = panic.downcast_ref::<String>() {
                    msg.clone()
                } else {
                    "unknown panic".to_string()
                };
                Err(Error::processing(format!("routine panicked: {msg}")))
            }
        }
    }
}

impl fmt::Debug for WorkItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkItem")
            .field("id", &self.id)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

/* ---------- */
