//! A bounded producer/consumer engine, modeled on the sleeping barber problem.
//!
//! # Philosophy
//!
//! A fixed crew of barbers serves customers from a waiting room with a fixed number of seats.
//! Barbers are long-lived [`Workers`], each on its own OS thread, sleeping until a customer sits
//! down. Customers are short-lived workers: they try to take a seat once and leave if the room
//! is full. They never wait for a seat and never come back.
//!
//! The waiting room is a [`BoundedWorkQueue`]:
//! - [`try_enqueue`] never blocks and hands the item back when every seat is taken.
//! - [`dequeue_blocking`] sleeps on a condition variable tied to the queue's lock, so a customer
//!   sitting down can't slip between a barber's check and its sleep.
//! - [`shutdown`] wakes every sleeping barber at once.
//!
//! Haircuts run outside the queue's lock, and earnings are cashed into a [`Till`] guarded by
//! its own lock.
//!
//! [`Workers`]: crate::Worker
//! [`try_enqueue`]: crate::BoundedWorkQueue::try_enqueue
//! [`dequeue_blocking`]: crate::BoundedWorkQueue::dequeue_blocking
//! [`shutdown`]: crate::BoundedWorkQueue::shutdown
//!
//! # Usage
//!
//! Run a short day with 2 barbers, 5 seats and 10 customers:
//!
//! ```
//! # use barbershop::{Shop, ShopConfig};
//! # use std::time::Duration;
//! let config = ShopConfig::new()
//!     .barbers(2)
//!     .seats(5)
//!     .arrivals(10)
//!     .max_arrival_gap(Duration::from_millis(10))
//!     .max_haircut(Duration::from_millis(20));
//!
//! let report = Shop::new(config)?.run()?;
//! println!("Barbers payment total: {}", report.earnings());
//! # Ok::<(), barbershop::Error>(())
//! ```
//!
//! # Using the queue on its own
//!
//! ```
//! # use barbershop::{BoundedWorkQueue, TryEnqueueError};
//! # use std::sync::Arc;
//! let queue = Arc::new(BoundedWorkQueue::new(1));
//!
//! let consumer = {
//!     let queue = queue.clone();
//!     std::thread::spawn(move || {
//!         while let Some(n) = queue.dequeue_blocking() {
//!             println!("got {n}");
//!             queue.acknowledge();
//!         }
//!     })
//! };
//!
//! if let Err(TryEnqueueError::Full(n)) = queue.try_enqueue(1) {
//!     println!("dropped {n}");
//! }
//!
//! queue.wait_drained();
//! queue.shutdown();
//! consumer.join().unwrap();
//! ```
//!
//! # Randomness
//!
//! Categories, haircut lengths and arrival gaps are drawn from a [`RandomSource`], so a day can
//! be replayed with [`SeededRandom`] or fully scripted in tests.
//!
//! # Graceful shutdown
//!
//! [`Shop::enable_graceful_shutdown`] stops letting customers in on `Ctrl+C`. Customers already
//! seated are still served before the barbers go home. A second signal kills the process.

#![warn(missing_docs)]

mod barber;
mod config;
mod customer;
mod error;
mod item;
mod queue;
mod random;
mod runtime;
mod settings;
mod shop;
#[cfg(test)]
mod test_utils;
mod till;
mod utils;
mod worker;

pub use barber::*;
pub use config::*;
pub use customer::*;
pub use error::*;
pub use item::*;
pub use queue::*;
pub use random::*;
pub use runtime::*;
pub use settings::*;
pub use shop::*;
pub use till::*;
pub use utils::*;
pub use worker::*;
