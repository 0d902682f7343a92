//! Whole-day scenarios run through the public API.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use barbershop::{
    Admission, BarberState, RandomSource, Rejection, Report, SeededRandom, Shop, ShopConfig,
};
use crossbeam_channel::bounded;

/* ---------- */

/// Always draws the largest value allowed.
struct Slowest;

impl RandomSource for Slowest {
    fn below(&self, bound: u64) -> u64 {
        bound.saturating_sub(1)
    }
}

/// Runs the day on another thread, failing the test if it doesn't finish in time.
fn run_within(shop: Shop, timeout: Duration) -> Report {
    let (tx, rx) = bounded(1);
    thread::spawn(move || {
        let _ = tx.send(shop.run());
    });

    rx.recv_timeout(timeout)
        .expect("the shop never closed, a barber or the coordinator is stuck")
        .expect("the day should run")
}

/* ---------- */

#[test]
fn five_seats_two_barbers_ten_arrivals() {
    let config = ShopConfig::new()
        .barbers(2)
        .seats(5)
        .arrivals(10)
        .max_arrival_gap(Duration::from_millis(10))
        .max_haircut(Duration::from_millis(30));
    let shop = Shop::with_random(config, Arc::new(SeededRandom::new(2024))).expect("valid config");

    let report = run_within(shop, Duration::from_secs(10));

    assert_eq!(report.arrivals.len(), 10);
    assert_eq!(report.accepted() + report.rejected(), 10);
    assert_eq!(report.earnings(), report.expected_earnings());
    assert_eq!(report.ledger.served, report.accepted());
    assert_eq!(report.ledger.failed, 0);
    assert!(report
        .arrivals
        .iter()
        .all(|arrival| [16, 7, 10].contains(&arrival.rate())));
    assert_eq!(report.barbers, vec![BarberState::Stopped; 2]);
}

#[test]
fn one_seat_one_barber_turns_customers_away() {
    // Arrivals back to back, every haircut just under 300ms.
    let config = ShopConfig::new()
        .barbers(1)
        .seats(1)
        .arrivals(10)
        .max_arrival_gap(Duration::ZERO)
        .max_haircut(Duration::from_millis(300));
    let shop = Shop::with_random(config, Arc::new(Slowest)).expect("valid config");

    let report = run_within(shop, Duration::from_secs(10));

    assert!(report.rejected() > 0, "a full room must turn customers away");
    assert!(report
        .arrivals
        .iter()
        .filter(|arrival| !arrival.admission.is_accepted())
        .all(|arrival| arrival.admission == Admission::Rejected(Rejection::Full)));
    assert_eq!(report.accepted() + report.rejected(), 10);
    assert_eq!(report.earnings(), report.expected_earnings());
}

#[test]
fn idle_barbers_all_go_home() {
    let shop = Shop::new(ShopConfig::new().barbers(16).arrivals(0)).expect("valid config");

    let report = run_within(shop, Duration::from_secs(5));

    assert_eq!(report.barbers, vec![BarberState::Stopped; 16]);
}

#[test]
fn stress_no_customer_is_lost() {
    for seed in 0..5 {
        let config = ShopConfig::new()
            .barbers(8)
            .seats(3)
            .arrivals(200)
            .max_arrival_gap(Duration::from_micros(200))
            .max_haircut(Duration::from_micros(500));
        let shop = Shop::with_random(config, Arc::new(SeededRandom::new(seed))).expect("valid config");

        let report = run_within(shop, Duration::from_secs(30));

        assert_eq!(report.arrivals.len(), 200);
        assert_eq!(report.ledger.served, report.accepted());
        assert_eq!(report.earnings(), report.expected_earnings());
        assert!(report.barbers.iter().all(|state| *state == BarberState::Stopped));
    }
}

#[test]
fn invalid_configs_fail_fast() {
    assert!(Shop::new(ShopConfig::new().barbers(0)).is_err());
    assert!(Shop::new(ShopConfig::new().seats(0)).is_err());
}
