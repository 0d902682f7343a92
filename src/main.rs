use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use barbershop::{RandomSource, SeededRandom, Shop, ShopConfig, ThreadRandom};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/* ---------- */

/// Runs one day at the sleeping barber's shop.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Number of barbers.
    #[arg(long, env = "BARBERSHOP_BARBERS", default_value_t = 3)]
    barbers: usize,

    /// Number of seats in the waiting room.
    #[arg(long, env = "BARBERSHOP_SEATS", default_value_t = 15)]
    seats: usize,

    /// Number of customers walking in.
    #[arg(long, env = "BARBERSHOP_ARRIVALS", default_value_t = 10)]
    arrivals: usize,

    /// Upper bound of the delay between two arrivals, in milliseconds.
    #[arg(long, env = "BARBERSHOP_MAX_ARRIVAL_GAP_MS", default_value_t = 1_000)]
    max_arrival_gap_ms: u64,

    /// Upper bound of a haircut's length, in milliseconds.
    #[arg(long, env = "BARBERSHOP_MAX_HAIRCUT_MS", default_value_t = 3_000)]
    max_haircut_ms: u64,

    /// Seed for a reproducible day.
    #[arg(long, env = "BARBERSHOP_SEED")]
    seed: Option<u64>,

    /// CPU cores to pin the barbers to, comma separated.
    #[arg(long, env = "BARBERSHOP_PIN_CORES", value_delimiter = ',')]
    pin_cores: Option<Vec<usize>>,
}

impl Cli {
    fn config(&self) -> ShopConfig {
        let config = ShopConfig::new()
            .barbers(self.barbers)
            .seats(self.seats)
            .arrivals(self.arrivals)
            .max_arrival_gap(Duration::from_millis(self.max_arrival_gap_ms))
            .max_haircut(Duration::from_millis(self.max_haircut_ms));

        match &self.pin_cores {
            Some(cores) => config.pin_cores(cores.clone()),
            None => config,
        }
    }

    fn random(&self) -> Arc<dyn RandomSource> {
        match self.seed {
            Some(seed) => Arc::new(SeededRandom::new(seed)),
            None => Arc::new(ThreadRandom),
        }
    }
}

/* ---------- */

fn init_logging() -> Result<()> {
    let log_format =
        std::env::var("BARBERSHOP_LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("barbershop=info"))?;

    match log_format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json())
            .try_init()?,
        _ => tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_thread_names(true))
            .try_init()?,
    }

    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    let shop = Shop::with_random(cli.config(), cli.random())?;
    shop.enable_graceful_shutdown();

    info!(?cli, "opening the shop");
    let report = shop.run()?;

    println!("Barbers payment total: {}", report.earnings());
    Ok(())
}
