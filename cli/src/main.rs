mod config;

use anyhow::{Context, Result};
use clap::Parser;
use gda_api::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use config::load_config;

#[derive(Parser)]
#[command(name = "gda-oracle")]
#[command(about = "Reference price oracle for discrete Gradual Dutch Auctions")]
#[command(version)]
struct Cli {
    #[arg(help = "Operation: buy_input_value, buy_spot_price, sell_output_value or sell_spot_price")]
    operation: String,

    #[arg(long = "scale_factor", alias = "scale-factor", allow_hyphen_values = true, help = "Price multiplier per unit sold (alpha), 18 decimals")]
    scale_factor: Option<String>,

    #[arg(long = "decay_constant", alias = "decay-constant", allow_hyphen_values = true, help = "Price decay rate (lambda), 18 decimals")]
    decay_constant: Option<String>,

    #[arg(long = "initial_price", alias = "initial-price", allow_hyphen_values = true, help = "Price of the first unit (k), 18 decimals")]
    initial_price: Option<String>,

    #[arg(long = "num_total_purchases", alias = "num-total-purchases", allow_hyphen_values = true, help = "Units sold so far (m)")]
    num_total_purchases: Option<String>,

    #[arg(long = "time_since_start", alias = "time-since-start", allow_hyphen_values = true, help = "Elapsed time since the price was anchored (T)")]
    time_since_start: Option<String>,

    #[arg(long = "quantity", allow_hyphen_values = true, help = "Units bought or sold by this request (q)")]
    quantity: Option<String>,

    #[arg(long = "emission_rate", alias = "emission-rate", allow_hyphen_values = true, hide = true)]
    emission_rate: Option<String>,

    #[arg(long, env = "GDA_ORACLE_CONFIG", help = "JSON file with engine settings")]
    config: Option<PathBuf>,

    #[arg(long, env = "GDA_ORACLE_DECAY_BASE", help = "Decay base: 2 or e")]
    decay_base: Option<DecayBase>,

    #[arg(long, help = "Cap on the decay exponent lambda * T, 18 decimals")]
    max_exponent: Option<u128>,

    #[arg(long, help = "Decimals of num_total_purchases, time_since_start and quantity (0 = plain integers)")]
    state_decimals: Option<u8>,

    #[arg(short, long, help = "Log debug output to stderr")]
    verbose: bool,
}

impl Cli {
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = load_config(self.config.as_deref())?;
        if let Some(decay_base) = self.decay_base {
            config.decay_base = decay_base;
        }
        if let Some(max_exponent) = self.max_exponent {
            config.max_exponent = max_exponent;
        }
        if let Some(state_decimals) = self.state_decimals {
            config.state_decimals = state_decimals;
        }
        Ok(config)
    }

    fn oracle_args(&self) -> Result<OracleArgs> {
        let named = [
            (ARG_SCALE_FACTOR, &self.scale_factor),
            (ARG_DECAY_CONSTANT, &self.decay_constant),
            (ARG_INITIAL_PRICE, &self.initial_price),
            (ARG_NUM_TOTAL_PURCHASES, &self.num_total_purchases),
            (ARG_TIME_SINCE_START, &self.time_since_start),
            (ARG_QUANTITY, &self.quantity),
            (ARG_EMISSION_RATE, &self.emission_rate),
        ];
        let args = OracleArgs::from_pairs(
            named
                .into_iter()
                .filter_map(|(name, value)| value.as_deref().map(|value| (name, value))),
        )?;
        Ok(args)
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let operation: Operation = cli.operation.parse()?;
    let config = cli.engine_config()?;
    let oracle = Oracle::new(config).context("invalid engine configuration")?;
    let args = cli.oracle_args()?;

    let line = oracle
        .respond(operation, &args)
        .with_context(|| format!("{} failed", operation))?;
    println!("{}", line);

    Ok(())
}
