use anyhow::{Context, Result};
use clap::Parser;
use matrix_demo::{
    config::{Config, RandomOverrides},
    demo,
};
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[clap(name = "matrix-demo")]
struct Options {
    /// The path to the config file
    config_path: Option<String>,

    /// The size of the generated matrices, random in [1, 5) if not set
    #[clap(long)]
    size: Option<usize>,

    /// The inclusive lower bound of generated entries
    #[clap(long, allow_negative_numbers = true)]
    min: Option<i64>,

    /// The exclusive upper bound of generated entries
    #[clap(long, allow_negative_numbers = true)]
    max: Option<i64>,

    /// The seed of the random number generator
    #[clap(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);
    tracing_subscriber::registry().with(EnvFilter::from_default_env()).with(fmt_layer).init();

    let options = Options::parse();
    let mut config = match &options.config_path {
        Some(path) => Config::load(path).with_context(|| format!("failed to load config from {path}"))?,
        None => Config::default(),
    };
    config.override_random(RandomOverrides {
        size: options.size,
        min: options.min,
        max: options.max,
        seed: options.seed,
    });

    let (left, right) = config.matrices.build()?;
    demo::run(&left, &right, &mut io::stdout().lock()).context("failed to write output")
}
