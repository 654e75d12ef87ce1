//! `httpgen` command line driver.

use clap::Parser;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

mod generate;

#[derive(Parser, Debug)]
#[command(
    name = "httpgen",
    version,
    about = "Generate HTTP clients and servers from service definitions"
)]
struct Cli {
    #[command(flatten)]
    args: generate::GenerateArgs,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    std::process::exit(generate::run(cli.args));
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    if tracing_subscriber::registry()
        .with(fmt_layer)
        .try_init()
        .is_err()
    {
        eprintln!("Warning: tracing subscriber already initialized");
    }
}
