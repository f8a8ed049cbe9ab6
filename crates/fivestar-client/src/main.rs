//! The `fivestar` CLI

use clap::Parser;
use fivestar_client::args::Args;
use fivestar_client::cli::{exit_code, run};
use tracing::{debug, error};

fn main() {
    let args = Args::parse();

    enable_logging(&args);
    debug!("command line: {:?}", args);

    let result = run(&args, |name| std::env::var(name).ok(), &mut std::io::stdout());
    if let Err(e) = &result {
        error!("{e}");
    }

    std::process::exit(exit_code(&result));
}

fn enable_logging(args: &Args) {
    let mut builder = tracing_subscriber::fmt().compact().with_writer(std::io::stderr);

    if args.quiet {
        builder = builder.with_max_level(tracing::Level::ERROR);
    } else {
        match args.verbose {
            2.. => builder = builder.with_max_level(tracing::Level::TRACE),
            1 => builder = builder.with_max_level(tracing::Level::DEBUG),
            _ => builder = builder.with_max_level(tracing::Level::INFO),
        }
    }

    builder.init();
}
