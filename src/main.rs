use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use metaphlanplot::cli::{Cli, Invocation, ResolveError};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let invocation = match cli.resolve() {
        Ok(invocation) => invocation,
        Err(ResolveError::Usage(e)) => e.exit(),
        Err(ResolveError::Plot(e)) => {
            eprintln!("{:#}", anyhow::Error::new(e));
            return ExitCode::FAILURE;
        }
    };

    match run(&invocation) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(invocation: &Invocation) -> anyhow::Result<()> {
    metaphlanplot::plot_profile(
        &invocation.input,
        invocation.level,
        invocation.top_n,
        &invocation.destination,
        &invocation.config,
    )
    .with_context(|| {
        format!(
            "plotting {} at {} level",
            invocation.input.display(),
            invocation.level
        )
    })
}

fn init_logging(verbose: u8) {
    let default_filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}
