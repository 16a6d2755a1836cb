// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod cli;
mod console;
mod error;
mod fixture;

use clap::Parser;
use std::process::ExitCode;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

use innkeep_api::Toast;

use crate::cli::{Args, Settings};
use crate::console::{Console, Outcome};
use crate::fixture::Fixture;

/// Exit status when the backend refused and the change was rolled back.
const EXIT_ROLLED_BACK: u8 = 1;
/// Exit status when the action was refused before anything was applied.
const EXIT_REJECTED: u8 = 2;

fn print_toasts(rx: &mut broadcast::Receiver<Toast>) {
    while let Ok(toast) = rx.try_recv() {
        println!("[{}] {}", toast.level, toast.message);
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Innkeep Console");

    let fixture: Fixture = Fixture::load(args.fixture.as_deref())?;
    info!(
        bookings = fixture.bookings.len(),
        users = fixture.users.len(),
        "Loaded fixture"
    );

    let console: Console = Console::start(fixture, Settings::from(&args))?;
    let mut toasts = console.subscribe();

    let outcome: Result<Outcome, _> = console.run(&args.command).await;
    print_toasts(&mut toasts);

    match outcome {
        Ok(outcome) => {
            println!("{}", serde_json::to_string_pretty(&outcome.listing)?);
            if outcome.committed {
                Ok(ExitCode::SUCCESS)
            } else {
                warn!(command = ?args.command, "Backend refused the change, rolled back");
                Ok(ExitCode::from(EXIT_ROLLED_BACK))
            }
        }
        Err(e) => {
            error!(error = %e, command = ?args.command, "Action rejected");
            Ok(ExitCode::from(EXIT_REJECTED))
        }
    }
}
