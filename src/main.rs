//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Result;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;

use crate::config::Configuration;

#[tokio::main]
async fn main() -> Result<()> {
    human_panic::setup_panic!();

    // stdout belongs to the logger and its footer
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
    debug!("Debugging enabled");

    let cli = cli::cli().get_matches();

    let config = Configuration::load(cli.get_one::<PathBuf>("config").map(PathBuf::as_path))?;
    debug!("Configuration loaded: {:?}", config);

    match cli.subcommand() {
        Some(("simulate", matches)) => commands::simulate(matches, &config).await,
        Some(("pipe", matches)) => commands::pipe(matches, &config).await,
        Some((other, _)) => Err(anyhow!("Unknown subcommand: {}", other)),
        None => Err(anyhow!("No subcommand")),
    }
}
