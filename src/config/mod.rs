//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

//! The configuration of the footerlog binary
//!
//! Loaded from an optional `footerlog.toml` (or an explicitly given file) and the environment,
//! where `FOOTERLOG_DELAY_MS=0` sets `delay_ms`.

use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use getset::CopyGetters;
use getset::Getters;
use serde::Deserialize;

mod util;
use crate::config::util::*;

const DEFAULT_CONFIG_NAME: &str = "footerlog";
const ENV_PREFIX: &str = "FOOTERLOG";

#[derive(Debug, Getters, CopyGetters, Deserialize)]
pub struct Configuration {
    /// First line of the progress footer
    #[serde(default = "default_footer_title")]
    #[getset(get = "pub")]
    footer_title: String,

    #[serde(default = "default_progress_bar_width")]
    #[getset(get_copy = "pub")]
    progress_bar_width: usize,

    /// Do not draw a footer at all
    #[serde(default)]
    #[getset(get_copy = "pub")]
    plain: bool,

    #[serde(default = "default_workers")]
    #[getset(get_copy = "pub")]
    workers: usize,

    #[serde(default = "default_messages_per_worker")]
    #[getset(get_copy = "pub")]
    messages_per_worker: usize,

    /// Pause between two simulated steps, in milliseconds
    #[serde(default = "default_delay_ms")]
    #[getset(get_copy = "pub")]
    delay_ms: u64,
}

impl Configuration {
    /// Load the configuration
    ///
    /// An explicitly passed file must exist, the default `footerlog.toml` is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = ::config::Config::default();

        match path {
            Some(path) => {
                let name = path
                    .to_str()
                    .with_context(|| format!("Configuration path is not UTF-8: {}", path.display()))?;
                config
                    .merge(::config::File::with_name(name).required(true))
                    .with_context(|| format!("Loading configuration file {}", path.display()))?;
            }
            None => {
                config
                    .merge(::config::File::with_name(DEFAULT_CONFIG_NAME).required(false))
                    .context("Loading default configuration file")?;
            }
        }

        config
            .merge(::config::Environment::with_prefix(ENV_PREFIX))
            .context("Loading configuration from environment")?;

        config
            .try_into::<Configuration>()
            .context("Parsing configuration")
    }
}
