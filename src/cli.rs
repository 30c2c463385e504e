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

use clap::crate_authors;
use clap::crate_version;
use clap::value_parser;
use clap::Arg;
use clap::ArgAction;
use clap::Command;

pub fn cli() -> Command<'static> {
    Command::new("footerlog")
        .author(crate_authors!())
        .version(crate_version!())
        .about("Log lines to the terminal while keeping a status footer below them")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(Arg::new("config")
            .long("config")
            .short('c')
            .takes_value(true)
            .value_name("PATH")
            .value_parser(value_parser!(PathBuf))
            .help("Configuration file to load instead of ./footerlog.toml")
        )

        .subcommand(Command::new("simulate")
            .about("Run concurrent fake tasks which all log through one logger")
            .arg(Arg::new("workers")
                .long("workers")
                .short('w')
                .takes_value(true)
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Number of concurrent tasks (default from configuration)")
            )
            .arg(Arg::new("messages")
                .long("messages")
                .short('m')
                .takes_value(true)
                .value_name("N")
                .value_parser(value_parser!(usize))
                .help("Number of steps each task logs (default from configuration)")
            )
            .arg(Arg::new("delay_ms")
                .long("delay-ms")
                .takes_value(true)
                .value_name("MILLISECONDS")
                .value_parser(value_parser!(u64))
                .help("Pause before each step (default from configuration)")
            )
            .arg(Arg::new("plain")
                .long("plain")
                .action(ArgAction::SetTrue)
                .help("Do not draw a progress footer")
            )
        )

        .subcommand(Command::new("pipe")
            .about("Copy stdin to stdout, with a footer counting the lines")
            .arg(Arg::new("footer")
                .long("footer")
                .takes_value(true)
                .value_name("TEXT")
                .value_parser(value_parser!(String))
                .default_value("Lines read:")
                .help("Text in front of the line count in the footer")
            )
        )
}
