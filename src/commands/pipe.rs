//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

//! Implementation of the 'pipe' subcommand

use anyhow::Context;
use anyhow::Result;
use clap::ArgMatches;
use footerlog::Footer;
use footerlog::SequencedFooterLogger;
use footerlog::WriteSink;
use tokio::io::AsyncBufReadExt;
use tokio::io::BufReader;
use tracing::debug;

use crate::config::Configuration;

/// Implementation of the "pipe" subcommand
pub async fn pipe(matches: &ArgMatches, config: &Configuration) -> Result<()> {
    let title = matches
        .get_one::<String>("footer")
        .cloned()
        .context("No footer text given")?;

    let logger = SequencedFooterLogger::new(WriteSink::stdout())?;
    let res = copy_lines(&logger, &title, config.plain()).await;

    // Also on a read error, so the queued lines are written and the footer is gone before
    // the error is printed
    logger.clear_footer().await?;
    logger.shutdown().await.context("Shutting down logger")?;

    let count = res?;
    debug!("Read {} lines from stdin", count);
    Ok(())
}

async fn copy_lines(logger: &SequencedFooterLogger, title: &str, plain: bool) -> Result<usize> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut count = 0usize;

    while let Some(line) = lines.next_line().await.context("Reading from stdin")? {
        count += 1;
        let footer = (!plain).then(|| Footer::new(format!("{} {} lines", title, count), 1));

        // Not awaited, the logger keeps the order anyways
        let _ = logger.log(move |emitter| {
            emitter.println(&line);
            if let Some(footer) = footer {
                emitter.update_footer(footer);
            }
            Ok(())
        });
    }

    Ok(count)
}
