//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

//! Implementation of the 'simulate' subcommand

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use anyhow::Result;
use clap::ArgMatches;
use colored::Colorize;
use footerlog::Footer;
use footerlog::SequencedFooterLogger;
use footerlog::WriteSink;
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use tracing::debug;
use tracing::trace;
use typed_builder::TypedBuilder;

use crate::config::Configuration;

/// Implementation of the "simulate" subcommand
pub async fn simulate(matches: &ArgMatches, config: &Configuration) -> Result<()> {
    let simulation = Simulation::builder()
        .workers({
            matches
                .get_one::<usize>("workers")
                .copied()
                .unwrap_or_else(|| config.workers())
        })
        .messages_per_worker({
            matches
                .get_one::<usize>("messages")
                .copied()
                .unwrap_or_else(|| config.messages_per_worker())
        })
        .delay({
            let ms = matches
                .get_one::<u64>("delay_ms")
                .copied()
                .unwrap_or_else(|| config.delay_ms());
            Duration::from_millis(ms)
        })
        .plain(matches.get_one::<bool>("plain").copied().unwrap_or(false) || config.plain())
        .footer_title(config.footer_title().clone())
        .bar_width(config.progress_bar_width())
        .build();
    debug!("Running {:?}", simulation);

    let logger = SequencedFooterLogger::new(WriteSink::stdout())?;
    simulation.run(&logger).await?;
    logger.shutdown().await.context("Shutting down logger")
}

#[derive(Debug, TypedBuilder)]
struct Simulation {
    workers: usize,
    messages_per_worker: usize,
    delay: Duration,
    plain: bool,
    footer_title: String,
    bar_width: usize,
}

impl Simulation {
    async fn run(&self, logger: &SequencedFooterLogger) -> Result<()> {
        let total = self
            .workers
            .checked_mul(self.messages_per_worker)
            .context("Too many steps")?;
        let finished = Arc::new(AtomicUsize::new(0));

        if !self.plain {
            logger
                .update_footer(progress_footer(&self.footer_title, 0, total, self.bar_width))
                .await?;
        }

        (0..self.workers)
            .map(|worker| self.run_worker(worker, logger.clone(), finished.clone(), total))
            .collect::<FuturesUnordered<_>>()
            .collect::<Vec<Result<()>>>()
            .await
            .into_iter()
            .collect::<Result<()>>()?;

        logger.clear_footer().await?;
        logger
            .log_str(format!("Finished {} steps\n", finished.load(Ordering::SeqCst)))
            .await?;
        Ok(())
    }

    async fn run_worker(
        &self,
        worker: usize,
        logger: SequencedFooterLogger,
        finished: Arc<AtomicUsize>,
        total: usize,
    ) -> Result<()> {
        for step in 0..self.messages_per_worker {
            tokio::time::sleep(self.delay).await;

            let finished = finished.clone();
            let footer = (!self.plain).then(|| (self.footer_title.clone(), self.bar_width));
            logger
                .log(move |emitter| {
                    emitter.println(&format!("[task {}] step {} done", worker, step));

                    // Counted inside the action, so the footer never goes backwards
                    let done = finished.fetch_add(1, Ordering::SeqCst) + 1;
                    if let Some((title, width)) = footer {
                        emitter.update_footer(progress_footer(&title, done, total, width));
                    }
                    Ok(())
                })
                .await
                .with_context(|| format!("Logging step {} of task {}", step, worker))?;
            trace!("Task {} step {} logged", worker, step);
        }

        debug!("Task {} finished", worker);
        Ok(())
    }
}

/// A two line footer: the title, then a bar with the completed percentage
fn progress_footer(title: &str, done: usize, total: usize, width: usize) -> Footer {
    let fraction = if total == 0 {
        1.0
    } else {
        done as f64 / total as f64
    };
    let filled = ((fraction * width as f64).round() as usize).min(width);

    let text = format!(
        "{}\n[{}{}] {:.1}% complete",
        title.bold(),
        "=".repeat(filled),
        " ".repeat(width - filled),
        fraction * 100.0
    );
    Footer::new(text, 2)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_footer() {
        let footer = progress_footer("Executing tasks:", 1, 4, 8);
        assert_eq!(footer.line_count(), 2);
        assert!(footer.text().contains("Executing tasks:"));
        assert!(footer.text().ends_with("\n[==      ] 25.0% complete"));
    }

    #[test]
    fn test_progress_footer_bounds() {
        assert!(progress_footer("t", 0, 3, 4).text().ends_with("[    ] 0.0% complete"));
        assert!(progress_footer("t", 3, 3, 4).text().ends_with("[====] 100.0% complete"));
        assert!(progress_footer("t", 0, 0, 4).text().ends_with("[====] 100.0% complete"));
    }

    #[tokio::test]
    async fn test_simulation_rejects_step_overflow() {
        let buffer = footerlog::SharedBuffer::new();
        let logger = SequencedFooterLogger::new(buffer.clone()).unwrap();

        let res = Simulation::builder()
            .workers(usize::MAX)
            .messages_per_worker(2)
            .delay(Duration::from_millis(0))
            .plain(true)
            .footer_title(String::from("title"))
            .bar_width(6)
            .build()
            .run(&logger)
            .await;
        logger.shutdown().await.unwrap();

        assert_eq!(res.unwrap_err().to_string(), "Too many steps");
        assert_eq!(buffer.contents(), "");
    }

    #[tokio::test]
    async fn test_simulation_keeps_progress_monotonic() {
        let buffer = footerlog::SharedBuffer::new();
        let logger = SequencedFooterLogger::new(buffer.clone()).unwrap();

        Simulation::builder()
            .workers(3)
            .messages_per_worker(2)
            .delay(Duration::from_millis(0))
            .plain(false)
            .footer_title(String::from("title"))
            .bar_width(6)
            .build()
            .run(&logger)
            .await
            .unwrap();
        logger.shutdown().await.unwrap();

        let output = buffer.contents();
        let percentages = output
            .match_indices("% complete")
            .map(|(idx, _)| {
                let start = output[..idx].rfind(' ').unwrap() + 1;
                output[start..idx].parse::<f64>().unwrap()
            })
            .collect::<Vec<_>>();

        // initial footer plus one per step
        assert_eq!(percentages.len(), 7);
        assert!(percentages.windows(2).all(|w| w[0] < w[1]));
        assert!(output.ends_with("Finished 6 steps\n"));
        assert_eq!(output.matches("] step ").count(), 6);
    }
}
