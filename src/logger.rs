//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

//! The sequenced logger and its worker
//!
//! All operations are sent through one unbounded channel to a dedicated worker thread, which is
//! the only place the sink is ever written to. Each operation is one unit of work: erase the
//! drawn footer, do the operation, draw the current footer.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::pin::Pin;
use std::task::Context;
use std::task::Poll;

use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::oneshot;
use tracing::debug;
use tracing::trace;

use crate::error::LoggerError;
use crate::footer::Footer;
use crate::sink::Sink;

const WORKER_THREAD_NAME: &str = "footer-logger";

type EmitAction = Box<dyn FnOnce(&mut Emitter<'_>) -> anyhow::Result<()> + Send + 'static>;
type Done = oneshot::Sender<Result<(), LoggerError>>;

enum Operation {
    Emit { action: EmitAction, done: Done },
    SetFooter { footer: Footer, done: Done },
    Shutdown { done: Done },
}

impl Operation {
    fn name(&self) -> &'static str {
        match self {
            Operation::Emit { .. } => "emit",
            Operation::SetFooter { .. } => "set-footer",
            Operation::Shutdown { .. } => "shutdown",
        }
    }
}

/// A logger that applies all writes one at a time, in submission order, keeping a footer drawn
/// below the output
///
/// The logger can be cloned freely, all clones feed the same worker. The worker stops after
/// [`SequencedFooterLogger::shutdown`] or once every clone is dropped and the queue is drained.
#[derive(Clone)]
pub struct SequencedFooterLogger {
    sender: UnboundedSender<Operation>,
}

impl std::fmt::Debug for SequencedFooterLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SequencedFooterLogger(closed: {})", self.sender.is_closed())
    }
}

impl SequencedFooterLogger {
    /// Start the worker thread, which owns `sink` from now on
    pub fn new<S: Sink>(sink: S) -> Result<Self, LoggerError> {
        let (sender, receiver) = tokio::sync::mpsc::unbounded_channel();

        std::thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || Worker::new(sink).run(receiver))
            .map_err(LoggerError::Spawn)?;

        Ok(SequencedFooterLogger { sender })
    }

    /// Schedule `action` to write to the sink
    ///
    /// The footer is erased before the action runs and drawn again after it returned, even if it
    /// failed. If the action changes the footer via [`Emitter::set_footer`], the new footer is
    /// drawn.
    pub fn log<F>(&self, action: F) -> Completion
    where
        F: FnOnce(&mut Emitter<'_>) -> anyhow::Result<()> + Send + 'static,
    {
        self.submit(|done| Operation::Emit {
            action: Box::new(action),
            done,
        })
    }

    /// Schedule `message` to be written to the sink as-is
    pub fn log_str<M: Into<String>>(&self, message: M) -> Completion {
        let message = message.into();
        self.log(move |emitter| {
            emitter.print(&message);
            Ok(())
        })
    }

    /// Schedule a footer change
    pub fn set_footer<T: Into<String>>(&self, text: T, line_count: usize) -> Completion {
        self.update_footer(Footer::new(text, line_count))
    }

    pub fn update_footer(&self, footer: Footer) -> Completion {
        self.submit(|done| Operation::SetFooter { footer, done })
    }

    pub fn clear_footer(&self) -> Completion {
        self.update_footer(Footer::empty())
    }

    /// Stop the worker once everything submitted before this call is done
    ///
    /// Operations queued behind the shutdown, and everything submitted afterwards, complete
    /// with [`LoggerError::Closed`]. The footer stays as it is drawn.
    pub fn shutdown(&self) -> Completion {
        self.submit(|done| Operation::Shutdown { done })
    }

    fn submit<F>(&self, make_operation: F) -> Completion
    where
        F: FnOnce(Done) -> Operation,
    {
        let (done, receiver) = oneshot::channel();
        if let Err(e) = self.sender.send(make_operation(done)) {
            // Dropping the operation drops its sender, the completion resolves to `Closed`
            trace!("Worker gone, dropping {} operation", e.0.name());
        }
        Completion { receiver }
    }
}

/// Resolves once the submitted operation was applied and the footer was redrawn
///
/// Await it from async code, or [`Completion::wait`] for it from a plain thread. Dropping it does
/// not cancel the operation.
#[derive(Debug)]
pub struct Completion {
    receiver: oneshot::Receiver<Result<(), LoggerError>>,
}

impl Completion {
    /// Block the current thread until the operation is done
    ///
    /// # Panics
    ///
    /// If called from within an asynchronous execution context, just like
    /// `tokio::sync::oneshot::Receiver::blocking_recv`.
    pub fn wait(self) -> Result<(), LoggerError> {
        self.receiver
            .blocking_recv()
            .unwrap_or(Err(LoggerError::Closed))
    }
}

impl Future for Completion {
    type Output = Result<(), LoggerError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|res| res.unwrap_or(Err(LoggerError::Closed)))
    }
}

/// The view on the sink an emit action gets
pub struct Emitter<'a> {
    sink: &'a mut dyn Sink,
    footer: &'a mut Footer,
}

impl<'a> Emitter<'a> {
    pub fn print(&mut self, s: &str) {
        self.sink.write_str(s)
    }

    pub fn println(&mut self, s: &str) {
        self.sink.write_str(s);
        self.sink.write_str("\n");
    }

    pub fn footer(&self) -> &Footer {
        &*self.footer
    }

    /// Replace the footer that is drawn after this action
    pub fn set_footer<T: Into<String>>(&mut self, text: T, line_count: usize) {
        self.update_footer(Footer::new(text, line_count))
    }

    pub fn update_footer(&mut self, footer: Footer) {
        *self.footer = footer;
    }
}

impl std::fmt::Write for Emitter<'_> {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        self.print(s);
        Ok(())
    }
}

struct Worker<S: Sink> {
    sink: S,

    /// The footer that is currently drawn
    footer: Footer,
}

impl<S: Sink> Worker<S> {
    fn new(sink: S) -> Self {
        Worker {
            sink,
            footer: Footer::empty(),
        }
    }

    fn run(mut self, mut receiver: UnboundedReceiver<Operation>) {
        debug!("Footer logger worker started");

        while let Some(operation) = receiver.blocking_recv() {
            trace!("Applying {} operation", operation.name());
            match operation {
                Operation::Emit { action, done } => {
                    let res = self.emit(action);
                    let _ = done.send(res);
                }

                Operation::SetFooter { footer, done } => {
                    self.replace_footer(footer);
                    let _ = done.send(Ok(()));
                }

                Operation::Shutdown { done } => {
                    receiver.close();
                    while let Ok(rest) = receiver.try_recv() {
                        trace!("Discarding {} operation queued after shutdown", rest.name());
                    }
                    self.sink.flush();
                    let _ = done.send(Ok(()));
                    break;
                }
            }
        }

        debug!("Footer logger worker stopped");
    }

    fn emit(&mut self, action: EmitAction) -> Result<(), LoggerError> {
        self.erase();

        let res = {
            let mut emitter = Emitter {
                sink: &mut self.sink,
                footer: &mut self.footer,
            };
            std::panic::catch_unwind(AssertUnwindSafe(move || action(&mut emitter)))
        };

        self.draw();
        self.sink.flush();

        match res {
            Ok(Ok(())) => Ok(()),
            Ok(Err(e)) => Err(LoggerError::ActionFailed(e)),
            Err(payload) => Err(LoggerError::ActionPanicked(panic_message(payload.as_ref()))),
        }
    }

    fn replace_footer(&mut self, footer: Footer) {
        self.erase();
        self.footer = footer;
        self.draw();
        self.sink.flush();
    }

    fn erase(&mut self) {
        let seq = self.footer.erase_sequence();
        self.sink.write_str(&seq);
    }

    fn draw(&mut self) {
        if !self.footer.text().is_empty() {
            self.sink.write_str(self.footer.text());
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| String::from("<no panic message>"))
}
