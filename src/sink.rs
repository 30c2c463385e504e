//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use std::io::Stdout;
use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use tracing::warn;

/// A destination for text
///
/// A sink is owned by the logger worker and only ever touched from there.
pub trait Sink: Send + 'static {
    fn write_str(&mut self, s: &str);

    /// Called after every operation of the logger
    fn flush(&mut self) {}
}

impl<F> Sink for F
where
    F: FnMut(&str) + Send + 'static,
{
    fn write_str(&mut self, s: &str) {
        self(s)
    }
}

/// A sink writing to something that implements `std::io::Write`
///
/// Write errors cannot be returned to anyone, they are reported and otherwise ignored.
pub struct WriteSink<W: Write + Send + 'static> {
    writer: W,
}

impl<W: Write + Send + 'static> WriteSink<W> {
    pub fn new(writer: W) -> Self {
        WriteSink { writer }
    }
}

impl WriteSink<Stdout> {
    pub fn stdout() -> Self {
        WriteSink::new(std::io::stdout())
    }
}

impl<W: Write + Send + 'static> Sink for WriteSink<W> {
    fn write_str(&mut self, s: &str) {
        if let Err(e) = self.writer.write_all(s.as_bytes()) {
            warn!("Failed to write {} bytes to sink: {}", s.len(), e);
        }
    }

    fn flush(&mut self) {
        if let Err(e) = self.writer.flush() {
            warn!("Failed to flush sink: {}", e);
        }
    }
}

/// An in-memory sink that can be cloned and read while the logger is writing to it
#[derive(Clone, Debug, Default)]
pub struct SharedBuffer(Arc<Mutex<String>>);

impl SharedBuffer {
    pub fn new() -> Self {
        SharedBuffer::default()
    }

    /// Append to the buffer, bypassing any logger
    pub fn push_str(&self, s: &str) {
        self.lock().push_str(s)
    }

    pub fn contents(&self) -> String {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, String> {
        // A panic while holding the lock cannot leave a String half-written
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Sink for SharedBuffer {
    fn write_str(&mut self, s: &str) {
        self.push_str(s)
    }
}
