//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

//! A console logger that serializes writes onto one output stream while keeping a footer
//! (e.g. a progress display) drawn below the logged lines.
//!
//! Every operation is executed by a single worker thread, in submission order. Before an
//! operation touches the sink, the currently drawn footer is erased; afterwards the current
//! footer is drawn again.

pub mod error;
pub mod footer;
pub mod logger;
pub mod sink;

pub use crate::error::LoggerError;
pub use crate::footer::Footer;
pub use crate::logger::Completion;
pub use crate::logger::Emitter;
pub use crate::logger::SequencedFooterLogger;
pub use crate::sink::SharedBuffer;
pub use crate::sink::Sink;
pub use crate::sink::WriteSink;
