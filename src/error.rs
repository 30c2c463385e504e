//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

use thiserror::Error as ThisError;

#[derive(ThisError, Debug)]
pub enum LoggerError {
    #[error("Failed to spawn the logger worker thread")]
    Spawn(#[source] std::io::Error),

    /// The worker does not accept or complete operations anymore
    #[error("Logger worker is not running anymore")]
    Closed,

    #[error("Log action failed: {0}")]
    ActionFailed(#[source] anyhow::Error),

    #[error("Log action panicked: {0}")]
    ActionPanicked(String),
}

impl LoggerError {
    pub fn is_closed(&self) -> bool {
        matches!(self, LoggerError::Closed)
    }
}
