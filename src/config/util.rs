//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

//! Default values for configuration keys

pub fn default_footer_title() -> String {
    String::from("Executing tasks:")
}

pub fn default_progress_bar_width() -> usize {
    30
}

pub fn default_workers() -> usize {
    4
}

pub fn default_messages_per_worker() -> usize {
    5
}

pub fn default_delay_ms() -> u64 {
    50
}
