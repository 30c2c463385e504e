//
// Copyright (c) 2020-2022 science+computing ag and other contributors
//
// This program and the accompanying materials are made
// available under the terms of the Eclipse Public License 2.0
// which is available at https://www.eclipse.org/legal/epl-2.0/
//
// SPDX-License-Identifier: EPL-2.0
//

//! The footer state and the escape sequences to erase it

use getset::CopyGetters;
use getset::Getters;

/// Moves the cursor up by one line
pub const CURSOR_UP: &str = "\x1b[1A";

/// Clears from the cursor to the end of the screen
pub const CLEAR_TO_END: &str = "\x1b[0J";

/// The text drawn below the log output
///
/// The line count is whatever the caller says it is. It is used to move the cursor back up
/// before the footer is erased, so a count that does not match the text results in garbled
/// output, but never in an error.
#[derive(Clone, Debug, Default, PartialEq, Eq, Getters, CopyGetters)]
pub struct Footer {
    #[getset(get = "pub")]
    text: String,

    #[getset(get_copy = "pub")]
    line_count: usize,
}

impl Footer {
    pub fn new<T: Into<String>>(text: T, line_count: usize) -> Self {
        Footer {
            text: text.into(),
            line_count,
        }
    }

    /// Build a footer, counting the lines of `text` for the line count
    pub fn measured<T: Into<String>>(text: T) -> Self {
        let text = text.into();
        let line_count = text.lines().count();
        Footer { text, line_count }
    }

    /// No footer at all
    pub fn empty() -> Self {
        Footer::default()
    }

    /// The sequence that erases this footer, if it was the last thing written
    pub fn erase_sequence(&self) -> String {
        erase_sequence(self.line_count)
    }
}

/// Move the cursor up `line_count` lines, then clear to the end of the screen
pub fn erase_sequence(line_count: usize) -> String {
    let mut seq = String::with_capacity(CURSOR_UP.len() * line_count + CLEAR_TO_END.len());
    for _ in 0..line_count {
        seq.push_str(CURSOR_UP);
    }
    seq.push_str(CLEAR_TO_END);
    seq
}
