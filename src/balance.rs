//! Optional bracket check run before translation with `--strict`.
//!
//! The translator itself never looks at nesting; this pass exists so a bad
//! program can be reported with a position instead of as a C compile error.

use crate::error::{Bf2cError, Result};

/// Fails on the first `]` without an opening `[`, or on the innermost `[`
/// left open at the end. Positions are byte offsets into `source`.
pub fn check(source: &[u8]) -> Result<()> {
    let mut open = Vec::new();

    for (i, &byte) in source.iter().enumerate() {
        match byte {
            b'[' => open.push(i),
            b']' => {
                if open.pop().is_none() {
                    return Err(Bf2cError::UnmatchedCloseBracket(i));
                }
            }
            _ => {}
        }
    }

    match open.pop() {
        Some(i) => Err(Bf2cError::UnmatchedOpenBracket(i)),
        None => Ok(()),
    }
}
