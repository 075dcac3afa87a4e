// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Log-injection defense.
//!
//! Caller-supplied identifiers pass through [`sanitize_log_string`] before
//! they reach a log record or an error message, so a crafted plugin name
//! cannot forge extra log lines.

/// Remove ASCII control characters (code points below 0x20, and 0x7F).
///
/// Everything else, including non-ASCII text, is kept.
pub fn sanitize_log_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| (*c as u32) >= 0x20 && (*c as u32) != 0x7F)
        .collect()
}
