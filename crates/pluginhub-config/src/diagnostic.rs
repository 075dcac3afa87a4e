// SPDX-FileCopyrightText: 2026 Pluginhub Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns figment errors into miette diagnostics.
//!
//! Unknown keys point at the offending line of the TOML file they came from
//! and suggest the closest valid key.

#![allow(unused_assignments)] // emitted by miette's Diagnostic derive

use std::fmt::Write as _;

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a valid key needs before it is offered as a fix.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// One problem found while loading `pluginhub.toml` and the environment.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(pluginhub::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        valid_keys: String,
        #[label("not a pluginhub setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(pluginhub::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// Value outside an enumerated set, such as `log.output = "syslog"`.
    #[error("invalid value for key `{key}`: {detail}")]
    #[diagnostic(code(pluginhub::config::invalid_value))]
    InvalidValue { key: String, detail: String },

    #[error("validation error: {message}")]
    #[diagnostic(code(pluginhub::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(pluginhub::config::other))]
    Other(String),
}

fn unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    let mut help = String::new();
    if let Some(key) = suggestion {
        let _ = write!(help, "did you mean `{key}`? ");
    }
    let _ = write!(help, "valid keys: {valid_keys}");
    help
}

/// Convert every error carried by `err`.
///
/// `toml_sources` pairs each file path with its content so unknown keys can
/// be labelled in place.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| convert(&error, toml_sources))
        .collect()
}

fn convert(error: &figment::Error, toml_sources: &[(String, String)]) -> ConfigError {
    let section: Vec<String> = error.path.iter().map(ToString::to_string).collect();

    match &error.kind {
        Kind::UnknownField(field, expected) => {
            let located = origin_file(error)
                .and_then(|file| toml_sources.iter().find(|(path, _)| *path == file))
                .and_then(|(path, content)| {
                    let offset = find_key_offset(content, &section, field)?;
                    Some((
                        SourceSpan::new(offset.into(), field.len()),
                        NamedSource::new(path, content.clone()),
                    ))
                });
            let (span, src) = match located {
                Some((span, src)) => (Some(span), Some(src)),
                None => (None, None),
            };
            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion: suggest_key(field, &expected[..]),
                valid_keys: expected.join(", "),
                span,
                src,
            }
        }
        Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
            key: section.join("."),
            detail: format!("found {actual}, expected {expected}"),
            expected: expected.clone(),
        },
        Kind::UnknownVariant(found, expected) => ConfigError::InvalidValue {
            key: section.join("."),
            detail: format!("`{found}`, expected one of: {}", expected.join(", ")),
        },
        _ => ConfigError::Other(error.to_string()),
    }
}

fn origin_file(error: &figment::Error) -> Option<String> {
    match error.metadata.as_ref()?.source.as_ref()? {
        figment::Source::File(path) => Some(path.display().to_string()),
        _ => None,
    }
}

/// Byte offset where `field = ...` starts, looking only below the
/// `[section]` header named by the first element of `path`.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let start = match path.first() {
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let rest = &line[indent..];
        let is_key = rest
            .strip_prefix(field)
            .is_some_and(|after| after.starts_with([' ', '\t', '=']));
        if is_key {
            return Some(offset + indent);
        }
        offset += line.len();
    }
    None
}

/// Closest entry of `valid_keys` to `unknown`, if any is close enough.
pub fn suggest_key<S: AsRef<str>>(unknown: &str, valid_keys: &[S]) -> Option<String> {
    let mut best: Option<(f64, &str)> = None;
    for key in valid_keys.iter().map(AsRef::as_ref) {
        let score = strsim::jaro_winkler(unknown, key);
        if score > SUGGESTION_THRESHOLD && best.is_none_or(|(top, _)| score > top) {
            best = Some((score, key));
        }
    }
    best.map(|(_, key)| key.to_string())
}

/// Render each diagnostic into `out` with miette's graphical handler.
pub fn render_errors_to(out: &mut String, errors: &[ConfigError]) {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        if handler.render_report(out, error as &dyn Diagnostic).is_err() {
            let _ = writeln!(out, "Error: {error}");
        }
    }
}

/// Print every diagnostic to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    let mut out = String::new();
    render_errors_to(&mut out, errors);
    eprint!("{out}");
}
