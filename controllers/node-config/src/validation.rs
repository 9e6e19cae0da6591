//! Field validation shared by the translator and the variant codecs.
//!
//! Every check returns `ReconcileError::Validation` naming the offending
//! field, so bad input never reaches the network.

use crate::error::ReconcileError;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::LazyLock;

/// AWS key pair id, e.g. `key-0123456789abcdef0`
pub const KEY_PAIR_ID_PATTERN: &str = r"^key-[0-9a-f]{8}([0-9a-f]{9})?$";

/// KMS key ARN; like the API, this is a search rather than an anchored match
pub const KMS_KEY_ARN_PATTERN: &str = r"arn:aws:kms:.*";

// Fixed patterns, compiled once; `test_patterns_compile` covers them
#[allow(clippy::expect_used)]
pub static KEY_PAIR_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(KEY_PAIR_ID_PATTERN).expect("hardcoded regex pattern is valid"));

#[allow(clippy::expect_used)]
pub static KMS_KEY_ARN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(KMS_KEY_ARN_PATTERN).expect("hardcoded regex pattern is valid"));

pub fn not_blank(field: &str, value: &str) -> Result<(), ReconcileError> {
    if value.trim().is_empty() {
        return Err(ReconcileError::validation(field, "must not be empty or whitespace"));
    }
    Ok(())
}

pub fn at_least(field: &str, value: i32, min: i32) -> Result<(), ReconcileError> {
    if value < min {
        return Err(ReconcileError::validation(
            field,
            format!("must be at least {}, got {}", min, value),
        ));
    }
    Ok(())
}

pub fn between(field: &str, value: i32, min: i32, max: i32) -> Result<(), ReconcileError> {
    if !(min..=max).contains(&value) {
        return Err(ReconcileError::validation(
            field,
            format!("must be between {} and {}, got {}", min, max, value),
        ));
    }
    Ok(())
}

pub fn one_of(field: &str, value: &str, allowed: &[&str], ignore_case: bool) -> Result<(), ReconcileError> {
    let found = allowed.iter().any(|candidate| {
        if ignore_case {
            candidate.eq_ignore_ascii_case(value)
        } else {
            *candidate == value
        }
    });
    if !found {
        return Err(ReconcileError::validation(
            field,
            format!("expected one of {}, got {:?}", allowed.join(", "), value),
        ));
    }
    Ok(())
}

pub fn base64(field: &str, value: &str) -> Result<(), ReconcileError> {
    STANDARD
        .decode(value)
        .map(|_decoded| ())
        .map_err(|e| ReconcileError::validation(field, format!("must be base64 encoded: {}", e)))
}

pub fn ipv4(field: &str, value: &str) -> Result<(), ReconcileError> {
    value
        .parse::<Ipv4Addr>()
        .map(|_addr| ())
        .map_err(|_parse_error| ReconcileError::validation(field, format!("{:?} is not an IPv4 address", value)))
}

pub fn matches(field: &str, pattern: &Regex, value: &str) -> Result<(), ReconcileError> {
    if !pattern.is_match(value) {
        return Err(ReconcileError::validation(
            field,
            format!("{:?} does not match {}", value, pattern.as_str()),
        ));
    }
    Ok(())
}

pub fn max_len<T>(field: &str, items: &[T], max: usize) -> Result<(), ReconcileError> {
    if items.len() > max {
        return Err(ReconcileError::validation(
            field,
            format!("at most {} entries allowed, got {}", max, items.len()),
        ));
    }
    Ok(())
}
