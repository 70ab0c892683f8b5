//! Code generation and verification.
//!
//! A code is the current 30-second time slice hashed together with the shared
//! secret through a 32-bit rolling polynomial hash, reduced to 6 decimal
//! digits. Pure functions of (config, now); total over all inputs.

use crate::passcode::types::*;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Time slices
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Compute the current time slice.
pub fn time_slice(period_ms: i64) -> i64 {
    time_slice_at(current_unix_millis(), period_ms)
}

/// Compute the time slice for a given unix-millisecond timestamp.
pub fn time_slice_at(now_ms: i64, period_ms: i64) -> i64 {
    now_ms.div_euclid(period_ms)
}

/// Milliseconds remaining until the current slice rolls over.
pub fn remaining_ms(period_ms: i64) -> i64 {
    remaining_ms_at(current_unix_millis(), period_ms)
}

/// Milliseconds remaining for a specific timestamp.
pub fn remaining_ms_at(now_ms: i64, period_ms: i64) -> i64 {
    period_ms - now_ms.rem_euclid(period_ms)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Rolling hash
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Rolling polynomial hash: `h = (h << 5) - h + unit` with two's-complement
/// 32-bit wraparound at every step.
///
/// Runs over UTF-16 code units so the same secret yields the same codes in
/// any client implementation sharing it.
pub fn fold_hash(input: &str) -> i32 {
    let mut hash: i32 = 0;
    for unit in input.encode_utf16() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(unit as i32);
    }
    hash
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Generation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Generate the 6-digit code for the current time slice.
pub fn generate(config: &PasscodeConfig) -> String {
    generate_at(config, current_unix_millis())
}

/// Generate the 6-digit code at an explicit unix-millisecond timestamp.
pub fn generate_at(config: &PasscodeConfig, now_ms: i64) -> String {
    let slice = time_slice_at(now_ms, config.period_ms);
    let input = format!("{}{}", config.secret, slice);
    // unsigned_abs: i32::MIN has no i32 absolute value, but 2147483648
    // is still a valid hash magnitude.
    let value = fold_hash(&input).unsigned_abs() % 1_000_000;
    format!("{:06}", value)
}

/// Generate a `GeneratedPasscode` (code + display timing) for now.
pub fn generate_code(config: &PasscodeConfig) -> GeneratedPasscode {
    generate_code_at(config, current_unix_millis())
}

/// Generate a `GeneratedPasscode` at a specific timestamp.
pub fn generate_code_at(config: &PasscodeConfig, now_ms: i64) -> GeneratedPasscode {
    GeneratedPasscode {
        code: generate_at(config, now_ms),
        slice: time_slice_at(now_ms, config.period_ms),
        period_ms: config.period_ms,
        remaining_ms: remaining_ms_at(now_ms, config.period_ms),
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Verification
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Verify a candidate against the code of the current slice.
///
/// Strict string equality: leading zeros matter, and there is no drift
/// window, retry counting, or lockout.
pub fn verify(config: &PasscodeConfig, candidate: &str) -> bool {
    verify_at(config, candidate, current_unix_millis())
}

/// Verify at a specific timestamp.
pub fn verify_at(config: &PasscodeConfig, candidate: &str, now_ms: i64) -> bool {
    candidate == generate_at(config, now_ms)
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  Clock
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Current unix timestamp in milliseconds.
pub fn current_unix_millis() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as i64
}
