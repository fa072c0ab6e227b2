//! Small shared helpers for the domain layer.
//!
//! The domain crate stays free of I/O and heavy dependencies, so identifiers,
//! timestamps and the audit fingerprint are produced locally.

/// Generate a simple UUID v4 (without external dependency)
pub fn uuid_v4() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();

    // Simple pseudo-random based on time
    let nanos = now.as_nanos();
    format!(
        "{:08x}-{:04x}-4{:03x}-{:04x}-{:012x}",
        (nanos >> 96) as u32,
        (nanos >> 80) as u16,
        (nanos >> 64) as u16 & 0x0fff,
        ((nanos >> 48) as u16 & 0x3fff) | 0x8000,
        (nanos & 0xffffffffffff) as u64
    )
}

/// Get current timestamp in milliseconds
pub fn current_timestamp_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

/// FNV-1a 64-bit hash rendered as lowercase hex.
///
/// Used as an audit fingerprint for signed decisions. This is a stable
/// content fingerprint, not a cryptographic signature.
pub fn fnv1a_hex(input: &str) -> String {
    const FNV_OFFSET: u64 = 0xcbf29ce484222325;
    const FNV_PRIME: u64 = 0x100000001b3;

    let mut hash = FNV_OFFSET;
    for byte in input.as_bytes() {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    format!("{:016x}", hash)
}
