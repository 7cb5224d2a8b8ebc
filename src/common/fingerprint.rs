//! Best-effort device fingerprint.
//!
//! Produces a stable, non-cryptographic identifier for the local device. It is
//! informational only: not collision-resistant, never used for access control.

const FNV_OFFSET_BASIS: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// FNV-1a 64-bit hash.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Compute a stable local device identifier.
///
/// Hashes a handful of environment facts (hostname, user, OS) that do not
/// change between runs on the same machine. Two devices can collide; the
/// identifier must therefore never be treated as an authentication token.
///
/// # Returns
///
/// A string of the form `dev-<16 hex digits>`
pub fn compute_local_id() -> String {
    let hostname = std::env::var("HOSTNAME")
        .or_else(|_| std::env::var("COMPUTERNAME"))
        .unwrap_or_default();
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default();

    let source = format!("{}|{}|{}", hostname, user, std::env::consts::OS);
    format!("dev-{:016x}", fnv1a64(source.as_bytes()))
}
