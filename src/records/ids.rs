//! Identifier generation
//!
//! Record ids are a table prefix plus 18 lowercase hex characters drawn from
//! a v4 UUID. Access codes are a two-letter prefix plus 6 random base-36
//! uppercase characters, short enough to read over a call.

use rand::Rng;
use uuid::Uuid;

const ID_HEX_LEN: usize = 18;

const CODE_CHARSET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const CODE_LEN: usize = 6;

/// Generate a prefixed record id, e.g. `ex_1f9c2b4a6d8e0f1a2b`.
pub fn record_id(prefix: &str) -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}_{}", prefix, &hex[..ID_HEX_LEN])
}

/// Generate a shareable access code, e.g. `EX-4K9ZQ2`.
pub fn access_code(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..CODE_LEN)
        .map(|_| CODE_CHARSET[rng.gen_range(0..CODE_CHARSET.len())] as char)
        .collect();
    format!("{}-{}", prefix, suffix)
}
