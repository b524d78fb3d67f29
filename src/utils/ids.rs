use rand::Rng;

// ============================================================================
// Human-readable identifiers
// ============================================================================
//
// Identities, products and orders use short string ids rather than UUIDs,
// matching the records already sitting in persisted storage.
//
// ============================================================================

const LOWER_ALPHANUMERIC: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const UPPER_ALPHANUMERIC: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Length of generated identity and product ids.
pub const SHORT_ID_LEN: usize = 9;

fn random_chars(charset: &[u8], len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| char::from(charset[rng.random_range(0..charset.len())]))
        .collect()
}

/// Nine lower-case alphanumerics, e.g. `k3x9a0q2m`.
pub fn short_id() -> String {
    random_chars(LOWER_ALPHANUMERIC, SHORT_ID_LEN)
}

/// `ORD-<1000..=9999>-<two upper-case alphanumerics>`, e.g. `ORD-4821-K7`.
///
/// Collisions are possible, just unlikely at demo scale.
pub fn order_id() -> String {
    let number: u16 = rand::rng().random_range(1000..=9999);
    format!("ORD-{}-{}", number, random_chars(UPPER_ALPHANUMERIC, 2))
}
