//! Share-id generation for published forms.

use rand::distr::{Alphanumeric, SampleString};

/// Length of generated share ids.
pub const SHARE_ID_LEN: usize = 12;

/// Generate a random URL-safe share id.
///
/// Uniqueness is enforced by the database; callers retry against the
/// unique index on collision.
pub fn generate_share_id() -> String {
    Alphanumeric.sample_string(&mut rand::rng(), SHARE_ID_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_id_shape() {
        let id = generate_share_id();
        assert_eq!(id.len(), SHARE_ID_LEN);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_share_ids_differ() {
        assert_ne!(generate_share_id(), generate_share_id());
    }
}
