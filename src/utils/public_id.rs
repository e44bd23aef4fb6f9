// src/utils/public_id.rs

use uuid::Uuid;

use crate::models::profile::ProfileKind;

/// Generates a short public identifier such as `D_1a2b3c4d`.
///
/// Public identifiers are shown to other users (and used in reports) instead of
/// the internal chat-platform identity.
pub fn generate(kind: ProfileKind) -> String {
    let token = Uuid::new_v4().simple().to_string();
    format!("{}_{}", kind.tag(), &token[..8])
}

/// Profile kind encoded in a public identifier's prefix.
pub fn kind_of(public_id: &str) -> Option<ProfileKind> {
    public_id.chars().next().and_then(ProfileKind::from_tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::is_public_id;

    #[test]
    fn generated_ids_carry_the_kind_tag() {
        for kind in ProfileKind::ALL {
            let id = generate(kind);
            assert!(is_public_id(&id), "{} is malformed", id);
            assert_eq!(kind_of(&id), Some(kind));
        }
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(generate(ProfileKind::Dating), generate(ProfileKind::Dating));
    }
}
