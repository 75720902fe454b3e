//! Client-side identifier generation
//!
//! Sections and questions get random UUID-based ids; new forms get a
//! random numeric id. Numeric ids stay within the JavaScript safe-integer
//! range so the backend can round-trip them through JSON numbers.

use rand::Rng;
use uuid::Uuid;

/// Largest integer a JSON number can carry without losing precision
const MAX_SAFE_ID: u64 = (1 << 53) - 1;

pub fn section_id() -> String {
    format!("section-{}", Uuid::new_v4())
}

pub fn question_id() -> String {
    format!("question-{}", Uuid::new_v4())
}

/// Fresh id for a form that has never been saved. Never 0.
pub fn form_id() -> u64 {
    rand::thread_rng().gen_range(1..=MAX_SAFE_ID)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_prefixed_and_unique() {
        let ids: HashSet<String> = (0..1000).map(|_| section_id()).collect();
        assert_eq!(ids.len(), 1000);
        assert!(ids.iter().all(|id| id.starts_with("section-")));
        assert!(question_id().starts_with("question-"));
    }

    #[test]
    fn test_form_id_is_non_zero_and_json_safe() {
        for _ in 0..1000 {
            let id = form_id();
            assert!(id > 0);
            assert!(id <= MAX_SAFE_ID);
        }
    }
}
