//! Entity identifiers of the form `<kind>_<epoch-millis>_<base36 suffix>`.

use chrono::Utc;
use uuid::Uuid;

const SUFFIX_LEN: usize = 9;
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    Task,
    Category,
}

impl IdKind {
    fn prefix(self) -> &'static str {
        match self {
            IdKind::Task => "task",
            IdKind::Category => "category",
        }
    }
}

/// Generates a fresh id, retrying while `taken` reports a collision.
pub fn generate_id(kind: IdKind, taken: impl Fn(&str) -> bool) -> String {
    loop {
        let candidate = format!(
            "{}_{}_{}",
            kind.prefix(),
            Utc::now().timestamp_millis(),
            random_suffix()
        );
        if !taken(&candidate) {
            return candidate;
        }
    }
}

fn random_suffix() -> String {
    let mut bits = Uuid::new_v4().as_u128();
    let mut suffix = String::with_capacity(SUFFIX_LEN);
    for _ in 0..SUFFIX_LEN {
        suffix.push(BASE36[(bits % 36) as usize] as char);
        bits /= 36;
    }
    suffix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn id_has_kind_millis_and_suffix() {
        let id = generate_id(IdKind::Category, |_| false);
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "category");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), SUFFIX_LEN);
        assert!(parts[2].bytes().all(|b| BASE36.contains(&b)));
    }

    #[test]
    fn collisions_are_regenerated() {
        let attempts = Cell::new(0);
        let id = generate_id(IdKind::Task, |_| {
            attempts.set(attempts.get() + 1);
            attempts.get() < 3
        });
        assert_eq!(attempts.get(), 3);
        assert!(id.starts_with("task_"));
    }
}
