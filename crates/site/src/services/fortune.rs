//! Fortune cookies for the about page.

use rand::seq::IndexedRandom;

/// Every fortune the site can hand out.
pub const FORTUNES: &[&str] = &[
    "Conquer your fears or they will conquer you.",
    "Rivers need springs.",
    "Do not fear what you don't know.",
    "You will have a pleasant surprise.",
    "Whenever possible, keep it simple.",
];

/// Pick a fortune at random.
#[must_use]
pub fn get_fortune() -> &'static str {
    FORTUNES.choose(&mut rand::rng()).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_fortunes_not_empty() {
        assert!(!FORTUNES.is_empty());
    }

    #[test]
    fn test_get_fortune_returns_member() {
        for _ in 0..200 {
            assert!(FORTUNES.contains(&get_fortune()));
        }
    }

    #[test]
    fn test_get_fortune_varies() {
        let seen: HashSet<_> = (0..500).map(|_| get_fortune()).collect();
        assert!(seen.len() > 1);
    }
}
