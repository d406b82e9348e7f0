//! Unique test data so tests sharing a database never collide.

use ulid::Ulid;

/// Generate a unique string with the given prefix.
///
/// ```
/// use rps_test_support::unique_helpers::unique_str;
///
/// let a = unique_str("match");
/// let b = unique_str("match");
/// assert_ne!(a, b);
/// assert!(a.starts_with("match-"));
/// ```
pub fn unique_str(prefix: &str) -> String {
    format!("{}-{}", prefix, Ulid::new())
}

/// Generate a unique, already-normalized player name.
///
/// Player names are stored lowercased and capped at 50 characters, so the
/// prefix is truncated to leave room for the ULID suffix.
///
/// ```
/// use rps_test_support::unique_helpers::unique_player_name;
///
/// let name = unique_player_name("Alice");
/// assert!(name.starts_with("alice-"));
/// assert!(name.len() <= 50);
/// assert_eq!(name, name.to_lowercase());
/// ```
pub fn unique_player_name(prefix: &str) -> String {
    let prefix: String = prefix.trim().to_lowercase().chars().take(16).collect();
    format!("{}-{}", prefix, Ulid::new()).to_lowercase()
}
