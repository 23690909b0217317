//! Platform-qualified locator handling
//!
//! The platform hands out identifiers in a qualified form such as
//! `tether:///apps/staging/abc123`, while most request paths expect just the
//! trailing id segment. [`normalize_id`] strips a locator down to that
//! segment.

/// Normalize a platform-qualified locator to its bare trailing id.
///
/// Returns the substring after the last `/`, the input unchanged when it
/// contains no `/`, and `""` for empty input. Total; never fails.
pub fn normalize_id(id: &str) -> &str {
    match id.rfind('/') {
        Some(pos) => &id[pos + 1..],
        None => id,
    }
}

/// Build the platform-qualified locator for an application.
pub fn app_locator(env: &str, uuid: &str) -> String {
    format!("tether:///apps/{env}/{uuid}")
}
