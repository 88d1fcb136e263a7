//! Name-suggestion helpers for human-friendly error messages.
//!
//! When a loaded module references a binding that is not present in its
//! injection context, the error lists close matches from the names that
//! *are* available.

/// Returns the last `/`-separated segment of a registry name.
///
/// Derived names are slash-joined paths (`routes/users`); the final
/// segment is usually what a typo is closest to.
///
/// # Examples
/// ```
/// use wasla_support::text::last_segment;
///
/// assert_eq!(last_segment("routes/users"), "users");
/// assert_eq!(last_segment("logger"), "logger");
/// ```
pub fn last_segment(name: &str) -> &str {
    name.rsplit('/').next().unwrap_or(name)
}

/// Generates "did you mean?" suggestions for an unresolved name.
///
/// Compares the requested name against the available ones and returns the
/// closest matches, best first, capped at `max_suggestions`.
pub fn suggest_similar(
    requested: &str,
    available: &[&str],
    max_suggestions: usize,
) -> Vec<String> {
    let requested_lower = requested.to_lowercase();
    let requested_short = last_segment(requested).to_lowercase();

    let mut scored: Vec<(&str, usize)> = available
        .iter()
        .filter_map(|&name| {
            let name_lower = name.to_lowercase();
            let name_short = last_segment(name).to_lowercase();

            // Full-name substring match (highest priority)
            if name_lower.contains(&requested_lower)
                || requested_lower.contains(&name_lower)
            {
                return Some((name, 100));
            }

            // Last-segment substring match
            if name_short.contains(&requested_short)
                || requested_short.contains(&name_short)
            {
                return Some((name, 80));
            }

            // Common prefix of the last segments
            let common = name_short
                .chars()
                .zip(requested_short.chars())
                .take_while(|(a, b)| a == b)
                .count();

            if common >= 3 {
                return Some((name, common * 10));
            }

            None
        })
        .collect();

    scored.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    scored
        .into_iter()
        .take(max_suggestions)
        .map(|(name, _)| name.to_string())
        .collect()
}
