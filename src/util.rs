//! Shared utility functions

/// Shorten `s` to at most `max_chars` characters, appending "..." when cut.
pub fn truncate_for_display(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let suffix = "...";
    let keep = max_chars.saturating_sub(suffix.len());
    let mut out: String = s.chars().take(keep).collect();
    out.push_str(suffix);
    out
}
