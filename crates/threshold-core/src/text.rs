//! Small helpers for player-facing text.

/// Upper-cases the first character of `text`, leaving the rest untouched.
///
/// Sentences that begin with an entity name ("oak door opens.") go through
/// this before being sent.
#[must_use]
pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize_first_only_touches_first_character() {
        assert_eq!(capitalize_first("oak door opens."), "Oak door opens.");
        assert_eq!(capitalize_first("McKay sits."), "McKay sits.");
    }

    #[test]
    fn test_capitalize_first_handles_empty_and_non_ascii() {
        assert_eq!(capitalize_first(""), "");
        assert_eq!(capitalize_first("émile stands up."), "Émile stands up.");
    }
}
