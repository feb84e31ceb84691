//! Text helpers shared by the panels.

/// Degree glyph appended to temperatures.
pub const DEGREE: char = '\u{00B0}';

/// Qualifier separators that may follow a leading city name.
const QUALIFIERS: &[&str] = &[" / ", "/", ", "];

/// Strip a leading city qualifier from a station name.
///
/// Station names often repeat the city before the part that identifies the
/// station: "Chicago / West Chicago", "Chicago/Waukegan" or
/// "Chicago, Chicago O'Hare". The leading run of letters and spaces is
/// dropped together with the separator. Each separator is tried once, in
/// that order, against the result of the previous step.
pub fn location_cleanup(name: &str) -> String {
    QUALIFIERS
        .iter()
        .fold(name.to_string(), |value, separator| strip_qualifier(&value, separator))
}

fn strip_qualifier(value: &str, separator: &str) -> String {
    let Some(pos) = value.find(separator) else {
        return value.to_string();
    };
    let prefix = &value[..pos];
    let is_city = !prefix.is_empty()
        && prefix
            .chars()
            .all(|c| c == ' ' || c.is_ascii_alphabetic());
    if is_city {
        value[pos + separator.len()..].to_string()
    } else {
        value.to_string()
    }
}

/// Keep at most `max` characters.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleanup_slash_with_spaces() {
        assert_eq!(location_cleanup("Chicago / West Chicago"), "West Chicago");
    }

    #[test]
    fn test_cleanup_bare_slash() {
        assert_eq!(location_cleanup("Chicago/Waukegan"), "Waukegan");
    }

    #[test]
    fn test_cleanup_comma() {
        assert_eq!(
            location_cleanup("Chicago, Chicago O'Hare International Airport"),
            "Chicago O'Hare International Airport"
        );
    }

    #[test]
    fn test_cleanup_leaves_plain_names() {
        assert_eq!(location_cleanup("Midway Airport"), "Midway Airport");
        // Digits before the separator are not a city prefix
        assert_eq!(location_cleanup("I-90, Mile 12"), "I-90, Mile 12");
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("Chicago O'Hare International", 20), "Chicago O'Hare Inter");
        assert_eq!(truncate_chars("Short", 20), "Short");
        assert_eq!(truncate_chars("Zürich", 2), "Zü");
    }
}
