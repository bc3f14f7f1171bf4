//! Small helpers for PokeAPI resource URLs and identifiers.

/// Numeric ID from a resource URL: the last non-empty path segment.
///
/// `https://pokeapi.co/api/v2/pokemon-species/25/` -> `Some(25)`
pub fn trailing_id(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

/// Uppercases the first character and lowercases the rest, the way API
/// identifiers become display names ("grass" -> "Grass", "mr-mime" -> "Mr-mime").
pub fn capitalize(identifier: &str) -> String {
    let mut chars = identifier.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Flavor text arrives with hard line breaks and form feeds from the games.
pub fn clean_flavor_text(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\u{000C}' => ' ',
            other => other,
        })
        .collect()
}
