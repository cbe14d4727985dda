/// URL-safe slug derived from a title: lowercase, alphanumerics kept,
/// runs of whitespace/underscores/hyphens collapsed to a single hyphen,
/// everything else dropped.
pub fn generate_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());

    for c in input.chars() {
        if c.is_alphanumeric() {
            for lower in c.to_lowercase() {
                slug.push(lower);
            }
        } else if c.is_whitespace() || c == '-' || c == '_' {
            if !slug.ends_with('-') {
                slug.push('-');
            }
        }
        // punctuation is dropped entirely
    }

    slug.trim_matches('-').to_string()
}

/// Estimated reading time in minutes at 200 words per minute, rounded up.
pub fn calculate_read_time(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    ((words + 199) / 200) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugifies_titles() {
        assert_eq!(generate_slug("Hello, World!"), "hello-world");
        assert_eq!(generate_slug("  Rust   &  Axum  "), "rust-axum");
        assert_eq!(generate_slug("already-slugged_title"), "already-slugged-title");
    }

    #[test]
    fn slug_drops_punctuation_without_joining_words() {
        assert_eq!(generate_slug("C'est la vie"), "cest-la-vie");
    }

    #[test]
    fn slug_of_symbols_only_is_empty() {
        assert_eq!(generate_slug("!!!"), "");
    }

    #[test]
    fn read_time_rounds_up() {
        assert_eq!(calculate_read_time(""), 0);
        assert_eq!(calculate_read_time("one two three"), 1);

        let long = "word ".repeat(201);
        assert_eq!(calculate_read_time(&long), 2);
    }
}
