/// Anchor identifier for a heading text.
///
/// Lowercases, drops every character that is not an ASCII word character,
/// whitespace or `-`, then turns each run of whitespace and hyphens into a
/// single `-`. Equal texts give equal slugs; duplicates are not disambiguated.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());

    for c in text.to_lowercase().chars() {
        let c = match c {
            c if c.is_ascii_alphanumeric() || c == '_' => c,
            c if c == '-' || c.is_whitespace() => '-',
            _ => continue,
        };

        if c == '-' && slug.ends_with('-') {
            continue;
        }
        slug.push(c);
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::simple("Section A", "section-a")]
    #[case::punctuation("Hello, World!", "hello-world")]
    #[case::underscore("snake_case name", "snake_case-name")]
    #[case::whitespace_run("a  \t b", "a-b")]
    #[case::hyphen_run("a -- b", "a-b")]
    #[case::digits("Step 2: Install", "step-2-install")]
    #[case::non_ascii("Café Über", "caf-ber")]
    #[case::emoji("🚀 Launch", "-launch")]
    #[case::empty("", "")]
    #[case::only_symbols("?!", "")]
    fn test_slugify(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(slugify(input), expected);
    }

    #[test]
    fn test_slugify_is_case_insensitive() {
        assert_eq!(slugify("Getting Started"), slugify("getting started"));
    }
}
