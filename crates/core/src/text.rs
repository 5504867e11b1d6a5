//! Small text helpers.

/// Lowercases a value and replaces runs of non-alphanumeric characters with
/// single dashes, for use in URLs.
#[must_use]
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut last_dash = true;

    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("abc1234"), "abc1234");
        assert_eq!(slugify("Some Name"), "some-name");
        assert_eq!(slugify("  C-226  Lab! "), "c-226-lab");
        assert_eq!(slugify("Fall_2026"), "fall-2026");
    }
}
