//! Small helpers for building narration.

/// Uppercase the first letter.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Join phrases as prose: "a, b and c".
pub fn prose_list(items: &[String]) -> String {
    match items.split_last() {
        None => String::new(),
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
    }
}

/// Join non-empty paragraphs with blank lines.
pub fn paragraphs<I, S>(parts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    parts
        .into_iter()
        .filter(|p| !p.as_ref().trim().is_empty())
        .map(|p| p.as_ref().trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalizes() {
        assert_eq!(capitalize("the locker"), "The locker");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn lists_read_as_prose() {
        let words = |s: &[&str]| s.iter().map(|w| w.to_string()).collect::<Vec<_>>();
        assert_eq!(prose_list(&words(&["a lamp"])), "a lamp");
        assert_eq!(prose_list(&words(&["a lamp", "a fuse"])), "a lamp and a fuse");
        assert_eq!(
            prose_list(&words(&["a lamp", "a fuse", "some rations"])),
            "a lamp, a fuse and some rations"
        );
    }

    #[test]
    fn paragraphs_skip_blanks() {
        assert_eq!(paragraphs(["one", "", "two\n"]), "one\n\ntwo");
    }
}
