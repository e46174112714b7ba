//! Display-name derivation from source file names.

use std::path::Path;

/// Derive a human-readable label for a fragment from its source file.
///
/// The base name is the text before the first dot of the file name. Hyphen,
/// underscore, and camel-case boundaries become word breaks; each word is
/// capitalized. An empty base name falls back to a 1-based placeholder.
pub fn derive_name(path: &Path, fragment_index: usize) -> String {
    let base = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.split('.').next())
        .unwrap_or("");

    if base.is_empty() {
        return format!("Icon {}", fragment_index + 1);
    }
    humanize(base)
}

fn humanize(base: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();

    for ch in base.chars() {
        if ch == '-' || ch == '_' || ch == ' ' {
            push_word(&mut words, &mut current);
        } else if ch.is_uppercase() && ends_lowercase_or_digit(&current) {
            push_word(&mut words, &mut current);
            current.push(ch);
        } else {
            current.push(ch);
        }
    }
    push_word(&mut words, &mut current);

    words
        .iter()
        .map(|word| capitalize(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn ends_lowercase_or_digit(word: &str) -> bool {
    word.chars()
        .next_back()
        .is_some_and(|ch| ch.is_lowercase() || ch.is_ascii_digit())
}

fn push_word(words: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hyphenated_names_become_labels() {
        assert_eq!(derive_name(Path::new("my-cool-icon.svg"), 0), "My Cool Icon");
    }

    #[test]
    fn underscores_and_camel_case_split_words() {
        assert_eq!(derive_name(Path::new("arrow_left.tsx"), 0), "Arrow Left");
        assert_eq!(derive_name(Path::new("arrowLeft.tsx"), 0), "Arrow Left");
        assert_eq!(derive_name(Path::new("chevronDown2.svg"), 0), "Chevron Down2");
    }

    #[test]
    fn base_name_stops_at_the_first_dot() {
        assert_eq!(derive_name(Path::new("icon.min.svg"), 0), "Icon");
    }

    #[test]
    fn empty_base_name_falls_back_to_placeholder() {
        assert_eq!(derive_name(Path::new(""), 2), "Icon 3");
        assert_eq!(derive_name(Path::new(".gitignore"), 0), "Icon 1");
    }
}
