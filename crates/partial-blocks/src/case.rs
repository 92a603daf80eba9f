//! Human-readable "start case" for names derived from paths

/// Convert an identifier-ish string into capitalized words.
///
/// Words break on any non-alphanumeric character, on a lower-to-upper camel
/// boundary, before the last capital of an acronym followed by lowercase, and
/// between letters and digits. Each word's first letter is upper-cased; the
/// rest is left alone.
///
/// ```
/// use partial_blocks::case::start_case;
///
/// assert_eq!(start_case("content-teaser--small"), "Content Teaser Small");
/// assert_eq!(start_case("HTMLParser"), "HTML Parser");
/// ```
pub fn start_case(input: &str) -> String {
    split_words(input)
        .iter()
        .map(|word| upper_first(word))
        .collect::<Vec<_>>()
        .join(" ")
}

fn split_words(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let boundary = (prev.is_lowercase() && c.is_uppercase())
                || (prev.is_alphabetic() && c.is_numeric())
                || (prev.is_numeric() && c.is_alphabetic())
                || (prev.is_uppercase()
                    && c.is_uppercase()
                    && next.is_some_and(char::is_lowercase));
            if boundary {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn upper_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
