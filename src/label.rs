//! Human-presentable labels for primitive identifiers

/// Shorten a fully-qualified primitive identifier and start-case it.
///
/// Identifiers with more than two dot-separated segments keep only the
/// last segment; shorter identifiers are kept whole. The retained text is
/// split into words at separators, camel-case boundaries, and
/// letter/digit boundaries, and the first letter of each word is
/// capitalized (the rest of the word is left as written).
///
/// ```rust
/// use perfilar::label::primitive_label;
///
/// assert_eq!(
///     primitive_label("d3m.primitives.classification.random_forest.SKlearn"),
///     "S Klearn"
/// );
/// assert_eq!(primitive_label("random_forest"), "Random Forest");
/// ```
#[must_use]
pub fn primitive_label(primitive: &str) -> String {
    let segments: Vec<&str> = primitive.split('.').collect();
    let tail = if segments.len() > 2 {
        segments[segments.len() - 1]
    } else {
        primitive
    };
    start_case(tail)
}

fn start_case(text: &str) -> String {
    split_words(text)
        .iter()
        .map(|word| upper_first(word))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Word boundaries: non-alphanumeric separators, a lowercase letter
/// followed by an uppercase one, a letter/digit transition, and the last
/// letter of an uppercase run when the next letter is lowercase.
fn split_words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
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
            let lower_to_upper = prev.is_lowercase() && c.is_uppercase();
            let digit_boundary = prev.is_numeric() != c.is_numeric();
            let upper_run_end = prev.is_uppercase()
                && c.is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if lower_to_upper || digit_boundary || upper_run_end {
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
