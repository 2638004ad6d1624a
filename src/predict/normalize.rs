//! Text normalization shared by both prediction paths.

/// Lower-case `text`, drop everything except ASCII letters and whitespace,
/// collapse whitespace runs into single spaces and trim the ends.
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars().flat_map(char::to_lowercase) {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else if c.is_ascii_alphabetic() {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    out
}
