use html_escape::decode_html_entities;

pub fn normalize(text: &str) -> String {
    let decoded = decode_fully(text);
    collapse_whitespace(&decoded)
}

pub fn word_count(text: &str) -> usize {
    normalize(text).split_whitespace().count()
}

// Decode to a fixpoint so double-escaped input normalizes in one pass.
fn decode_fully(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let decoded = decode_html_entities(&current).into_owned();
        if decoded == current {
            return current;
        }
        current = decoded;
    }
}

fn collapse_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}
