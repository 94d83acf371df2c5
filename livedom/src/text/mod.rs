use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(s: &str) -> usize {
    s.width()
}

pub fn char_width(c: char) -> usize {
    c.width().unwrap_or(0)
}

/// Word-wrap `s` into lines no wider than `max_width` columns.
///
/// Explicit newlines are kept; words wider than the line are broken by
/// character. Always yields at least one line, so empty text still occupies
/// a row once laid out.
pub fn wrap_words(s: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();

    for input_line in s.split('\n') {
        let mut current = String::new();
        let mut current_width = 0;

        for word in input_line.split_whitespace() {
            let word_width = display_width(word);

            if word_width > max_width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let mut pieces = wrap_chars(word, max_width);
                let last = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                current_width = display_width(&last);
                current = last;
                continue;
            }

            let separator = usize::from(!current.is_empty());
            if current_width + separator + word_width > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = 0;
            } else if separator == 1 {
                current.push(' ');
                current_width += 1;
            }
            current.push_str(word);
            current_width += word_width;
        }

        lines.push(current);
    }

    lines
}

/// Break `s` into chunks of at most `max_width` columns, ignoring word boundaries.
pub fn wrap_chars(s: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for ch in s.chars() {
        let width = char_width(ch);
        if width > 0 && current_width + width > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(ch);
        current_width += width;
    }

    lines.push(current);
    lines
}
