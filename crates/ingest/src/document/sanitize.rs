/// Normalize raw extracted text.
///
/// Strips null bytes and a leading BOM, converts line endings to `\n`,
/// collapses runs of 4+ newlines to 3, turns tabs into two spaces, and trims.
/// Applying it twice gives the same result as applying it once.
pub fn sanitize(raw: &str) -> String {
    let text = raw
        .trim_start_matches('\u{feff}')
        .replace('\0', "")
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\t', "  ");
    collapse_newlines(&text, 3).trim().to_string()
}

/// Replace every run of more than `max` newlines with exactly `max`.
fn collapse_newlines(text: &str, max: usize) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for c in text.chars() {
        if c == '\n' {
            run += 1;
            if run <= max {
                out.push(c);
            }
        } else {
            run = 0;
            out.push(c);
        }
    }
    out
}
