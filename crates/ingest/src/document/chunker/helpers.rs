//! Text splitting and merging utilities used by the chunking strategy.

/// Approximate token count via whitespace splitting.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split `text` at sentence boundaries (`. `, `! `, `? ` followed by uppercase
/// or newline). Returns non-empty fragments.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let bytes = text.as_bytes();

    let mut i = 0;
    while i < bytes.len() {
        let is_terminal = bytes[i] == b'.' || bytes[i] == b'!' || bytes[i] == b'?';
        if is_terminal {
            // Look ahead: must be followed by a space then uppercase or newline.
            if i + 1 < bytes.len() && bytes[i + 1] == b' ' {
                let after_space = if i + 2 < bytes.len() {
                    bytes[i + 2]
                } else {
                    b'\n' // end-of-string acts like newline
                };
                if after_space.is_ascii_uppercase() || after_space == b'\n' {
                    let end = i + 1; // include the terminal punctuation
                    let s = text[start..end].trim();
                    if !s.is_empty() {
                        sentences.push(s.to_string());
                    }
                    start = end + 1; // skip the space
                    i = start;
                    continue;
                }
            }
        }
        i += 1;
    }

    // Remainder
    let tail = text[start..].trim();
    if !tail.is_empty() {
        sentences.push(tail.to_string());
    }
    sentences
}

/// Split text into paragraphs (`\n\n`), breaking any paragraph that exceeds
/// `max_tokens` at sentence boundaries. Returns pieces each <= max_tokens
/// (best-effort -- a sentence without boundaries is split by words).
pub(crate) fn split_oversized(text: &str, max_tokens: usize) -> Vec<String> {
    let mut pieces = Vec::new();

    for para in text.split("\n\n") {
        let para = para.trim();
        if para.is_empty() {
            continue;
        }
        if count_tokens(para) <= max_tokens {
            pieces.push(para.to_string());
            continue;
        }

        // Sentence-level splitting.
        let mut buf = String::new();
        for sent in split_sentences(para) {
            if buf.is_empty() {
                buf = sent;
            } else if count_tokens(&buf) + count_tokens(&sent) <= max_tokens {
                buf.push(' ');
                buf.push_str(&sent);
            } else {
                pieces.push(std::mem::take(&mut buf));
                buf = sent;
            }
        }
        if buf.is_empty() {
            continue;
        }
        if count_tokens(&buf) > max_tokens {
            let words: Vec<&str> = buf.split_whitespace().collect();
            for word_chunk in words.chunks(max_tokens) {
                pieces.push(word_chunk.join(" "));
            }
        } else {
            pieces.push(buf);
        }
    }
    pieces
}

/// Greedily pack consecutive pieces into chunks of at most `max_tokens`,
/// keeping paragraph breaks between packed pieces.
pub(crate) fn pack(pieces: Vec<String>, max_tokens: usize) -> Vec<String> {
    let mut packed: Vec<String> = Vec::new();
    let mut buf = String::new();
    for piece in pieces {
        if buf.is_empty() {
            buf = piece;
        } else if count_tokens(&buf) + count_tokens(&piece) <= max_tokens {
            buf.push_str("\n\n");
            buf.push_str(&piece);
        } else {
            packed.push(std::mem::replace(&mut buf, piece));
        }
    }
    if !buf.is_empty() {
        packed.push(buf);
    }
    packed
}

/// Merge fragments smaller than `min_tokens` into their neighbour.
pub(crate) fn merge_tiny(fragments: Vec<String>, min_tokens: usize) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(fragments.len());
    for frag in fragments {
        match merged.last_mut() {
            Some(last) if count_tokens(last) < min_tokens => {
                last.push_str("\n\n");
                last.push_str(&frag);
            }
            _ => merged.push(frag),
        }
    }
    // Final pass: if the last element is tiny, merge it backwards.
    if merged.len() >= 2 && merged.last().map_or(false, |l| count_tokens(l) < min_tokens) {
        if let Some(last) = merged.pop() {
            if let Some(prev) = merged.last_mut() {
                prev.push_str("\n\n");
                prev.push_str(&last);
            }
        }
    }
    merged
}
