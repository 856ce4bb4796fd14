use crate::domain::Passage;
use crate::error::{Result, VidchatError};

/// Characters that end a sentence and make a preferred cut point.
const SENTENCE_ENDINGS: [char; 4] = ['.', '?', '!', '\n'];

/// Split transcript text into overlapping passages of at most `size`
/// characters, with consecutive passages sharing `overlap` characters.
///
/// Cuts prefer sentence endings, then whitespace, before falling back to
/// a hard cut at `size`. All lengths are measured in characters and all
/// cuts land on UTF-8 boundaries. Text shorter than `size` yields a
/// single passage containing the whole text.
pub fn chunk(text: &str, size: usize, overlap: usize) -> Result<Vec<Passage>> {
    if text.trim().is_empty() {
        return Err(VidchatError::EmptyTranscript);
    }
    if size == 0 || overlap >= size {
        return Err(VidchatError::InvalidChunking(format!(
            "overlap ({overlap}) must be smaller than size ({size})"
        )));
    }

    let chars: Vec<char> = text.chars().collect();
    let byte_offsets: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    let total = chars.len();

    if total <= size {
        return Ok(vec![Passage::new(text, 0)]);
    }

    // Byte offset of char index `i`, with `total` mapping to the end.
    let byte_at = |i: usize| byte_offsets.get(i).copied().unwrap_or(text.len());

    let mut passages = Vec::new();
    let mut start = 0;

    loop {
        let end = (start + size).min(total);

        if end == total {
            passages.push(Passage::new(&text[byte_at(start)..], passages.len()));
            break;
        }

        // Never cut so early that the next start (cut - overlap) fails to
        // advance, or that passages degenerate below half of `size`.
        let min_cut = start + (size / 2).max(overlap + 1);
        let cut = find_cut(&chars, min_cut.min(end), end);

        passages.push(Passage::new(
            &text[byte_at(start)..byte_at(cut)],
            passages.len(),
        ));
        start = cut - overlap;
    }

    Ok(passages)
}

/// Best cut position in `[min_cut, end]`: after the last sentence ending,
/// else after the last whitespace, else the hard cut at `end`.
fn find_cut(chars: &[char], min_cut: usize, end: usize) -> usize {
    for i in (min_cut..=end).rev() {
        if SENTENCE_ENDINGS.contains(&chars[i - 1]) {
            return i;
        }
    }
    for i in (min_cut..=end).rev() {
        if chars[i - 1].is_whitespace() {
            return i;
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn char_len(s: &str) -> usize {
        s.chars().count()
    }

    #[test]
    fn test_empty_transcript_is_an_error() {
        assert!(matches!(
            chunk("", 100, 20),
            Err(VidchatError::EmptyTranscript)
        ));
        assert!(matches!(
            chunk("   \n\t  ", 100, 20),
            Err(VidchatError::EmptyTranscript)
        ));
    }

    #[test]
    fn test_overlap_must_be_smaller_than_size() {
        assert!(matches!(
            chunk("some text", 10, 10),
            Err(VidchatError::InvalidChunking(_))
        ));
        assert!(matches!(
            chunk("some text", 0, 0),
            Err(VidchatError::InvalidChunking(_))
        ));
    }

    #[test]
    fn test_short_text_yields_single_passage() {
        let passages = chunk("just a short line", 100, 20).unwrap();
        assert_eq!(passages.len(), 1);
        assert_eq!(passages[0].text, "just a short line");
        assert_eq!(passages[0].source_order, 0);
    }

    #[test]
    fn test_passages_never_exceed_max_size() {
        let text = "word ".repeat(100);
        let passages = chunk(&text, 60, 10).unwrap();
        assert!(passages.len() > 1);
        for passage in &passages {
            assert!(char_len(&passage.text) <= 60);
        }
    }

    #[test]
    fn test_consecutive_passages_share_overlap() {
        let text = "alpha beta gamma delta. ".repeat(20);
        let overlap = 10;
        let passages = chunk(&text, 80, overlap).unwrap();
        assert!(passages.len() > 1);

        for pair in passages.windows(2) {
            let prev: Vec<char> = pair[0].text.chars().collect();
            let shared: String = prev[prev.len() - overlap..].iter().collect();
            assert!(
                pair[1].text.starts_with(&shared),
                "passage {} does not start with the previous overlap",
                pair[1].source_order
            );
        }
    }

    #[test]
    fn test_passages_cover_the_whole_text() {
        let text = "one two three four five six seven. ".repeat(30);
        let overlap = 15;
        let passages = chunk(&text, 90, overlap).unwrap();

        let mut rebuilt = passages[0].text.clone();
        for passage in &passages[1..] {
            let tail: String = passage.text.chars().skip(overlap).collect();
            rebuilt.push_str(&tail);
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_cuts_prefer_sentence_endings() {
        let text = "First sentence here. Second sentence here. Third sentence here. \
                    Fourth sentence here. Fifth sentence here."
            .to_string();
        let passages = chunk(&text, 50, 5).unwrap();
        assert!(passages.len() > 1);

        for passage in &passages[..passages.len() - 1] {
            let trimmed = passage.text.trim_end();
            assert!(
                trimmed.ends_with('.'),
                "expected sentence-aligned cut, got: {trimmed:?}"
            );
        }
    }

    #[test]
    fn test_source_order_is_sequential() {
        let text = "a ".repeat(200);
        let passages = chunk(&text, 50, 10).unwrap();
        for (i, passage) in passages.iter().enumerate() {
            assert_eq!(passage.source_order, i);
        }
    }

    #[test]
    fn test_multibyte_text_does_not_split_mid_char() {
        let text = "héllo wörld ünïcode tèxt. ".repeat(20);
        let passages = chunk(&text, 40, 8).unwrap();
        assert!(passages.len() > 1);

        let mut rebuilt = passages[0].text.clone();
        for passage in &passages[1..] {
            let tail: String = passage.text.chars().skip(8).collect();
            rebuilt.push_str(&tail);
        }
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_text_exactly_at_size_is_one_passage() {
        let text = "x".repeat(50);
        let passages = chunk(&text, 50, 10).unwrap();
        assert_eq!(passages.len(), 1);
    }
}
