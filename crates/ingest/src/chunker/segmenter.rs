//! Character-bounded segmentation with separator-aware cuts and
//! whitespace-snapped overlap.
//!
//! All positions are character indices (not byte offsets), so multi-byte text
//! is measured and sliced the same way as ASCII.

use tracing::{debug, warn};

use super::types::ChunkConfig;

/// Extra characters beyond the overlap searched forward for a word boundary.
const SNAP_FORWARD_SLACK: usize = 50;
/// Characters searched backward for a word boundary when forward fails.
const SNAP_BACKWARD_RADIUS: usize = 30;

/// A trimmed, non-empty piece of the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Span<'a> {
    /// Char index where the untrimmed window started.
    pub start: usize,
    /// Char index one past the untrimmed window end.
    pub end: usize,
    pub text: &'a str,
}

/// Byte offsets of every char boundary, so char ranges slice in O(1).
struct CharIndex<'a> {
    text: &'a str,
    /// `offsets[i]` is the byte offset of char `i`; the last entry is `text.len()`.
    offsets: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    fn new(text: &'a str) -> Self {
        let mut offsets: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        offsets.push(text.len());
        Self { text, offsets }
    }

    fn len(&self) -> usize {
        self.offsets.len() - 1
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.text[self.offsets[start]..self.offsets[end]]
    }

    /// Char index of a byte offset that sits on a char boundary.
    fn char_at_byte(&self, byte: usize) -> usize {
        self.offsets.partition_point(|&o| o < byte)
    }

    fn is_whitespace(&self, i: usize) -> bool {
        self.slice(i, i + 1).chars().next().is_some_and(char::is_whitespace)
    }
}

/// Split `text` into trimmed, non-empty chunks of at most `max_size` chars.
///
/// Returns an empty vec for empty or whitespace-only input.
pub fn split_text(text: &str, config: &ChunkConfig) -> Vec<String> {
    segment(text, config)
        .into_iter()
        .map(|span| span.text.to_string())
        .collect()
}

pub(crate) fn segment<'a>(text: &'a str, config: &ChunkConfig) -> Vec<Span<'a>> {
    if text.is_empty() {
        warn!("text is empty, nothing to split");
        return Vec::new();
    }
    if text.trim().is_empty() {
        warn!(bytes = text.len(), "text is whitespace only, nothing to split");
        return Vec::new();
    }

    let index = CharIndex::new(text);
    let separators: Vec<(&str, usize)> = config
        .separators()
        .iter()
        .map(|s| (s.as_str(), s.chars().count()))
        .collect();
    let len = index.len();

    let mut spans = Vec::with_capacity(len / config.max_size() + 1);
    let mut start = 0usize;
    let mut prev_end = 0usize;

    while start < len {
        let end = (start + config.max_size()).min(len);

        if end >= len {
            push_trimmed(&mut spans, &index, start, len);
            break;
        }

        let split = find_split(&index, &separators, config, start, end, prev_end);
        push_trimmed(&mut spans, &index, start, split);

        let next = if config.overlap() > 0 {
            overlap_start(&index, config, start, split)
        } else {
            split
        };
        // Progress guard: start < next <= split.
        start = if next <= start || next > split {
            (start + 1).min(split)
        } else {
            next
        };
        prev_end = split;
    }

    // Whitespace-only windows are dropped, so a kept span may start past the
    // previous kept span's end.
    debug_assert!(spans.windows(2).all(|w| w[0].start < w[1].start));
    debug!(chars = len, chunks = spans.len(), "segmented text");
    spans
}

fn push_trimmed<'a>(spans: &mut Vec<Span<'a>>, index: &CharIndex<'a>, start: usize, end: usize) {
    let trimmed = index.slice(start, end).trim();
    if !trimmed.is_empty() {
        spans.push(Span {
            start,
            end,
            text: trimmed,
        });
    }
}

/// Pick the cut point for the window `[start, end)`.
///
/// Separators are tried in priority order; for each, only its last occurrence
/// inside the trailing `boundary_window` counts. An occurrence is accepted if it
/// starts after `start` and cuts beyond `prev_end`. Falls back to `end`.
fn find_split(
    index: &CharIndex<'_>,
    separators: &[(&str, usize)],
    config: &ChunkConfig,
    start: usize,
    end: usize,
    prev_end: usize,
) -> usize {
    let window_start = start.max(end.saturating_sub(config.boundary_window()));
    let window = index.slice(window_start, end);
    let window_byte = index.offsets[window_start];

    for &(sep, sep_chars) in separators {
        if let Some(pos) = window.rfind(sep) {
            let at = index.char_at_byte(window_byte + pos);
            let split = at + sep_chars;
            if at > start && split > prev_end {
                return split;
            }
        }
    }
    end
}

/// Start of the next chunk: `split - overlap`, moved to the nearest word
/// boundary (forward preferred) when one is close enough.
fn overlap_start(index: &CharIndex<'_>, config: &ChunkConfig, start: usize, split: usize) -> usize {
    let target = (start + 1).max(split.saturating_sub(config.overlap()));

    let radius = (config.max_size() / 2).min(config.overlap() + SNAP_FORWARD_SLACK);
    let forward_end = (target + radius).min(split);
    if let Some(i) = (target..forward_end).find(|&i| index.is_whitespace(i)) {
        return i + 1;
    }

    let backward_floor = (start + 1).max(target.saturating_sub(SNAP_BACKWARD_RADIUS));
    if let Some(i) = (backward_floor..target).rev().find(|&i| index.is_whitespace(i)) {
        return i + 1;
    }

    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn char_index_handles_multibyte() {
        let idx = CharIndex::new("héllo wörld");
        assert_eq!(idx.len(), 11);
        assert_eq!(idx.slice(0, 5), "héllo");
        assert_eq!(idx.slice(6, 11), "wörld");
        assert!(idx.is_whitespace(5));
        assert_eq!(idx.char_at_byte("héllo ".len()), 6);
    }

    #[test]
    fn find_split_prefers_higher_priority_separator() {
        let text = "aaaa\n\nbbbb. cccc dddd";
        let idx = CharIndex::new(text);
        let cfg = ChunkConfig::new(18, 0, vec!["\n\n".into(), ". ".into()]).unwrap();
        let seps = [("\n\n", 2), (". ", 2)];
        // Both separators are in the window; "\n\n" wins despite being earlier.
        assert_eq!(find_split(&idx, &seps, &cfg, 0, 18, 0), 6);
    }

    #[test]
    fn find_split_ignores_occurrence_at_start() {
        let text = ". abcdefghij";
        let idx = CharIndex::new(text);
        let cfg = ChunkConfig::new(10, 0, vec![". ".into()]).unwrap();
        assert_eq!(find_split(&idx, &[(". ", 2)], &cfg, 0, 10, 0), 10);
    }

    #[test]
    fn find_split_skips_separator_already_used_as_cut() {
        // The only ". " ends exactly at the previous cut (13).
        let text = "one two ten. four five six seven";
        let idx = CharIndex::new(text);
        let cfg = ChunkConfig::new(20, 8, vec![". ".into()]).unwrap();
        assert_eq!(find_split(&idx, &[(". ", 2)], &cfg, 8, 28, 13), 28);
        assert_eq!(find_split(&idx, &[(". ", 2)], &cfg, 8, 28, 0), 13);
    }

    #[test]
    fn find_split_respects_boundary_window() {
        let text = "ab. cdefghijklmnopqrst";
        let idx = CharIndex::new(text);
        let cfg = ChunkConfig::builder()
            .max_size(20)
            .overlap(0)
            .separators([". "])
            .boundary_window(10)
            .build()
            .unwrap();
        // ". " at 2 lies before the 10-char trailing window.
        assert_eq!(find_split(&idx, &[(". ", 2)], &cfg, 0, 20, 0), 20);
    }

    #[test]
    fn overlap_start_snaps_forward_to_whitespace() {
        let text = "alpha bravo charlie delta";
        let idx = CharIndex::new(text);
        let cfg = ChunkConfig::new(20, 8, vec![]).unwrap();
        // target = 20 - 8 = 12 → 'c' of charlie; next whitespace is at 19.
        assert_eq!(overlap_start(&idx, &cfg, 0, 20), 20);
        // target = 22 - 8 = 14 inside "charlie"; forward space at 19.
        assert_eq!(overlap_start(&idx, &cfg, 0, 22), 20);
    }

    #[test]
    fn overlap_start_falls_back_to_target_without_whitespace() {
        let text = "x".repeat(50);
        let idx = CharIndex::new(&text);
        let cfg = ChunkConfig::new(20, 5, vec![]).unwrap();
        assert_eq!(overlap_start(&idx, &cfg, 0, 20), 15);
    }

    #[test]
    fn spans_start_strictly_increasing() {
        let text = "lorem ipsum dolor sit amet. ".repeat(40);
        let cfg = ChunkConfig::new(60, 25, vec![". ".into()]).unwrap();
        let spans = segment(&text, &cfg);
        assert!(spans.len() > 1);
        for pair in spans.windows(2) {
            assert!(pair[0].start < pair[1].start);
            assert!(pair[1].start <= pair[0].end);
        }
    }

    #[test]
    fn whitespace_gap_longer_than_max_size_is_skipped() {
        let text = format!("{}{}{}", "a".repeat(5), " ".repeat(12), "b".repeat(5));
        let cfg = ChunkConfig::new(6, 0, vec![]).unwrap();
        let spans = segment(&text, &cfg);
        let texts: Vec<&str> = spans.iter().map(|s| s.text).collect();
        // Hard cuts at 6, 12, 18; the [6, 12) window is all spaces.
        assert_eq!(texts, ["aaaaa", "b", "bbbb"]);
        let starts: Vec<usize> = spans.iter().map(|s| s.start).collect();
        assert_eq!(starts, [0, 12, 18]);
        assert!(spans[1].start > spans[0].end);
    }
}
