//! Top-level `feature <tag> { ... } <tag>;` blocks.
//!
//! Blocks are found with a brace-depth scanner rather than a pattern match,
//! so nested `lookup NAME { ... } NAME;` blocks stay inside their feature.
//! `#` comments are skipped while counting braces.

use indexmap::IndexSet;
use log::debug;

/// Tag of the kerning feature, merged separately from pass-through blocks.
pub const KERN_TAG: &str = "kern";

/// A feature block as it appears in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureBlock<'a> {
    pub tag: &'a str,
    /// Full block text, from `feature` through the closing `;`.
    pub text: &'a str,
    /// Text between the outer braces.
    pub body: &'a str,
}

struct OpenBlock<'a> {
    start: usize,
    tag: &'a str,
    body_start: usize,
}

/// Find every top-level feature block whose closing tag matches its opening tag.
///
/// A block closed with a different tag (or not closed at all) is dropped.
/// A `feature <tag> {` header seen while a block is still open abandons the
/// open block, so one unclosed brace does not hide the blocks after it.
pub fn feature_blocks(text: &str) -> Vec<FeatureBlock<'_>> {
    let bytes = text.as_bytes();
    let mut blocks = Vec::new();
    let mut open: Option<OpenBlock> = None;
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'#' => {
                i = bytes[i..]
                    .iter()
                    .position(|&b| b == b'\n')
                    .map_or(bytes.len(), |n| i + n);
                continue;
            }
            b'{' => depth += 1,
            b'}' => {
                depth = depth.saturating_sub(1);
                if depth == 0
                    && let Some(block) = open.take()
                    && let Some(end) = closing_tag_end(text, i + 1, block.tag)
                {
                    blocks.push(FeatureBlock {
                        tag: block.tag,
                        text: &text[block.start..end],
                        body: &text[block.body_start..i],
                    });
                    i = end;
                    continue;
                }
            }
            b'f' => {
                if let Some((tag, body_start)) = feature_header(text, i) {
                    if let Some(abandoned) = open.replace(OpenBlock { start: i, tag, body_start }) {
                        debug!("Unclosed feature block '{}' dropped", abandoned.tag);
                    }
                    depth = 1;
                    i = body_start;
                    continue;
                }
            }
            _ => {}
        }
        i += 1;
    }

    blocks
}

/// The first top-level `kern` block, if any. Later `kern` blocks are ignored.
pub fn kern_block(text: &str) -> Option<FeatureBlock<'_>> {
    feature_blocks(text).into_iter().find(|b| b.tag == KERN_TAG)
}

/// Collect non-kern feature blocks across masters, deduplicated by exact text.
///
/// Blocks keep the order they were first seen in.
pub fn collect_passthrough_blocks<'a>(texts: impl IntoIterator<Item = &'a str>) -> IndexSet<&'a str> {
    texts
        .into_iter()
        .flat_map(feature_blocks)
        .filter(|b| b.tag != KERN_TAG)
        .map(|b| b.text)
        .collect()
}

fn is_word_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn skip_whitespace(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && bytes[i].is_ascii_whitespace() {
        i += 1;
    }
    i
}

fn word_end(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() && is_word_byte(bytes[i]) {
        i += 1;
    }
    i
}

/// Match `feature <tag> {` at `start`, returning the tag and the offset after `{`.
fn feature_header(text: &str, start: usize) -> Option<(&str, usize)> {
    const KEYWORD: &[u8] = b"feature";
    let bytes = text.as_bytes();

    if start > 0 && is_word_byte(bytes[start - 1]) {
        return None;
    }
    if !bytes[start..].starts_with(KEYWORD) {
        return None;
    }

    let after_keyword = start + KEYWORD.len();
    let tag_start = skip_whitespace(bytes, after_keyword);
    if tag_start == after_keyword {
        return None;
    }
    let tag_end = word_end(bytes, tag_start);
    if tag_end == tag_start {
        return None;
    }

    let brace = skip_whitespace(bytes, tag_end);
    (bytes.get(brace) == Some(&b'{')).then(|| (&text[tag_start..tag_end], brace + 1))
}

/// Match `<tag>;` (whitespace allowed) after a closing brace, returning the offset after `;`.
fn closing_tag_end(text: &str, from: usize, tag: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let tag_start = skip_whitespace(bytes, from);
    let tag_end = word_end(bytes, tag_start);
    if &text[tag_start..tag_end] != tag {
        return None;
    }
    let semicolon = skip_whitespace(bytes, tag_end);
    (bytes.get(semicolon) == Some(&b';')).then_some(semicolon + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_simple_blocks() {
        let text = "languagesystem DFLT dflt;\n\
                    feature liga {\n    sub f i by fi;\n} liga;\n\
                    feature kern {\n    pos A V -50;\n} kern;\n";
        let blocks = feature_blocks(text);

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].tag, "liga");
        assert_eq!(blocks[0].text, "feature liga {\n    sub f i by fi;\n} liga;");
        assert_eq!(blocks[0].body, "\n    sub f i by fi;\n");
        assert_eq!(blocks[1].tag, "kern");
    }

    #[test]
    fn nested_lookups_stay_inside_feature() {
        let text = "feature ss01 {\n    lookup ALT {\n        sub a by a.alt;\n    } ALT;\n} ss01;\nfeature calt { sub b by b.alt; } calt;";
        let blocks = feature_blocks(text);

        let tags: Vec<_> = blocks.iter().map(|b| b.tag).collect();
        assert_eq!(tags, ["ss01", "calt"]);
        assert!(blocks[0].text.ends_with("} ALT;\n} ss01;"));
    }

    #[test]
    fn mismatched_closing_tag_is_dropped() {
        let blocks = feature_blocks("feature liga { sub f i by fi; } ligx;\nfeature smcp { sub a by a.sc; } smcp;");
        let tags: Vec<_> = blocks.iter().map(|b| b.tag).collect();
        assert_eq!(tags, ["smcp"]);
    }

    #[test]
    fn unclosed_block_does_not_hide_later_blocks() {
        let text = "feature liga { sub f i by fi;\n\
                    feature kern { pos A V : -50 ; } kern;\n\
                    feature smcp { sub a by a.sc; } smcp;";
        let blocks = feature_blocks(text);

        let tags: Vec<_> = blocks.iter().map(|b| b.tag).collect();
        assert_eq!(tags, ["kern", "smcp"]);
        assert_eq!(kern_block(text).map(|b| b.body), Some(" pos A V : -50 ; "));
    }

    #[test]
    fn feature_reference_inside_block_is_not_a_header() {
        let text = "feature aalt {\n    feature salt;\n    feature smcp;\n} aalt;";
        let blocks = feature_blocks(text);

        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, text);
    }

    #[test]
    fn braces_in_comments_are_ignored() {
        let text = "feature liga {\n    # }\n    sub f i by fi;\n} liga;";
        assert_eq!(feature_blocks(text)[0].text, text);
    }

    #[test]
    fn commented_out_block_is_ignored() {
        assert!(feature_blocks("# feature liga { sub f i by fi; } liga;").is_empty());
    }

    #[test]
    fn keyword_must_be_whole_word() {
        assert!(feature_blocks("myfeature liga { } liga;").is_empty());
    }

    #[test]
    fn first_kern_block_wins() {
        let text = "feature kern { pos A V -1; } kern;\nfeature kern { pos T o -2; } kern;";
        assert_eq!(kern_block(text).map(|b| b.body), Some(" pos A V -1; "));
    }

    #[test]
    fn passthrough_dedups_across_masters_and_skips_kern() {
        let light = "feature liga { sub f i by fi; } liga;\nfeature kern { pos A V -50; } kern;";
        let bold = "feature liga { sub f i by fi; } liga;\nfeature smcp { sub a by a.sc; } smcp;";

        let blocks: Vec<_> = collect_passthrough_blocks([light, bold]).into_iter().collect();

        assert_eq!(
            blocks,
            ["feature liga { sub f i by fi; } liga;", "feature smcp { sub a by a.sc; } smcp;"]
        );
    }
}
