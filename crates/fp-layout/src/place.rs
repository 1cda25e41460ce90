// ABOUTME: Cell-grid compositing helpers for rendered pane content.
// ABOUTME: Measures ANSI-styled text, places it in fixed-size blocks, and joins blocks.

use fp_core::{Alignment, Color};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const RESET: &str = "\x1b[0m";

/// Whitespace used to fill the parts of a block that content does not cover
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    fill: char,
    color: Option<Color>,
}

impl Background {
    /// Fill characters must occupy exactly one cell; anything else falls back to a space
    pub fn new(fill: char, color: Option<Color>) -> Self {
        let fill = if fill.width() == Some(1) { fill } else { ' ' };
        Self { fill, color }
    }

    pub fn fill(&self) -> char {
        self.fill
    }

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    /// `cells` cells of fill, styled when a color is set
    pub fn pad(&self, cells: u16) -> String {
        if cells == 0 {
            return String::new();
        }
        let run: String = std::iter::repeat(self.fill).take(cells as usize).collect();
        match self.color {
            Some(color) => format!("{}{}{}", color.ansi_background(), run, RESET),
            None => run,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new(' ', None)
    }
}

/// Piece of styled text: an escape sequence or one grapheme cluster
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Escape(&'a str),
    Grapheme(&'a str),
}

struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.rest.starts_with('\x1b') {
            let grapheme = self.rest.graphemes(true).next()?;
            self.rest = &self.rest[grapheme.len()..];
            return Some(Token::Grapheme(grapheme));
        }

        let bytes = self.rest.as_bytes();
        let end = match bytes.get(1) {
            // CSI: parameters then a final byte in 0x40..=0x7e
            Some(b'[') => bytes[2..]
                .iter()
                .position(|b| (0x40..=0x7e).contains(b))
                .map_or(bytes.len(), |p| p + 3),
            // OSC: terminated by BEL or ST
            Some(b']') => {
                let body = &bytes[2..];
                let bel = body.iter().position(|&b| b == 0x07).map(|p| p + 3);
                let st = body.windows(2).position(|w| w == b"\x1b\\").map(|p| p + 4);
                match (bel, st) {
                    (Some(a), Some(b)) => a.min(b),
                    (a, b) => a.or(b).unwrap_or(bytes.len()),
                }
            }
            Some(_) => 1 + self.rest[1..].chars().next().map_or(0, char::len_utf8),
            None => 1,
        };
        let (escape, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Token::Escape(escape))
    }
}

fn tokens(s: &str) -> Tokens<'_> {
    Tokens { rest: s }
}

/// Cells taken by one grapheme cluster
fn grapheme_width(grapheme: &str) -> usize {
    if grapheme.is_ascii() {
        return grapheme.bytes().filter(|b| (0x20..=0x7e).contains(b)).count();
    }
    if grapheme.chars().all(|c| c.width().unwrap_or(0) == 0) {
        return 0;
    }
    // Joined emoji and combining sequences still draw in at most two cells
    grapheme.width().min(2)
}

/// Terminal cells occupied by `line`, ignoring escape sequences
pub fn display_width(line: &str) -> u16 {
    let cells: usize = tokens(line)
        .map(|t| match t {
            Token::Grapheme(g) => grapheme_width(g),
            Token::Escape(_) => 0,
        })
        .sum();
    u16::try_from(cells).unwrap_or(u16::MAX)
}

/// Cut `line` to at most `max` cells, keeping escape sequences.
///
/// Grapheme clusters are never split. Returns the cut line and its width. Styled lines are closed with a reset so
/// their attributes do not bleed into the surrounding fill.
pub fn truncate_to_width(line: &str, max: u16) -> (String, u16) {
    let mut out = String::with_capacity(line.len());
    let mut width: u16 = 0;
    let mut styled = false;
    for token in tokens(line) {
        match token {
            Token::Escape(seq) => {
                styled = true;
                out.push_str(seq);
            }
            Token::Grapheme(g) => {
                let w = grapheme_width(g) as u16;
                if width.saturating_add(w) > max {
                    break;
                }
                width += w;
                out.push_str(g);
            }
        }
    }
    if styled {
        out.push_str(RESET);
    }
    (out, width)
}

/// A rectangular run of lines, every line exactly `width` cells wide
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    width: u16,
    lines: Vec<String>,
}

impl Block {
    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn render(&self) -> String {
        self.lines.join("\n")
    }

    fn blank(width: u16, height: u16, bg: &Background) -> Self {
        Self {
            width,
            lines: vec![bg.pad(width); height as usize],
        }
    }
}

/// Lines of `content`, tolerating CRLF endings
fn content_lines(content: &str) -> Vec<&str> {
    content
        .split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

fn place_line(line: &str, width: u16, align: Alignment, bg: &Background) -> String {
    let (text, w) = truncate_to_width(line, width);
    let left = align.offset(width, w);
    let right = width - w - left;
    format!("{}{}{}", bg.pad(left), text, bg.pad(right))
}

/// Place each line of `content` within `width` cells.
///
/// Lines are clipped to the width; the block keeps the content's line count.
pub fn place_horizontal(width: u16, align: Alignment, content: &str, bg: &Background) -> Block {
    Block {
        width,
        lines: content_lines(content)
            .into_iter()
            .map(|l| place_line(l, width, align, bg))
            .collect(),
    }
}

/// Place `content` inside a `width` x `height` block.
///
/// Excess lines beyond the height are dropped from the bottom.
pub fn place(
    width: u16,
    height: u16,
    h_align: Alignment,
    v_align: Alignment,
    content: &str,
    bg: &Background,
) -> Block {
    if width == 0 || height == 0 {
        return Block::blank(width, height, bg);
    }
    let mut lines = content_lines(content);
    lines.truncate(height as usize);
    let used = lines.len() as u16;
    let top = v_align.offset(height, used);
    let bottom = height - used - top;

    let mut out = Vec::with_capacity(height as usize);
    out.extend((0..top).map(|_| bg.pad(width)));
    out.extend(lines.into_iter().map(|l| place_line(l, width, h_align, bg)));
    out.extend((0..bottom).map(|_| bg.pad(width)));
    Block { width, lines: out }
}

/// `block` shifted `left` cells into a row `width` cells wide.
///
/// The offset is clamped so the block always fits; the block is assumed to be
/// no wider than `width`.
pub fn place_at(left: u16, width: u16, block: &Block, bg: &Background) -> Block {
    let left = left.min(width.saturating_sub(block.width));
    let right = width.saturating_sub(block.width).saturating_sub(left);
    Block {
        width: width.max(block.width),
        lines: block
            .lines
            .iter()
            .map(|l| format!("{}{}{}", bg.pad(left), l, bg.pad(right)))
            .collect(),
    }
}

/// Side by side, shorter blocks vertically centered against the tallest
pub fn join_horizontal(blocks: &[Block], bg: &Background) -> Block {
    let height = blocks.iter().map(Block::height).max().unwrap_or(0);
    let mut lines = vec![String::new(); height as usize];
    let mut width: u16 = 0;
    for block in blocks {
        let top = Alignment::Center.offset(height, block.height());
        for (row, line) in lines.iter_mut().enumerate() {
            let source = (row as u16)
                .checked_sub(top)
                .and_then(|r| block.lines.get(r as usize));
            match source {
                Some(l) => line.push_str(l),
                None => line.push_str(&bg.pad(block.width)),
            }
        }
        width = width.saturating_add(block.width);
    }
    Block { width, lines }
}

/// Stacked top to bottom, narrower blocks aligned against the widest
pub fn join_vertical(blocks: &[Block], align: Alignment, bg: &Background) -> Block {
    let width = blocks.iter().map(Block::width).max().unwrap_or(0);
    let lines = blocks
        .iter()
        .flat_map(|block| {
            let left = align.offset(width, block.width);
            let right = width - block.width - left;
            block
                .lines
                .iter()
                .map(move |l| format!("{}{}{}", bg.pad(left), l, bg.pad(right)))
        })
        .collect();
    Block { width, lines }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Background {
        Background::new('.', None)
    }

    #[test]
    fn width_ignores_escapes() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("\x1b[1;31mred\x1b[0m"), 3);
        assert_eq!(display_width("\x1b]8;;http://x\x07link\x1b]8;;\x1b\\"), 4);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn truncation_respects_wide_chars() {
        assert_eq!(truncate_to_width("日本語", 5), ("日本".to_string(), 4));
        assert_eq!(truncate_to_width("hello", 10), ("hello".to_string(), 5));
    }

    #[test]
    fn clusters_measure_as_drawn() {
        assert_eq!(display_width("👩\u{200D}🔬"), 2);
        assert_eq!(display_width("e\u{301}x"), 2);
        assert_eq!(display_width("\u{200B}"), 0);
        assert_eq!(display_width("\x1b[1m👩\u{200D}🔬\x1b[0m!"), 3);
    }

    #[test]
    fn truncation_keeps_clusters_whole() {
        let scientist = "👩\u{200D}🔬";
        assert_eq!(
            truncate_to_width(&format!("{}ab", scientist), 3),
            (format!("{}a", scientist), 3)
        );
        assert_eq!(truncate_to_width(scientist, 1), (String::new(), 0));
        assert_eq!(truncate_to_width("e\u{301}e", 1), ("e\u{301}".to_string(), 1));
    }

    #[test]
    fn truncation_resets_styled_lines() {
        let (out, w) = truncate_to_width("\x1b[31mhello\x1b[0m", 2);
        assert_eq!(w, 2);
        assert_eq!(out, "\x1b[31mhe\x1b[0m");
    }

    #[test]
    fn place_fills_whole_block() {
        let block = place(6, 3, Alignment::Center, Alignment::Center, "ab", &plain());
        assert_eq!(block.lines(), &["......", "..ab..", "......"]);
    }

    #[test]
    fn place_clips_oversized_content() {
        let block = place(3, 2, Alignment::End, Alignment::Start, "abcdef\nxy\nzz", &plain());
        assert_eq!(block.lines(), &["abc", ".xy"]);
    }

    #[test]
    fn place_empty_block() {
        let block = place(0, 4, Alignment::Start, Alignment::Start, "abc", &plain());
        assert_eq!(block.height(), 4);
        assert_eq!(block.render(), "\n\n\n");
        assert_eq!(place(5, 0, Alignment::Start, Alignment::Start, "x", &plain()).render(), "");
    }

    #[test]
    fn place_horizontal_keeps_line_count() {
        let block = place_horizontal(4, Alignment::End, "a\r\nbb", &plain());
        assert_eq!(block.lines(), &["...a", "..bb"]);
    }

    #[test]
    fn colored_padding() {
        let bg = Background::new(' ', Some(Color::BLACK));
        assert_eq!(bg.pad(2), "\x1b[48;2;0;0;0m  \x1b[0m");
        assert_eq!(bg.pad(0), "");
    }

    #[test]
    fn wide_fill_falls_back_to_space() {
        assert_eq!(Background::new('日', None).fill(), ' ');
    }

    #[test]
    fn joins() {
        let bg = plain();
        let a = place(2, 1, Alignment::Start, Alignment::Start, "a", &bg);
        let b = place(3, 3, Alignment::Start, Alignment::Start, "b\nb\nb", &bg);

        let h = join_horizontal(&[a.clone(), b.clone()], &bg);
        assert_eq!(h.width(), 5);
        assert_eq!(h.lines(), &["..b..", "a.b..", "..b.."]);

        let v = join_vertical(&[a, b], Alignment::End, &bg);
        assert_eq!(v.width(), 3);
        assert_eq!(v.lines(), &[".a.", "b..", "b..", "b.."]);
    }

    #[test]
    fn place_at_offsets_within_row() {
        let bg = plain();
        let inner = place(3, 2, Alignment::Start, Alignment::Start, "ab\nc", &bg);

        assert_eq!(place_at(2, 7, &inner, &bg).lines(), &["..ab...", "..c...."]);
        assert_eq!(place_at(9, 5, &inner, &bg).lines(), &["..ab.", "..c.."]);
        assert_eq!(place_at(0, 2, &inner, &bg).width(), 3);
    }

    #[test]
    fn joining_nothing_is_empty() {
        assert_eq!(join_horizontal(&[], &plain()).render(), "");
        assert_eq!(join_vertical(&[], Alignment::Center, &plain()).render(), "");
    }
}
