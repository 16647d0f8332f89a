//! Glyph widths of the builtin Helvetica fonts in thousandths of an em, taken from the
//! standard Adobe font metrics. Rows hold 16 characters each, starting at the space (0x20).

use super::FontStyle;
use printpdf::lopdf::Document;

/// Width used for characters outside printable ASCII. A full em is wider than every
/// Helvetica glyph, so text containing them is never measured too short.
const FALLBACK_WIDTH: u16 = 1000;

const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

pub(crate) fn char_units(c: char, style: FontStyle) -> u32 {
    let table = match style {
        FontStyle::Bold => &HELVETICA_BOLD,
        FontStyle::Regular => &HELVETICA,
    };
    let width = u32::from(c)
        .checked_sub(0x20)
        .and_then(|index| table.get(usize::try_from(index).ok()?))
        .copied()
        .unwrap_or(FALLBACK_WIDTH);
    u32::from(width)
}

/// Width of `text` in thousandths of an em.
pub(crate) fn text_units(text: &str, style: FontStyle) -> u32 {
    text.chars().map(|c| char_units(c, style)).sum()
}

/// Characters the builtin fonts cannot show. The WinAnsi encoding used for them drops these
/// silently.
pub(crate) fn unencodable_chars(text: &str) -> Vec<char> {
    let mut buf = [0; 4];
    text.chars()
        .filter(|c| Document::encode_text(Some("WinAnsiEncoding"), c.encode_utf8(&mut buf)).len() != 1)
        .collect()
}
