use crate::export::error::ExportError;
use crate::export::metrics::{char_units, text_units, unencodable_chars};
use gradence_model::exam::Exam;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::io::BufWriter;

pub mod error;
mod metrics;

// A4 in points
const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 50.0;
const TEXT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const FIRST_LINE: f32 = 750.0;

const TITLE_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
const TITLE_ADVANCE: f32 = 30.0;
const BODY_ADVANCE: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Bold,
    Regular,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub style: FontStyle,
    pub size: f32,
    /// Baseline offset from the bottom of the page, in points
    pub y: f32,
}

/// Lays out the exam text on A4 pages: the title, then every question prompt followed by its
/// conditions if there are any. Lines that do not fit the page width are wrapped and a new page
/// is started once the bottom margin is reached.
#[must_use]
pub fn layout_exam(exam: &Exam) -> Vec<Vec<PlacedLine>> {
    let mut layout = Layout::new();
    layout.push(&format!("Exam: {}", exam.title), FontStyle::Bold, TITLE_SIZE, TITLE_ADVANCE);

    for question in &exam.questions {
        layout.push(&format!("Q: {}", question.prompt), FontStyle::Regular, BODY_SIZE, BODY_ADVANCE);
        if let Some(conditions) = question.conditions.as_deref().filter(|c| !c.trim().is_empty()) {
            layout.push(
                &format!("   Conditions: {conditions}"),
                FontStyle::Regular,
                BODY_SIZE,
                BODY_ADVANCE,
            );
        }
    }
    layout.pages
}

/// Renders the exam as a PDF document.
///
/// The builtin Helvetica fonts only cover the WinAnsi character set. Characters outside it
/// (CJK, emoji, most symbols) are left out of the rendered text and a warning is logged.
pub fn export_exam_pdf(exam: &Exam) -> Result<Vec<u8>, ExportError> {
    let pages = layout_exam(exam);
    let width = pt_to_mm(PAGE_WIDTH);
    let height = pt_to_mm(PAGE_HEIGHT);

    let (doc, first_page, first_layer) = PdfDocument::new(format!("Exam: {}", exam.title), width, height, "Layer 1");
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|error| ExportError::Pdf(error.to_string()))?;
    let regular = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|error| ExportError::Pdf(error.to_string()))?;

    let mut targets = vec![(first_page, first_layer)];
    for _ in 1..pages.len() {
        targets.push(doc.add_page(width, height, "Layer 1"));
    }

    for ((page, layer), lines) in targets.into_iter().zip(&pages) {
        let layer = doc.get_page(page).get_layer(layer);
        for line in lines {
            let dropped = unencodable_chars(&line.text);
            if !dropped.is_empty() {
                tracing::warn!(
                    exam_id = exam.id,
                    line = %line.text,
                    dropped = %dropped.iter().collect::<String>(),
                    "characters not supported by the builtin fonts are left out"
                );
            }
            let font = match line.style {
                FontStyle::Bold => &bold,
                FontStyle::Regular => &regular,
            };
            layer.use_text(line.text.as_str(), line.size, pt_to_mm(MARGIN), pt_to_mm(line.y), font);
        }
    }

    let mut writer = BufWriter::new(Vec::new());
    doc.save(&mut writer)
        .map_err(|error| ExportError::Pdf(error.to_string()))?;
    let bytes = writer.into_inner().map_err(|error| ExportError::Io(error.into_error()))?;

    tracing::debug!(exam_id = exam.id, pages = pages.len(), bytes = bytes.len(), "exported exam");
    Ok(bytes)
}

struct Layout {
    pages: Vec<Vec<PlacedLine>>,
    y: f32,
}

impl Layout {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            y: FIRST_LINE,
        }
    }

    fn push(&mut self, text: &str, style: FontStyle, size: f32, advance: f32) {
        for text in wrap(text, style, max_units(size)) {
            if self.y < MARGIN {
                self.pages.push(Vec::new());
                self.y = PAGE_HEIGHT - MARGIN;
            }
            if let Some(page) = self.pages.last_mut() {
                page.push(PlacedLine {
                    text,
                    style,
                    size,
                    y: self.y,
                });
            }
            self.y -= advance;
        }
    }
}

fn pt_to_mm(pt: f32) -> Mm {
    Mm(pt * 25.4 / 72.0)
}

/// Line width available at `size`, in thousandths of an em.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn max_units(size: f32) -> u32 {
    (TEXT_WIDTH * 1000.0 / size).floor() as u32
}

/// Greedy word wrap on measured glyph widths, keeping the indentation of the first line.
/// Words wider than a line are split.
fn wrap(text: &str, style: FontStyle, max_units: u32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: String = text.chars().take_while(|c| c.is_whitespace()).collect();
    let mut current_units = text_units(&current, style);
    let mut line_has_word = false;
    let space = char_units(' ', style);

    for word in text.split_whitespace() {
        let word_units = text_units(word, style);
        let separator = if line_has_word { space } else { 0 };

        if current_units + separator + word_units <= max_units {
            if line_has_word {
                current.push(' ');
            }
            current.push_str(word);
            current_units += separator + word_units;
        } else if line_has_word && word_units <= max_units {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_units = word_units;
        } else {
            // too wide for any line, fill up the current one and split
            if line_has_word {
                current.push(' ');
                current_units += space;
            }
            for c in word.chars() {
                let units = char_units(c, style);
                if current_units + units > max_units && !current.trim().is_empty() {
                    lines.push(std::mem::take(&mut current).trim_end().to_owned());
                    current_units = 0;
                }
                current.push(c);
                current_units += units;
            }
        }
        line_has_word = true;
    }
    if line_has_word || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use gradence_model::question::Question;

    fn exam(questions: Vec<Question>) -> Exam {
        Exam {
            id: 9,
            title: "Final".to_owned(),
            created_at: NaiveDate::from_ymd_opt(2025, 6, 30)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            questions,
        }
    }

    fn question(id: i64, prompt: &str, conditions: Option<&str>) -> Question {
        Question {
            id,
            prompt: prompt.to_owned(),
            r#type: "text".to_owned(),
            conditions: conditions.map(str::to_owned),
        }
    }

    fn texts(page: &[PlacedLine]) -> Vec<&str> {
        page.iter().map(|line| line.text.as_str()).collect()
    }

    #[test]
    fn test_layout_single_page() {
        let exam = exam(vec![
            question(1, "What is 2 + 2?", Some("no calculator")),
            question(2, "Name a prime", Some("  ")),
            question(3, "Explain gravity", None),
        ]);
        let pages = layout_exam(&exam);

        assert_eq!(pages.len(), 1);
        assert_eq!(
            texts(&pages[0]),
            vec![
                "Exam: Final",
                "Q: What is 2 + 2?",
                "   Conditions: no calculator",
                "Q: Name a prime",
                "Q: Explain gravity",
            ]
        );
        assert_eq!(pages[0][0].style, FontStyle::Bold);
        assert!((pages[0][0].y - 750.0).abs() < f32::EPSILON);
        assert!((pages[0][1].y - 720.0).abs() < f32::EPSILON);
        assert!((pages[0][2].y - 700.0).abs() < f32::EPSILON);
        assert!(pages[0][1..].iter().all(|line| line.style == FontStyle::Regular));
    }

    #[test]
    fn test_layout_paginates() {
        let questions = (1..=80).map(|id| question(id, &format!("Question {id}"), None)).collect();
        let pages = layout_exam(&exam(questions));

        assert!(pages.len() > 1);
        let total: usize = pages.iter().map(Vec::len).sum();
        assert_eq!(total, 81);
        for page in &pages {
            assert!(page.iter().all(|line| line.y >= MARGIN && line.y <= PAGE_HEIGHT - MARGIN));
        }
        assert_eq!(pages[1][0].text, format!("Q: Question {}", pages[0].len()));
    }

    #[test]
    fn test_wrap_long_lines() {
        let width = text_units("aaa bbb", FontStyle::Regular);
        let lines = wrap("aaa bbb ccc ddd", FontStyle::Regular, width);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);

        let width = text_units("nnnn", FontStyle::Regular);
        let lines = wrap("nnnnnnnnnn", FontStyle::Regular, width);
        assert_eq!(lines, vec!["nnnn", "nnnn", "nn"]);

        let lines = wrap("   Conditions: short", FontStyle::Regular, max_units(BODY_SIZE));
        assert_eq!(lines, vec!["   Conditions: short"]);

        assert_eq!(wrap("", FontStyle::Regular, 1000), vec![String::new()]);
    }

    #[test]
    fn test_wrap_uses_glyph_widths() {
        // same number of characters, very different widths
        let width = 3000;
        assert_eq!(wrap("iiiii iiii", FontStyle::Regular, width), vec!["iiiii iiii"]);
        assert_eq!(wrap("WWWWW WWWW", FontStyle::Regular, width), vec!["WWW", "WW", "WWW", "W"]);
    }

    fn assert_fits(lines: &[PlacedLine]) {
        for line in lines {
            let units = text_units(&line.text, line.style);
            assert!(
                units <= max_units(line.size),
                "{:?} is {units} units wide at {}pt",
                line.text,
                line.size
            );
            assert!(units as f32 * line.size / 1000.0 <= TEXT_WIDTH);
        }
    }

    #[test]
    fn test_long_prompt_is_wrapped() {
        let prompt = "word ".repeat(60);
        let pages = layout_exam(&exam(vec![question(1, prompt.trim(), None)]));
        assert!(pages[0].len() > 2);
        assert_fits(&pages[0]);
    }

    #[test]
    fn test_all_caps_prompt_stays_within_margins() {
        let prompt = "W".repeat(200);
        let mut exam = exam(vec![
            question(1, &prompt, None),
            question(2, "MAXIMUM WIDTH WORDS WWW MMM", Some("WWWW ".repeat(40).trim())),
        ]);
        exam.title = "WWWWWWWW MMMMMMMM ".repeat(6);
        let pages = layout_exam(&exam);

        assert_fits(&pages[0]);
        assert!(pages[0][0].text.starts_with("Exam: WWW"));
        assert!(!pages[0][1].text.starts_with("Exam:"));

        let prompt_lines: Vec<&str> = pages[0]
            .iter()
            .skip_while(|line| !line.text.starts_with("Q: W"))
            .take_while(|line| !line.text.starts_with("Q: MAX"))
            .map(|line| line.text.as_str())
            .collect();
        // a 12pt W is 11.328pt wide, so at most 43 fit in 495pt
        assert_eq!(prompt_lines.len(), 5);
        assert_eq!(prompt_lines[0], format!("Q: {}", "W".repeat(42)));
        assert!(prompt_lines[1..].iter().all(|line| line.chars().count() <= 43));
        assert_eq!(prompt_lines.concat(), format!("Q: {prompt}"));
    }

    #[test]
    fn test_unsupported_characters_still_export() {
        let exam = exam(vec![question(1, "\u{8003}\u{8bd5} \u{1f600} what is 2 + 2?", None)]);
        let pages = layout_exam(&exam);
        assert_eq!(unencodable_chars(&pages[0][1].text).len(), 3);

        let bytes = export_exam_pdf(&exam).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_produces_pdf() {
        let exam = exam(vec![question(1, "What is 2 + 2?", Some("no calculator"))]);
        let bytes = export_exam_pdf(&exam).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_export_multi_page_pdf() {
        let questions = (1..=120).map(|id| question(id, "Fill in the blank", Some("one word"))).collect();
        let bytes = export_exam_pdf(&exam(questions)).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
