//! Terminal-cell text measurement.

use super::{FontMetrics, StyledText, TextMeasurer};
use crate::view_state::types::Size;
use textwrap::{Options, WordSeparator, WordSplitter, WrapAlgorithm};
use unicode_width::UnicodeWidthStr;

/// Measures text as it is drawn into a monospace grid.
///
/// Lines wrap greedily at word boundaries; a word wider than the line is broken at the column
/// limit. Each wrapped line occupies `line_height` units and each column `advance` units.
#[derive(Debug, Clone, Copy, Default)]
pub struct CellMeasurer;

impl CellMeasurer {
    /// Number of whole columns that fit into `max_width` for `font`. Never less than one.
    pub fn columns(font: FontMetrics, max_width: f64) -> usize {
        if font.advance <= 0.0 || !max_width.is_finite() {
            return usize::MAX;
        }
        let cols = (max_width / font.advance + 1e-9).floor();
        if cols < 1.0 {
            1
        } else {
            cols as usize
        }
    }
}

impl TextMeasurer for CellMeasurer {
    fn measure(&self, text: &StyledText, max_width: f64, max_height: Option<f64>) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }
        let font = text.style().font;
        let lines = wrap_lines(text.as_str(), Self::columns(font, max_width));
        let visible = match max_height {
            Some(height) if font.line_height > 0.0 => {
                let fit = (height / font.line_height + 1e-9).floor().max(0.0) as usize;
                lines.len().min(fit)
            }
            _ => lines.len(),
        };
        let widest = lines
            .iter()
            .take(visible)
            .map(|line| line.width())
            .max()
            .unwrap_or(0);
        Size::new(
            widest as f64 * font.advance,
            visible as f64 * font.line_height,
        )
    }

    fn font_metrics(&self, text: &StyledText, _position: usize) -> Option<FontMetrics> {
        // Styles apply to whole runs, so every position shares the same metrics.
        (!text.is_empty()).then(|| text.style().font)
    }
}

/// Wrap `text` into lines no wider than `max_cols` display columns.
///
/// Explicit newlines start new lines. Runs of whitespace collapse to a single space and
/// leading/trailing whitespace on each line is dropped. Lines fill greedily and a word wider
/// than the line is broken at the column limit.
pub fn wrap_lines(text: &str, max_cols: usize) -> Vec<String> {
    let options = Options::new(max_cols.max(1))
        .wrap_algorithm(WrapAlgorithm::FirstFit)
        .word_separator(WordSeparator::AsciiSpace)
        .word_splitter(WordSplitter::NoHyphenation)
        .break_words(true);

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let collapsed = paragraph.split_whitespace().collect::<Vec<_>>().join(" ");
        lines.extend(
            textwrap::wrap(&collapsed, &options)
                .into_iter()
                .map(|line| line.into_owned()),
        );
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{TextColor, TextStyle};

    fn cell(text: &str) -> StyledText {
        StyledText::new(text, TextStyle::new(FontMetrics::CELL, TextColor::Primary))
    }

    #[test]
    fn wraps_on_word_boundaries() {
        assert_eq!(
            wrap_lines("one two three four", 9),
            vec!["one two", "three", "four"]
        );
    }

    #[test]
    fn breaks_words_longer_than_line() {
        assert_eq!(wrap_lines("abcdefghij", 4), vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn long_word_tail_continues_with_next_word() {
        assert_eq!(wrap_lines("abcdef gh", 4), vec!["abcd", "ef", "gh"]);
    }

    #[test]
    fn long_word_tail_shares_line_when_it_fits() {
        assert_eq!(wrap_lines("abcdef g", 4), vec!["abcd", "ef g"]);
    }

    #[test]
    fn whitespace_runs_collapse() {
        assert_eq!(wrap_lines("  one   two  ", 20), vec!["one two"]);
    }

    #[test]
    fn unbounded_width_keeps_one_line() {
        assert_eq!(wrap_lines("Показать полностью...", usize::MAX), vec!["Показать полностью..."]);
    }

    #[test]
    fn newlines_start_paragraphs() {
        assert_eq!(wrap_lines("a\n\nb", 10), vec!["a", "", "b"]);
    }

    #[test]
    fn wide_characters_count_two_columns() {
        // Each CJK ideograph is two columns wide.
        assert_eq!(wrap_lines("漢字漢字", 4), vec!["漢字", "漢字"]);
    }

    #[test]
    fn cyrillic_is_single_width() {
        assert_eq!(wrap_lines("Привет мир", 10), vec!["Привет мир"]);
    }

    #[test]
    fn measure_empty_is_zero() {
        assert_eq!(CellMeasurer.measure(&cell(""), 10.0, None), Size::ZERO);
    }

    #[test]
    fn measure_counts_lines_and_widest_line() {
        let size = CellMeasurer.measure(&cell("one two three four"), 9.0, None);
        assert_eq!(size, Size::new(7.0, 3.0));
    }

    #[test]
    fn measure_respects_height_ceiling() {
        let size = CellMeasurer.measure(&cell("a b c d e"), 1.0, Some(3.0));
        assert_eq!(size.height, 3.0);
    }

    #[test]
    fn measure_scales_by_font_metrics() {
        let text = StyledText::new(
            "ab cd",
            TextStyle::new(FontMetrics::new(17.0, 8.0), TextColor::Primary),
        );
        // 16 units fit two columns.
        let size = CellMeasurer.measure(&text, 16.0, None);
        assert_eq!(size, Size::new(16.0, 34.0));
    }

    #[test]
    fn font_metrics_absent_for_empty_text() {
        assert_eq!(CellMeasurer.font_metrics(&cell(""), 0), None);
        assert_eq!(
            CellMeasurer.font_metrics(&cell("x"), 0),
            Some(FontMetrics::CELL)
        );
    }

    #[test]
    fn columns_never_below_one() {
        assert_eq!(CellMeasurer::columns(FontMetrics::CELL, 0.0), 1);
        assert_eq!(CellMeasurer::columns(FontMetrics::CELL, -5.0), 1);
        assert_eq!(CellMeasurer::columns(FontMetrics::CELL, 12.5), 12);
    }
}
