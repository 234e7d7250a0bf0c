//! Terminal renderings of styled ranges and style tables

use pyedit_lexer::theme::StyleAttributes;
use pyedit_lexer::utils::LineIndex;
use pyedit_lexer::{StyleId, StyleSink, StyleTable, TextRange};
use serde::Serialize;

/// Sink that keeps absolute ranges, the way an editor buffer would
#[derive(Debug, Default)]
pub struct StyledRanges {
    cursor: usize,
    pub ranges: Vec<(TextRange, StyleId)>,
}

impl StyleSink for StyledRanges {
    fn begin_styling(&mut self, start: usize) {
        self.cursor = start;
    }

    fn set_styling(&mut self, byte_len: usize, style: StyleId) {
        let range = TextRange::new(self.cursor, self.cursor + byte_len);
        self.cursor = range.end;
        self.ranges.push((range, style));
    }
}

#[derive(Serialize)]
struct JsonSpan<'a> {
    start: usize,
    end: usize,
    line: u32,
    column: u32,
    style: StyleId,
    text: &'a str,
}

/// One line per span: position, length, style name and the styled text
pub fn render_spans(text: &str, ranges: &[(TextRange, StyleId)]) -> String {
    let index = LineIndex::new(text);
    let mut out = String::new();

    for (range, style) in ranges {
        let position = index.line_column(text, range.start);
        let lexeme = range.slice(text).unwrap_or_default();
        out.push_str(&format!(
            "{:>4}:{:<4} {:>5}  {:<13} {:?}\n",
            position.line,
            position.column,
            range.len(),
            style.name(),
            lexeme
        ));
    }

    out
}

pub fn render_json(
    text: &str,
    ranges: &[(TextRange, StyleId)],
) -> Result<String, serde_json::Error> {
    let index = LineIndex::new(text);
    let spans: Vec<JsonSpan<'_>> = ranges
        .iter()
        .map(|(range, style)| {
            let position = index.line_column(text, range.start);
            JsonSpan {
                start: range.start,
                end: range.end,
                line: position.line,
                column: position.column,
                style: *style,
                text: range.slice(text).unwrap_or_default(),
            }
        })
        .collect();

    serde_json::to_string_pretty(&spans)
}

/// Paint the styled text with 24-bit escapes
pub fn render_ansi(text: &str, ranges: &[(TextRange, StyleId)], table: &StyleTable) -> String {
    let mut out = String::new();

    for (range, style) in ranges {
        let lexeme = range.slice(text).unwrap_or_default();
        out.push_str(&ansi_prefix(table.resolve(*style)));
        out.push_str(lexeme);
        out.push_str(RESET);
    }

    out
}

const RESET: &str = "\x1b[0m";

fn ansi_prefix(attributes: &StyleAttributes) -> String {
    let mut prefix = attributes.color.ansi_foreground();
    prefix.push_str(&attributes.paper.ansi_background());
    if attributes.font.weight.is_bold() {
        prefix.push_str("\x1b[1m");
    }
    if attributes.font.italic {
        prefix.push_str("\x1b[3m");
    }
    prefix
}

/// Tabular dump of every style's attributes, with a painted sample
pub fn render_table(table: &StyleTable, painted: bool) -> String {
    let mut out = format!(
        "{:<4} {:<13} {:<10} {:<10} {}\n",
        "ID", "NAME", "COLOR", "PAPER", "FONT"
    );

    for (style, attributes) in table.iter() {
        let mut line = format!(
            "{:<4} {:<13} {:<10} {:<10} {}",
            style.index(),
            style.name(),
            attributes.color.to_string(),
            attributes.paper.to_string(),
            attributes.font
        );
        if painted {
            line.push_str(&format!(
                "  {}{}{}",
                ansi_prefix(attributes),
                style.description(),
                RESET
            ));
        }
        out.push_str(&line);
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyedit_lexer::Classifier;

    fn styled(text: &str) -> Vec<(TextRange, StyleId)> {
        let mut sink = StyledRanges::default();
        Classifier::python()
            .style_range(text, 0, text.len(), &mut sink)
            .unwrap();
        sink.ranges
    }

    #[test]
    fn test_styled_ranges_are_absolute() {
        let text = "x = 1\nif x:\n";
        let mut sink = StyledRanges::default();
        let classifier = Classifier::python();
        classifier.style_range(text, 0, 6, &mut sink).unwrap();
        classifier.style_range(text, 6, text.len(), &mut sink).unwrap();

        let (first_of_second, style) = sink.ranges[6];
        assert_eq!(first_of_second, TextRange::new(6, 8));
        assert_eq!(style, StyleId::Keyword);
        assert_eq!(sink.ranges.last().unwrap().0.end, text.len());
    }

    #[test]
    fn test_render_spans_lists_positions() {
        let text = "pass\nreturn 1";
        let out = render_spans(text, &styled(text));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[0].contains("keyword"));
        assert!(lines[0].contains("\"pass\""));
        assert!(lines[2].trim_start().starts_with("2:1"));
        assert!(lines[4].contains("constants"));
    }

    #[test]
    fn test_render_json_is_parseable() {
        let text = "print('hi')";
        let out = render_json(text, &styled(text)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        let spans = value.as_array().unwrap();
        assert_eq!(spans[0]["style"], "types");
        assert_eq!(spans[0]["text"], "print");
        assert_eq!(spans[1]["style"], "brackets");
        assert_eq!(spans.last().unwrap()["end"], text.len());
    }

    #[test]
    fn test_render_ansi_preserves_text() {
        let text = "def f(): pass";
        let out = render_ansi(text, &styled(text), &StyleTable::one_dark());
        assert!(out.starts_with("\x1b[38;2;"));
        assert!(out.ends_with(RESET));
        assert!(out.contains("pass"));
    }

    #[test]
    fn test_render_table_has_every_style() {
        let out = render_table(&StyleTable::default(), false);
        assert_eq!(out.lines().count(), StyleId::COUNT + 1);
        assert!(out.contains("function_def"));
        assert!(!out.contains('\x1b'));
    }
}
