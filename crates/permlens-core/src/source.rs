//! Source excerpts around a reported line.
//!
//! ```text
//!  3 |   definition document {
//!  4 >     relation viewer: usr
//!    >                      ^~~
//!  5 |   }
//! ```

use crate::config::WindowConfig;
use crate::style::{Style, Styler};

/// Lines of the document an error is reported against.
#[derive(Debug, Clone)]
pub struct SourceContext<'a> {
    lines: Vec<&'a str>,
}

impl<'a> SourceContext<'a> {
    pub fn new(text: &'a str) -> Self {
        let lines = text
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        Self { lines }
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Render the window around the 0-indexed `center` line.
    ///
    /// Only the center line gets `highlight`. Indices outside the document
    /// are skipped, so windows near either end are shorter.
    pub fn render_window(
        &self,
        center: i64,
        highlight: &str,
        window: WindowConfig,
        styler: &dyn Styler,
    ) -> Vec<String> {
        let leading = i64::try_from(window.leading).unwrap_or(i64::MAX);
        let trailing = i64::try_from(window.trailing).unwrap_or(i64::MAX);
        let last_index = i64::try_from(self.lines.len())
            .unwrap_or(i64::MAX)
            .saturating_sub(1);

        // Only indices inside the document are visited.
        let first = center.saturating_sub(leading).max(0);
        let last = center.saturating_add(trailing).min(last_index);
        (first..=last)
            .flat_map(|index| {
                let is_center = index == center;
                let highlight = if is_center { highlight } else { "" };
                self.render_line(index, highlight, is_center, styler)
            })
            .collect()
    }

    /// Render one line, plus a caret underline when `highlight` occurs in it.
    pub fn render_line(
        &self,
        index: i64,
        highlight: &str,
        is_center: bool,
        styler: &dyn Styler,
    ) -> Vec<String> {
        let Some(content) = usize::try_from(index)
            .ok()
            .and_then(|i| self.lines.get(i))
        else {
            return Vec::new();
        };

        let width = self.lines.len().to_string().len();
        let (number_style, code_style, delimiter) = if is_center {
            (Style::CenterLineNumber, Style::CenterCode, '>')
        } else {
            (Style::LineNumber, Style::Code, '|')
        };
        let number = styler.paint(number_style, &format!("{:>width$}", index + 1));

        let found = if highlight.is_empty() {
            None
        } else {
            content.find(highlight)
        };
        let Some(at) = found else {
            return vec![format!(
                " {} {} {}",
                number,
                delimiter,
                styler.paint(code_style, content)
            )];
        };

        let prefix = &content[..at];
        let suffix = &content[at + highlight.len()..];
        let marked = format!(
            " {} {} {}{}{}",
            number,
            delimiter,
            styler.paint(code_style, prefix),
            styler.paint(Style::Highlight, highlight),
            styler.paint(code_style, suffix),
        );
        let underline = format!(
            " {} {} {}{}{}",
            styler.paint(number_style, &" ".repeat(width)),
            delimiter,
            " ".repeat(prefix.chars().count()),
            styler.paint(Style::Highlight, "^"),
            styler.paint(
                Style::Highlight,
                &"~".repeat(highlight.chars().count().saturating_sub(1))
            ),
        );
        vec![marked, underline]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{MarkupStyler, PlainStyler};

    fn after_delimiter(line: &str) -> &str {
        line.split_once(['>', '|'])
            .map(|(_, rest)| rest.strip_prefix(' ').unwrap_or(rest))
            .unwrap()
    }

    #[test]
    fn underline_spans_highlight() {
        let ctx = SourceContext::new("abcXYZdef");
        let lines = ctx.render_line(0, "XYZ", true, &PlainStyler);
        assert_eq!(lines, vec![" 1 > abcXYZdef", "   >    ^~~"]);
        assert_eq!(after_delimiter(&lines[1]), "   ^~~");
    }

    #[test]
    fn only_first_occurrence_is_anchored() {
        let ctx = SourceContext::new("foo foo");
        let lines = ctx.render_line(0, "foo", true, &PlainStyler);
        assert_eq!(after_delimiter(&lines[1]), "^~~");
    }

    #[test]
    fn single_character_highlight_has_no_tildes() {
        let ctx = SourceContext::new("a = b");
        let lines = ctx.render_line(0, "=", true, &PlainStyler);
        assert_eq!(after_delimiter(&lines[1]), "  ^");
    }

    #[test]
    fn missing_highlight_falls_back_to_plain_line() {
        let ctx = SourceContext::new("relation viewer: user");
        let lines = ctx.render_line(0, "editor", true, &PlainStyler);
        assert_eq!(lines, vec![" 1 > relation viewer: user"]);
    }

    #[test]
    fn context_lines_use_pipe_delimiter() {
        let ctx = SourceContext::new("a\nb");
        assert_eq!(ctx.render_line(1, "", false, &PlainStyler), vec![" 2 | b"]);
    }

    #[test]
    fn gutter_is_right_aligned_to_document_width() {
        let text = (1..=12).map(|i| format!("line{}", i)).collect::<Vec<_>>().join("\n");
        let ctx = SourceContext::new(&text);
        let lines = ctx.render_window(9, "line10", WindowConfig::default(), &PlainStyler);
        assert_eq!(
            lines,
            vec![
                "  7 | line7",
                "  8 | line8",
                "  9 | line9",
                " 10 > line10",
                "    > ^~~~~~",
                " 11 | line11",
                " 12 | line12",
            ]
        );
    }

    #[test]
    fn window_is_asymmetric() {
        let text = (1..=20).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let ctx = SourceContext::new(&text);
        let lines = ctx.render_window(10, "", WindowConfig::default(), &PlainStyler);
        let numbers: Vec<&str> = lines
            .iter()
            .map(|l| l.split_whitespace().next().unwrap())
            .collect();
        assert_eq!(numbers, vec!["8", "9", "10", "11", "12", "13"]);
    }

    #[test]
    fn window_clips_at_document_start() {
        let ctx = SourceContext::new("one\ntwo\nthree\nfour");
        let lines = ctx.render_window(0, "", WindowConfig::default(), &PlainStyler);
        assert_eq!(lines, vec![" 1 > one", " 2 | two", " 3 | three"]);
    }

    #[test]
    fn negative_center_renders_only_trailing_lines() {
        let ctx = SourceContext::new("one\ntwo\nthree");
        let lines = ctx.render_window(-1, "one", WindowConfig::default(), &PlainStyler);
        assert_eq!(lines, vec![" 1 | one", " 2 | two"]);
    }

    #[test]
    fn oversized_window_is_clamped_to_document() {
        let ctx = SourceContext::new("one\ntwo\nthree");
        let window = WindowConfig {
            leading: usize::MAX,
            trailing: usize::MAX,
        };
        let lines = ctx.render_window(1, "", window, &PlainStyler);
        assert_eq!(lines, vec![" 1 | one", " 2 > two", " 3 | three"]);

        let far_below = ctx.render_window(i64::MAX, "", window, &PlainStyler);
        assert_eq!(far_below.len(), 3);
        assert!(ctx
            .render_window(i64::MIN, "", WindowConfig::default(), &PlainStyler)
            .is_empty());
    }

    #[test]
    fn highlight_and_center_styles_differ() {
        let ctx = SourceContext::new("abcXYZdef\nnext");
        let lines = ctx.render_window(0, "XYZ", WindowConfig::default(), &MarkupStyler);
        assert_eq!(
            lines[0],
            " [center-line-number]1[/center-line-number] > \
             [center-code]abc[/center-code][highlight]XYZ[/highlight][center-code]def[/center-code]"
        );
        assert_eq!(
            lines[1],
            " [center-line-number] [/center-line-number] >    [highlight]^[/highlight][highlight]~~[/highlight]"
        );
        assert_eq!(
            lines[2],
            " [line-number]2[/line-number] | [code]next[/code]"
        );
    }

    #[test]
    fn non_ascii_prefix_aligns_by_character() {
        let ctx = SourceContext::new("é = bad");
        let lines = ctx.render_line(0, "bad", true, &PlainStyler);
        assert_eq!(after_delimiter(&lines[1]), "    ^~~");
    }

    #[test]
    fn carriage_returns_are_dropped() {
        let ctx = SourceContext::new("a\r\nb\r\n");
        assert_eq!(ctx.line_count(), 3);
        assert_eq!(ctx.render_line(0, "", false, &PlainStyler), vec![" 1 | a"]);
    }
}
