// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Inline printer directive.
//
// A job may name its printer on the first line:
//
//   ::PRINTER::LabelPrinter
//   ...text to print...
//
// The directive line is removed from the printed body. Input without the
// marker passes through untouched.

use spoolswitch_core::types::PRINTER_DIRECTIVE;

/// Raw job text split into the override printer and the printable body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintRequest {
    /// Printer named by the directive, trimmed. `None` when there is no
    /// directive or it names nothing.
    pub target_printer: Option<String>,
    /// Text to print.
    pub body: String,
}

impl PrintRequest {
    /// Parse the optional directive from the first line of `text`.
    ///
    /// When the directive is present the remaining lines are rejoined with
    /// `\n` (a trailing line break is not kept). Otherwise `body` is `text`
    /// byte for byte.
    pub fn parse(text: &str) -> Self {
        let mut lines = split_lines(text);
        let first = lines.next();

        match first.filter(|line| line.starts_with(PRINTER_DIRECTIVE)) {
            Some(line) => {
                // Every marker on the line is dropped, not only the leading one.
                let name = line.replace(PRINTER_DIRECTIVE, "");
                let name = name.trim();
                Self {
                    target_printer: (!name.is_empty()).then(|| name.to_string()),
                    body: lines.collect::<Vec<_>>().join("\n"),
                }
            }
            None => Self {
                target_printer: None,
                body: text.to_string(),
            },
        }
    }
}

/// Split on `\n`, `\r\n` and `\r`, dropping the empty piece after a final
/// line break.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        if rest.is_empty() {
            return None;
        }
        match rest.find(['\n', '\r']) {
            Some(idx) => {
                let line = &rest[..idx];
                let skip = if rest[idx..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[idx + skip..];
                Some(line)
            }
            None => {
                let line = rest;
                rest = "";
                Some(line)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_selects_printer_and_is_stripped() {
        let req = PrintRequest::parse("::PRINTER::LabelPrinter\nHello");
        assert_eq!(req.target_printer.as_deref(), Some("LabelPrinter"));
        assert_eq!(req.body, "Hello");
    }

    #[test]
    fn text_without_directive_is_unchanged() {
        for text in ["Hello\nWorld", "Hello\r\nWorld\r\n", "", "\n\n", "x ::PRINTER::y"] {
            let req = PrintRequest::parse(text);
            assert_eq!(req.target_printer, None);
            assert_eq!(req.body, text);
        }
    }

    #[test]
    fn printer_name_is_trimmed() {
        let req = PrintRequest::parse("::PRINTER::  RICOH SP C840 (Hirosaki)  \r\nline 1\r\nline 2\r\n");
        assert_eq!(req.target_printer.as_deref(), Some("RICOH SP C840 (Hirosaki)"));
        assert_eq!(req.body, "line 1\nline 2");
    }

    #[test]
    fn directive_must_start_the_line() {
        let req = PrintRequest::parse(" ::PRINTER::Office\nbody");
        assert_eq!(req.target_printer, None);
        assert_eq!(req.body, " ::PRINTER::Office\nbody");
    }

    #[test]
    fn repeated_markers_are_all_removed() {
        let req = PrintRequest::parse("::PRINTER::A::PRINTER::\nx");
        assert_eq!(req.target_printer.as_deref(), Some("A"));
        assert_eq!(req.body, "x");
    }

    #[test]
    fn empty_name_still_strips_the_line() {
        let req = PrintRequest::parse("::PRINTER::   \nbody");
        assert_eq!(req.target_printer, None);
        assert_eq!(req.body, "body");
    }

    #[test]
    fn directive_only_gives_empty_body() {
        let req = PrintRequest::parse("::PRINTER::Office");
        assert_eq!(req.target_printer.as_deref(), Some("Office"));
        assert_eq!(req.body, "");
    }

    #[test]
    fn lone_carriage_returns_split_lines() {
        let req = PrintRequest::parse("::PRINTER::Office\rA\rB");
        assert_eq!(req.target_printer.as_deref(), Some("Office"));
        assert_eq!(req.body, "A\nB");
    }

    #[test]
    fn blank_lines_inside_body_survive() {
        let req = PrintRequest::parse("::PRINTER::Office\n\nA\n\nB\n");
        assert_eq!(req.body, "\nA\n\nB");
    }

    #[test]
    fn split_lines_matches_line_breaks() {
        let lines: Vec<_> = split_lines("a\r\nb\rc\n\nd\n").collect();
        assert_eq!(lines, vec!["a", "b", "c", "", "d"]);
    }
}
