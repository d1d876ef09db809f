//! Inline emphasis: `**text**` in model output becomes bold runs.
//!
//! Translation happens in two steps. `translate_bold` rewrites the asterisk
//! convention into `<b>`/`</b>` tags, and `parse_runs` turns tagged text into
//! styled runs for the layout engine. Only those two tags are recognised;
//! every other character, including `<`, `>` and `&`, is literal text.

use std::sync::LazyLock;

use regex::Regex;

pub const BOLD_OPEN: &str = "<b>";
pub const BOLD_CLOSE: &str = "</b>";

/// Non-greedy so several bold spans in one paragraph stay independent.
/// `.` does not match line breaks, so a span never crosses one.
static BOLD_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern is a valid regex")
});

/// A contiguous piece of text in a single face.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
}

impl TextRun {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: true,
        }
    }
}

/// Replaces every `**…**` pair with `<b>…</b>`. Unpaired asterisks are kept.
pub fn translate_bold(text: &str) -> String {
    BOLD_PAIR
        .replace_all(text, format!("{BOLD_OPEN}${{1}}{BOLD_CLOSE}").as_str())
        .into_owned()
}

/// Splits tagged paragraph text into runs.
///
/// Adjacent text with the same emphasis is merged; empty runs are dropped.
/// A stray `</b>` simply ends emphasis and an unclosed `<b>` lasts to the end.
pub fn parse_runs(markup: &str) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut bold = false;
    let mut rest = markup;

    loop {
        let next_open = rest.find(BOLD_OPEN);
        let next_close = rest.find(BOLD_CLOSE);
        let next_tag = match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => Some((o, BOLD_OPEN, true)),
            (Some(_), Some(c)) => Some((c, BOLD_CLOSE, false)),
            (Some(o), None) => Some((o, BOLD_OPEN, true)),
            (None, Some(c)) => Some((c, BOLD_CLOSE, false)),
            (None, None) => None,
        };

        let Some((at, tag, opens)) = next_tag else {
            push_run(&mut runs, rest, bold);
            break;
        };

        push_run(&mut runs, &rest[..at], bold);
        bold = opens;
        rest = &rest[at + tag.len()..];
    }

    runs
}

fn push_run(runs: &mut Vec<TextRun>, text: &str, bold: bool) {
    if text.is_empty() {
        return;
    }
    match runs.last_mut() {
        Some(last) if last.bold == bold => last.text.push_str(text),
        _ => runs.push(TextRun {
            text: text.to_string(),
            bold,
        }),
    }
}

/// Convenience for callers that hold raw model text.
pub fn format_paragraph(raw: &str) -> Vec<TextRun> {
    parse_runs(&translate_bold(raw))
}
