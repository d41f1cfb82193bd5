//! Light markdown for assistant replies.
//!
//! Replies are turned into styled spans and rendered as DOM nodes, never as
//! raw HTML, so model output cannot inject markup.

use once_cell::sync::Lazy;
use regex::Regex;
use yew::prelude::*;

static EMPHASIS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\*\*(.*?)\*\*|\*(.*?)\*").expect("emphasis pattern"));
static LIST_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]+\.\s").expect("list pattern"));

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Style {
    Plain,
    Bold,
    Italic,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Span {
    pub style: Style,
    pub text: String,
}

impl Span {
    fn new(style: Style, text: &str) -> Self {
        Self {
            style,
            text: text.to_string(),
        }
    }
}

pub type Line = Vec<Span>;

pub fn format_reply(text: &str) -> Vec<Line> {
    text.split('\n')
        .map(parse_inline)
        .flat_map(split_list_items)
        .collect()
}

// Numbered items that the model ran together on one line get their own line.
// Emphasis is already resolved, so a break inside `**1. Item**` keeps both
// halves bold.
fn split_list_items(spans: Line) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut current: Line = Vec::new();
    for span in spans {
        let mut start = 0;
        for marker in LIST_MARKER.find_iter(&span.text) {
            if marker.start() > start {
                current.push(Span::new(span.style, &span.text[start..marker.start()]));
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            start = marker.start();
        }
        if start < span.text.len() {
            current.push(Span::new(span.style, &span.text[start..]));
        }
    }
    lines.push(current);
    lines
}

fn parse_inline(line: &str) -> Line {
    let mut spans = Vec::new();
    let mut cursor = 0;
    for caps in EMPHASIS.captures_iter(line) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            spans.push(Span::new(Style::Plain, &line[cursor..whole.start()]));
        }
        if let Some(bold) = caps.get(1) {
            spans.push(Span::new(Style::Bold, bold.as_str()));
        } else if let Some(italic) = caps.get(2) {
            spans.push(Span::new(Style::Italic, italic.as_str()));
        }
        cursor = whole.end();
    }
    if cursor < line.len() {
        spans.push(Span::new(Style::Plain, &line[cursor..]));
    }
    spans
}

pub fn render_reply(text: &str) -> Html {
    let lines = format_reply(text);
    let last = lines.len().saturating_sub(1);
    html! {
        <>
            { for lines.into_iter().enumerate().map(|(i, line)| html! {
                <>
                    { for line.into_iter().map(render_span) }
                    if i < last { <br/> }
                </>
            }) }
        </>
    }
}

fn render_span(span: Span) -> Html {
    match span.style {
        Style::Plain => html! { { span.text } },
        Style::Bold => html! { <strong>{ span.text }</strong> },
        Style::Italic => html! { <em>{ span.text }</em> },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &str) -> Span {
        Span::new(Style::Plain, text)
    }

    #[test]
    fn bold_and_italic_are_recognised() {
        let lines = format_reply("Check **QNH** before *every* landing");
        assert_eq!(
            lines,
            vec![vec![
                plain("Check "),
                Span::new(Style::Bold, "QNH"),
                plain(" before "),
                Span::new(Style::Italic, "every"),
                plain(" landing"),
            ]]
        );
    }

    #[test]
    fn newlines_split_lines() {
        let lines = format_reply("one\ntwo");
        assert_eq!(lines, vec![vec![plain("one")], vec![plain("two")]]);
    }

    #[test]
    fn run_together_list_items_are_broken_up() {
        let lines = format_reply("Steps: 1. Pre-flight 2. Taxi");
        assert_eq!(
            lines,
            vec![vec![plain("Steps: ")], vec![plain("1. Pre-flight ")], vec![plain("2. Taxi")]]
        );
    }

    #[test]
    fn list_marker_at_line_start_does_not_add_blank_line() {
        assert_eq!(format_reply("1. Only item"), vec![vec![plain("1. Only item")]]);
    }

    #[test]
    fn bold_list_item_stays_bold() {
        let lines = format_reply("**1. Air Navigation** covers VOR");
        assert_eq!(
            lines,
            vec![vec![Span::new(Style::Bold, "1. Air Navigation"), plain(" covers VOR")]]
        );
    }

    #[test]
    fn break_inside_emphasis_keeps_style_on_both_halves() {
        let lines = format_reply("Modules: **1. Meteorology 2. Navigation** and *3. Regulations*");
        assert_eq!(
            lines,
            vec![
                vec![plain("Modules: ")],
                vec![Span::new(Style::Bold, "1. Meteorology ")],
                vec![Span::new(Style::Bold, "2. Navigation"), plain(" and ")],
                vec![Span::new(Style::Italic, "3. Regulations")],
            ]
        );
    }

    #[test]
    fn only_ascii_digits_mark_list_items() {
        assert_eq!(format_reply("Gate ४. Board"), vec![vec![plain("Gate ४. Board")]]);
    }

    #[test]
    fn decimals_are_not_list_markers() {
        assert_eq!(format_reply("Set 29.92 inHg"), vec![vec![plain("Set 29.92 inHg")]]);
    }

    #[test]
    fn markup_is_kept_as_text() {
        let lines = format_reply("<script>alert(1)</script>");
        assert_eq!(lines, vec![vec![plain("<script>alert(1)</script>")]]);
    }
}
