use regex::Regex;
use scraper::{ElementRef, Html, Node, Selector};
use std::sync::LazyLock;

static BODY_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("body").expect("static selector"));

static INLINE_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("static regex"));

static BREAK_RUNS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\x01\x02]*[\x01\x02][\s\x01\x02]*").expect("static regex"));

/// Marks a collapsible single line break around a block element
const LINE_BREAK: char = '\x01';
/// Marks a collapsible blank line around a paragraph
const PARAGRAPH_BREAK: char = '\x02';
/// Preformatted whitespace, restored after collapsing
const PRE_SPACE: char = '\x03';
const PRE_NEWLINE: char = '\x04';
const PRE_TAB: char = '\x05';

/// Elements that never render text
const NON_RENDERED: [&str; 5] = ["head", "template", "noscript", "iframe", "object"];

/// Elements separated from their neighbours by a single line break
const BLOCK_TAGS: [&str; 31] = [
    "address", "article", "aside", "blockquote", "dd", "details", "dialog", "div", "dl", "dt",
    "fieldset", "figcaption", "figure", "form", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "li",
    "main", "ol", "pre", "section", "summary", "table", "tr", "ul", "caption",
];

/// Elements separated by a blank line
const PARAGRAPH_TAGS: [&str; 1] = ["p"];

/// Renders the visible text of `<body>`, skipping subtrees whose tag is in `skip`.
///
/// Approximates `innerText`: whitespace inside text runs collapses to a
/// single space, block elements start new lines and paragraphs are
/// separated by one blank line. Whitespace inside `<pre>` is kept as is.
pub fn visible_body_text(doc: &Html, skip: &[&str]) -> String {
    let mut raw = String::new();
    for body in doc.select(&BODY_SELECTOR) {
        render_children(body, skip, false, &mut raw);
    }
    restore_preformatted(&collapse_breaks(&raw))
}

fn render_children(element: ElementRef<'_>, skip: &[&str], preformatted: bool, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) if preformatted => out.extend(text.chars().map(shield_whitespace)),
            // Source line breaks are layout whitespace, not rendered breaks
            Node::Text(text) => {
                out.extend(text.chars().map(|c| if c.is_whitespace() { ' ' } else { c }))
            }
            Node::Element(_) => {
                if let Some(child_element) = ElementRef::wrap(child) {
                    render_element(child_element, skip, preformatted, out);
                }
            }
            _ => {}
        }
    }
}

/// Swaps whitespace for markers that line normalization leaves alone
fn shield_whitespace(c: char) -> char {
    match c {
        '\n' => PRE_NEWLINE,
        '\t' => PRE_TAB,
        c if c.is_whitespace() => PRE_SPACE,
        c => c,
    }
}

fn restore_preformatted(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            PRE_SPACE => ' ',
            PRE_NEWLINE => '\n',
            PRE_TAB => '\t',
            c => c,
        })
        .collect()
}

fn render_element(element: ElementRef<'_>, skip: &[&str], preformatted: bool, out: &mut String) {
    let name = element.value().name();
    if skip.contains(&name) || NON_RENDERED.contains(&name) {
        return;
    }
    if name == "br" {
        out.push(if preformatted { PRE_NEWLINE } else { '\n' });
        return;
    }

    let separator = if PARAGRAPH_TAGS.contains(&name) {
        Some(PARAGRAPH_BREAK)
    } else if BLOCK_TAGS.contains(&name) {
        Some(LINE_BREAK)
    } else {
        None
    };

    out.extend(separator);
    render_children(element, skip, preformatted || name == "pre", out);
    out.extend(separator);
    // Table cells on one row stay apart
    if name == "td" || name == "th" {
        out.push(' ');
    }
}

/// Merges each run of adjacent block boundaries into the largest break it holds
fn collapse_breaks(raw: &str) -> String {
    let merged = BREAK_RUNS.replace_all(raw, |caps: &regex::Captures<'_>| {
        if caps[0].contains(PARAGRAPH_BREAK) {
            "\n\n"
        } else {
            "\n"
        }
    });
    normalize_lines(&merged)
}

/// Collapses horizontal whitespace and trims every line and the whole text
pub fn normalize_lines(raw: &str) -> String {
    let collapsed = INLINE_SPACE.replace_all(raw, " ");
    collapsed
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Keeps the first `limit` characters of `text`
pub fn truncate_chars(text: &str, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
