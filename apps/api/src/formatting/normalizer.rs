//! Content normalizer — reshapes AI-generated, markdown-flavoured text into display-ready
//! plain text for the resume and cover-letter views.
//!
//! Every transform is an ordered list of regex rules applied over the whole text.
//! ORDER MATTERS: bold (`**x**`) is stripped before italic (`*x*`); run the other way round,
//! the single-asterisk rule consumes the bold delimiters and leaves stray `*` behind.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Width of the `=` / `-` underline drawn beneath promoted headings.
pub const SEPARATOR_WIDTH: usize = 30;

/// Which display surface the text is being prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContentCategory {
    Generic,
    Resume,
    CoverLetterParagraph,
}

impl ContentCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentCategory::Generic => "generic",
            ContentCategory::Resume => "resume",
            ContentCategory::CoverLetterParagraph => "cover-letter-paragraph",
        }
    }
}

impl fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the cover-letter transform treats blank lines.
///
/// `Flatten` is the shipped behavior: the paragraph-break rule runs after every whitespace run
/// has already become a single space, so it never fires and the letter comes out as one line.
/// `PreserveParagraphs` keeps blank-line separated paragraphs and flattens only inside them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphMode {
    #[default]
    Flatten,
    PreserveParagraphs,
}

/// One `(pattern, replacement)` step of a pipeline. Replacements may use `${1}` captures.
struct Rule {
    pattern: Regex,
    replacement: String,
}

impl Rule {
    fn new(pattern: &str, replacement: impl Into<String>) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("normalizer rule patterns are valid regexes"),
            replacement: replacement.into(),
        }
    }
}

fn heading_replacement(underline: char) -> String {
    let separator: String = std::iter::repeat(underline).take(SEPARATOR_WIDTH).collect();
    format!("\n${{1}}\n{separator}\n")
}

/// `**bold**` then `*italic*`, inner text kept. Shared by every pipeline.
fn emphasis_rules() -> [Rule; 2] {
    [
        Rule::new(r"\*\*(.*?)\*\*", "${1}"),
        Rule::new(r"\*(.*?)\*", "${1}"),
    ]
}

/// Generic and resume content: headings underlined, bullets glyphed, emphasis stripped.
static STRUCTURED_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let mut rules = vec![
        Rule::new(r"(?m)^# (.*)$", heading_replacement('=')),
        Rule::new(r"(?m)^## (.*)$", heading_replacement('-')),
        Rule::new(r"(?m)^\* ", "• "),
        Rule::new(r"(?m)^- ", "• "),
    ];
    rules.extend(emphasis_rules());
    rules.push(Rule::new(r"\n{3,}", "\n\n"));
    rules
});

/// Cover-letter steps shared by both paragraph modes: drop headings and bullet markers,
/// then strip emphasis.
static COVER_LETTER_MARKUP_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    let mut rules = vec![
        Rule::new(r"(?m)^#+ .*$", ""),
        Rule::new(r"(?m)^[•*-] ", ""),
    ];
    rules.extend(emphasis_rules());
    rules
});

static COVER_LETTER_FLATTEN_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        Rule::new(r"\s+", " "),
        // No newline survives the line above, so this never matches.
        Rule::new(r"\n{2,}", "\n\n"),
    ]
});

static PARAGRAPH_SPLIT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s*\n").expect("paragraph split pattern is valid"));
static SPACE_COLLAPSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("space collapse pattern is valid"));

static CRLF: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r\n").expect("CRLF pattern is valid"));

/// Runs `rules` in order. Input is converted to LF line endings first; every rule assumes `\n`.
fn apply_rules(rules: &[Rule], text: &str) -> String {
    let text = CRLF.replace_all(text, "\n");
    rules.iter().fold(text.into_owned(), |acc, rule| {
        rule.pattern
            .replace_all(&acc, rule.replacement.as_str())
            .into_owned()
    })
}

/// Normalizes general AI output: `#`/`##` headings become underlined blocks, `*`/`-` bullets
/// become `•`, emphasis markers are removed, and blank-line runs are capped at one.
pub fn normalize_generic(input: &str) -> String {
    apply_rules(&STRUCTURED_RULES, input).trim().to_string()
}

/// Normalizes resume content. Currently byte-identical to [`normalize_generic`]; kept as its
/// own entry point so resume call sites stay distinguishable.
pub fn normalize_resume(input: &str) -> String {
    normalize_generic(input)
}

/// Normalizes cover-letter text for inline paragraph display, using [`ParagraphMode::Flatten`].
pub fn normalize_cover_letter_paragraph(input: &str) -> String {
    normalize_cover_letter_paragraph_with(input, ParagraphMode::Flatten)
}

/// Cover-letter normalization with an explicit paragraph mode.
///
/// Headings are deleted outright (not underlined) and leading bullet markers are dropped.
pub fn normalize_cover_letter_paragraph_with(input: &str, mode: ParagraphMode) -> String {
    let stripped = apply_rules(&COVER_LETTER_MARKUP_RULES, input);

    match mode {
        ParagraphMode::Flatten => apply_rules(&COVER_LETTER_FLATTEN_RULES, &stripped)
            .trim()
            .to_string(),
        ParagraphMode::PreserveParagraphs => PARAGRAPH_SPLIT
            .split(&stripped)
            .map(|block| SPACE_COLLAPSE.replace_all(block, " ").trim().to_string())
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"),
    }
}

/// Dispatches to the transform for `category`. Cover letters use the default paragraph mode.
pub fn normalize(category: ContentCategory, input: &str) -> String {
    let output = match category {
        ContentCategory::Generic => normalize_generic(input),
        ContentCategory::Resume => normalize_resume(input),
        ContentCategory::CoverLetterParagraph => normalize_cover_letter_paragraph(input),
    };

    debug!(
        "Normalized {} content: {} -> {} bytes",
        category,
        input.len(),
        output.len()
    );

    output
}
