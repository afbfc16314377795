//! Diagnostic line formats and the compiler that turns them into matchers.
//!
//! A [`FormatSpec`] is an ordered list of [`FormatToken`]s mirroring the
//! physical layout of one line of a tool's output. Compiling it yields a
//! [`Matcher`] that either extracts every field of a line or rejects it.
//!
//! ```
//! use lintmux_tools::{FormatSpec, Severity};
//!
//! let matcher = FormatSpec::new()
//!     .filename()
//!     .literal(":")
//!     .line()
//!     .literal(":")
//!     .column()
//!     .literal(":")
//!     .message()
//!     .severity_from_message()
//!     .compile()
//!     .unwrap();
//!
//! let m = matcher.apply("main.c:10:5:warning: unused variable").unwrap();
//! assert_eq!(m.line, 10);
//! assert_eq!(m.severity, Severity::Warning);
//! ```
//!
//! Sub-matchers are greedy and never backtrack: each takes its longest run
//! and the next one starts where it stopped.

use crate::{Diagnostic, Severity, SeverityClassifier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// One positional element of a diagnostic line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatToken {
    /// Run of characters excluding space, tab, `:`, CR, LF, NUL, FF and VT.
    Filename,
    /// Run of decimal digits, at least 1.
    Line,
    /// Run of decimal digits.
    Column,
    /// Rest of the line up to CR, LF or NUL.
    Message,
    /// Classify the already captured message text.
    SeverityFromMessage,
    /// Constant severity.
    SeverityFixed(Severity),
    /// Severity printed as its own field, e.g. a rule code prefix.
    SeverityPattern(SeverityGrammar),
    /// Exact text, consumed but not captured.
    Literal(String),
    /// One or more spaces or tabs.
    Blank,
}

/// Sub-grammar for a severity that appears as its own field.
///
/// The longest entry of `codes` that prefixes the remaining input wins.
/// With `lookahead` the code is left in place for the next token (so a
/// following message keeps `F401`). When no code matches, `fallback` is
/// used without consuming anything; without a fallback the line fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeverityGrammar {
    pub codes: BTreeMap<String, Severity>,
    pub fallback: Option<Severity>,
    pub lookahead: bool,
}

impl SeverityGrammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: impl Into<String>, severity: Severity) -> Self {
        self.codes.insert(code.into(), severity);
        self
    }

    pub fn fallback(mut self, severity: Severity) -> Self {
        self.fallback = Some(severity);
        self
    }

    pub fn lookahead(mut self) -> Self {
        self.lookahead = true;
        self
    }
}

/// Ordered token sequence describing one tool's diagnostic line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatSpec {
    tokens: Vec<FormatToken>,
}

impl From<Vec<FormatToken>> for FormatSpec {
    fn from(tokens: Vec<FormatToken>) -> Self {
        Self { tokens }
    }
}

impl FormatSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[FormatToken] {
        &self.tokens
    }

    pub fn token(mut self, token: FormatToken) -> Self {
        self.tokens.push(token);
        self
    }

    pub fn filename(self) -> Self {
        self.token(FormatToken::Filename)
    }

    pub fn line(self) -> Self {
        self.token(FormatToken::Line)
    }

    pub fn column(self) -> Self {
        self.token(FormatToken::Column)
    }

    pub fn message(self) -> Self {
        self.token(FormatToken::Message)
    }

    pub fn literal(self, text: impl Into<String>) -> Self {
        self.token(FormatToken::Literal(text.into()))
    }

    pub fn blank(self) -> Self {
        self.token(FormatToken::Blank)
    }

    pub fn severity_from_message(self) -> Self {
        self.token(FormatToken::SeverityFromMessage)
    }

    pub fn severity(self, severity: Severity) -> Self {
        self.token(FormatToken::SeverityFixed(severity))
    }

    pub fn severity_pattern(self, grammar: SeverityGrammar) -> Self {
        self.token(FormatToken::SeverityPattern(grammar))
    }

    /// Compile with the default severity classifier.
    pub fn compile(&self) -> Result<Matcher, FormatError> {
        self.compile_with(SeverityClassifier::default())
    }

    /// Compile, using `classifier` for [`FormatToken::SeverityFromMessage`].
    pub fn compile_with(&self, classifier: SeverityClassifier) -> Result<Matcher, FormatError> {
        let mut seen = Seen::default();
        let steps = self
            .tokens
            .iter()
            .map(|token| seen.step(token))
            .collect::<Result<Vec<_>, _>>()?;

        for (field, present) in [
            ("filename", seen.filename),
            ("line", seen.line),
            ("message", seen.message),
        ] {
            if !present {
                return Err(FormatError::MissingField(field));
            }
        }

        Ok(Matcher { steps, classifier })
    }
}

/// Invalid [`FormatSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("format is missing a {0} field")]
    MissingField(&'static str),
    #[error("format has more than one {0} field")]
    DuplicateField(&'static str),
    #[error("format has more than one severity token")]
    DuplicateSeverity,
    #[error("severity-from-message must come after the message field")]
    SeverityBeforeMessage,
    #[error("literal separators cannot be empty")]
    EmptyLiteral,
    #[error("severity pattern needs at least one code or a fallback")]
    EmptySeverityPattern,
}

/// Validation state threaded through compilation.
#[derive(Default)]
struct Seen {
    filename: bool,
    line: bool,
    column: bool,
    message: bool,
    severity: bool,
}

impl Seen {
    fn field(flag: &mut bool, name: &'static str) -> Result<(), FormatError> {
        if std::mem::replace(flag, true) {
            return Err(FormatError::DuplicateField(name));
        }
        Ok(())
    }

    fn severity(&mut self) -> Result<(), FormatError> {
        if std::mem::replace(&mut self.severity, true) {
            return Err(FormatError::DuplicateSeverity);
        }
        Ok(())
    }

    fn step(&mut self, token: &FormatToken) -> Result<Step, FormatError> {
        let step = match token {
            FormatToken::Filename => {
                Self::field(&mut self.filename, "filename")?;
                Step::Filename
            }
            FormatToken::Line => {
                Self::field(&mut self.line, "line")?;
                Step::Line
            }
            FormatToken::Column => {
                Self::field(&mut self.column, "column")?;
                Step::Column
            }
            FormatToken::Message => {
                Self::field(&mut self.message, "message")?;
                Step::Message
            }
            FormatToken::SeverityFromMessage => {
                if !self.message {
                    return Err(FormatError::SeverityBeforeMessage);
                }
                self.severity()?;
                Step::SeverityFromMessage
            }
            FormatToken::SeverityFixed(severity) => {
                self.severity()?;
                Step::SeverityFixed(*severity)
            }
            FormatToken::SeverityPattern(grammar) => {
                if grammar.codes.is_empty() && grammar.fallback.is_none() {
                    return Err(FormatError::EmptySeverityPattern);
                }
                self.severity()?;
                let mut codes: Vec<(String, Severity)> = grammar
                    .codes
                    .iter()
                    .map(|(code, severity)| (code.clone(), *severity))
                    .collect();
                // Longest code first so prefixes of other codes lose.
                codes.sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
                Step::SeverityCodes {
                    codes,
                    fallback: grammar.fallback,
                    lookahead: grammar.lookahead,
                }
            }
            FormatToken::Literal(text) => {
                if text.is_empty() {
                    return Err(FormatError::EmptyLiteral);
                }
                Step::Literal(text.clone())
            }
            FormatToken::Blank => Step::Blank,
        };
        Ok(step)
    }
}

/// Compiled form of one token.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Filename,
    Line,
    Column,
    Message,
    SeverityFromMessage,
    SeverityFixed(Severity),
    SeverityCodes {
        codes: Vec<(String, Severity)>,
        fallback: Option<Severity>,
        lookahead: bool,
    },
    Literal(String),
    Blank,
}

fn is_filename_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | ':' | '\r' | '\n' | '\0' | '\x0b' | '\x0c')
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\r' | '\n' | '\0')
}

/// Split off the longest non-empty prefix whose chars satisfy `keep`.
fn take_run(input: &str, keep: impl Fn(char) -> bool) -> Option<(&str, &str)> {
    let end = input
        .char_indices()
        .find(|&(_, c)| !keep(c))
        .map_or(input.len(), |(i, _)| i);
    if end == 0 {
        return None;
    }
    Some(input.split_at(end))
}

fn take_number(input: &str) -> Option<(usize, &str)> {
    let (digits, rest) = take_run(input, |c| c.is_ascii_digit())?;
    Some((digits.parse().ok()?, rest))
}

/// Fields captured so far while matching one line.
#[derive(Debug, Default)]
struct Captures<'a> {
    filename: Option<&'a str>,
    line: Option<usize>,
    column: Option<usize>,
    message: Option<&'a str>,
    severity: Option<Severity>,
}

impl Step {
    /// Match at the start of `input`, returning what remains.
    fn apply<'a>(
        &self,
        input: &'a str,
        captures: &mut Captures<'a>,
        classifier: &SeverityClassifier,
    ) -> Option<&'a str> {
        match self {
            Step::Filename => {
                let (name, rest) = take_run(input, |c| !is_filename_separator(c))?;
                captures.filename = Some(name);
                Some(rest)
            }
            Step::Line => {
                let (line, rest) = take_number(input)?;
                if line == 0 {
                    return None;
                }
                captures.line = Some(line);
                Some(rest)
            }
            Step::Column => {
                let (column, rest) = take_number(input)?;
                captures.column = Some(column);
                Some(rest)
            }
            Step::Message => {
                let (message, rest) = take_run(input, |c| !is_line_terminator(c))?;
                captures.message = Some(message);
                Some(rest)
            }
            Step::SeverityFromMessage => {
                captures.severity = Some(classifier.classify(captures.message?));
                Some(input)
            }
            Step::SeverityFixed(severity) => {
                captures.severity = Some(*severity);
                Some(input)
            }
            Step::SeverityCodes {
                codes,
                fallback,
                lookahead,
            } => {
                let hit = codes
                    .iter()
                    .find(|(code, _)| input.starts_with(code.as_str()));
                match hit {
                    Some((code, severity)) => {
                        captures.severity = Some(*severity);
                        Some(if *lookahead { input } else { &input[code.len()..] })
                    }
                    None => {
                        captures.severity = Some((*fallback)?);
                        Some(input)
                    }
                }
            }
            Step::Literal(text) => input.strip_prefix(text.as_str()),
            Step::Blank => take_run(input, |c| c == ' ' || c == '\t').map(|(_, rest)| rest),
        }
    }
}

/// Fields extracted from one fully matched line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch {
    pub filename: String,
    pub line: usize,
    pub column: Option<usize>,
    pub severity: Severity,
    pub message: String,
}

impl LineMatch {
    pub fn into_diagnostic(self, tool: &str) -> Diagnostic {
        Diagnostic {
            tool: tool.to_string(),
            filename: self.filename,
            line: self.line,
            column: self.column,
            severity: self.severity,
            message: self.message,
        }
    }
}

/// Compiled line matcher for one [`FormatSpec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matcher {
    steps: Vec<Step>,
    classifier: SeverityClassifier,
}

impl Matcher {
    /// Match a whole line. Returns `None` unless every token matches and
    /// nothing but a line terminator is left over.
    pub fn apply(&self, line: &str) -> Option<LineMatch> {
        let mut captures = Captures::default();
        let mut rest = line;
        for step in &self.steps {
            rest = step.apply(rest, &mut captures, &self.classifier)?;
        }
        if !rest.trim_end_matches(['\r', '\n']).is_empty() {
            return None;
        }

        Some(LineMatch {
            filename: captures.filename?.to_string(),
            line: captures.line?,
            column: captures.column,
            severity: captures.severity.unwrap_or_default(),
            message: captures.message?.to_string(),
        })
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.apply(line).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StripSet;

    fn gcc_like() -> FormatSpec {
        FormatSpec::new()
            .filename()
            .literal(":")
            .line()
            .literal(":")
            .column()
            .literal(":")
            .message()
            .severity_from_message()
    }

    #[test]
    fn test_extracts_all_fields() {
        let matcher = gcc_like().compile().unwrap();
        let m = matcher.apply("main.c:10:5:warning: unused variable").unwrap();
        assert_eq!(
            m,
            LineMatch {
                filename: "main.c".to_string(),
                line: 10,
                column: Some(5),
                severity: Severity::Warning,
                message: "warning: unused variable".to_string(),
            }
        );
    }

    #[test]
    fn test_severity_reads_captured_message() {
        let matcher = gcc_like().compile().unwrap();
        let m = matcher.apply("a.c:1:1:error: expected ';'").unwrap();
        assert_eq!(m.severity, Severity::Error);
        let m = matcher.apply("a.c:1:1:note: declared here").unwrap();
        assert_eq!(m.severity, Severity::Info);
    }

    #[test]
    fn test_partial_match_is_rejected() {
        let matcher = gcc_like().compile().unwrap();
        // filename and line match, the rest does not conform
        assert_eq!(matcher.apply("main.c:10"), None);
        assert_eq!(matcher.apply("main.c:10:"), None);
        assert_eq!(matcher.apply("main.c:10:x:warning"), None);
        assert_eq!(matcher.apply("main.c:10:5:"), None);
    }

    #[test]
    fn test_non_diagnostic_lines_are_rejected() {
        let matcher = gcc_like().compile().unwrap();
        assert_eq!(matcher.apply(""), None);
        assert_eq!(matcher.apply("main.c: In function 'main':"), None);
        assert_eq!(matcher.apply("1 warning generated."), None);
        assert_eq!(matcher.apply("   10 |     int x;"), None);
    }

    #[test]
    fn test_line_zero_is_rejected() {
        let matcher = gcc_like().compile().unwrap();
        assert_eq!(matcher.apply("main.c:0:1:error: bad"), None);
        // column 0 is allowed
        assert!(matcher.is_match("main.c:1:0:error: bad"));
    }

    #[test]
    fn test_number_overflow_is_rejected() {
        let matcher = gcc_like().compile().unwrap();
        assert_eq!(
            matcher.apply("main.c:99999999999999999999999:1:error: bad"),
            None
        );
    }

    #[test]
    fn test_trailing_carriage_return() {
        let matcher = gcc_like().compile().unwrap();
        let m = matcher.apply("main.c:3:4:warning: x\r").unwrap();
        assert_eq!(m.message, "warning: x");
    }

    #[test]
    fn test_message_stops_at_nul() {
        let matcher = gcc_like().compile().unwrap();
        assert_eq!(matcher.apply("main.c:3:4:warning: x\0junk"), None);
    }

    #[test]
    fn test_filename_cannot_contain_whitespace() {
        let matcher = gcc_like().compile().unwrap();
        assert_eq!(matcher.apply("my file.c:1:1:error: x"), None);
        assert!(matcher.is_match("src/nested/dir/file.c:1:1:error: x"));
    }

    #[test]
    fn test_missing_column_and_severity() {
        let matcher = FormatSpec::new()
            .filename()
            .literal(":")
            .line()
            .literal(": ")
            .message()
            .compile()
            .unwrap();
        let m = matcher.apply("t.py:7: something odd").unwrap();
        assert_eq!(m.column, None);
        assert_eq!(m.severity, Severity::Warning);
        assert_eq!(m.message, "something odd");
    }

    #[test]
    fn test_fixed_severity() {
        let matcher = FormatSpec::new()
            .filename()
            .literal(":")
            .line()
            .literal(": ")
            .message()
            .severity(Severity::Error)
            .compile()
            .unwrap();
        assert_eq!(
            matcher.apply("x.go:2: note: looks fine").unwrap().severity,
            Severity::Error
        );
    }

    #[test]
    fn test_blank_separator() {
        let matcher = FormatSpec::new()
            .filename()
            .literal(":")
            .line()
            .blank()
            .message()
            .compile()
            .unwrap();
        assert_eq!(matcher.apply("a.sh:3 \t  oops").unwrap().message, "oops");
        assert_eq!(matcher.apply("a.sh:3oops"), None);
    }

    #[test]
    fn test_severity_pattern_consumes_code() {
        let matcher = FormatSpec::new()
            .filename()
            .literal(":")
            .line()
            .literal(": ")
            .severity_pattern(
                SeverityGrammar::new()
                    .code("E ", Severity::Error)
                    .code("W ", Severity::Warning)
                    .code("I ", Severity::Info),
            )
            .message()
            .compile()
            .unwrap();

        let m = matcher.apply("a.py:3: E bad indent").unwrap();
        assert_eq!(m.severity, Severity::Error);
        assert_eq!(m.message, "bad indent");
        assert_eq!(matcher.apply("a.py:3: I fyi").unwrap().severity, Severity::Info);
        // no fallback: unknown code fails the whole line
        assert_eq!(matcher.apply("a.py:3: X what"), None);
    }

    #[test]
    fn test_severity_pattern_lookahead_and_fallback() {
        let matcher = FormatSpec::new()
            .filename()
            .literal(":")
            .line()
            .literal(":")
            .column()
            .literal(": ")
            .severity_pattern(
                SeverityGrammar::new()
                    .code("E", Severity::Error)
                    .code("EXE", Severity::Warning)
                    .fallback(Severity::Info)
                    .lookahead(),
            )
            .message()
            .compile()
            .unwrap();

        let m = matcher.apply("t.py:1:8: E501 Line too long").unwrap();
        assert_eq!(m.severity, Severity::Error);
        assert_eq!(m.message, "E501 Line too long");

        // longest code wins
        let m = matcher.apply("t.py:1:1: EXE001 Shebang present").unwrap();
        assert_eq!(m.severity, Severity::Warning);

        let m = matcher.apply("t.py:1:1: UP008 Use super()").unwrap();
        assert_eq!(m.severity, Severity::Info);
    }

    #[test]
    fn test_custom_classifier() {
        let matcher = gcc_like()
            .compile_with(SeverityClassifier::new(StripSet::Punctuation))
            .unwrap();
        let m = matcher.apply("a.c:1:1:[error] bracketed").unwrap();
        assert_eq!(m.severity, Severity::Error);
    }

    #[test]
    fn test_compile_is_idempotent() {
        let spec = gcc_like();
        let first = spec.compile().unwrap();
        let second = spec.compile().unwrap();
        assert_eq!(first, second);

        let line = "main.c:10:5:warning: unused variable";
        assert_eq!(first.apply(line), second.apply(line));
    }

    #[test]
    fn test_compile_requires_core_fields() {
        let err = FormatSpec::new().line().message().compile().unwrap_err();
        assert_eq!(err, FormatError::MissingField("filename"));

        let err = FormatSpec::new().filename().message().compile().unwrap_err();
        assert_eq!(err, FormatError::MissingField("line"));

        let err = FormatSpec::new()
            .filename()
            .literal(":")
            .line()
            .compile()
            .unwrap_err();
        assert_eq!(err, FormatError::MissingField("message"));
    }

    #[test]
    fn test_compile_rejects_bad_specs() {
        let err = FormatSpec::new()
            .filename()
            .literal(":")
            .line()
            .literal(":")
            .line()
            .message()
            .compile()
            .unwrap_err();
        assert_eq!(err, FormatError::DuplicateField("line"));

        let err = FormatSpec::new()
            .filename()
            .line()
            .severity_from_message()
            .message()
            .compile()
            .unwrap_err();
        assert_eq!(err, FormatError::SeverityBeforeMessage);

        let err = FormatSpec::new()
            .filename()
            .line()
            .message()
            .severity(Severity::Info)
            .severity_from_message()
            .compile()
            .unwrap_err();
        assert_eq!(err, FormatError::DuplicateSeverity);

        let err = FormatSpec::new()
            .filename()
            .literal("")
            .line()
            .message()
            .compile()
            .unwrap_err();
        assert_eq!(err, FormatError::EmptyLiteral);

        let err = FormatSpec::new()
            .filename()
            .line()
            .severity_pattern(SeverityGrammar::new())
            .message()
            .compile()
            .unwrap_err();
        assert_eq!(err, FormatError::EmptySeverityPattern);
    }

    #[test]
    fn test_format_from_toml() {
        #[derive(Deserialize)]
        struct Wrapper {
            format: FormatSpec,
        }

        let parsed: Wrapper = toml::from_str(
            r#"
format = [
    "filename",
    { literal = ":" },
    "line",
    { literal = ":" },
    "column",
    { literal = ": " },
    { severity-pattern = { codes = { E = "error", W = "warning" }, fallback = "info", lookahead = true } },
    "message",
]
"#,
        )
        .unwrap();

        let matcher = parsed.format.compile().unwrap();
        let m = matcher.apply("x.py:2:3: W291 trailing whitespace").unwrap();
        assert_eq!(m.severity, Severity::Warning);
        assert_eq!(m.message, "W291 trailing whitespace");
    }
}
