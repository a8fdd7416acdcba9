//! Errors raised by the lexer, parser and evaluator, and their terminal
//! rendering. Every stage fails fast with one `CalcError`; nothing is retried.

use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use std::ops::Range;

/// Byte range into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self::new(pos, pos + 1)
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// The same range counted in characters, which is what `ariadne` labels
    /// expect. Offsets past the end of `source` stay past the end.
    pub fn char_range(&self, source: &str) -> Range<usize> {
        char_offset(source, self.start)..char_offset(source, self.end)
    }
}

fn char_offset(source: &str, byte: usize) -> usize {
    let clamped = byte.min(source.len());
    let boundary = (0..=clamped)
        .rev()
        .find(|&i| source.is_char_boundary(i))
        .unwrap_or(0);
    source[..boundary].chars().count() + (byte - boundary)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LexError,
    ParseError,
    DivisionByZero,
    /// Integer overflow while folding `+ - *`.
    RuntimeError,
}

impl ErrorKind {
    fn title(&self) -> &'static str {
        match self {
            ErrorKind::LexError => "Lexical Error",
            ErrorKind::ParseError => "Parse Error",
            ErrorKind::DivisionByZero => "Division By Zero",
            ErrorKind::RuntimeError => "Runtime Error",
        }
    }

    fn color(&self) -> Color {
        match self {
            ErrorKind::LexError => Color::Red,
            ErrorKind::ParseError => Color::Yellow,
            ErrorKind::DivisionByZero | ErrorKind::RuntimeError => Color::Magenta,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CalcError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl CalcError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    pub fn lex_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::LexError, span, message)
    }

    pub fn parse_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::ParseError, span, message)
    }

    pub fn parse_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::parse_error(span, message).with_help(help)
    }

    pub fn division_by_zero(span: Span) -> Self {
        Self::new(ErrorKind::DivisionByZero, span, "Division by zero".to_string())
            .with_help("The right-hand side of '/' evaluated to 0.".to_string())
    }

    pub fn runtime_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::RuntimeError, span, message)
    }

    /// Prints a labelled report for `source` to stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");
        let color = self.kind.color();
        let range = self.span.char_range(source);

        let mut report = Report::build(ReportKind::Error, filename, range.start)
            .with_message(format!("{}: {}", self.kind.title().fg(color), self.message))
            .with_label(
                Label::new((filename, range))
                    .with_message(&self.message)
                    .with_color(color),
            );
        if let Some(help) = &self.help {
            report = report.with_note(format!("{}: {}", "help".fg(Color::Cyan), help));
        }

        if report
            .finish()
            .eprint((filename, Source::from(source)))
            .is_err()
        {
            eprintln!("{}: {}", self.kind.title(), self);
        }
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CalcError {}
