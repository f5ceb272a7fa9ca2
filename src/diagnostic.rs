use owo_colors::OwoColorize;
use std::fmt;

/// A byte range into the program text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn is_dummy(&self) -> bool {
        self.start == 0 && self.end == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    Primary,
    Secondary,
}

/// A message attached to a span of the source.
#[derive(Debug, Clone)]
pub struct Label {
    pub span: Span,
    pub message: String,
    pub style: LabelStyle,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Primary,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            style: LabelStyle::Secondary,
        }
    }
}

#[derive(Debug, Clone)]
/// An error report. Every diagnostic the interpreter produces is an error.
pub struct Diagnostic {
    pub code: Option<String>,
    pub message: String,
    pub labels: Vec<Label>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
            labels: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_label(mut self, label: Label) -> Self {
        self.labels.push(label);
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.notes.push(format!("help: {}", help.into()));
        self
    }
}

/// 1-based line and column of a byte offset.
pub fn line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn line_text(source: &str, line_num: usize) -> Option<&str> {
    source.split('\n').nth(line_num.saturating_sub(1)).map(|line| line.trim_end_matches('\r'))
}

/// Renders diagnostics in a rustc-like layout.
pub struct DiagnosticRenderer<'a> {
    source: &'a str,
    file_name: &'a str,
    use_color: bool,
}

impl<'a> DiagnosticRenderer<'a> {
    pub fn new(source: &'a str, file_name: &'a str, use_color: bool) -> Self {
        Self {
            source,
            file_name,
            use_color,
        }
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let mut output = String::new();
        self.render_header(&mut output, diagnostic);

        let mut lines_to_show: Vec<usize> = Vec::new();
        for label in diagnostic.labels.iter().filter(|_| !self.source.is_empty()) {
            let (start_line, _) = line_col(self.source, label.span.start);
            let (end_line, _) = line_col(self.source, label.span.end.saturating_sub(1).max(label.span.start));
            for line in start_line..=end_line {
                if !lines_to_show.contains(&line) {
                    lines_to_show.push(line);
                }
            }
        }
        lines_to_show.sort_unstable();

        if let Some(label) = diagnostic.labels.first().filter(|_| !lines_to_show.is_empty()) {
            let (line, col) = line_col(self.source, label.span.start);
            output.push_str(&format!("  {} {}:{}:{}\n", self.blue("-->"), self.file_name, line, col));

            let width = lines_to_show.last().copied().unwrap_or(1).to_string().len();
            output.push_str(&format!("{} {}\n", " ".repeat(width + 1), self.blue("|")));
            for &line_num in &lines_to_show {
                self.render_line(&mut output, diagnostic, line_num, width);
            }
            output.push_str(&format!("{} {}\n", " ".repeat(width + 1), self.blue("|")));
        }

        for note in &diagnostic.notes {
            output.push_str(&format!("  {} {}\n", self.blue("="), note));
        }

        output
    }

    fn render_header(&self, output: &mut String, diagnostic: &Diagnostic) {
        let severity = self.paint("error", |s| s.red().bold().to_string());
        let message = self.paint(&diagnostic.message, |s| s.bold().to_string());

        match &diagnostic.code {
            Some(code) => output.push_str(&format!("{}[{}]: {}\n", severity, code, message)),
            None => output.push_str(&format!("{}: {}\n", severity, message)),
        }
    }

    fn render_line(&self, output: &mut String, diagnostic: &Diagnostic, line_num: usize, width: usize) {
        let Some(content) = line_text(self.source, line_num) else {
            return;
        };

        output.push_str(&format!(
            "{:>width$} {} {}\n",
            self.blue(&line_num.to_string()),
            self.blue("|"),
            content,
            width = width + 1
        ));

        let mut underlines: Vec<(usize, usize, &str, LabelStyle)> = Vec::new();
        for label in &diagnostic.labels {
            let (start_line, start_col) = line_col(self.source, label.span.start);
            let (end_line, end_col) = line_col(self.source, label.span.end.saturating_sub(1).max(label.span.start));

            if start_line <= line_num && end_line >= line_num {
                let col_start = if start_line == line_num { start_col } else { 1 };
                let col_end = if end_line == line_num { end_col + 1 } else { content.chars().count() + 1 };
                underlines.push((col_start, col_end, &label.message, label.style));
            }
        }

        if underlines.is_empty() {
            return;
        }
        underlines.sort_by_key(|(start, _, _, _)| *start);

        let mut marks = String::new();
        let mut pos = 1;
        for (col_start, col_end, _, style) in &underlines {
            while pos < *col_start {
                marks.push(' ');
                pos += 1;
            }
            let mark = match style {
                LabelStyle::Primary => '^',
                LabelStyle::Secondary => '-',
            };
            while pos < (*col_end).max(col_start + 1) {
                marks.push(mark);
                pos += 1;
            }
        }

        let has_primary = underlines.iter().any(|(_, _, _, s)| *s == LabelStyle::Primary);
        let marks = if has_primary { self.red(&marks) } else { self.blue(&marks) };
        output.push_str(&format!("{} {} {}\n", " ".repeat(width + 1), self.blue("|"), marks));

        for (col_start, _, message, style) in &underlines {
            if message.is_empty() {
                continue;
            }
            let padding = " ".repeat(col_start.saturating_sub(1));
            let message = match style {
                LabelStyle::Primary => self.red(message),
                LabelStyle::Secondary => self.blue(message),
            };
            output.push_str(&format!("{} {} {}{}\n", " ".repeat(width + 1), self.blue("|"), padding, message));
        }
    }

    fn paint<T: fmt::Display + ?Sized>(&self, text: &T, style: impl Fn(&T) -> String) -> String {
        if self.use_color {
            style(text)
        } else {
            text.to_string()
        }
    }

    fn red(&self, s: &str) -> String {
        self.paint(s, |s| s.red().to_string())
    }

    fn blue(&self, s: &str) -> String {
        self.paint(s, |s| s.blue().to_string())
    }
}

pub fn render_diagnostics(source: &str, file_name: &str, diagnostics: &[Diagnostic], use_color: bool) -> String {
    let renderer = DiagnosticRenderer::new(source, file_name, use_color);
    let mut output = String::new();

    for diagnostic in diagnostics {
        output.push_str(&renderer.render(diagnostic));
        output.push('\n');
    }

    let error_count = diagnostics.len();
    if error_count > 0 {
        output.push_str(&format!(
            "error: aborting due to {} error{}\n",
            error_count,
            if error_count == 1 { "" } else { "s" }
        ));
    }

    output
}
