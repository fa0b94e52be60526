use crate::span::Span;

/// A diagnostic (error or warning) tied to a location in an input file.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
    pub help: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Diagnostic {
    pub fn error(message: String, span: Span) -> Self {
        Self {
            severity: Severity::Error,
            message,
            span,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn warning(message: String, span: Span) -> Self {
        Self {
            severity: Severity::Warning,
            message,
            span,
            notes: Vec::new(),
            help: None,
        }
    }

    pub fn with_note(mut self, note: String) -> Self {
        self.notes.push(note);
        self
    }

    pub fn with_help(mut self, help: String) -> Self {
        self.help = Some(help);
        self
    }

    /// Render the diagnostic to stderr using ariadne.
    pub fn render(&self, filename: &str, source: &str) {
        use ariadne::{Color, Label, Report, ReportKind, Source};

        let kind = match self.severity {
            Severity::Error => ReportKind::Error,
            Severity::Warning => ReportKind::Warning,
        };

        let color = match self.severity {
            Severity::Error => Color::Red,
            Severity::Warning => Color::Yellow,
        };

        let mut report = Report::build(kind, filename, self.span.start as usize)
            .with_message(&self.message)
            .with_label(
                Label::new((filename, self.span.start as usize..self.span.end as usize))
                    .with_message(&self.message)
                    .with_color(color),
            );

        for note in &self.notes {
            report = report.with_note(note);
        }

        if let Some(help) = &self.help {
            report = report.with_help(help);
        }

        report
            .finish()
            .eprint((filename, Source::from(source)))
            .unwrap();
    }
}

/// Render a list of diagnostics against the same source file.
pub fn render_diagnostics(diagnostics: &[Diagnostic], filename: &str, source: &str) {
    for diag in diagnostics {
        diag.render(filename, source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let d = Diagnostic::error("missing key 'b1'".to_string(), Span::new(2, 6));
        assert_eq!(d.severity, Severity::Error);
        assert_eq!(d.message, "missing key 'b1'");
        assert_eq!(d.span.start, 2);
        assert_eq!(d.span.end, 6);
        assert!(d.notes.is_empty());
        assert!(d.help.is_none());
    }

    #[test]
    fn test_warning_construction() {
        let d = Diagnostic::warning("layer shape looks off".to_string(), Span::dummy());
        assert_eq!(d.severity, Severity::Warning);
    }

    #[test]
    fn test_chained_builders() {
        let d = Diagnostic::error("missing key 'out2'".to_string(), Span::dummy())
            .with_note("sample count is inferred as half the key count".to_string())
            .with_help("add an 'out2' entry to the test samples file".to_string());
        assert_eq!(d.notes.len(), 1);
        assert!(d.help.is_some());
    }

    #[test]
    fn test_render_does_not_panic() {
        let source = r#"{"w1": [1, 2], "b1": []}"#;
        let d = Diagnostic::error(
            "bias array for layer 1 is empty".to_string(),
            Span::of_key(source, "b1"),
        )
        .with_note("the layer-1 bias length determines the input width".to_string());
        d.render("model_parameters.json", source);
    }

    #[test]
    fn test_render_diagnostics_multiple() {
        let source = r#"{"w1": [1], "b1": [1]}"#;
        let diagnostics = vec![
            Diagnostic::warning("first".to_string(), Span::of_key(source, "w1")),
            Diagnostic::warning("second".to_string(), Span::of_key(source, "b1")),
        ];
        render_diagnostics(&diagnostics, "model_parameters.json", source);
    }
}
