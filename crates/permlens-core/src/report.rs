//! Human-readable report for a validation run.
//!
//! A run moves through parse, schema, assertion and expected-relation stages.
//! The first stage that produced errors is printed and the report stops
//! there; a clean run prints the success line.

use crate::config::ReportConfig;
use crate::console::Console;
use crate::error::RenderError;
use crate::explain::display_check_trace;
use crate::model::{DeveloperError, ErrorWithSource};
use crate::source::SourceContext;
use crate::style::{styler_for, Style, Styler};
use crate::tree::TreePrinter;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStage {
    Parse,
    Schema,
    Assertions,
    ExpectedRelations,
}

impl ReportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStage::Parse => "parse",
            ReportStage::Schema => "schema",
            ReportStage::Assertions => "assertions",
            ReportStage::ExpectedRelations => "expected_relations",
        }
    }
}

impl std::fmt::Display for ReportStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts printed on success.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSummary {
    pub relationships_loaded: usize,
    pub assertions_run: usize,
    pub expected_relations_validated: usize,
}

/// Everything the evaluator reported for one validation document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationRun {
    pub parse_error: Option<ErrorWithSource>,
    /// Line numbers are relative to the schema body.
    pub schema_errors: Vec<DeveloperError>,
    pub assertion_errors: Vec<DeveloperError>,
    pub expected_relation_errors: Vec<DeveloperError>,
    pub summary: ValidationSummary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportOutcome {
    pub errors_rendered: usize,
    /// Stage whose errors were printed, if any.
    pub failed_stage: Option<ReportStage>,
}

impl ReportOutcome {
    pub fn has_errors(&self) -> bool {
        self.failed_stage.is_some()
    }
}

pub struct Reporter {
    console: Console,
    styler: Arc<dyn Styler>,
    config: ReportConfig,
}

impl Reporter {
    pub fn new(console: Console, styler: Arc<dyn Styler>, config: ReportConfig) -> Self {
        Self {
            console,
            styler,
            config,
        }
    }

    /// Reporter on stdout with the backend picked from `config.color`.
    pub fn from_config(config: ReportConfig) -> Self {
        let styler = styler_for(config.color);
        Self::new(Console::stdout(), styler, config)
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn report_error_with_source(&self, source: &str, err: &ErrorWithSource) -> ReportOutcome {
        let ctx = SourceContext::new(source);
        let center = err.line_number as i64 - 1;

        let mut out = self.error_line(&err.message);
        for line in ctx.render_window(
            center,
            &err.source_code_string,
            self.config.window,
            self.styler.as_ref(),
        ) {
            out.push_str(&line);
            out.push('\n');
        }
        self.console.print(&out);

        ReportOutcome {
            errors_rendered: 1,
            failed_stage: Some(ReportStage::Parse),
        }
    }

    /// Print each error with its source window and, when it carries one, the
    /// explained check trace. Returns how many errors were printed.
    pub fn report_developer_errors(
        &self,
        source: &str,
        errors: &[DeveloperError],
        line_offset: usize,
    ) -> Result<usize, RenderError> {
        let ctx = SourceContext::new(source);
        for err in errors {
            let text = self.render_developer_error(&ctx, err, line_offset)?;
            self.console.print(&text);
        }
        Ok(errors.len())
    }

    pub fn report_success(&self, summary: &ValidationSummary) {
        self.console.println(&format!(
            "{} - {} relationships loaded, {} assertions run, {} expected relations validated",
            self.styler.paint(Style::Banner, "Success!"),
            summary.relationships_loaded,
            summary.assertions_run,
            summary.expected_relations_validated,
        ));
    }

    pub fn report_run(&self, source: &str, run: &ValidationRun) -> Result<ReportOutcome, RenderError> {
        if let Some(err) = &run.parse_error {
            tracing::debug!(stage = %ReportStage::Parse, "reporting stage");
            return Ok(self.report_error_with_source(source, err));
        }

        let stages = [
            (
                ReportStage::Schema,
                &run.schema_errors,
                self.config.schema_line_offset,
            ),
            (ReportStage::Assertions, &run.assertion_errors, 0),
            (
                ReportStage::ExpectedRelations,
                &run.expected_relation_errors,
                0,
            ),
        ];
        for (stage, errors, line_offset) in stages {
            tracing::debug!(%stage, errors = errors.len(), "reporting stage");
            if errors.is_empty() {
                continue;
            }
            let errors_rendered = self.report_developer_errors(source, errors, line_offset)?;
            return Ok(ReportOutcome {
                errors_rendered,
                failed_stage: Some(stage),
            });
        }

        self.report_success(&run.summary);
        Ok(ReportOutcome::default())
    }

    fn error_line(&self, message: &str) -> String {
        format!(
            "{} {}\n",
            self.styler.paint(Style::ErrorPrefix, "error:"),
            self.styler.paint(Style::ErrorMessage, message),
        )
    }

    fn render_developer_error(
        &self,
        ctx: &SourceContext<'_>,
        err: &DeveloperError,
        line_offset: usize,
    ) -> Result<String, RenderError> {
        tracing::debug!(line = err.line, line_offset, message = %err.message, "rendering developer error");
        let center = i64::from(err.line) - 1 + line_offset as i64;

        let mut out = self.error_line(&err.message);
        for line in ctx.render_window(center, &err.context, self.config.window, self.styler.as_ref()) {
            out.push_str(&line);
            out.push('\n');
        }

        if let Some(trace) = err.check_trace.as_ref().filter(|_| self.config.explain_traces) {
            let mut tree = TreePrinter::new();
            let root = tree.root();
            display_check_trace(trace, &mut tree, root, true, self.styler.as_ref())?;
            out.push_str(&format!(
                "\n  {}\n",
                self.styler.paint(Style::Heading, "Explanation:")
            ));
            out.push_str(&tree.render_indented());
            out.push('\n');
        }

        out.push_str("\n\n");
        Ok(out)
    }
}

impl std::fmt::Debug for Reporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Reporter")
            .field("console", &self.console)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CheckTraceNode, ObjectReference, Permissionship, SubjectReference};
    use crate::style::{MarkupStyler, PlainStyler};

    const DOC: &str = "schema: >-\n  definition user {}\n  definition document {\n    relation viewer: usr\n  }\nassertions:\n  assertTrue: []";

    fn reporter(config: ReportConfig) -> (Reporter, crate::console::CaptureBuffer) {
        let (console, buffer) = Console::capture();
        (Reporter::new(console, Arc::new(PlainStyler), config), buffer)
    }

    #[test]
    fn schema_errors_are_shifted_by_offset() {
        let (reporter, out) = reporter(ReportConfig::default());
        let run = ValidationRun {
            schema_errors: vec![DeveloperError::new("unknown type `usr`", 3).with_context("usr")],
            ..Default::default()
        };

        let outcome = reporter.report_run(DOC, &run).unwrap();
        assert_eq!(outcome.failed_stage, Some(ReportStage::Schema));
        assert_eq!(outcome.errors_rendered, 1);

        let lines = out.lines();
        assert_eq!(lines[0], "error: unknown type `usr`");
        assert!(lines.contains(&" 4 >     relation viewer: usr".to_string()));
        assert!(lines.contains(&"   >                      ^~~".to_string()));
    }

    #[test]
    fn assertion_errors_use_lines_as_given() {
        let (reporter, out) = reporter(ReportConfig::default());
        let errors = vec![DeveloperError::new("assertion failed", 7).with_context("assertTrue")];
        assert_eq!(reporter.report_developer_errors(DOC, &errors, 0).unwrap(), 1);
        assert!(out.lines().contains(&" 7 >   assertTrue: []".to_string()));
        assert!(out.contents().ends_with("\n\n\n"));
    }

    #[test]
    fn explanation_block_follows_window() {
        let (reporter, out) = reporter(ReportConfig::default());
        let trace = CheckTraceNode::new(
            ObjectReference::new("document", "1"),
            "view",
            Permissionship::HasPermission,
        )
        .with_subjects(vec![SubjectReference::new("user", "alice")]);
        let errors = vec![DeveloperError::new("expected no permission", 1).with_check_trace(trace)];

        reporter.report_developer_errors("line one", &errors, 0).unwrap();
        assert_eq!(
            out.contents(),
            "error: expected no permission\n \
             1 > line one\n\
             \n  Explanation:\n  \
             ✓ document:1 view\n  \
             └── user:alice\n\n\n"
        );
    }

    #[test]
    fn explanation_can_be_disabled() {
        let config = ReportConfig {
            explain_traces: false,
            ..Default::default()
        };
        let (reporter, out) = reporter(config);
        let trace = CheckTraceNode::new(
            ObjectReference::new("document", "1"),
            "view",
            Permissionship::NoPermission,
        );
        let errors = vec![DeveloperError::new("denied", 1).with_check_trace(trace)];
        reporter.report_developer_errors("x", &errors, 0).unwrap();
        assert!(!out.contents().contains("Explanation:"));
    }

    #[test]
    fn parse_error_stops_the_run() {
        let (reporter, out) = reporter(ReportConfig::default());
        let run = ValidationRun {
            parse_error: Some(ErrorWithSource::new("unexpected token", 6, "assertions")),
            assertion_errors: vec![DeveloperError::new("never shown", 7)],
            ..Default::default()
        };

        let outcome = reporter.report_run(DOC, &run).unwrap();
        assert_eq!(outcome.failed_stage, Some(ReportStage::Parse));
        assert!(outcome.has_errors());
        assert!(!out.contents().contains("never shown"));
        assert!(!out.contents().contains("Success!"));
    }

    #[test]
    fn clean_run_prints_success() {
        let (reporter, out) = reporter(ReportConfig::default());
        let run = ValidationRun {
            summary: ValidationSummary {
                relationships_loaded: 4,
                assertions_run: 2,
                expected_relations_validated: 1,
            },
            ..Default::default()
        };

        let outcome = reporter.report_run(DOC, &run).unwrap();
        assert!(!outcome.has_errors());
        assert_eq!(
            out.contents(),
            "Success! - 4 relationships loaded, 2 assertions run, 1 expected relations validated\n"
        );
    }

    #[test]
    fn markup_marks_prefix_and_banner() {
        let (console, out) = Console::capture();
        let reporter = Reporter::new(console, Arc::new(MarkupStyler), ReportConfig::default());
        reporter.report_error_with_source("a", &ErrorWithSource::new("bad", 1, ""));
        assert!(out
            .contents()
            .starts_with("[error-prefix]error:[/error-prefix] [error-message]bad[/error-message]\n"));

        reporter.report_success(&ValidationSummary::default());
        assert!(out.contents().contains("[banner]Success![/banner] - 0 relationships"));
    }
}
