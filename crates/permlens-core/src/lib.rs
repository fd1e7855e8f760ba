//! Diagnostics rendering for permission-schema validation runs.
//!
//! Two renderers live here: the check-trace explainer, which turns a
//! permission evaluation trace into a cycle-safe tree, and the source-context
//! window, which pins an error to its line in the validation document. The
//! [`report`] module glues both together for a whole validation run.

pub mod config;
pub mod console;
pub mod error;
pub mod explain;
pub mod model;
pub mod report;
pub mod source;
pub mod style;
pub mod tree;

// Convenience re-exports
pub use config::{ColorChoice, ConfigError, ReportConfig, WindowConfig};
pub use console::{CaptureBuffer, Console, Sink};
pub use error::RenderError;
pub use explain::{display_check_trace, display_expand_tree};
pub use model::{
    CaveatInfo, CaveatResult, CheckTraceNode, DeveloperError, ErrorWithSource, ExpandTreeType,
    ObjectReference, Operation, PermissionKind, PermissionRelationshipTree, Permissionship,
    SubjectReference, TraceChildren,
};
pub use report::{ReportOutcome, ReportStage, Reporter, ValidationRun, ValidationSummary};
pub use source::SourceContext;
pub use style::{styler_for, AnsiStyler, MarkupStyler, PlainStyler, Style, Styler};
pub use tree::{NodeId, TreePrinter};
