use super::trace::CheckTraceNode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error reported by the evaluator against a line of the validation document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeveloperError {
    pub message: String,
    /// 1-indexed line in the source the error refers to.
    pub line: u32,
    /// Literal substring of the offending line to underline.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub context: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_trace: Option<CheckTraceNode>,
}

impl DeveloperError {
    pub fn new(message: impl Into<String>, line: u32) -> Self {
        Self {
            message: message.into(),
            line,
            context: String::new(),
            check_trace: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_check_trace(mut self, trace: CheckTraceNode) -> Self {
        self.check_trace = Some(trace);
        self
    }
}

/// Parse-time failure that knows where in the source it happened.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ErrorWithSource {
    pub message: String,
    /// 1-indexed.
    pub line_number: u64,
    #[serde(default)]
    pub source_code_string: String,
}

impl ErrorWithSource {
    pub fn new(
        message: impl Into<String>,
        line_number: u64,
        source_code_string: impl Into<String>,
    ) -> Self {
        Self {
            message: message.into(),
            line_number,
            source_code_string: source_code_string.into(),
        }
    }
}
