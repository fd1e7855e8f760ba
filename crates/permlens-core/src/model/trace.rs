use crate::error::RenderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// `type:id` reference to a resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectReference {
    pub object_type: String,
    pub object_id: String,
}

impl ObjectReference {
    pub fn new(object_type: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            object_id: object_id.into(),
        }
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.object_id)
    }
}

/// A subject found at a leaf of an evaluation, optionally a subject set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectReference {
    pub object_type: String,
    pub object_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub optional_relation: String,
}

impl SubjectReference {
    pub fn new(object_type: impl Into<String>, object_id: impl Into<String>) -> Self {
        Self {
            object_type: object_type.into(),
            object_id: object_id.into(),
            optional_relation: String::new(),
        }
    }

    pub fn with_relation(mut self, relation: impl Into<String>) -> Self {
        self.optional_relation = relation.into();
        self
    }
}

impl fmt::Display for SubjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.object_type, self.object_id)?;
        if !self.optional_relation.is_empty() {
            write!(f, "->{}", self.optional_relation)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PermissionKind {
    Permission,
    Relation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Permissionship {
    HasPermission,
    NoPermission,
    ConditionalPermission,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CaveatResult {
    True,
    False,
    MissingContext,
}

/// Set operation joining the sub-results of an intermediate node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Union,
    Intersection,
    Exclusion,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Union => "union",
            Operation::Intersection => "intersection",
            Operation::Exclusion => "exclusion",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating the caveat attached to a conditional grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaveatInfo {
    pub result: CaveatResult,
    pub expression: String,
    pub caveat_name: String,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub context: serde_json::Map<String, serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_context_keys: Vec<String>,
}

impl CaveatInfo {
    pub fn new(
        result: CaveatResult,
        expression: impl Into<String>,
        caveat_name: impl Into<String>,
    ) -> Self {
        Self {
            result,
            expression: expression.into(),
            caveat_name: caveat_name.into(),
            context: serde_json::Map::new(),
            missing_context_keys: Vec::new(),
        }
    }

    pub fn with_context_entry(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    pub fn with_missing_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.missing_context_keys = keys.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TraceChildren {
    Intermediate {
        operation: Operation,
        #[serde(rename = "subTraces")]
        sub_traces: Vec<CheckTraceNode>,
    },
    Leaf { subjects: Vec<SubjectReference> },
}

/// One recorded step of a permission check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckTraceNode {
    pub resource: ObjectReference,
    pub permission: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permission_kind: Option<PermissionKind>,
    pub result: Permissionship,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caveat_info: Option<CaveatInfo>,
    #[serde(default)]
    pub was_cached: bool,
    #[serde(
        default,
        with = "super::duration",
        skip_serializing_if = "Option::is_none"
    )]
    pub duration: Option<Duration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<TraceChildren>,
}

impl CheckTraceNode {
    pub fn new(
        resource: ObjectReference,
        permission: impl Into<String>,
        result: Permissionship,
    ) -> Self {
        Self {
            resource,
            permission: permission.into(),
            permission_kind: None,
            result,
            caveat_info: None,
            was_cached: false,
            duration: None,
            children: None,
        }
    }

    /// Decode a trace from the evaluator's JSON encoding.
    pub fn from_json(raw: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn with_kind(mut self, kind: PermissionKind) -> Self {
        self.permission_kind = Some(kind);
        self
    }

    pub fn with_caveat(mut self, caveat: CaveatInfo) -> Self {
        self.caveat_info = Some(caveat);
        self
    }

    pub fn cached(mut self) -> Self {
        self.was_cached = true;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn with_sub_traces(mut self, operation: Operation, sub_traces: Vec<CheckTraceNode>) -> Self {
        self.children = Some(TraceChildren::Intermediate {
            operation,
            sub_traces,
        });
        self
    }

    pub fn with_subjects(mut self, subjects: Vec<SubjectReference>) -> Self {
        self.children = Some(TraceChildren::Leaf { subjects });
        self
    }

    /// Sub-traces of an intermediate node; `None` for leaves and bare nodes.
    pub fn sub_traces(&self) -> Option<&[CheckTraceNode]> {
        match &self.children {
            Some(TraceChildren::Intermediate { sub_traces, .. }) => Some(sub_traces),
            _ => None,
        }
    }
}
