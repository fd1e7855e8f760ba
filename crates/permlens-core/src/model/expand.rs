use super::trace::{ObjectReference, Operation, SubjectReference};
use crate::error::RenderError;
use serde::{Deserialize, Serialize};

/// Node of an expansion result: who holds a relation and via which set algebra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRelationshipTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expanded_object: Option<ObjectReference>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub expanded_relation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tree_type: Option<ExpandTreeType>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExpandTreeType {
    Intermediate {
        operation: Operation,
        children: Vec<PermissionRelationshipTree>,
    },
    Leaf { subjects: Vec<SubjectReference> },
}

impl PermissionRelationshipTree {
    pub fn intermediate(operation: Operation, children: Vec<PermissionRelationshipTree>) -> Self {
        Self {
            expanded_object: None,
            expanded_relation: String::new(),
            tree_type: Some(ExpandTreeType::Intermediate {
                operation,
                children,
            }),
        }
    }

    pub fn leaf(subjects: Vec<SubjectReference>) -> Self {
        Self {
            expanded_object: None,
            expanded_relation: String::new(),
            tree_type: Some(ExpandTreeType::Leaf { subjects }),
        }
    }

    pub fn expanded_from(mut self, object: ObjectReference, relation: impl Into<String>) -> Self {
        self.expanded_object = Some(object);
        self.expanded_relation = relation.into();
        self
    }

    pub fn from_json(raw: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(raw)?)
    }
}
