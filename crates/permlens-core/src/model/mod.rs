//! Input structures handed over by the evaluator.
//!
//! Wire names follow the evaluator's JSON encoding (camelCase fields,
//! SCREAMING_SNAKE_CASE enum values) so fixtures can be decoded directly.

mod developer;
mod duration;
mod expand;
mod trace;

pub use developer::{DeveloperError, ErrorWithSource};
pub use expand::{ExpandTreeType, PermissionRelationshipTree};
pub use trace::{
    CaveatInfo, CaveatResult, CheckTraceNode, ObjectReference, Operation, PermissionKind,
    Permissionship, SubjectReference, TraceChildren,
};
