use crate::error::RenderError;
use crate::model::{ExpandTreeType, PermissionRelationshipTree, SubjectReference};
use crate::style::{Style, Styler};
use crate::tree::{NodeId, TreePrinter};

/// Lay out an expansion result under `parent`.
pub fn display_expand_tree(
    node: &PermissionRelationshipTree,
    tree: &mut TreePrinter,
    parent: NodeId,
    styler: &dyn Styler,
) -> Result<(), RenderError> {
    let mut parent = parent;
    if let Some(object) = &node.expanded_object {
        parent = tree.child(
            parent,
            format!(
                "{}:{}->{}",
                trim_type_prefix(&object.object_type),
                object.object_id,
                node.expanded_relation
            ),
        );
    }

    match &node.tree_type {
        Some(ExpandTreeType::Intermediate {
            operation,
            children,
        }) => {
            let operation_handle = tree.child(parent, operation.as_str());
            for child in children {
                display_expand_tree(child, tree, operation_handle, styler)?;
            }
        }
        Some(ExpandTreeType::Leaf { subjects }) => {
            for subject in subjects {
                tree.child(parent, styler.paint(Style::Subject, &pretty_subject(subject)));
            }
        }
        None => {
            return Err(RenderError::MissingTreeType {
                node: node
                    .expanded_object
                    .as_ref()
                    .map(|o| format!("{}->{}", o, node.expanded_relation))
                    .unwrap_or_else(|| "<anonymous>".to_string()),
            });
        }
    }

    Ok(())
}

// Namespaced object types (`tenant/document`) are shown without the tenant.
fn trim_type_prefix(object_type: &str) -> &str {
    object_type
        .split_once('/')
        .map(|(_, rest)| rest)
        .unwrap_or(object_type)
}

fn pretty_subject(subject: &SubjectReference) -> String {
    if subject.optional_relation.is_empty() {
        format!("{}:{}", trim_type_prefix(&subject.object_type), subject.object_id)
    } else {
        format!(
            "{}:{}->{}",
            trim_type_prefix(&subject.object_type),
            subject.object_id,
            subject.optional_relation
        )
    }
}
