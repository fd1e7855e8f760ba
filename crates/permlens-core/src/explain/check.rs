use super::cycle::{cycle_key, is_part_of_cycle, WalkDedup};
use crate::error::RenderError;
use crate::model::{
    CaveatInfo, CaveatResult, CheckTraceNode, PermissionKind, Permissionship, TraceChildren,
};
use crate::style::{Style, Styler};
use crate::tree::{NodeId, TreePrinter};

/// Explain `trace` as a subtree of `tree` under `parent`.
///
/// With `has_error` set the walk marks recursive checks: nodes whose own
/// subtree loops back get a `!` icon, and any check already expanded
/// elsewhere in this render is printed once more with `(cycle)` and not
/// descended into. That second rule is what guarantees termination.
///
/// A granted check must carry sub-traces or subjects, and a conditional one
/// its caveat info; otherwise rendering stops with a [`RenderError`].
pub fn display_check_trace(
    trace: &CheckTraceNode,
    tree: &mut TreePrinter,
    parent: NodeId,
    has_error: bool,
    styler: &dyn Styler,
) -> Result<(), RenderError> {
    let mut walk = CheckTraceWalk {
        tree,
        styler,
        has_error,
        encountered: WalkDedup::new(),
    };
    walk.render(trace, parent)
}

struct CheckTraceWalk<'a> {
    tree: &'a mut TreePrinter,
    styler: &'a dyn Styler,
    has_error: bool,
    encountered: WalkDedup,
}

impl CheckTraceWalk<'_> {
    fn render(&mut self, node: &CheckTraceNode, parent: NodeId) -> Result<(), RenderError> {
        let s = self.styler;

        let mut icon = s.paint(Style::Success, "✓");
        let mut resource_style = Style::Resource;
        let mut permission_style = match node.permission_kind {
            Some(PermissionKind::Permission) => Style::Permission,
            Some(PermissionKind::Relation) => Style::Relation,
            None => Style::Resource,
        };

        match node.result {
            Permissionship::ConditionalPermission => {
                let caveat =
                    node.caveat_info
                        .as_ref()
                        .ok_or_else(|| RenderError::MissingCaveatInfo {
                            key: cycle_key(node),
                        })?;
                match caveat.result {
                    CaveatResult::False => {
                        icon = s.paint(Style::Failure, "⨉");
                        resource_style = Style::Faint;
                        permission_style = Style::Faint;
                    }
                    CaveatResult::MissingContext => {
                        icon = s.paint(Style::Unknown, "?");
                        resource_style = Style::Faint;
                        permission_style = Style::Faint;
                    }
                    CaveatResult::True => {}
                }
            }
            Permissionship::NoPermission => {
                icon = s.paint(Style::Failure, "⨉");
                resource_style = Style::Faint;
                permission_style = Style::Faint;
            }
            Permissionship::HasPermission => {}
        }

        let mut suffix = String::new();
        if node.was_cached {
            suffix = format!(" {}", s.paint(Style::Cached, "(cached)"));
        } else if self.has_error && is_part_of_cycle(node) {
            icon = s.paint(Style::Warning, "!");
            resource_style = Style::Resource;
        }

        let end_of_cycle = self.has_error && self.encountered.revisit(node);
        if end_of_cycle {
            tracing::trace!(check = %cycle_key(node), "check already expanded, truncating");
            suffix = format!(" {}", s.paint(Style::Cycle, "(cycle)"));
        }

        let timing = node
            .duration
            .map(|d| format!(" ({})", humantime::format_duration(d)))
            .unwrap_or_default();

        let label = format!(
            "{} {}:{} {}{}{}",
            icon,
            s.paint(resource_style, &node.resource.object_type),
            s.paint(resource_style, &node.resource.object_id),
            s.paint(permission_style, &node.permission),
            suffix,
            timing,
        );
        let handle = self.tree.child(parent, label);

        if end_of_cycle {
            return Ok(());
        }

        if let Some(caveat) = &node.caveat_info {
            self.render_caveat(caveat, handle)?;
        }

        match &node.children {
            Some(TraceChildren::Intermediate {
                operation,
                sub_traces,
            }) => {
                let operation_handle = self.tree.child(handle, operation.as_str());
                for sub in sub_traces {
                    self.render(sub, operation_handle)?;
                }
            }
            Some(TraceChildren::Leaf { subjects })
                if node.result == Permissionship::HasPermission =>
            {
                for subject in subjects {
                    self.tree
                        .child(handle, s.paint(Style::Subject, &subject.to_string()));
                }
            }
            None if node.result == Permissionship::HasPermission => {
                return Err(RenderError::MissingTraceDetail {
                    key: cycle_key(node),
                });
            }
            _ => {}
        }

        Ok(())
    }

    fn render_caveat(&mut self, caveat: &CaveatInfo, parent: NodeId) -> Result<(), RenderError> {
        let s = self.styler;

        let (indicator, expression_style) = match caveat.result {
            CaveatResult::False => (s.paint(Style::Failure, "⨉"), Style::Faint),
            CaveatResult::True => (s.paint(Style::Success, "✓"), Style::Expression),
            CaveatResult::MissingContext => (s.paint(Style::Unknown, "?"), Style::Expression),
        };

        let line = self.tree.child(
            parent,
            format!(
                "{} {} {}",
                indicator,
                s.paint(expression_style, &caveat.expression),
                s.paint(Style::CaveatName, &caveat.caveat_name),
            ),
        );

        if !caveat.context.is_empty() {
            self.tree
                .child(line, serde_json::to_string_pretty(&caveat.context)?);
        } else if caveat.result != CaveatResult::MissingContext {
            self.tree
                .child(line, s.paint(Style::Faint, "(no matching context found)"));
        }

        if caveat.result == CaveatResult::MissingContext {
            self.tree.child(
                line,
                format!(
                    "missing context: {}",
                    caveat.missing_context_keys.join(", ")
                ),
            );
        }

        Ok(())
    }
}
