//! Tree explanations of evaluator output.
//!
//! [`display_check_trace`] explains a single permission check;
//! [`display_expand_tree`] lays out an expansion result.

pub(crate) mod check;
pub mod cycle;
pub(crate) mod expand;

pub use check::display_check_trace;
pub use expand::display_expand_tree;
