//! Visual emphasis as named roles.
//!
//! Renderers only ever ask for a [`Style`]; the [`Styler`] backend decides
//! what that looks like. [`AnsiStyler`] targets terminals, [`PlainStyler`]
//! drops all emphasis and [`MarkupStyler`] keeps the roles visible as
//! `[role]text[/role]` spans so emphasis decisions can be asserted on.

use crate::config::ColorChoice;
use colored::{Color, Colorize};
use std::io::IsTerminal;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Style {
    Success,
    Failure,
    Unknown,
    Warning,
    Cached,
    Cycle,
    Resource,
    Faint,
    Permission,
    Relation,
    Subject,
    CaveatName,
    Expression,
    ErrorPrefix,
    ErrorMessage,
    LineNumber,
    CenterLineNumber,
    Code,
    CenterCode,
    Highlight,
    Heading,
    Banner,
}

impl Style {
    pub fn name(&self) -> &'static str {
        match self {
            Style::Success => "success",
            Style::Failure => "failure",
            Style::Unknown => "unknown",
            Style::Warning => "warning",
            Style::Cached => "cached",
            Style::Cycle => "cycle",
            Style::Resource => "resource",
            Style::Faint => "faint",
            Style::Permission => "permission",
            Style::Relation => "relation",
            Style::Subject => "subject",
            Style::CaveatName => "caveat",
            Style::Expression => "expression",
            Style::ErrorPrefix => "error-prefix",
            Style::ErrorMessage => "error-message",
            Style::LineNumber => "line-number",
            Style::CenterLineNumber => "center-line-number",
            Style::Code => "code",
            Style::CenterCode => "center-code",
            Style::Highlight => "highlight",
            Style::Heading => "heading",
            Style::Banner => "banner",
        }
    }
}

pub trait Styler: Send + Sync {
    fn paint(&self, style: Style, text: &str) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PlainStyler;

impl Styler for PlainStyler {
    fn paint(&self, _style: Style, text: &str) -> String {
        text.to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupStyler;

impl Styler for MarkupStyler {
    fn paint(&self, style: Style, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        format!("[{0}]{1}[/{0}]", style.name(), text)
    }
}

const ORANGE: Color = Color::TrueColor {
    r: 215,
    g: 95,
    b: 0,
};
const PURPLE: Color = Color::TrueColor {
    r: 135,
    g: 95,
    b: 255,
};
const LIGHT_GREEN: Color = Color::TrueColor {
    r: 0,
    g: 175,
    b: 95,
};
const PINK: Color = Color::TrueColor {
    r: 255,
    g: 0,
    b: 135,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct AnsiStyler;

impl Styler for AnsiStyler {
    fn paint(&self, style: Style, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }
        let painted = match style {
            Style::Success => text.green(),
            Style::Failure => text.red(),
            Style::Unknown => text.magenta(),
            Style::Warning | Style::Cycle | Style::Relation => text.color(ORANGE),
            Style::Cached => text.cyan(),
            Style::Resource | Style::Expression => text.white(),
            Style::Faint => text.bright_black(),
            Style::Permission => text.color(LIGHT_GREEN),
            Style::Subject => text.color(PURPLE),
            Style::CaveatName => text.color(PINK),
            Style::ErrorPrefix => text.bright_red().bold(),
            Style::ErrorMessage | Style::Heading => text.bold(),
            Style::LineNumber => text.bright_blue(),
            Style::CenterLineNumber | Style::Highlight => text.bright_red(),
            Style::Code => text.bright_black(),
            Style::CenterCode => text.bright_white(),
            Style::Banner => text.bright_green().bold(),
        };
        painted.to_string()
    }
}

/// Pick a backend for the configured color choice.
///
/// `Always` calls [`colored::control::set_override`], which is process-wide:
/// every later `colored` user in the process, inside this crate or not, emits
/// ANSI codes regardless of `NO_COLOR`/`CLICOLOR` or whether stdout is a
/// terminal. Callers that need to restore environment-driven behaviour call
/// [`colored::control::unset_override`]. `Auto` and `Never` leave the global
/// switch untouched.
pub fn styler_for(choice: ColorChoice) -> Arc<dyn Styler> {
    match choice {
        ColorChoice::Never => Arc::new(PlainStyler),
        ColorChoice::Always => {
            colored::control::set_override(true);
            Arc::new(AnsiStyler)
        }
        ColorChoice::Auto => {
            if std::io::stdout().is_terminal() {
                Arc::new(AnsiStyler)
            } else {
                Arc::new(PlainStyler)
            }
        }
    }
}
