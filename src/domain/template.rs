use crate::error::{ReleaseNotesError, Result};
use regex::Regex;
use std::collections::BTreeMap;

/// Named values substituted into a template
pub type Values = BTreeMap<&'static str, String>;

/// A fixed text skeleton with `{{name}}` placeholders.
///
/// `{{#name}}...{{/name}}` marks an optional section that is kept only when
/// `name` has a non-empty value. Sections do not nest.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    source: &'static str,
}

impl Template {
    pub const fn new(source: &'static str) -> Self {
        Template { source }
    }

    /// Fill the skeleton with `values`.
    ///
    /// A placeholder without a value is an error; an empty value renders as
    /// nothing.
    pub fn render(&self, values: &Values) -> Result<String> {
        let expanded = expand_sections(self.source, values)?;
        substitute(&expanded, values)
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| ReleaseNotesError::format(format!("Invalid template pattern: {}", e)))
}

fn expand_sections(source: &str, values: &Values) -> Result<String> {
    let section = compile(r"(?s)\{\{#(\w+)\}\}(.*?)\{\{/(\w+)\}\}")?;

    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for captures in section.captures_iter(source) {
        let (Some(whole), Some(open), Some(body), Some(close)) = (
            captures.get(0),
            captures.get(1),
            captures.get(2),
            captures.get(3),
        ) else {
            continue;
        };

        if open.as_str() != close.as_str() {
            return Err(ReleaseNotesError::format(format!(
                "Template section '{}' closed by '{}'",
                open.as_str(),
                close.as_str()
            )));
        }

        out.push_str(&source[last..whole.start()]);
        if values.get(open.as_str()).is_some_and(|v| !v.is_empty()) {
            out.push_str(body.as_str());
        }
        last = whole.end();
    }
    out.push_str(&source[last..]);

    Ok(out)
}

fn substitute(source: &str, values: &Values) -> Result<String> {
    let placeholder = compile(r"\{\{(\w+)\}\}")?;

    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for captures in placeholder.captures_iter(source) {
        let (Some(whole), Some(name)) = (captures.get(0), captures.get(1)) else {
            continue;
        };

        let value = values.get(name.as_str()).ok_or_else(|| {
            ReleaseNotesError::format(format!(
                "Template references unknown value '{}'",
                name.as_str()
            ))
        })?;

        out.push_str(&source[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }
    out.push_str(&source[last..]);

    Ok(out)
}
