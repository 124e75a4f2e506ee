use std::collections::HashSet;
use std::sync::LazyLock;

use indexmap::IndexMap;
use percent_encoding::utf8_percent_encode;
use regex::Regex;
use tracing::warn;

use super::query::UNRESERVED;
use crate::client::PubNubError;

/// Regular expression for matching path parameters in the format `{param_name}`.
static RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?<name>\w+)}").expect("a valid regex"));

fn replace_path_param(path: &str, param_name: &str, value: &str) -> String {
    let pattern = ["{", param_name, "}"].concat();
    path.replace(&pattern, value)
}

fn encode_path_param_value(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

/// A request path template with named `{param}` placeholders.
///
/// Values are percent-encoded as single path segments when the path is resolved,
/// so identifiers containing `/`, spaces or non-ASCII characters stay in their segment.
#[derive(Debug, Clone, Default, derive_more::Display)]
#[display("{template}")]
pub(crate) struct RequestPath {
    template: String,
    args: IndexMap<String, String>,
}

impl RequestPath {
    pub(crate) fn add_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.args.insert(name.into(), value.into());
        self
    }

    /// Substitutes every placeholder, failing if any placeholder has no value.
    pub(crate) fn resolve(&self) -> Result<String, PubNubError> {
        let mut path = self.template.clone();
        let mut names: HashSet<&str> = RE
            .captures_iter(&self.template)
            .filter_map(|caps| caps.name("name"))
            .map(|found| found.as_str())
            .collect();

        for (name, value) in &self.args {
            if !names.remove(name.as_str()) {
                warn!(?name, "argument name not found");
                continue;
            }
            path = replace_path_param(&path, name, &encode_path_param_value(value));
        }

        if names.is_empty() {
            return Ok(path);
        }

        let mut missings: Vec<String> = names.into_iter().map(str::to_string).collect();
        missings.sort();
        Err(PubNubError::PathUnresolved {
            path: self.template.clone(),
            missings,
        })
    }
}

impl From<&str> for RequestPath {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<String> for RequestPath {
    fn from(template: String) -> Self {
        Self {
            template,
            args: IndexMap::new(),
        }
    }
}
