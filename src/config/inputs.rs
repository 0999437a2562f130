//! Action inputs
//!
//! GitHub Actions exposes each `with:` input of a step as an `INPUT_<NAME>` environment
//! variable, where `<NAME>` is the input name upper-cased with spaces replaced by `_`.
//! [`Inputs`] captures those variables once and offers typed accessors with the
//! coercion rules every input shares:
//!
//! - booleans: empty means the default, otherwise `true`/`false` in any case
//! - integers: empty means `None`, otherwise the leading integer (decimals are truncated)
//! - strings: empty means `None`, otherwise the trimmed value
//! - string lists: comma-separated, empty list when absent

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;

const LOG_TARGET: &str = "    inputs";
const INPUT_PREFIX: &str = "INPUT_";

static LEADING_INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("invalid regex"));

/// An action input held a value that could not be coerced to the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvalidInputError {
    pub input_name: String,
    pub message: String,
}

impl InvalidInputError {
    #[must_use]
    pub fn new(input_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            input_name: input_name.into(),
            message: message.into(),
        }
    }
}

/// Snapshot of the `INPUT_*` variables of the current step.
#[derive(Debug, Clone, Default)]
pub struct Inputs {
    values: HashMap<String, String>,
}

impl Inputs {
    /// Capture inputs from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::vars_os().filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        )
    }

    /// Capture inputs from an arbitrary set of variables; entries without the `INPUT_` prefix are ignored.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let values = vars
            .into_iter()
            .filter_map(|(k, v)| {
                let key: String = k.into();
                key.strip_prefix(INPUT_PREFIX).map(|name| (name.to_owned(), v.into()))
            })
            .collect();

        Self { values }
    }

    /// The trimmed raw value of an input, or the empty string when it is not set.
    #[must_use]
    pub fn raw(&self, name: &str) -> &str {
        let key = name.replace(' ', "_").to_uppercase();
        self.values.get(&key).map_or("", |v| v.trim())
    }

    pub fn get_bool(&self, name: &str, default: bool) -> Result<bool, InvalidInputError> {
        let value = self.raw(name);
        log::debug!(target: LOG_TARGET, "Retrieved boolean input for: {name} with a value of '{value}'");

        if value.is_empty() {
            log::debug!(target: LOG_TARGET, "No value for: {name}, the default value '{default}' will be returned");
            return Ok(default);
        }

        if value.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if value.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(InvalidInputError::new(
                name,
                format!("The retrieved boolean value for: {name} is {value}, expected values are 'true' or 'false'"),
            ))
        }
    }

    pub fn get_integer(&self, name: &str) -> Result<Option<i64>, InvalidInputError> {
        let value = self.raw(name);
        log::debug!(target: LOG_TARGET, "Retrieved integer input for: {name} with a value of '{value}'");

        if value.is_empty() {
            return Ok(None);
        }

        LEADING_INTEGER
            .find(value)
            .and_then(|m| m.as_str().parse::<i64>().ok())
            .map(Some)
            .ok_or_else(|| {
                InvalidInputError::new(
                    name,
                    format!("The retrieved integer value for: {name} is {value}, which is deemed to be a NaN"),
                )
            })
    }

    #[must_use]
    pub fn get_string(&self, name: &str) -> Option<String> {
        let value = self.raw(name);
        log::debug!(target: LOG_TARGET, "Retrieved string input for: {name} with a value of '{value}'");

        (!value.is_empty()).then(|| value.to_owned())
    }

    /// Comma-separated list; items are trimmed and empty items dropped.
    #[must_use]
    pub fn get_string_list(&self, name: &str) -> Vec<String> {
        self.get_string(name).map_or_else(Vec::new, |value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_owned)
                .collect()
        })
    }
}
