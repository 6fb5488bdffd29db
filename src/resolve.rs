use std::collections::HashSet;

use lazy_static::lazy_static;
use log::debug;

use crate::template::{Parameter, ParameterValue};

lazy_static! {
    static ref TRUTHY_TOKENS: HashSet<&'static str> =
        ["true", "yes", "enabled", "enable"].into_iter().collect();
}

/// Resolves a parameter definition to a boolean flag state.
///
/// The effective raw value is the first conditional value, if the parameter
/// has any, and the default value otherwise. Condition expressions are not
/// evaluated here; the provider lists the highest-priority condition first,
/// and that convention is trusted instead of reimplementing the provider's
/// targeting language.
///
/// The raw value is trimmed and compared case-insensitively against the
/// closed vocabulary `true`, `yes`, `enabled`, `enable`. Anything else,
/// including an empty or absent value, resolves to disabled rather than an
/// error.
pub fn resolve(parameter: &Parameter) -> bool {
    let effective = parameter
        .conditional_values
        .values()
        .next()
        .or(parameter.default_value.as_ref());

    match effective {
        Some(value) => is_enabled(value),
        None => false,
    }
}

fn is_enabled(value: &ParameterValue) -> bool {
    if value.use_in_app_default {
        debug!("parameter value defers to the in-app default, treating as disabled");
        return false;
    }
    match &value.value {
        Some(raw) => is_truthy(raw),
        None => false,
    }
}

fn is_truthy(raw: &str) -> bool {
    TRUTHY_TOKENS.contains(raw.trim().to_ascii_lowercase().as_str())
}
