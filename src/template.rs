use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

/// A point-in-time snapshot of the provider's full set of parameter
/// definitions, as published by the remote config service.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Parameter definitions keyed by parameter name. Flag names are matched
    /// against these keys exactly, including case.
    #[serde(default)]
    pub parameters: HashMap<String, Parameter>,
    /// The provider's targeting conditions, in priority order. Condition
    /// expressions are not evaluated by this crate.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub version: Option<TemplateVersion>,
}

impl Template {
    /// Retrieve the parameter named `name`.
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.get(name)
    }
}

/// One parameter definition: a default value plus any number of
/// condition-scoped values.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    #[serde(default)]
    pub default_value: Option<ParameterValue>,
    /// Values scoped to a named condition, keyed by condition name. The
    /// provider applies the first listed condition with highest priority and
    /// does not promise a stable order among the rest.
    #[serde(default)]
    pub conditional_values: BTreeMap<String, ParameterValue>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One arm of a parameter's value: either an explicit string or an
/// instruction to fall back to the value compiled into the app.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParameterValue {
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub use_in_app_default: bool,
}

impl ParameterValue {
    /// Builds an arm carrying an explicit string value.
    pub fn explicit(value: impl Into<String>) -> Self {
        ParameterValue {
            value: Some(value.into()),
            use_in_app_default: false,
        }
    }

    /// Builds an arm deferring to the in-app default.
    pub fn in_app_default() -> Self {
        ParameterValue {
            value: None,
            use_in_app_default: true,
        }
    }
}

/// A named targeting condition attached to the template.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    pub name: String,
    #[serde(default)]
    pub expression: String,
}

/// Version stamp the provider attaches to a published template.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TemplateVersion {
    #[serde(default)]
    pub version_number: Option<String>,
    #[serde(default)]
    pub update_time: Option<String>,
}
