#![cfg(test)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use maplit::hashmap;

use crate::client::RemoteConfigClient;
use crate::error::ClientError;
use crate::template::{Parameter, ParameterValue, Template};

/// Remote client stub serving a canned template and counting fetches.
pub struct TestClient {
    template: Mutex<Template>,
    failing: AtomicBool,
    fetches: AtomicUsize,
}

impl TestClient {
    pub fn new() -> Self {
        Self::with_template(basic_template())
    }

    pub fn with_template(template: Template) -> Self {
        TestClient {
            template: Mutex::new(template),
            failing: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Number of template fetches performed so far, failed ones included.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Replaces the template served to subsequent fetches, as if a new
    /// version had been published in the provider console.
    pub fn set_template(&self, template: Template) {
        *self.template.lock().unwrap() = template;
    }

    /// Makes subsequent fetches fail (or succeed again).
    pub fn fail_fetches(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl RemoteConfigClient for TestClient {
    fn fetch_template(&self) -> Result<Template, ClientError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err("simulated transport failure".into());
        }
        Ok(self.template.lock().unwrap().clone())
    }
}

pub fn basic_template() -> Template {
    serde_json::from_str(
        r#"{
        "parameters": {
            "new_dashboard": {
                "defaultValue": {"value": "false"},
                "conditionalValues": {
                    "beta_testers": {"value": "true"}
                },
                "description": "Rollout of the rebuilt dashboard"
            },
            "dark_mode": {
                "defaultValue": {"value": "enabled"}
            },
            "legacy_export": {
                "defaultValue": {"value": "no"}
            }
        },
        "conditions": [
            {"name": "beta_testers", "expression": "user.tag == 'beta'"}
        ],
        "version": {"versionNumber": "42"}
    }"#,
    )
    .unwrap()
}

/// A template declaring a single parameter with only a default value.
pub fn template_with_flag(name: &str, raw: &str) -> Template {
    Template {
        parameters: hashmap! {
            name.to_string() => Parameter {
                default_value: Some(ParameterValue::explicit(raw)),
                ..Parameter::default()
            },
        },
        ..Template::default()
    }
}
