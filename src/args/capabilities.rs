// src/args/capabilities.rs

//! JSON values for the remote-session arguments.

use serde_json::{Map, Value, json};

/// Child configs that need session capabilities left untouched by the runner.
const BROWSERSTACK: &str = "browserstack";
const SAUCELABS: &str = "saucelabs";

/// Capabilities sent with every run.
///
/// `name` and `project` are always the project name; some providers get a
/// few extra keys depending on the child config.
pub fn capabilities(project_name: &str, child_config: Option<&str>) -> Value {
    let mut caps = Map::new();
    caps.insert("name".to_string(), Value::from(project_name));
    caps.insert("project".to_string(), Value::from(project_name));

    match child_config {
        Some(BROWSERSTACK) => {
            caps.insert("fixSessionCapabilities".to_string(), Value::from("false"));
            caps.insert("browserstack.debug".to_string(), Value::from("false"));
        }
        Some(SAUCELABS) => {
            caps.insert("fixSessionCapabilities".to_string(), Value::from("false"));
        }
        _ => {}
    }

    Value::Object(caps)
}

/// Tunnel credentials, only when both halves are present.
pub fn tunnel_options(user_name: Option<&str>, testing_key: Option<&str>) -> Option<Value> {
    match (user_name, testing_key) {
        (Some(user), Some(key)) => Some(json!({ "username": user, "accessKey": key })),
        _ => None,
    }
}
