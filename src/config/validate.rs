// src/config/validate.rs

use crate::config::model::TestRunConfig;
use crate::errors::{Result, TestrigError};

/// Check the invariants a config must satisfy before anything is built or
/// spawned.
///
/// - `externals` requires `childConfig`: the externals loader is wired
///   through a child configuration.
/// - `internConfig`, when given, must not be empty.
pub fn validate_config(cfg: &TestRunConfig) -> Result<()> {
    validate_externals(cfg)?;
    validate_intern_config(cfg)?;
    Ok(())
}

fn validate_externals(cfg: &TestRunConfig) -> Result<()> {
    if cfg.externals.is_some() && cfg.child_config.is_none() {
        return Err(TestrigError::Configuration(
            "`externals` requires a child config (`childConfig`) to be set".to_string(),
        ));
    }
    Ok(())
}

fn validate_intern_config(cfg: &TestRunConfig) -> Result<()> {
    if let Some(name) = &cfg.intern_config {
        if name.trim().is_empty() {
            return Err(TestrigError::Configuration(
                "`internConfig` must not be empty".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::Externals;

    #[test]
    fn externals_without_child_config_is_rejected() {
        let cfg = TestRunConfig {
            externals: Some(Externals::default()),
            ..Default::default()
        };

        match validate_config(&cfg) {
            Err(TestrigError::Configuration(msg)) => assert!(msg.contains("childConfig")),
            other => panic!("expected configuration error, got {other:?}"),
        }
    }

    #[test]
    fn externals_with_child_config_is_accepted() {
        let cfg = TestRunConfig {
            externals: Some(Externals::default()),
            child_config: Some("local".to_string()),
            ..Default::default()
        };
        assert!(validate_config(&cfg).is_ok());
    }

    #[test]
    fn blank_intern_config_is_rejected() {
        let cfg = TestRunConfig {
            intern_config: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            validate_config(&cfg),
            Err(TestrigError::Configuration(_))
        ));
    }
}
