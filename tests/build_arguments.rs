use std::error::Error;
use std::path::Path;

use serde_json::{Value, json};
use testrig::args::build_arguments;
use testrig::config::{ExternalDependency, ExternalRecord, Externals, Inject};
use testrig::errors::TestrigError;
use testrig::project::ProjectContext;
use testrig_test_utils::builders::TestRunConfigBuilder;

type TestResult = Result<(), Box<dyn Error>>;

fn ctx(dir: &Path) -> ProjectContext {
    ProjectContext::new(dir, "widgets", dir)
}

fn json_values(args: &testrig::args::ArgumentVector, key: &str) -> Vec<Value> {
    args.values_of(key)
        .map(|v| serde_json::from_str(v).expect("argument value is JSON"))
        .collect()
}

#[test]
fn externals_without_child_config_fails_without_side_effects() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = TestRunConfigBuilder::new()
        .external("jquery")
        .reporters("junit,cobertura")
        .build();

    match build_arguments(&cfg, &ctx(dir.path())) {
        Err(TestrigError::Configuration(_)) => {}
        other => panic!("expected configuration error, got {other:?}"),
    }
    assert!(!dir.path().join("output").exists());
    Ok(())
}

#[test]
fn externals_emit_loader_with_options_verbatim() -> TestResult {
    let dir = tempfile::tempdir()?;
    let externals = Externals {
        output_path: Some("ext".to_string()),
        dependencies: vec![
            ExternalDependency::Name("jquery".to_string()),
            ExternalDependency::Record(ExternalRecord {
                kind: Some("script".to_string()),
                from: "node_modules/lib".to_string(),
                to: Some("lib".to_string()),
                name: None,
                inject: Some(Inject::Flag(true)),
            }),
        ],
    };
    let cfg = TestRunConfigBuilder::new()
        .child_config("local")
        .externals(externals)
        .build();

    let args = build_arguments(&cfg, &ctx(dir.path()))?;

    let loaders = json_values(&args, "loader");
    assert_eq!(loaders.len(), 1);
    assert_eq!(
        loaders[0],
        json!({
            "script": "intern/externals-loader.js",
            "options": {
                "outputPath": "ext",
                "dependencies": [
                    "jquery",
                    { "type": "script", "from": "node_modules/lib", "to": "lib", "inject": true },
                ],
            },
        })
    );

    // The loader follows suite gating and precedes environment gating.
    let keys: Vec<&str> = args
        .iter()
        .map(|a| a.split_once('=').map(|(k, _)| k).unwrap_or(a.as_str()))
        .collect();
    assert_eq!(
        keys,
        vec!["config", "suites", "loader", "environments", "capabilities"]
    );
    Ok(())
}

#[test]
fn suites_cleared_once_when_no_unit_suite() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = TestRunConfigBuilder::new().remote_functional().build();

    let args = build_arguments(&cfg, &ctx(dir.path()))?;
    assert_eq!(args.iter().filter(|a| *a == "suites=").count(), 1);
    Ok(())
}

#[test]
fn environment_gating() -> TestResult {
    let dir = tempfile::tempdir()?;

    let local = build_arguments(&TestRunConfigBuilder::new().node_unit().build(), &ctx(dir.path()))?;
    assert!(local.iter().any(|a| a == "environments="));
    assert!(!local.iter().any(|a| a == "functionalSuites="));

    let remote_unit = build_arguments(
        &TestRunConfigBuilder::new().remote_unit().build(),
        &ctx(dir.path()),
    )?;
    assert!(remote_unit.iter().any(|a| a == "functionalSuites="));
    assert!(!remote_unit.iter().any(|a| a == "environments="));

    let functional = build_arguments(
        &TestRunConfigBuilder::new().remote_functional().build(),
        &ctx(dir.path()),
    )?;
    assert!(!functional.iter().any(|a| a == "environments="));
    assert!(!functional.iter().any(|a| a == "functionalSuites="));
    Ok(())
}

#[test]
fn filter_becomes_grep() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = TestRunConfigBuilder::new().node_unit().filter("widgets/Button").build();

    let args = build_arguments(&cfg, &ctx(dir.path()))?;
    assert_eq!(args.values_of("grep").collect::<Vec<_>>(), vec!["widgets/Button"]);
    Ok(())
}

#[test]
fn reporters_are_case_insensitive_and_order_preserving() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = TestRunConfigBuilder::new()
        .node_unit()
        .reporters("JUnit,bogus,Pretty")
        .build();

    let args = build_arguments(&cfg, &ctx(dir.path()))?;
    let reporters: Vec<&str> = args.values_of("reporters").collect();

    assert_eq!(reporters.len(), 2);
    let junit: Value = serde_json::from_str(reporters[0])?;
    assert_eq!(
        junit,
        json!({ "name": "JUnit", "options": { "filename": "output/junit/coverage.xml" } })
    );
    assert_eq!(reporters[1], "pretty");
    assert!(!reporters.contains(&"runner"));
    assert!(dir.path().join("output/junit").is_dir());
    Ok(())
}

#[test]
fn structured_reporter_alone_gets_runner_first() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = TestRunConfigBuilder::new().node_unit().reporters("cobertura").build();

    let args = build_arguments(&cfg, &ctx(dir.path()))?;
    let reporters: Vec<&str> = args.values_of("reporters").collect();

    assert_eq!(reporters.len(), 2);
    assert_eq!(reporters[0], "runner");
    assert_eq!(
        serde_json::from_str::<Value>(reporters[1])?,
        json!({
            "name": "cobertura",
            "options": { "directory": "output/coverage/cobertura", "filename": "coverage.xml" },
        })
    );
    assert!(dir.path().join("output/coverage/cobertura").is_dir());
    Ok(())
}

#[test]
fn unknown_reporters_only_emit_nothing() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = TestRunConfigBuilder::new().node_unit().reporters("bogus, nope").build();

    let args = build_arguments(&cfg, &ctx(dir.path()))?;
    assert_eq!(args.values_of("reporters").count(), 0);
    assert!(!dir.path().join("output").exists());
    Ok(())
}

#[test]
fn existing_output_directories_are_reused() -> TestResult {
    let dir = tempfile::tempdir()?;
    let html = dir.path().join("output/coverage/html");
    std::fs::create_dir_all(&html)?;
    std::fs::write(html.join("index.html"), "<html></html>")?;

    let cfg = TestRunConfigBuilder::new()
        .node_unit()
        .reporters("htmlcoverage,lcov")
        .build();
    build_arguments(&cfg, &ctx(dir.path()))?;

    assert!(html.join("index.html").is_file());
    assert!(dir.path().join("output/coverage/lcov").is_dir());
    Ok(())
}

#[test]
fn tunnel_options_need_user_and_key() -> TestResult {
    let dir = tempfile::tempdir()?;

    let both = TestRunConfigBuilder::new()
        .remote_unit()
        .user_name("alice")
        .testing_key("k1")
        .build();
    let args = build_arguments(&both, &ctx(dir.path()))?;
    let tunnels = json_values(&args, "tunnelOptions");
    assert_eq!(tunnels, vec![json!({ "username": "alice", "accessKey": "k1" })]);

    let user_only = TestRunConfigBuilder::new().remote_unit().user_name("alice").build();
    let args = build_arguments(&user_only, &ctx(dir.path()))?;
    assert_eq!(args.values_of("tunnelOptions").count(), 0);

    let key_only = TestRunConfigBuilder::new().remote_unit().testing_key("k1").build();
    let args = build_arguments(&key_only, &ctx(dir.path()))?;
    assert_eq!(args.values_of("tunnelOptions").count(), 0);
    Ok(())
}

#[test]
fn capabilities_depend_on_child_config() -> TestResult {
    let dir = tempfile::tempdir()?;

    let caps_for = |child: Option<&str>| -> Value {
        let mut builder = TestRunConfigBuilder::new().remote_unit();
        if let Some(child) = child {
            builder = builder.child_config(child);
        }
        let args = build_arguments(&builder.build(), &ctx(dir.path())).unwrap();
        let caps = json_values(&args, "capabilities");
        assert_eq!(caps.len(), 1, "exactly one capabilities argument");
        caps.into_iter().next().unwrap()
    };

    let bs = caps_for(Some("browserstack"));
    assert_eq!(bs["fixSessionCapabilities"], "false");
    assert_eq!(bs["browserstack.debug"], "false");
    assert_eq!(bs["name"], "widgets");
    assert_eq!(bs["project"], "widgets");

    let sl = caps_for(Some("saucelabs"));
    assert_eq!(sl["fixSessionCapabilities"], "false");
    assert!(sl.get("browserstack.debug").is_none());

    for other in [None, Some("local")] {
        let caps = caps_for(other);
        assert!(caps.get("fixSessionCapabilities").is_none());
        assert!(caps.get("browserstack.debug").is_none());
    }
    Ok(())
}

#[test]
fn full_config_emission_order() -> TestResult {
    let dir = tempfile::tempdir()?;
    let cfg = TestRunConfigBuilder::new()
        .remote_unit()
        .child_config("saucelabs")
        .intern_config("intern-ci.json")
        .filter("unit")
        .reporters("lcov")
        .user_name("alice")
        .testing_key("k1")
        .build();

    let args = build_arguments(&cfg, &ctx(dir.path()))?;
    let keys: Vec<&str> = args
        .iter()
        .map(|a| a.split_once('=').map(|(k, _)| k).unwrap_or(a.as_str()))
        .collect();

    assert_eq!(
        keys,
        vec![
            "config",
            "functionalSuites",
            "grep",
            "reporters",
            "reporters",
            "tunnelOptions",
            "capabilities",
        ]
    );
    assert_eq!(args.as_slice()[0], "config=intern/intern-ci.json@saucelabs");
    Ok(())
}

#[test]
fn config_path_is_relative_to_working_dir() -> TestResult {
    let dir = tempfile::tempdir()?;
    let work = dir.path().join("packages").join("app");
    std::fs::create_dir_all(&work)?;

    let ctx = ProjectContext::new(dir.path(), "widgets", &work);
    let args = build_arguments(&TestRunConfigBuilder::new().node_unit().build(), &ctx)?;

    assert_eq!(args.as_slice()[0], "config=../../intern/intern.json");
    Ok(())
}
