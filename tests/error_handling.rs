// tests/error_handling.rs

use std::io::Write;
use std::path::PathBuf;

use tempfile::{NamedTempFile, tempdir};
use triggergraph::config::{load_and_validate, load_from_path};
use triggergraph::errors::TriggerGraphError;
use triggergraph::model::{BallColor, JobKind};

fn registry_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn test_cause_cycle_returns_structured_error() {
    let file = registry_file(
        r#"
[job.A]

[[run]]
job = "A"
number = 1
causes = [{ job = "A", number = 2 }]

[[run]]
job = "A"
number = 2
causes = [{ job = "A", number = 1 }]
"#,
    );

    match load_and_validate(file.path()) {
        Err(TriggerGraphError::CauseCycle(msg)) => {
            assert!(msg.contains("cycle detected"));
            assert!(msg.contains("A #1") || msg.contains("A #2"));
        }
        Err(e) => panic!("Expected CauseCycle error, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_run_of_unknown_job_returns_config_error() {
    let file = registry_file(
        r#"
[job.A]

[[run]]
job = "Ghost"
number = 3
"#,
    );

    match load_and_validate(file.path()) {
        Err(TriggerGraphError::ConfigError(msg)) => {
            assert!(msg.contains("unknown job"));
            assert!(msg.contains("Ghost"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_duplicate_run_returns_config_error() {
    let file = registry_file(
        r#"
[job.A]

[[run]]
job = "A"
number = 1

[[run]]
job = "A"
number = 1
"#,
    );

    match load_and_validate(file.path()) {
        Err(TriggerGraphError::ConfigError(msg)) => assert!(msg.contains("more than once")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_empty_registry_returns_config_error() {
    let file = registry_file("[settings]\nhide_disabled = true\n");

    match load_and_validate(file.path()) {
        Err(TriggerGraphError::ConfigError(msg)) => assert!(msg.contains("at least one")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_zero_edge_width_returns_config_error() {
    let file = registry_file(
        r#"
[settings]
selected_edge_width = 0

[job.A]
"#,
    );

    match load_and_validate(file.path()) {
        Err(TriggerGraphError::ConfigError(msg)) => {
            assert!(msg.contains("selected_edge_width"));
        }
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_image_path_must_be_a_directory() {
    let file = registry_file(
        r#"
[settings]
draw_balls = true
image_path = "/definitely/not/a/real/icon/dir"

[job.A]
"#,
    );

    match load_and_validate(file.path()) {
        Err(TriggerGraphError::ConfigError(msg)) => assert!(msg.contains("image_path")),
        Err(e) => panic!("Expected ConfigError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }

    let icons = tempdir().unwrap();
    let contents = format!(
        "[settings]\ndraw_balls = true\nimage_path = {:?}\n\n[job.A]\n",
        icons.path().display().to_string()
    );
    let file = registry_file(&contents);
    assert!(load_and_validate(file.path()).is_ok());
}

#[test]
fn test_unknown_upstream_and_missing_cause_run_are_tolerated() {
    let file = registry_file(
        r#"
[job.A]
upstream = "Deleted, B"

[job.B]

[[run]]
job = "A"
number = 4
causes = [{ job = "B", number = 77 }]
"#,
    );

    let cfg = load_and_validate(file.path()).unwrap();
    assert_eq!(cfg.job.len(), 2);
    assert_eq!(cfg.run.len(), 1);
}

#[test]
fn test_invalid_toml_returns_toml_error() {
    let file = registry_file("[job.A\nupstream = ");

    match load_and_validate(file.path()) {
        Err(TriggerGraphError::TomlError(_)) => {}
        Err(e) => panic!("Expected TomlError, got: {:?}", e),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

#[test]
fn test_unknown_job_kind_returns_toml_error() {
    let file = registry_file("[job.A]\nkind = \"freestyle\"\n");

    assert!(matches!(
        load_and_validate(file.path()),
        Err(TriggerGraphError::TomlError(_))
    ));
}

#[test]
fn test_missing_file_returns_io_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("Triggers.toml");

    assert!(matches!(
        load_and_validate(&missing),
        Err(TriggerGraphError::IoError(_))
    ));
}

#[test]
fn test_settings_defaults() {
    let file = registry_file("[job.A]\n");
    let raw = load_from_path(file.path()).unwrap();

    let settings = &raw.settings;
    assert!(!settings.draw_balls);
    assert!(!settings.hide_disabled);
    assert!(settings.left_to_right_layout);
    assert!(!settings.count_triggers_transitively);
    assert!(!settings.linear_upstream_of_project);
    assert!(settings.keep_unreachable_siblings());
    assert_eq!(settings.selected_edge_width, 1);
    assert_eq!(settings.rankdir(), "LR");
    assert!(settings.image_path.is_none());
    assert!(settings.root_url.is_empty());

    let job = &raw.job["A"];
    assert_eq!(job.kind, JobKind::Workflow);
    assert_eq!(job.color, BallColor::Grey);
    assert!(job.upstream.is_empty());
}

#[test]
fn test_demo_registry_is_valid() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/pipeline.toml");
    let cfg = load_and_validate(&path).unwrap();

    assert_eq!(cfg.job.len(), 8);
    assert_eq!(cfg.run.len(), 5);
    assert_eq!(cfg.job["deploy/prod"].kind, JobKind::Project);
    assert!(cfg.job["nightly-cleanup"].disabled);
    assert_eq!(cfg.job["nightly-cleanup"].color, BallColor::Disabled);
    assert_eq!(cfg.run[1].causes.len(), 1);
}
