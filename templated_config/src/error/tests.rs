//! Unit tests for error wrapping and inspection.

use std::path::PathBuf;

use rstest::rstest;

use super::{ConfigError, SourceOrigin, Stage};

fn missing_secret() -> ConfigError {
    ConfigError::MissingSecret {
        path: "secret/db".into(),
        key: "password".into(),
    }
}

#[rstest]
fn innermost_unwraps_source_and_execution_layers() {
    let err = ConfigError::TemplateExecution {
        template: "db.yaml".into(),
        line: 3,
        function: "vault".into(),
        source: Box::new(missing_secret()),
    }
    .in_source(SourceOrigin::File(PathBuf::from("conf/db.yaml")), Stage::Render);

    assert!(matches!(
        err.innermost(),
        ConfigError::MissingSecret { key, .. } if key == "password"
    ));
}

#[rstest]
fn innermost_stops_at_foreign_function_errors() {
    let err = ConfigError::TemplateExecution {
        template: "inline#0".into(),
        line: 1,
        function: "custom".into(),
        source: "boom".into(),
    };
    assert!(matches!(
        err.innermost(),
        ConfigError::TemplateExecution { function, .. } if function == "custom"
    ));
}

#[rstest]
fn origin_and_stage_describe_the_outer_wrapper() {
    let err = missing_secret().in_source(SourceOrigin::Inline(1), Stage::Render);
    assert_eq!(err.origin(), Some(&SourceOrigin::Inline(1)));
    assert_eq!(err.stage(), Some(Stage::Render));
    assert_eq!(missing_secret().origin(), None);
    assert_eq!(missing_secret().stage(), None);
}

#[rstest]
#[case(SourceOrigin::Inline(0), Stage::Format, "failed to resolve the format of inline config source #0")]
#[case(
    SourceOrigin::File(PathBuf::from("base.yaml")),
    Stage::Read,
    "failed to read config file 'base.yaml'"
)]
#[case(
    SourceOrigin::File(PathBuf::from("base.yaml")),
    Stage::Merge,
    "failed to merge config file 'base.yaml'"
)]
fn source_wrappers_prefix_the_message(
    #[case] origin: SourceOrigin,
    #[case] stage: Stage,
    #[case] prefix: &str,
) {
    let message = ConfigError::UnsupportedFormat {
        format: "toml".into(),
    }
    .in_source(origin, stage)
    .to_string();
    assert!(message.starts_with(prefix), "unexpected message: {message}");
    assert!(message.ends_with("unsupported config format 'toml'; expected one of json, yaml, yml"));
}

#[rstest]
fn missing_secret_message_names_path_and_key() {
    assert_eq!(
        missing_secret().to_string(),
        "secret key 'password' does not exist in 'secret/db' and no default value has been provided"
    );
}

#[rstest]
#[case(SourceOrigin::File(PathBuf::from("/etc/app/base.yaml")), "base.yaml")]
#[case(SourceOrigin::Inline(4), "inline#4")]
fn template_names_follow_the_origin(#[case] origin: SourceOrigin, #[case] expected: &str) {
    assert_eq!(origin.template_name(), expected);
}
