use std::path::{Path, PathBuf};

use super::*;

fn envelope_fixture() -> HandoffEnvelope {
    let mut config = UpgradeConfig::default();
    config.target_folder = Some(PathBuf::from("/opt/demo"));
    config.package_source = Some("https://example.test/releases".to_string());
    config
        .options
        .insert("channel".to_string(), "stable".to_string());
    HandoffEnvelope::new(
        config,
        PathBuf::from("/opt/demo/demo-app"),
        &["--verbose".to_string(), "serve".to_string()],
    )
}

#[test]
fn envelope_round_trip_preserves_all_fields() {
    let envelope = envelope_fixture();
    let token = envelope.encode().expect("must encode");
    let decoded = HandoffEnvelope::decode(&token).expect("must decode");
    assert_eq!(decoded, envelope);
}

#[test]
fn envelope_token_is_printable() {
    let token = envelope_fixture().encode().expect("must encode");
    assert!(token.chars().all(|ch| ch.is_ascii_graphic()));
}

#[test]
fn decode_rejects_invalid_base64() {
    let err = HandoffEnvelope::decode("!!not base64!!").expect_err("must fail");
    assert!(format!("{err:#}").contains("not valid base64"));
}

#[test]
fn decode_rejects_foreign_payload() {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let token = STANDARD.encode(b"just some bytes");
    let err = HandoffEnvelope::decode(&token).expect_err("must fail");
    assert!(format!("{err:#}").contains("does not decode to an envelope"));
}

#[test]
fn envelope_joins_and_splits_arguments() {
    let envelope = HandoffEnvelope::new(
        UpgradeConfig::default(),
        PathBuf::from("/opt/demo/demo-app"),
        &["--port".to_string(), "8080".to_string()],
    );
    assert_eq!(envelope.managed_arguments, "--port 8080");
    assert_eq!(envelope.argument_list(), vec!["--port", "8080"]);
}

#[test]
fn envelope_with_no_arguments_is_empty_string() {
    let envelope =
        HandoffEnvelope::new(UpgradeConfig::default(), PathBuf::from("/opt/demo/app"), &[]);
    assert_eq!(envelope.managed_arguments, "");
    assert!(envelope.argument_list().is_empty());
}

#[test]
fn sentinel_matches_last_argument_only() {
    let args = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    assert!(!is_post_update_invocation(&args(&[])));
    assert!(is_post_update_invocation(&args(&[UPDATED_SIGN])));
    assert!(is_post_update_invocation(&args(&["--flag", UPDATED_SIGN])));
    assert!(!is_post_update_invocation(&args(&[UPDATED_SIGN, "--flag"])));
    assert!(!is_post_update_invocation(&args(&["updatedsign"])));
}

#[test]
fn parse_config_with_all_fields() {
    let config = UpgradeConfig::from_toml_str(
        r#"
target_folder = "/opt/demo"
package_source = "https://example.test/releases"

[options]
channel = "stable"
"#,
    )
    .expect("must parse");
    assert_eq!(config.target_folder.as_deref(), Some(Path::new("/opt/demo")));
    assert_eq!(
        config.package_source.as_deref(),
        Some("https://example.test/releases")
    );
    assert_eq!(config.options.get("channel").map(String::as_str), Some("stable"));
}

#[test]
fn parse_config_defaults_everything() {
    let config = UpgradeConfig::from_toml_str("").expect("must parse");
    assert_eq!(config, UpgradeConfig::default());
}

#[test]
fn parse_config_rejects_blank_package_source() {
    let err = UpgradeConfig::from_toml_str("package_source = \"  \"\n").expect_err("must fail");
    assert!(err.to_string().contains("package_source must not be empty"));
}

#[test]
fn resolve_target_folder_defaults_when_unset() {
    let fallback = Path::new("/opt/demo");

    let mut config = UpgradeConfig::default();
    config
        .resolve_target_folder(fallback)
        .expect("must resolve unset folder");
    assert_eq!(config.target_folder.as_deref(), Some(fallback));

    let mut config = UpgradeConfig {
        target_folder: Some(PathBuf::new()),
        ..UpgradeConfig::default()
    };
    config
        .resolve_target_folder(fallback)
        .expect("must resolve empty folder");
    assert_eq!(config.target_folder.as_deref(), Some(fallback));
}

#[test]
fn resolve_target_folder_absolutizes_relative_paths() {
    let mut config = UpgradeConfig {
        target_folder: Some(PathBuf::from("pkg/./nested/..")),
        ..UpgradeConfig::default()
    };
    config
        .resolve_target_folder(Path::new("/unused"))
        .expect("must resolve");

    let expected = std::env::current_dir().expect("current dir").join("pkg");
    assert_eq!(config.target_folder.as_deref(), Some(expected.as_path()));
}

#[test]
fn absolutize_normalizes_dot_components() {
    let normalized = absolutize(Path::new("/opt/./demo/sub/..")).expect("must absolutize");
    assert_eq!(normalized, PathBuf::from("/opt/demo"));
}

#[test]
fn status_round_trips_through_strings() {
    for status in [
        UpgradeStatus::Upgrading,
        UpgradeStatus::Ended,
        UpgradeStatus::NoNewVersion,
        UpgradeStatus::Started,
    ] {
        assert_eq!(
            UpgradeStatus::parse(status.as_str()).expect("must parse"),
            status
        );
    }
    assert!(UpgradeStatus::parse("finished").is_err());
}

#[test]
fn only_started_requires_exit() {
    assert!(UpgradeStatus::Started.requires_exit());
    assert!(!UpgradeStatus::Upgrading.requires_exit());
    assert!(!UpgradeStatus::Ended.requires_exit());
    assert!(!UpgradeStatus::NoNewVersion.requires_exit());
}
