use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn file_values_override_defaults() {
    let mut settings = ClientSettings::default();
    apply_file(
        &mut settings,
        r#"
api_base_url = "http://localhost:3000/api"
request_timeout_secs = 3
"#,
    )
    .expect("valid toml");

    assert_eq!(settings.api_base_url, "http://localhost:3000/api");
    assert_eq!(settings.request_timeout_secs, 3);
    assert_eq!(settings.log_filter, "info");
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let mut settings = ClientSettings::default();
    apply_file(&mut settings, r#"api_base_url = "http://file/api""#).expect("valid toml");
    apply_env(
        &mut settings,
        env_from(&[
            ("CATALOG_API_URL", "http://plain/api"),
            ("APP__API_BASE_URL", "http://prefixed/api"),
            ("APP__REQUEST_TIMEOUT_SECS", "not-a-number"),
            ("RUST_LOG", "client_core=debug"),
        ]),
    );

    assert_eq!(settings.api_base_url, "http://prefixed/api");
    assert_eq!(settings.request_timeout_secs, 15);
    assert_eq!(settings.log_filter, "client_core=debug");
}

#[test]
fn timeout_never_drops_to_zero() {
    let settings = ClientSettings {
        request_timeout_secs: 0,
        ..ClientSettings::default()
    };
    assert_eq!(settings.request_timeout(), Duration::from_secs(1));
}

#[test]
fn unknown_value_types_are_rejected() {
    let mut settings = ClientSettings::default();
    let err = apply_file(&mut settings, r#"request_timeout_secs = "soon""#);
    assert!(err.is_err());
}

#[test]
fn explicit_missing_file_is_an_error() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("catalog_settings_missing_{suffix}.toml"));

    let err = load_settings(Some(&path)).expect_err("missing file");
    assert!(err.to_string().contains("failed to read settings file"));
}

#[test]
fn explicit_file_is_loaded() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let path = env::temp_dir().join(format!("catalog_settings_{suffix}.toml"));
    fs::write(&path, "request_timeout_secs = 7\n").expect("write settings");

    let settings = load_settings(Some(&path)).expect("load settings");
    assert_eq!(settings.request_timeout_secs, 7);

    fs::remove_file(path).expect("cleanup");
}
