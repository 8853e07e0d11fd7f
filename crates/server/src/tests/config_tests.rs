use super::*;

fn no_env(_: &str) -> Option<String> {
    None
}

#[test]
fn defaults_bind_locally_with_stock_statuses() {
    let settings = settings_from_sources(None, no_env);
    assert_eq!(settings.server_bind, "127.0.0.1:8000");
    assert_eq!(
        settings.board.status(Stage::Govern),
        Some("Govern function documented and mapped")
    );
}

#[test]
fn file_overrides_bind_and_stage_statuses() {
    let raw = r#"
bind_addr = "0.0.0.0:9000"
measure_status = "complete"
"#;
    let settings = settings_from_sources(Some(raw), no_env);

    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.board.status(Stage::Measure), Some("complete"));
    assert_eq!(
        settings.board.status(Stage::Map),
        Some("Use case and context mapped")
    );
}

#[test]
fn env_wins_over_file() {
    let raw = "bind_addr = \"0.0.0.0:9000\"\n";
    let settings = settings_from_sources(Some(raw), |key| {
        (key == "APP__BIND_ADDR").then(|| "127.0.0.1:7000".to_string())
    });
    assert_eq!(settings.server_bind, "127.0.0.1:7000");
}

#[test]
fn unreadable_file_keeps_defaults() {
    let settings = settings_from_sources(Some("bind_addr = ["), no_env);
    assert_eq!(settings.server_bind, "127.0.0.1:8000");
}
