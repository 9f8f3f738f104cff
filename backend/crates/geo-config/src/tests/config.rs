use crate::tests::{EnvGuard, setup_config_dir, write_config};
use crate::{Config, ConfigError};

use googletest::assert_that;
use googletest::prelude::{anything, eq, err, none, ok, some};
use log::LevelFilter;
use serial_test::serial;

// =========================================================================
// Loading
// =========================================================================

#[test]
#[serial]
fn given_no_config_file_when_load_then_defaults() {
    // Given
    let _temp = setup_config_dir();
    let _port = EnvGuard::remove("GEO_SERVER_PORT");
    let _host = EnvGuard::remove("GEO_SERVER_HOST");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.host.as_str(), eq("0.0.0.0"));
    assert_that!(config.server.port, eq(8080));
    assert_that!(config.hub.broadcast_capacity, eq(256));
    assert_that!(config.hub.delivery_timeout_ms, eq(200));
    assert_that!(config.websocket.send_buffer_size, eq(64));
    assert_that!(*config.logging.level, eq(LevelFilter::Info));
    assert_that!(config.bind_addr().as_str(), eq("0.0.0.0:8080"));
    assert_that!(config.validate(), ok(anything()));
}

#[test]
#[serial]
fn given_config_file_when_load_then_values_applied() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(
        &temp,
        r#"
[server]
host = "127.0.0.1"
port = 9100

[hub]
broadcast_capacity = 8

[logging]
level = "DEBUG"
colored = false
"#,
    );

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.bind_addr().as_str(), eq("127.0.0.1:9100"));
    assert_that!(config.hub.broadcast_capacity, eq(8));
    // Unspecified fields keep their defaults
    assert_that!(config.hub.delivery_timeout_ms, eq(200));
    assert_that!(*config.logging.level, eq(LevelFilter::Debug));
    assert_that!(config.logging.colored, eq(false));
}

#[test]
#[serial]
fn given_env_overrides_when_load_then_env_wins_over_file() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "[server]\nport = 9100\n");
    let _port = EnvGuard::set("GEO_SERVER_PORT", "9200");
    let _capacity = EnvGuard::set("GEO_HUB_BROADCAST_CAPACITY", "2");
    let _level = EnvGuard::set("GEO_LOG_LEVEL", "warn");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(9200));
    assert_that!(config.hub.broadcast_capacity, eq(2));
    assert_that!(*config.logging.level, eq(LevelFilter::Warn));
}

#[test]
#[serial]
fn given_unparseable_env_value_when_load_then_value_ignored() {
    // Given
    let _temp = setup_config_dir();
    let _port = EnvGuard::set("GEO_SERVER_PORT", "not-a-port");
    let _level = EnvGuard::set("GEO_LOG_LEVEL", "loud");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(8080));
    assert_that!(*config.logging.level, eq(LevelFilter::Info));
}

#[test]
#[serial]
fn given_malformed_toml_when_load_then_toml_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "[server\nport = ");

    // When
    let result = Config::load();

    // Then
    assert!(matches!(result, Err(ConfigError::Toml { .. })));
}

#[test]
#[serial]
fn given_unknown_log_level_in_file_when_load_then_error() {
    // Given
    let (temp, _guard) = setup_config_dir();
    write_config(&temp, "[logging]\nlevel = \"chatty\"\n");

    // When
    let result = Config::load();

    // Then
    assert_that!(result, err(anything()));
}

// =========================================================================
// Derived values
// =========================================================================

#[test]
#[serial]
fn given_log_file_when_log_file_path_then_joined_under_config_dir() {
    // Given
    let (temp, _guard) = setup_config_dir();
    let _file = EnvGuard::set("GEO_LOG_FILE", "geo.log");

    // When
    let config = Config::load().unwrap();
    let path = config.log_file_path().unwrap();

    // Then
    assert_that!(path, some(eq(&temp.path().join("log").join("geo.log"))));
}

#[test]
#[serial]
fn given_no_log_file_when_log_file_path_then_none() {
    // Given
    let _temp = setup_config_dir();
    let _file = EnvGuard::remove("GEO_LOG_FILE");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.log_file_path().unwrap(), none());
}

#[test]
#[serial]
fn given_timeouts_when_converted_then_durations_match_millis() {
    // Given
    let _temp = setup_config_dir();
    let _delivery = EnvGuard::set("GEO_HUB_DELIVERY_TIMEOUT_MS", "75");
    let _write = EnvGuard::set("GEO_WS_WRITE_TIMEOUT_MS", "1500");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_eq!(config.delivery_timeout().as_millis(), 75);
    assert_eq!(config.write_timeout().as_millis(), 1500);
}
