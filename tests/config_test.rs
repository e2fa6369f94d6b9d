//! Configuration loading tests

use std::fs;
use std::path::PathBuf;

use rcctl_service::config::{load_config, load_config_from_path_or_default};
use rcctl_service::service::Ensure;
use tempfile::TempDir;

#[test]
fn test_load_full_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    fs::write(
        &config_path,
        r#"
rcctl = "/usr/sbin/rcctl"
provider = "openbsd"

[services.httpd]
ensure = "running"
enable = true
flags = "-DSSL"
hasrestart = true

[services.sndiod]
ensure = "stopped"
enable = false
"#,
    )
    .unwrap();

    let config = load_config(&config_path).unwrap().config;

    let names: Vec<&str> = config.services.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["httpd", "sndiod"]);

    let httpd = config.descriptor("httpd");
    assert_eq!(httpd.flags.as_deref(), Some("-DSSL"));
    assert!(httpd.has_restart);
    assert!(httpd.has_status);

    let sndiod = config.services["sndiod"].desired_state();
    assert_eq!(sndiod.ensure, Some(Ensure::Stopped));
    assert_eq!(sndiod.enable, Some(false));

    assert_eq!(config.rcctl_path().unwrap(), PathBuf::from("/usr/sbin/rcctl"));
}

#[test]
fn test_flags_are_kept_verbatim() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.toml");

    fs::write(&config_path, "[services.httpd]\nflags = \"  -v   -d \"\n").unwrap();

    let config = load_config_from_path_or_default(Some(&config_path))
        .unwrap()
        .config;
    assert_eq!(config.services["httpd"].flags.as_deref(), Some("  -v   -d "));
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = load_config_from_path_or_default(Some(&temp_dir.path().join("absent.toml")));
    assert!(result.is_err());
}
