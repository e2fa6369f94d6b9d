//! Apply command - converge the services declared in the configuration

use anyhow::{Result, bail};

use super::Session;
use crate::cli::args::ApplyArgs;
use crate::cli::exit_code::ExitCode;
use crate::service::{Change, Lifecycle};

/// Outcome of converging one service
#[derive(Debug)]
pub struct ServiceReport {
    pub name: String,
    pub result: Result<Vec<Change>>,
}

/// Execute the apply command
///
/// A failing service does not stop the others; the run exits with
/// [`ExitCode::ExecutionError`] when any service failed.
pub fn execute(session: &Session, args: ApplyArgs) -> Result<ExitCode> {
    for name in &args.only {
        if !session.config.services.contains_key(name) {
            bail!("Service '{}' is not declared in the configuration", name);
        }
    }

    let reports = apply(session, &args.only);
    let mut failed = 0;

    for report in &reports {
        match &report.result {
            Ok(changes) if changes.is_empty() => {
                tracing::debug!(service = %report.name, "In sync");
            }
            Ok(changes) => {
                for change in changes {
                    println!("{}: {}", report.name, change);
                }
            }
            Err(e) => {
                failed += 1;
                tracing::error!(service = %report.name, "{:#}", e);
            }
        }
    }

    if failed > 0 {
        tracing::error!(failed, total = reports.len(), "Some services failed to converge");
        return Ok(ExitCode::ExecutionError);
    }
    Ok(ExitCode::Success)
}

/// Converge every selected service in configuration order
pub fn apply(session: &Session, only: &[String]) -> Vec<ServiceReport> {
    session
        .config
        .services
        .iter()
        .filter(|(name, _)| only.is_empty() || only.contains(*name))
        .map(|(name, service)| {
            let result = session
                .service_with(service.descriptor(name))
                .and_then(|control| {
                    let lifecycle = Lifecycle::new(control.as_ref(), session.runner());
                    Ok(lifecycle.converge(&service.desired_state())?)
                });
            ServiceReport {
                name: name.clone(),
                result,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::tests::session;
    use crate::config::{Config, ServiceConfig};
    use crate::exec::fake::ScriptedRunner;
    use crate::service::Ensure;
    use std::rc::Rc;

    fn config() -> Config {
        let mut config = Config::default();
        config.services.insert(
            "httpd".to_string(),
            ServiceConfig {
                ensure: Some(Ensure::Running),
                ..ServiceConfig::default()
            },
        );
        config.services.insert(
            "sndiod".to_string(),
            ServiceConfig {
                enable: Some(false),
                ..ServiceConfig::default()
            },
        );
        config
    }

    #[test]
    fn test_apply_converges_in_order() {
        let runner = Rc::new(
            ScriptedRunner::new()
                .reply("check httpd", 1, "httpd(failed)\n")
                .reply("get sndiod status", 0, ""),
        );
        let session = session(config(), &runner);

        let reports = apply(&session, &[]);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].name, "httpd");
        assert_eq!(reports[0].result.as_ref().unwrap(), &vec![Change::Started]);
        assert_eq!(reports[1].name, "sndiod");
        assert_eq!(reports[1].result.as_ref().unwrap(), &vec![Change::Disabled]);
    }

    #[test]
    fn test_apply_follows_declaration_order() {
        let config: Config = toml::from_str(
            r#"
[services.sndiod]
ensure = "running"

[services.httpd]
ensure = "running"
"#,
        )
        .unwrap();
        let runner = Rc::new(
            ScriptedRunner::new()
                .reply("check sndiod", 1, "sndiod(failed)\n")
                .reply("check httpd", 1, "httpd(failed)\n"),
        );
        let session = session(config, &runner);

        let reports = apply(&session, &[]);

        let names: Vec<&str> = reports.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["sndiod", "httpd"]);
        let starts: Vec<String> = runner
            .calls()
            .into_iter()
            .filter(|c| c.starts_with("-f start"))
            .collect();
        assert_eq!(starts, vec!["-f start sndiod", "-f start httpd"]);
    }

    #[test]
    fn test_apply_continues_after_failure() {
        let runner = Rc::new(
            ScriptedRunner::new()
                .reply("check httpd", 1, "httpd(failed)\n")
                .reply("-f start httpd", 1, "")
                .reply("get sndiod status", 0, ""),
        );
        let session = session(config(), &runner);

        let code = execute(&session, ApplyArgs { only: Vec::new() }).unwrap();

        assert_eq!(code, ExitCode::ExecutionError);
        assert!(runner.calls().contains(&"disable sndiod".to_string()));
    }

    #[test]
    fn test_apply_only_selected() {
        let runner = Rc::new(ScriptedRunner::new().reply("get sndiod status", 1, ""));
        let session = session(config(), &runner);

        let reports = apply(&session, &["sndiod".to_string()]);

        assert_eq!(reports.len(), 1);
        assert!(reports[0].result.as_ref().unwrap().is_empty());
        assert_eq!(runner.calls(), vec!["get sndiod status"]);
    }

    #[test]
    fn test_apply_rejects_undeclared_service() {
        let runner = Rc::new(ScriptedRunner::new());
        let session = session(config(), &runner);

        let result = execute(
            &session,
            ApplyArgs {
                only: vec!["ntpd".to_string()],
            },
        );
        assert!(result.is_err());
    }
}
