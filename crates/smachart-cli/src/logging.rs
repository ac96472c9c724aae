use tracing_subscriber::EnvFilter;

use crate::error::CliError;

const DEFAULT_FILTER: &str = "smachart=info,smachart_core=info";

/// Installs the stderr subscriber. `--log-level` wins over `RUST_LOG`.
pub fn init(level: Option<&str>) -> Result<(), CliError> {
    let filter = resolve_filter(level, std::env::var("RUST_LOG").ok().as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|error| CliError::LogFilter {
            value: level.unwrap_or(DEFAULT_FILTER).to_owned(),
            reason: error.to_string(),
        })
}

fn resolve_filter(flag: Option<&str>, env: Option<&str>) -> Result<EnvFilter, CliError> {
    match flag {
        Some(value) => EnvFilter::try_new(value).map_err(|error| CliError::LogFilter {
            value: value.to_owned(),
            reason: error.to_string(),
        }),
        None => Ok(env
            .filter(|value| !value.trim().is_empty())
            .and_then(|value| EnvFilter::try_new(value).ok())
            .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_overrides_environment() {
        let filter = resolve_filter(Some("debug"), Some("error")).expect("valid filter");
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn falls_back_to_default_without_input() {
        let filter = resolve_filter(None, None).expect("default filter");
        assert!(filter.to_string().contains("smachart_core=info"));
    }

    #[test]
    fn malformed_flag_is_reported() {
        let error = resolve_filter(Some("smachart=loud"), None).expect_err("must fail");
        assert!(matches!(error, CliError::LogFilter { .. }));
    }
}
