use std::convert::Infallible;

use clap::{ArgAction, Parser};
use stackstart_settings::parse_bool;
use stackstart_telemetry::LogFormat;

/// Start Portainer stacks in order, waiting for each to report running.
///
/// Connection details and the stack sequence come from the environment
/// (`PORTAINER_URL`, `PORTAINER_API_KEY`, `STACK_SEQUENCE`, ...).
#[derive(Debug, Parser)]
#[command(name = "stackstart", version)]
pub struct Cli {
    /// Exit after the run (0 on success, 1 on failure) instead of idling.
    #[arg(long, env = "EXIT_ON_FINISH", action = ArgAction::SetTrue, value_parser = flag_value)]
    pub exit_on_finish: bool,

    /// Log output format.
    #[arg(long, env = "LOG_FORMAT", default_value = "pretty")]
    pub log_format: LogFormat,
}

/// Environment flags are true only for `1`, `true`, `yes`, `on`.
fn flag_value(raw: &str) -> Result<bool, Infallible> {
    Ok(parse_bool(Some(raw), false))
}

#[cfg(test)]
mod tests {
    use std::ffi::OsStr;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn defaults_to_idle_and_pretty_logs() {
        let cli = Cli::try_parse_from(["stackstart"]).unwrap();
        assert!(!cli.exit_on_finish);
        assert_eq!(cli.log_format, LogFormat::Pretty);
    }

    #[test]
    fn parses_flags() {
        let cli =
            Cli::try_parse_from(["stackstart", "--exit-on-finish", "--log-format", "json"])
                .unwrap();
        assert!(cli.exit_on_finish);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn rejects_unknown_log_format() {
        assert!(Cli::try_parse_from(["stackstart", "--log-format", "xml"]).is_err());
    }

    #[test]
    fn exit_on_finish_reads_its_env_var() {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "exit_on_finish")
            .unwrap();
        assert_eq!(arg.get_env(), Some(OsStr::new("EXIT_ON_FINISH")));
    }

    #[test]
    fn flag_tokens_match_settings_booleans() {
        for raw in ["1", "true", "YES", " on "] {
            assert_eq!(flag_value(raw), Ok(true), "{raw} should be true");
        }
        for raw in ["0", "false", "no", "off", "enabled"] {
            assert_eq!(flag_value(raw), Ok(false), "{raw} should be false");
        }
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }
}
