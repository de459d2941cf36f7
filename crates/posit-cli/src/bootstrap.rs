use posit_config::PositConfig;

use crate::cli::GlobalFlags;

/// Load layered configuration, then apply command-line overrides.
pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<PositConfig> {
    let config = PositConfig::load_with_dotenv()?;
    apply_overrides(config, flags)
}

fn apply_overrides(mut config: PositConfig, flags: &GlobalFlags) -> anyhow::Result<PositConfig> {
    if let Some(db) = &flags.db {
        config.database.path.clone_from(db);
        config.validate()?;
    }
    if flags.quiet {
        config.notify.echo = false;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use posit_config::PositConfig;
    use pretty_assertions::assert_eq;

    use super::apply_overrides;
    use crate::cli::{GlobalFlags, OutputFormat};

    fn flags(db: Option<&str>, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet,
            verbose: false,
            db: db.map(str::to_string),
        }
    }

    #[test]
    fn db_flag_overrides_config_path() {
        let config = apply_overrides(PositConfig::default(), &flags(Some(":memory:"), false))
            .expect("override applies");
        assert_eq!(config.database.path, ":memory:");
        assert!(config.notify.echo);
    }

    #[test]
    fn empty_db_flag_is_rejected() {
        assert!(apply_overrides(PositConfig::default(), &flags(Some(""), false)).is_err());
    }

    #[test]
    fn quiet_silences_notification_echo() {
        let config =
            apply_overrides(PositConfig::default(), &flags(None, true)).expect("override applies");
        assert!(!config.notify.echo);
        assert_eq!(config.database.path, ".positif/positif.db");
    }
}
