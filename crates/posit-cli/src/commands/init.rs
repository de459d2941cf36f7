use std::path::PathBuf;

use anyhow::Context;
use posit_config::{PROJECT_DIR, PositConfig};
use serde_json::json;

use crate::cli::GlobalFlags;
use crate::context::open_service;
use crate::output::output;

const DEFAULT_CONFIG: &str = r#"[database]
path = ".positif/positif.db"

[notify]
sender = "contact@posit.if"
echo = true

[general]
seed_catalog = true
"#;

/// Handle `positif init`.
pub async fn handle(config: &PositConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let project_dir = PathBuf::from(PROJECT_DIR);
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("failed to create {}", project_dir.display()))?;

    let config_path = project_dir.join("config.toml");
    let config_written = if config_path.exists() {
        false
    } else {
        std::fs::write(&config_path, DEFAULT_CONFIG)
            .with_context(|| format!("failed to write {}", config_path.display()))?;
        true
    };

    let service = open_service(config).await?;
    let seeded = service.seed_catalog().await?;
    tracing::info!(database = %config.database.path, seeded, "project initialized");

    output(
        &json!({
            "database": config.database.path,
            "config": config_path.display().to_string(),
            "config_written": config_written,
            "seeded": seeded,
        }),
        flags.format,
    )
}

#[cfg(test)]
mod tests {
    use figment::Figment;
    use figment::providers::{Format, Serialized, Toml};
    use posit_config::PositConfig;
    use pretty_assertions::assert_eq;

    use super::DEFAULT_CONFIG;

    #[test]
    fn default_config_matches_built_in_defaults() {
        let written: PositConfig = Figment::from(Serialized::defaults(PositConfig::default()))
            .merge(Toml::string(DEFAULT_CONFIG))
            .extract()
            .expect("default config parses");
        let defaults = PositConfig::default();
        assert_eq!(written.database.path, defaults.database.path);
        assert_eq!(written.notify.sender, defaults.notify.sender);
        assert_eq!(written.notify.echo, defaults.notify.echo);
        assert_eq!(written.general.seed_catalog, defaults.general.seed_catalog);
    }
}
