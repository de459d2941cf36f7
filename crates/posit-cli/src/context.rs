use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use posit_config::PositConfig;
use posit_notify::ConsoleNotifier;
use posit_predict::StaticPredictions;
use posit_service::ConsultationService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: ConsultationService,
}

impl AppContext {
    /// Open the configured database and wire the console notifier and the
    /// built-in prediction table into the service.
    pub async fn init(config: &PositConfig) -> anyhow::Result<Self> {
        let service = open_service(config).await?;
        if config.general.seed_catalog && service.seed_catalog().await? {
            tracing::info!("seeded built-in employees and mediums");
        }
        Ok(Self { service })
    }
}

/// Build a service over the configured database, creating its parent
/// directory first.
pub async fn open_service(config: &PositConfig) -> anyhow::Result<ConsultationService> {
    let path = &config.database.path;
    if !config.database.is_in_memory() {
        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    ConsultationService::open_local(
        path,
        Arc::new(ConsoleNotifier::new(config.notify.echo)),
        Arc::new(StaticPredictions::new()),
        config.notify.sender.clone(),
    )
    .await
    .with_context(|| format!("failed to open database at {path}"))
}

#[cfg(test)]
mod tests {
    use posit_config::PositConfig;

    use super::AppContext;

    fn config_at(path: String) -> PositConfig {
        let mut config = PositConfig::default();
        config.database.path = path;
        config.notify.echo = false;
        config
    }

    #[tokio::test]
    async fn init_creates_parent_dir_and_seeds() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("positif.db");
        let ctx = AppContext::init(&config_at(path.to_string_lossy().into_owned()))
            .await
            .expect("context should init");

        assert!(path.exists());
        assert_eq!(ctx.service.list_mediums().await.unwrap().len(), 6);
    }

    #[tokio::test]
    async fn seeding_can_be_disabled() {
        let mut config = config_at(":memory:".into());
        config.general.seed_catalog = false;
        let ctx = AppContext::init(&config).await.expect("context should init");
        assert!(ctx.service.list_mediums().await.unwrap().is_empty());
    }
}
