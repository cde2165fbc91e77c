use crate::{
    di::{DependenciesInject, DependenciesInjectDeps, Repositories},
    payment_client::MidtransSnapClient,
};
use anyhow::{Context, Result};
use prometheus_client::registry::Registry;
use shared::{
    abstract_trait::DynJwtService,
    config::{Config, ConnectionPool, Hashing, JwtConfig},
    utils::{SystemMetrics, run_metrics_collector},
};
use std::{fmt, sync::Arc};

#[derive(Clone)]
pub struct AppState {
    pub di_container: DependenciesInject,
    pub jwt_config: DynJwtService,
    pub registry: Arc<Registry>,
    pub system_metrics: Arc<SystemMetrics>,
    pub pool: ConnectionPool,
    pub upload_dir: String,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("di_container", &self.di_container)
            .field("registry", &self.registry)
            .field("system_metrics", &self.system_metrics)
            .field("upload_dir", &self.upload_dir)
            .finish()
    }
}

impl AppState {
    pub async fn new(pool: ConnectionPool, config: &Config) -> Result<Self> {
        let mut registry = Registry::default();
        let system_metrics = Arc::new(SystemMetrics::new());

        let jwt_config = Arc::new(JwtConfig::new(&config.jwt_secret)) as DynJwtService;
        let gateway = Arc::new(
            MidtransSnapClient::new(&config.payment).context("Failed to build payment client")?,
        );

        let deps = DependenciesInjectDeps {
            repositories: Repositories::postgres(pool.clone()),
            gateway,
            hashing: Arc::new(Hashing::new()),
            jwt_config: jwt_config.clone(),
            upload: config.upload.clone(),
        };

        let di_container = DependenciesInject::new(deps, &mut registry);

        registry.register_metrics(&system_metrics);

        tokio::spawn(run_metrics_collector(system_metrics.clone()));

        Ok(Self {
            di_container,
            jwt_config,
            registry: Arc::new(registry),
            system_metrics,
            pool,
            upload_dir: config.upload.dir.clone(),
        })
    }
}

trait MetricsRegister {
    fn register_metrics(&mut self, metrics: &SystemMetrics);
}

impl MetricsRegister for Registry {
    fn register_metrics(&mut self, metrics: &SystemMetrics) {
        metrics.register(self);
    }
}
