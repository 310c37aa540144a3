use crate::config::ResolvedConfig;
use crate::process::ProcessRunner;
use crate::services::{InstallerService, WhereService};

/// Everything a command needs, built once per invocation and never mutated.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: ResolvedConfig,
    pub where_service: WhereService,
    pub installer: InstallerService,
}

impl AppContext {
    pub fn new(config: ResolvedConfig) -> Self {
        let runner = ProcessRunner::new(config.timeout);
        Self {
            where_service: WhereService::new(config.locator.clone(), runner),
            installer: InstallerService::new(config.installer.clone(), runner),
            config,
        }
    }
}
