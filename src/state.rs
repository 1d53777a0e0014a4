use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::team_stats_service::TeamStatsService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TeamStatsService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(service: TeamStatsService, config: AppConfig) -> Self {
        AppState {
            service: Arc::new(service),
            config: Arc::new(config),
        }
    }
}
