pub mod access;
pub mod api;
pub mod config;
pub mod errors;
pub mod feed;
pub mod observability;
pub mod podme;
#[cfg(test)]
pub mod test_helpers;

use actix_web::web;

use crate::{access::AccessGuard, config::AppConfig, errors::AppResult, podme::PodmeClient};

/// Read-only state shared by every worker.
pub struct AppState {
    pub config: AppConfig,
    pub guard: AccessGuard,
    pub client: PodmeClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> AppResult<Self> {
        let guard = AccessGuard::new(config.secret.clone(), config.denial_status);
        let client = PodmeClient::new(&config)?;
        Ok(Self {
            config,
            guard,
            client,
        })
    }
}

pub type RqState = web::Data<AppState>;
