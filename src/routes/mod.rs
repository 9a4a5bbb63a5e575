// Route exports
pub mod health;
pub mod integrations;
pub mod jobs;
pub mod recommendations;
pub mod users;

use crate::core::Recommender;
use crate::services::{AssistantClient, MapsClient, Storage};
use actix_web::web;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub recommender: Recommender,
    pub maps: Arc<MapsClient>,
    pub assistant: Arc<AssistantClient>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure).service(
        web::scope("/Hirely")
            .configure(users::configure)
            .configure(jobs::configure)
            .configure(recommendations::configure)
            .configure(integrations::configure),
    );
}
