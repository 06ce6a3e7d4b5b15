//! Application state shared by every handler.

use crate::auth::JwtValidator;
use std::sync::Arc;
use tubely_core::Config;
use tubely_processing::{UploadPipeline, VideoRecords};

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub jwt: JwtValidator,
    pub records: Arc<dyn VideoRecords>,
    pub pipeline: UploadPipeline,
}

impl AppState {
    pub fn new(config: Config, records: Arc<dyn VideoRecords>, pipeline: UploadPipeline) -> Self {
        let jwt = JwtValidator::new(config.jwt_secret());
        Self {
            config,
            jwt,
            records,
            pipeline,
        }
    }
}
