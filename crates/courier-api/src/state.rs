//! Shared application state.

use courier_core::Config;
use courier_processing::Ingestor;

pub struct AppState {
    pub config: Config,
    pub ingestor: Ingestor,
}

impl AppState {
    pub fn new(config: Config, ingestor: Ingestor) -> Self {
        Self { config, ingestor }
    }
}
