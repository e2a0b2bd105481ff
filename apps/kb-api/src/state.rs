use std::sync::Arc;

use kb_service::KbService;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<KbService>,
}
impl AppState {
	pub fn new(config: kb_config::Config) -> color_eyre::Result<Self> {
		tracing::info!(
			url = %config.backend.url,
			dataset = %config.backend.dataset,
			"Connecting to search backend."
		);

		Ok(Self::from_service(KbService::connect(config)?))
	}

	pub fn from_service(service: KbService) -> Self {
		Self { service: Arc::new(service) }
	}
}
