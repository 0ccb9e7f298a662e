use std::sync::Arc;

use pointledger_infra::InMemoryPointStore;
use pointledger_ledger::PointService;

/// Shared application services injected into handlers.
pub struct AppServices {
    points: Arc<PointService<Arc<InMemoryPointStore>>>,
}

/// In-memory wiring: the store lives for the process lifetime.
pub fn build_services() -> AppServices {
    let store = Arc::new(InMemoryPointStore::new());
    tracing::info!("using in-memory point store");

    AppServices {
        points: Arc::new(PointService::new(store)),
    }
}

impl AppServices {
    pub fn points(&self) -> &PointService<Arc<InMemoryPointStore>> {
        &self.points
    }
}
