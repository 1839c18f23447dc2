use std::sync::Arc;

use ddlink_cache::HostTracker;
use ddlink_debrid::AllDebridClient;
use ddlink_unlock::UnlockService;

#[derive(Clone)]
pub struct AppState {
    pub(crate) service: UnlockService,
    pub(crate) debrid: Arc<AllDebridClient>,
    pub(crate) hosts: Arc<HostTracker>,
}

impl AppState {
    pub fn new(service: UnlockService, debrid: Arc<AllDebridClient>, hosts: Arc<HostTracker>) -> Self {
        Self {
            service,
            debrid,
            hosts,
        }
    }
}
