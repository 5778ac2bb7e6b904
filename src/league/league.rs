use std::sync::Arc;

use crate::league::results::ResultService;
use crate::league::schedule::ScheduleService;
use crate::league::standings::StandingsService;
use crate::store::JsonStore;

/// Runtime policy for the league services.
#[derive(Debug, Clone)]
pub struct LeagueOptions {
    pub auto_approve_privileged: bool,
}

impl Default for LeagueOptions {
    fn default() -> Self {
        Self {
            auto_approve_privileged: true,
        }
    }
}

/// Main league service bundling schedule generation, standings computation
/// and the result lifecycle. Constructed once at startup and injected into
/// the handlers via app data.
pub struct LeagueService {
    pub schedule: ScheduleService,
    pub standings: StandingsService,
    pub results: ResultService,
}

impl LeagueService {
    pub fn new(store: Arc<JsonStore>, options: LeagueOptions) -> Self {
        Self {
            schedule: ScheduleService::new(store.clone()),
            standings: StandingsService::new(store.clone()),
            results: ResultService::new(store, options.auto_approve_privileged),
        }
    }
}
