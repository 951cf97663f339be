use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::matching::scorer::MatchScorer;
use crate::store::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Per-user record store. Postgres when `DATABASE_URL` is set, memory otherwise.
    pub store: Arc<dyn RecordStore>,
    pub catalog: Arc<Catalog>,
    pub config: Config,
    /// Pluggable match scorer. Default: SkillCgpaScorer.
    pub scorer: Arc<dyn MatchScorer>,
}
