use sqlx::PgPool;
use std::sync::Arc;

use crate::admin::{admin_site, AdminSite};
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub site: Arc<AdminSite>,
    /// Default changelist page size.
    pub page_size: u32,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        Self {
            pool,
            site: Arc::new(admin_site()),
            page_size: config.page_size,
        }
    }
}
