//! App Context

use std::sync::Arc;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::{
    auth::{AuthService, PgAuthService},
    database::{self, DatabaseRoleError, Db},
    domain::{
        products::{PgProductsService, ProductsService},
        reports::{PgReportsService, ReportsService},
        sales::{PgSalesService, SalesService},
        staff::{PgStaffService, StaffService},
        warranties::{PgWarrantiesService, WarrantiesService},
    },
    notifications::{NotificationQueue, Notifier},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),

    #[error("database role check failed")]
    Role(#[from] DatabaseRoleError),
}

#[derive(Clone)]
pub struct AppContext {
    pub products: Arc<dyn ProductsService>,
    pub staff: Arc<dyn StaffService>,
    pub sales: Arc<dyn SalesService>,
    pub warranties: Arc<dyn WarrantiesService>,
    pub reports: Arc<dyn ReportsService>,
    pub auth: Arc<dyn AuthService>,
}

impl AppContext {
    /// Build application context from a database URL.
    ///
    /// Spawns the notification worker on the current runtime; its handle is returned so the
    /// caller can let queued notices drain on shutdown.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails or the connecting role
    /// would bypass row-level security.
    pub async fn from_database_url(
        url: &str,
        notifier: Arc<dyn Notifier>,
    ) -> Result<(Self, JoinHandle<()>), AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        database::ensure_rls_enforced_role(&pool).await?;

        let db = Db::new(pool.clone());
        let (notifications, worker) = NotificationQueue::spawn(notifier);

        let context = Self {
            products: Arc::new(PgProductsService::new(db.clone())),
            staff: Arc::new(PgStaffService::new(db.clone())),
            sales: Arc::new(PgSalesService::new(db.clone(), notifications.clone())),
            warranties: Arc::new(PgWarrantiesService::new(db.clone(), notifications)),
            reports: Arc::new(PgReportsService::new(db)),
            auth: Arc::new(PgAuthService::new(pool)),
        };

        Ok((context, worker))
    }
}
