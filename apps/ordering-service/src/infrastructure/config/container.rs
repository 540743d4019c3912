//! Dependency Injection Container
//!
//! Manages creation and wiring of all application components.

use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{EventPublisherPort, PasswordHasherPort, TokenPort};
use crate::application::services::AdminAuthGate;
use crate::application::use_cases::{ManageOrdersUseCase, PlaceOrderUseCase, TrackOrderUseCase};
use crate::config::{BootstrapAdminConfig, Config};
use crate::domain::identity::{AdminAccount, AdminRepository, AuthError};
use crate::domain::ordering::{EstimatePolicy, OrderStore};
use crate::domain::shared::AdminId;
use crate::infrastructure::auth::{BcryptPasswordHasher, JwtTokenService};
use crate::infrastructure::events::TracingEventPublisher;
use crate::infrastructure::http::AppState;
use crate::infrastructure::persistence::{
    InMemoryAdminRepository, InMemoryOrderStore, TimeoutOrderStore,
};

/// Tunables the use cases are built with.
#[derive(Debug, Clone)]
pub struct ContainerSettings {
    /// Quoted minutes per order type.
    pub estimates: EstimatePolicy,
    /// How long idempotency keys are remembered.
    pub idempotency_window: Duration,
    /// Admin token lifetime.
    pub token_ttl: chrono::Duration,
}

impl Default for ContainerSettings {
    fn default() -> Self {
        Self {
            estimates: EstimatePolicy::default(),
            idempotency_window: Duration::from_secs(600),
            token_ttl: chrono::Duration::hours(24),
        }
    }
}

impl From<&Config> for ContainerSettings {
    fn from(config: &Config) -> Self {
        Self {
            estimates: config.ordering.estimates(),
            idempotency_window: config.ordering.idempotency_window(),
            token_ttl: config.auth.token_ttl(),
        }
    }
}

/// Container wired with the in-memory store and the JWT/bcrypt adapters.
pub type DefaultContainer = Container<
    TimeoutOrderStore<InMemoryOrderStore>,
    TracingEventPublisher,
    InMemoryAdminRepository,
    JwtTokenService,
    BcryptPasswordHasher,
>;

/// Dependency injection container.
///
/// Holds all wired dependencies for the application. The auth gate and the
/// use cases are built once and shared, so the idempotency cache survives
/// across requests.
pub struct Container<S, E, A, T, H>
where
    S: OrderStore + 'static,
    E: EventPublisherPort + 'static,
    A: AdminRepository + 'static,
    T: TokenPort + 'static,
    H: PasswordHasherPort + 'static,
{
    // Ports
    order_store: Arc<S>,
    event_publisher: Arc<E>,
    admins: Arc<A>,

    // Services
    auth: Arc<AdminAuthGate<A, T, H>>,
    place_order: Arc<PlaceOrderUseCase<S, E>>,
    track_order: Arc<TrackOrderUseCase<S>>,
    manage_orders: Arc<ManageOrdersUseCase<S, E>>,
}

impl<S, E, A, T, H> Container<S, E, A, T, H>
where
    S: OrderStore + 'static,
    E: EventPublisherPort + 'static,
    A: AdminRepository + 'static,
    T: TokenPort + 'static,
    H: PasswordHasherPort + 'static,
{
    /// Create a new container with all dependencies.
    pub fn new(
        order_store: Arc<S>,
        event_publisher: Arc<E>,
        admins: Arc<A>,
        tokens: Arc<T>,
        hasher: Arc<H>,
        settings: &ContainerSettings,
    ) -> Self {
        let auth = Arc::new(AdminAuthGate::new(
            Arc::clone(&admins),
            tokens,
            hasher,
            settings.token_ttl,
        ));
        let place_order = Arc::new(PlaceOrderUseCase::new(
            Arc::clone(&order_store),
            Arc::clone(&event_publisher),
            settings.estimates,
            settings.idempotency_window,
        ));
        let track_order = Arc::new(TrackOrderUseCase::new(Arc::clone(&order_store)));
        let manage_orders = Arc::new(ManageOrdersUseCase::new(
            Arc::clone(&order_store),
            Arc::clone(&event_publisher),
        ));

        Self {
            order_store,
            event_publisher,
            admins,
            auth,
            place_order,
            track_order,
            manage_orders,
        }
    }

    /// Get the order store.
    pub fn order_store(&self) -> Arc<S> {
        Arc::clone(&self.order_store)
    }

    /// Get the event publisher port.
    pub fn event_publisher(&self) -> Arc<E> {
        Arc::clone(&self.event_publisher)
    }

    /// Get the admin repository.
    pub fn admins(&self) -> Arc<A> {
        Arc::clone(&self.admins)
    }

    /// Get the admin auth gate.
    pub fn auth_gate(&self) -> Arc<AdminAuthGate<A, T, H>> {
        Arc::clone(&self.auth)
    }

    /// Get the shared `PlaceOrderUseCase`.
    pub fn place_order_use_case(&self) -> Arc<PlaceOrderUseCase<S, E>> {
        Arc::clone(&self.place_order)
    }

    /// Get the shared `TrackOrderUseCase`.
    pub fn track_order_use_case(&self) -> Arc<TrackOrderUseCase<S>> {
        Arc::clone(&self.track_order)
    }

    /// Get the shared `ManageOrdersUseCase`.
    pub fn manage_orders_use_case(&self) -> Arc<ManageOrdersUseCase<S, E>> {
        Arc::clone(&self.manage_orders)
    }

    /// Build the HTTP handler state.
    pub fn app_state(&self, version: &str) -> AppState<S, E, A, T, H> {
        AppState {
            place_order: self.place_order_use_case(),
            track_order: self.track_order_use_case(),
            manage_orders: self.manage_orders_use_case(),
            auth: self.auth_gate(),
            version: version.to_string(),
        }
    }

    /// Create the configured bootstrap admin unless one already exists.
    ///
    /// Returns `None` when seeding is disabled or the account exists.
    pub async fn seed_bootstrap_admin(
        &self,
        bootstrap: &BootstrapAdminConfig,
    ) -> Result<Option<AdminAccount>, AuthError> {
        if !bootstrap.enabled {
            return Ok(None);
        }
        if self.admins.find_by_email(&bootstrap.email).await?.is_some() {
            return Ok(None);
        }

        if bootstrap.uses_default_password() {
            tracing::warn!(
                email = %bootstrap.email,
                "Bootstrap admin uses the default password; change it before going live"
            );
        }

        self.auth
            .register_admin(AdminId::generate(), &bootstrap.email, &bootstrap.password)
            .await
            .map(Some)
    }
}

impl DefaultContainer {
    /// Wire the default adapters from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let order_store = Arc::new(TimeoutOrderStore::new(
            InMemoryOrderStore::new(),
            config.persistence.store_timeout(),
        ));

        Self::new(
            order_store,
            Arc::new(TracingEventPublisher::new()),
            Arc::new(InMemoryAdminRepository::new()),
            Arc::new(JwtTokenService::new(config.auth.jwt_secret.as_bytes())),
            Arc::new(BcryptPasswordHasher::new(config.auth.bcrypt_cost)),
            &ContainerSettings::from(config),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config_from_string;

    fn config() -> Config {
        load_config_from_string(
            "auth:\n  jwt_secret: \"0123456789abcdef0123456789abcdef\"\n  bcrypt_cost: 4\n",
        )
        .unwrap()
    }

    #[test]
    fn container_creation() {
        let container = DefaultContainer::from_config(&config());

        // Verify we can get all ports
        let _ = container.order_store();
        let _ = container.event_publisher();
        let _ = container.admins();
        let _ = container.app_state("1.0.0-test");
    }

    #[test]
    fn use_cases_are_shared() {
        let container = DefaultContainer::from_config(&config());
        assert!(Arc::ptr_eq(
            &container.place_order_use_case(),
            &container.place_order_use_case()
        ));
    }

    #[tokio::test]
    async fn seeds_bootstrap_admin_once() {
        let config = config();
        let container = DefaultContainer::from_config(&config);

        let first = container
            .seed_bootstrap_admin(&config.auth.bootstrap_admin)
            .await
            .unwrap();
        assert!(first.is_some());

        let second = container
            .seed_bootstrap_admin(&config.auth.bootstrap_admin)
            .await
            .unwrap();
        assert!(second.is_none());

        let login = container
            .auth_gate()
            .login("admin@reddragon.com", "admin123")
            .await
            .unwrap();
        assert!(container.auth_gate().verify(&login.token).is_ok());
    }

    #[tokio::test]
    async fn disabled_bootstrap_seeds_nothing() {
        let container = DefaultContainer::from_config(&config());
        let bootstrap = BootstrapAdminConfig {
            enabled: false,
            ..BootstrapAdminConfig::default()
        };

        assert!(container.seed_bootstrap_admin(&bootstrap).await.unwrap().is_none());
        assert!(container.admins().is_empty());
    }
}
