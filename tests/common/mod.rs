#![allow(dead_code)]

use actix_web::{middleware::Logger, web, App};

use nearbyspace_api::config::AppConfig;
use nearbyspace_api::db::memory::MemoryTable;
use nearbyspace_api::db::table::TableBackend;
use nearbyspace_api::models::review::Review;
use nearbyspace_api::models::space::Space;
use nearbyspace_api::routes;
use nearbyspace_api::services::auth_service::{generate_token, Role};
use nearbyspace_api::state::AppState;

pub const TEST_SECRET: &str = "test-jwt-secret";
pub const TEST_MODERATOR_KEY: &str = "test-moderator-key";

pub struct TestApp {
    pub state: web::Data<AppState>,
}

impl TestApp {
    /// Reachable, empty tables: featured spaces and no reviews.
    pub async fn new() -> Self {
        Self::with_tables(MemoryTable::default(), MemoryTable::default()).await
    }

    /// Tables that fail every call, so the bundled data is served.
    pub async fn offline() -> Self {
        Self::with_tables(MemoryTable::unreachable(), MemoryTable::unreachable()).await
    }

    pub async fn with_tables(spaces: MemoryTable<Space>, reviews: MemoryTable<Review>) -> Self {
        let config = AppConfig::local(TEST_SECRET, Some(TEST_MODERATOR_KEY));
        Self::with_config(config, spaces, reviews).await
    }

    pub async fn with_config(
        config: AppConfig,
        spaces: MemoryTable<Space>,
        reviews: MemoryTable<Review>,
    ) -> Self {
        let state = AppState::in_memory(config, spaces, reviews).await;
        Self {
            state: web::Data::new(state),
        }
    }

    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(self.state.clone())
            .wrap(Logger::default())
            .route("/health", web::get().to(|| async { "OK" }))
            .configure(|cfg| routes::config(cfg, TEST_SECRET))
    }

    pub fn set_offline(&self, offline: bool) {
        if let TableBackend::Memory(table) = self.state.spaces.table() {
            table.set_failing(offline);
        }
        if let TableBackend::Memory(table) = self.state.reviews.table() {
            table.set_failing(offline);
        }
    }

    pub fn stored_reviews(&self) -> Vec<Review> {
        match self.state.reviews.table() {
            TableBackend::Memory(table) => table.rows(),
            TableBackend::Mongo(_) => Vec::new(),
        }
    }

    pub fn stored_spaces(&self) -> Vec<Space> {
        match self.state.spaces.table() {
            TableBackend::Memory(table) => table.rows(),
            TableBackend::Mongo(_) => Vec::new(),
        }
    }
}

pub fn moderator_token() -> String {
    let token = generate_token("test-moderator", Role::Moderator, TEST_SECRET, 1)
        .expect("token generation");
    format!("Bearer {}", token)
}
