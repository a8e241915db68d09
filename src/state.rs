//! Application context shared by every handler. Built once in `main`, dropped at shutdown.

use log::{info, warn};

use crate::config::AppConfig;
use crate::db::memory::MemoryTable;
use crate::db::mongo::{create_mongo_client, MongoTable};
use crate::db::table::{StoreError, TableBackend};
use crate::models::fallback::{featured_spaces, sample_reviews};
use crate::models::review::Review;
use crate::models::space::Space;
use crate::services::geolocation_service::IpLocationProvider;
use crate::services::preferences_service::{
    KeyValueBackend, MemoryKeyValueStore, MongoKeyValueStore, PreferenceStore,
};
use crate::services::review_store::{fetch_reviews, ReviewStore};
use crate::services::space_store::{fetch_spaces, SpaceStore};

pub const SPACES_COLLECTION: &str = "spaces";
pub const REVIEWS_COLLECTION: &str = "reviews";
pub const PREFERENCES_COLLECTION: &str = "preferences";

pub struct AppState {
    pub config: AppConfig,
    pub spaces: SpaceStore<TableBackend<Space>>,
    pub reviews: ReviewStore<TableBackend<Review>>,
    pub preferences: PreferenceStore<KeyValueBackend>,
    pub locator: Option<IpLocationProvider>,
}

/// Featured spaces followed by the stored listings, or just the featured spaces if the read failed.
pub fn spaces_or_fallback(fetched: Result<Vec<Space>, StoreError>) -> Vec<Space> {
    match fetched {
        Ok(stored) => {
            info!("Loaded {} stored listings", stored.len());
            featured_spaces().into_iter().chain(stored).collect()
        }
        Err(e) => {
            warn!("Error fetching spaces, serving featured spaces only: {}", e);
            featured_spaces()
        }
    }
}

pub fn reviews_or_fallback(fetched: Result<Vec<Review>, StoreError>) -> Vec<Review> {
    match fetched {
        Ok(stored) => {
            info!("Loaded {} stored reviews", stored.len());
            stored
        }
        Err(e) => {
            warn!("Error fetching reviews, serving sample reviews: {}", e);
            sample_reviews()
        }
    }
}

impl AppState {
    pub async fn initialize(
        config: AppConfig,
        spaces_table: TableBackend<Space>,
        reviews_table: TableBackend<Review>,
        preferences: KeyValueBackend,
    ) -> Self {
        let spaces = spaces_or_fallback(fetch_spaces(&spaces_table).await);
        let reviews = reviews_or_fallback(fetch_reviews(&reviews_table).await);

        let locator = if config.ip_geolocation {
            match IpLocationProvider::new(&config.ip_geolocation_url, config.ip_geolocation_timeout)
            {
                Ok(provider) => Some(provider),
                Err(e) => {
                    warn!("IP geolocation disabled, could not build HTTP client: {}", e);
                    None
                }
            }
        } else {
            None
        };

        Self {
            config,
            spaces: SpaceStore::new(spaces_table, spaces),
            reviews: ReviewStore::new(reviews_table, reviews),
            preferences: PreferenceStore::new(preferences),
            locator,
        }
    }

    pub async fn connect(config: AppConfig) -> Result<Self, StoreError> {
        let client = create_mongo_client(&config.mongo_uri).await?;
        let database = config.database.clone();

        Ok(Self::initialize(
            config,
            TableBackend::Mongo(MongoTable::new(&client, &database, SPACES_COLLECTION)),
            TableBackend::Mongo(MongoTable::new(&client, &database, REVIEWS_COLLECTION)),
            KeyValueBackend::Mongo(MongoKeyValueStore::new(
                &client,
                &database,
                PREFERENCES_COLLECTION,
            )),
        )
        .await)
    }

    pub async fn in_memory(
        config: AppConfig,
        spaces: MemoryTable<Space>,
        reviews: MemoryTable<Review>,
    ) -> Self {
        Self::initialize(
            config,
            TableBackend::Memory(spaces),
            TableBackend::Memory(reviews),
            KeyValueBackend::Memory(MemoryKeyValueStore::default()),
        )
        .await
    }
}
