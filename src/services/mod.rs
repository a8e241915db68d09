pub mod auth_service;
pub mod distance_service;
pub mod geolocation_service;
pub mod preferences_service;
pub mod ranking_service;
pub mod review_store;
pub mod search_service;
pub mod space_store;
