pub mod coordinate;
pub mod de;
pub mod fallback;
pub mod preferences;
pub mod review;
pub mod space;
pub mod validation;
