pub mod cached_routes;
pub mod caching;
pub mod eth;
pub mod provider;
pub mod route;

pub use cached_routes::CachedRoutes;
