use axum::Router;

/// A service module that contributes HTTP routes.
///
/// Each business module (users, products, cache, ...) implements this trait
/// to register its API endpoints. The binary entry point collects all
/// modules and merges their routes into a single Router.
pub trait Module: Send + Sync {
    /// Module name, used for logging.
    fn name(&self) -> &str;

    /// Return the module's routes. Paths are absolute; the daemon merges
    /// them rather than nesting under a prefix.
    fn routes(&self) -> Router;
}
