use axum::{Router, routing::get};

/// Composes the resource routers under one app with a health probe.
pub fn app(routers: impl IntoIterator<Item = Router>) -> Router {
    routers
        .into_iter()
        .fold(Router::new().route("/health", get(|| async { "ok" })), |app, r| app.merge(r))
}
