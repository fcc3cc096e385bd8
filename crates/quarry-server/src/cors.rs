use std::str::FromStr;

use http::header::HeaderName;
use http::{HeaderValue, Method};
use quarry_config::{AnyOrArray, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Translate the `[server.cors]` table into a tower-http layer
///
/// Entries that are not valid origins, methods or header names are dropped
/// with a warning.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = match parsed::<HeaderValue>("origin", &config.origins) {
        None => AllowOrigin::any(),
        Some(list) => AllowOrigin::list(list),
    };

    let methods = match parsed::<Method>("method", &config.methods) {
        None => AllowMethods::any(),
        Some(list) => AllowMethods::list(list),
    };

    let headers = match parsed::<HeaderName>("header", &config.headers) {
        None => AllowHeaders::any(),
        Some(list) => AllowHeaders::list(list),
    };

    let layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(config.credentials);

    match config.max_age_duration() {
        Some(max_age) => layer.max_age(max_age),
        None => layer,
    }
}

/// `None` for a wildcard, otherwise every entry that parses
fn parsed<T: FromStr>(kind: &str, values: &AnyOrArray) -> Option<Vec<T>> {
    let AnyOrArray::List(values) = values else {
        return None;
    };

    let list = values
        .iter()
        .filter_map(|value| {
            let parsed = value.parse().ok();
            if parsed.is_none() {
                tracing::warn!(kind, value = %value, "ignoring invalid CORS entry");
            }
            parsed
        })
        .collect();

    Some(list)
}
