use axum::http::Method;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{config::Environment, routes::route_table};

/// Upper bound on a single request, handler and store included
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type HttpTraceLayer = TraceLayer<
    tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>,
    DefaultMakeSpan,
    DefaultOnRequest,
    DefaultOnResponse,
>;

/// Layers wrapped around the dictionary router: request spans, CORS matching
/// the routes registered for `environment`, and the request timeout.
pub fn create_middleware_stack(
    environment: Environment,
) -> ServiceBuilder<
    tower::layer::util::Stack<
        TimeoutLayer,
        tower::layer::util::Stack<
            CorsLayer,
            tower::layer::util::Stack<HttpTraceLayer, tower::layer::util::Identity>,
        >,
    >,
> {
    ServiceBuilder::new()
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(create_cors_layer(environment))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
}

/// Methods a browser may preflight: whatever the route table registers for
/// this mode, plus OPTIONS. In production that leaves GET and OPTIONS.
pub fn cors_methods(environment: Environment) -> Vec<Method> {
    let mut methods = vec![Method::OPTIONS];
    for binding in route_table(environment) {
        if !methods.contains(&binding.method) {
            methods.push(binding.method);
        }
    }
    methods
}

fn create_cors_layer(environment: Environment) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(cors_methods(environment))
        .allow_headers(Any)
        .allow_credentials(false)
}

/// JSON logs filtered by `RUST_LOG`, `info` when unset
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(true)
                .with_target(true)
                .with_thread_ids(true)
                .with_thread_names(true)
        )
        .try_init()?;

    tracing::info!("Structured logging initialized with JSON format");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_methods_follow_route_table() {
        let development = cors_methods(Environment::Development);
        assert_eq!(development, vec![Method::OPTIONS, Method::GET, Method::POST, Method::PUT]);

        let production = cors_methods(Environment::Production);
        assert_eq!(production, vec![Method::OPTIONS, Method::GET]);
    }
}
