//! Segment constraints attached to individual routes.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{rejection::PathRejection, Path, Request, State},
    http::StatusCode,
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::MethodRouter,
};

use crate::routing::matcher::SegmentMatcher;

/// Requires the capture named `param` to satisfy `matcher`.
#[derive(Debug, Clone)]
pub struct PathConstraint {
    param: &'static str,
    matcher: Arc<dyn SegmentMatcher>,
}

impl PathConstraint {
    pub fn new(param: &'static str, matcher: impl SegmentMatcher + 'static) -> Self {
        Self {
            param,
            matcher: Arc::new(matcher),
        }
    }

    /// True if the captured parameters satisfy this constraint.
    pub fn allows(&self, params: &HashMap<String, String>) -> bool {
        params
            .get(self.param)
            .is_some_and(|segment| self.matcher.matches(segment))
    }
}

/// Attach `constraint` to a route. Requests whose captures fail it get a 404.
pub fn constrain<S>(route: MethodRouter<S>, constraint: PathConstraint) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    route.route_layer(middleware::from_fn_with_state(constraint, enforce))
}

async fn enforce(
    State(constraint): State<PathConstraint>,
    params: Result<Path<HashMap<String, String>>, PathRejection>,
    request: Request,
    next: Next,
) -> Response {
    match params {
        Ok(Path(params)) if constraint.allows(&params) => next.run(request).await,
        _ => {
            tracing::debug!(
                param = constraint.param,
                path = %request.uri().path(),
                "Route constraint not satisfied"
            );
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::matcher::DigitsMatcher;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    fn app() -> Router {
        Router::new().route(
            "/count/{n}",
            constrain(get(|| async { "ok" }), PathConstraint::new("n", DigitsMatcher)),
        )
    }

    async fn status_of(uri: &str) -> StatusCode {
        app()
            .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_matching_segment_reaches_handler() {
        assert_eq!(status_of("/count/12").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_failing_segment_is_not_found() {
        assert_eq!(status_of("/count/twelve").await, StatusCode::NOT_FOUND);
        assert_eq!(status_of("/count/1a").await, StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_missing_param_is_not_allowed() {
        let constraint = PathConstraint::new("n", DigitsMatcher);
        assert!(!constraint.allows(&HashMap::new()));
    }
}
