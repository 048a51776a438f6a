use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::handlers::{protected::courses, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Full application router: public routes, bearer-protected course API, global layers
pub fn app(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        // Protected API
        .merge(course_routes(state.clone()))
        .with_state(state)
        .layer(DefaultBodyLimit::max(config.server.max_request_size_bytes));

    let router = if config.security.enable_cors {
        router.layer(cors_layer(config))
    } else {
        router
    };

    if config.server.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn course_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/api/courses",
            get(courses::courses_list).post(courses::course_create),
        )
        .route(
            "/api/courses/instructor/:instructor_id",
            get(courses::courses_by_instructor),
        )
        .route("/api/courses/findByName/:name", get(courses::courses_by_name))
        .route("/api/courses/student/:student_id", get(courses::courses_by_student))
        .route("/api/courses/enroll/:id", post(courses::course_enroll))
        .route(
            "/api/courses/:id",
            get(courses::course_get)
                .patch(courses::course_patch)
                .delete(courses::course_delete),
        )
        .route_layer(middleware::from_fn_with_state(state, jwt_auth_middleware))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.cors_is_permissive() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
}
