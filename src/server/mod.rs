//! HTTP server layer for the thumbnail service.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         HTTP Layer                              │
//! │            GET /thumbnail?url=<src>&x=<w>&y=<h>                 │
//! │                                                                 │
//! │        ┌──────────────────┐      ┌──────────────────────┐       │
//! │        │     handlers     │      │        routes        │       │
//! │        │ (params, errors) │      │ (CORS, tracing)      │       │
//! │        └──────────────────┘      └──────────────────────┘       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{
    health_handler, index_handler, thumbnail_handler, AppState, ErrorResponse, HealthResponse,
    ThumbnailQueryParams, DEFAULT_CACHE_MAX_AGE, DEFAULT_MAX_DIMENSION,
};
pub use routes::{create_router, RouterConfig};
