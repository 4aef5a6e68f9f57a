//! HTTP facade over the recommendation engine.

mod error;
mod handlers;
mod request_id;
mod routes;
mod state;

pub use error::{ApiError, ApiResult};
pub use handlers::{ColdStartResponse, FeedResponse};
pub use request_id::{REQUEST_ID_HEADER, RequestId};
pub use routes::create_router;
pub use state::AppState;
