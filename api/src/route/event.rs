use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::enrollment::join_event;

pub fn build_event_routers() -> Router<AppRegistry> {
    let events_routers = Router::new().route("/:event_id/join", post(join_event));

    Router::new().nest("/events", events_routers)
}
