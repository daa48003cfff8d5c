use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::checkout::start_checkout;

pub fn build_checkout_routers() -> Router<AppRegistry> {
    Router::new().route("/checkout", post(start_checkout))
}
