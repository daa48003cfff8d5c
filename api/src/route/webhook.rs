use axum::{routing::post, Router};
use registry::AppRegistry;

use crate::handler::webhook::handle_settlement_notification;

// ゲートウェイから直接呼ばれるため /api/v1 の外に置き、認証も掛けない
pub fn build_webhook_routers() -> Router<AppRegistry> {
    let webhook_routers = Router::new().route("/payments", post(handle_settlement_notification));

    Router::new().nest("/api/webhooks", webhook_routers)
}
