use crate::model::webhook::{
    GatewayNotification, NotificationKind, CHECKOUT_COMPLETED, SIGNATURE_HEADER,
};
use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use kernel::model::payment::{event::SettlePayment, PaymentProvider, SettlementOutcome};
use kernel::repository::payment::PaymentRepository;
use registry::AppRegistry;
use serde_json::{json, Value};
use shared::error::{AppError, AppResult};
use std::sync::Arc;
use std::time::Duration;

const SETTLE_ATTEMPTS: u32 = 3;
const SETTLE_RETRY_DELAY: Duration = Duration::from_millis(500);

// 決済ゲートウェイからの決済通知を受けるエンドポイント。
// ゲートウェイが直接呼び出すため、セッション認証は掛けない。
//
// 署名検証は構造化フィールドのパースより前に、生のボディに対して行う。
// 検証を通った通知は、対象外の種別・想定外の形・メタデータ欠落であっても
// 200 で受領を返す（そうしないとゲートウェイが再送を繰り返すため）
pub async fn handle_settlement_notification(
    State(registry): State<AppRegistry>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<Json<Value>> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::InvalidSignatureError("署名ヘッダーがありません".into()))?;

    if body.is_empty() {
        return Err(AppError::InvalidSignatureError(
            "リクエストボディが空です".into(),
        ));
    }

    registry
        .payment_gateway()
        .verify_notification_signature(&body, signature)?;

    // 通知種別ごとに object の形が異なるため、まず種別だけを取り出して
    // 対象外の通知を受領だけして捨てる
    let kind: NotificationKind = match serde_json::from_slice(&body) {
        Ok(kind) => kind,
        Err(e) => {
            tracing::warn!(error.message = %e, "acknowledging unparseable notification");
            return Ok(Json(json!({ "received": true })));
        }
    };
    if kind.event_type != CHECKOUT_COMPLETED {
        tracing::info!(
            event_type = %kind.event_type,
            "ignoring notification of irrelevant type"
        );
        return Ok(Json(json!({ "received": true })));
    }

    // 署名検証を通った時点で送り主はゲートウェイと確定しているので、
    // ここから先の想定外の形も再送を促さず、記録を残して受領を返す
    let notification: GatewayNotification = match serde_json::from_slice(&body) {
        Ok(notification) => notification,
        Err(e) => {
            tracing::warn!(
                error.message = %e,
                "checkout notification with unexpected shape"
            );
            return Ok(Json(json!({ "received": true })));
        }
    };

    if !notification.data.object.is_paid() {
        tracing::info!("ignoring checkout notification that is not fully paid");
        return Ok(Json(json!({ "received": true })));
    }

    let object = notification.data.object;
    let Some((event_id, user_id)) = object.metadata.correlation() else {
        // 相関メタデータが欠けた通知はこちらの落ち度ではないので
        // 記録だけ残して受領を返す
        tracing::warn!(
            transaction_id = %object.id,
            "settlement notification without correlation metadata"
        );
        return Ok(Json(json!({ "received": true })));
    };

    // 支払い済みなのに金額が無い通知は不整合。0 円の決済レコードを
    // 残すより、記録だけ残して運用での突き合わせに委ねる
    let Some(amount) = object.amount_total else {
        tracing::warn!(
            transaction_id = %object.id,
            "paid checkout notification without amount_total"
        );
        return Ok(Json(json!({ "received": true })));
    };

    let settle_payment = SettlePayment::new(
        event_id,
        user_id,
        amount,
        PaymentProvider::Stripe,
        object.id,
    );

    // 確定処理の完了を待たずに受領を返す。ローカルの書き込みが遅い・失敗した
    // ことを理由にゲートウェイへ再送を促さないための意図的な非同期境界。
    // 失敗はリトライの後にログへ残し、運用でのリプレイに委ねる
    let repository = registry.payment_repository();
    tokio::spawn(settle_with_retry(repository, settle_payment));

    Ok(Json(json!({ "received": true })))
}

async fn settle_with_retry(repository: Arc<dyn PaymentRepository>, event: SettlePayment) {
    for attempt in 1..=SETTLE_ATTEMPTS {
        match repository.settle(event.clone()).await {
            Ok(SettlementOutcome::Committed) => {
                tracing::info!(
                    transaction_id = %event.transaction_id,
                    "settlement committed"
                );
                return;
            }
            Ok(SettlementOutcome::AlreadyProcessed) => {
                tracing::info!(
                    transaction_id = %event.transaction_id,
                    "duplicate settlement notification ignored"
                );
                return;
            }
            Err(e) => {
                tracing::warn!(
                    transaction_id = %event.transaction_id,
                    attempt,
                    error.message = %e,
                    "settlement attempt failed"
                );
                tokio::time::sleep(SETTLE_RETRY_DELAY * attempt).await;
            }
        }
    }
    tracing::error!(
        transaction_id = %event.transaction_id,
        event_id = %event.event_id,
        user_id = %event.user_id,
        "settlement failed after retries; manual replay required"
    );
}
