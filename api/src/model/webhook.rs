use kernel::model::id::{EventId, UserId};
use serde::Deserialize;
use std::str::FromStr;

// 決済通知の署名が入る HTTP ヘッダー
pub const SIGNATURE_HEADER: &str = "stripe-signature";

// 決済が完了し全額支払われたことを表す通知種別
pub const CHECKOUT_COMPLETED: &str = "checkout.session.completed";

// 通知種別だけを先に取り出すための最小の型。
// 対象外の種別は object の形が checkout セッションとは異なるため、
// 全体をパースする前にこの型で振り分ける
#[derive(Debug, Deserialize)]
pub struct NotificationKind {
    #[serde(rename = "type")]
    pub event_type: String,
}

#[derive(Debug, Deserialize)]
pub struct GatewayNotification {
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: NotificationData,
}

#[derive(Debug, Deserialize)]
pub struct NotificationData {
    pub object: CheckoutSessionPayload,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSessionPayload {
    // ゲートウェイ側の一意なセッション ID。冪等キーとして使う
    pub id: String,
    pub payment_status: Option<String>,
    pub amount_total: Option<i64>,
    #[serde(default)]
    pub metadata: SessionMetadata,
}

impl CheckoutSessionPayload {
    pub fn is_paid(&self) -> bool {
        self.payment_status.as_deref() == Some("paid")
    }
}

// チェックアウト作成時に埋め込んだ相関メタデータ。
// ゲートウェイ由来の自由形式の key/value をここで型付けして受ける
#[derive(Debug, Default, Deserialize)]
pub struct SessionMetadata {
    #[serde(rename = "eventId")]
    pub event_id: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
}

impl SessionMetadata {
    // どちらかが欠けている・解釈できない場合は None（通知は無視される）
    pub fn correlation(&self) -> Option<(EventId, UserId)> {
        let event_id = EventId::from_str(self.event_id.as_deref()?).ok()?;
        let user_id = UserId::from_str(self.user_id.as_deref()?).ok()?;
        Some((event_id, user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_completed_notification() {
        let body = r#"{
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_test_123",
                    "payment_status": "paid",
                    "amount_total": 2500,
                    "metadata": {
                        "eventId": "0e84b168-2a8e-4c29-8fd2-2e5c6a7f4a94",
                        "userId": "5c61a2b0-9f54-4f8e-b6a9-67a9e3f2d101"
                    }
                }
            }
        }"#;
        let notification: GatewayNotification = serde_json::from_str(body).unwrap();
        assert_eq!(notification.event_type, CHECKOUT_COMPLETED);
        assert!(notification.data.object.is_paid());
        assert_eq!(notification.data.object.amount_total, Some(2500));
        assert!(notification.data.object.metadata.correlation().is_some());
    }

    #[test]
    fn missing_metadata_yields_no_correlation() {
        let body = r#"{
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_test_456",
                    "payment_status": "paid"
                }
            }
        }"#;
        let notification: GatewayNotification = serde_json::from_str(body).unwrap();
        assert!(notification.data.object.metadata.correlation().is_none());
    }

    #[test]
    fn partial_metadata_yields_no_correlation() {
        let body = r#"{
            "type": "checkout.session.completed",
            "data": {
                "object": {
                    "id": "cs_test_789",
                    "payment_status": "paid",
                    "metadata": { "eventId": "0e84b168-2a8e-4c29-8fd2-2e5c6a7f4a94" }
                }
            }
        }"#;
        let notification: GatewayNotification = serde_json::from_str(body).unwrap();
        assert!(notification.data.object.metadata.correlation().is_none());
    }

    #[test]
    fn unpaid_session_is_not_paid() {
        let body = r#"{
            "type": "checkout.session.completed",
            "data": {
                "object": { "id": "cs_test_0", "payment_status": "unpaid" }
            }
        }"#;
        let notification: GatewayNotification = serde_json::from_str(body).unwrap();
        assert!(!notification.data.object.is_paid());
    }
}
