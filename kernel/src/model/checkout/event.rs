use crate::model::id::{EventId, UserId};
use derive_new::new;

// event_id と user_id はセッションの相関メタデータとしてゲートウェイに渡し、
// 決済通知の受信時にどの参加登録かを復元するために使う
#[derive(Debug, new)]
pub struct CreateCheckoutSession {
    pub event_id: EventId,
    pub user_id: UserId,
    pub event_title: String,
    pub joining_fee: i64,
}
