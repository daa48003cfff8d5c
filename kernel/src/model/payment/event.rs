use crate::model::{
    id::{EventId, UserId},
    payment::PaymentProvider,
};
use derive_new::new;

#[derive(Debug, Clone, new)]
pub struct SettlePayment {
    pub event_id: EventId,
    pub user_id: UserId,
    pub amount: i64,
    pub provider: PaymentProvider,
    // ゲートウェイ側の一意なトランザクション ID。再送検知の冪等キー
    pub transaction_id: String,
}
