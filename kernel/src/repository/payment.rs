use crate::model::payment::{event::SettlePayment, SettlementOutcome};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    // 決済確定の書き込みを 1 トランザクションで冪等に行う。
    // transaction_id が既知なら何も書き込まず AlreadyProcessed を返す
    async fn settle(&self, event: SettlePayment) -> AppResult<SettlementOutcome>;
}
