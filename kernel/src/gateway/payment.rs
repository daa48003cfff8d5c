use crate::model::checkout::{event::CreateCheckoutSession, CheckoutSession};
use async_trait::async_trait;
use shared::error::AppResult;

// 外部決済ゲートウェイの抽象。実装は adapter 側に置く
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    // チェックアウトセッションを作成し、リダイレクト先 URL を返す。
    // ローカルストアへの書き込みは一切行わない
    async fn create_checkout_session(
        &self,
        event: CreateCheckoutSession,
    ) -> AppResult<CheckoutSession>;

    // 決済通知の署名を生バイト列に対して検証する。
    // 構造化フィールドのパースより先に呼ぶこと
    fn verify_notification_signature(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> AppResult<()>;
}
