use async_trait::async_trait;
use kernel::gateway::payment::PaymentGateway;
use kernel::model::checkout::{event::CreateCheckoutSession, CheckoutSession};
use serde::Deserialize;
use shared::{
    config::GatewayConfig,
    error::{AppError, AppResult},
};

pub mod signature;

// Stripe 互換 API を話す決済ゲートウェイクライアント
pub struct StripeGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl StripeGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[derive(Deserialize)]
struct CreatedSession {
    url: Option<String>,
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    async fn create_checkout_session(
        &self,
        event: CreateCheckoutSession,
    ) -> AppResult<CheckoutSession> {
        // joining_fee はドル単位で保持しているため、unit_amount はセント換算
        let unit_amount = event.joining_fee * 100;
        let params: Vec<(&str, String)> = vec![
            ("mode", "payment".into()),
            ("payment_method_types[0]", "card".into()),
            ("line_items[0][price_data][currency]", "usd".into()),
            (
                "line_items[0][price_data][unit_amount]",
                unit_amount.to_string(),
            ),
            (
                "line_items[0][price_data][product_data][name]",
                event.event_title,
            ),
            ("line_items[0][quantity]", "1".into()),
            (
                "success_url",
                format!(
                    "{}/payment/success?session_id={{CHECKOUT_SESSION_ID}}",
                    self.config.app_base_url
                ),
            ),
            (
                "cancel_url",
                format!("{}/payment/cancel", self.config.app_base_url),
            ),
            // 決済通知からどの参加登録かを復元するための相関メタデータ
            ("metadata[eventId]", event.event_id.to_string()),
            ("metadata[userId]", event.user_id.to_string()),
        ];

        let res = self
            .client
            .post(format!(
                "{}/v1/checkout/sessions",
                self.config.api_base_url
            ))
            .basic_auth(&self.config.secret_key, None::<&str>)
            .form(&params)
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!(
                    "チェックアウトセッションを作成できませんでした: {e}"
                ))
            })?;

        if !res.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "決済ゲートウェイがエラーを返しました: {}",
                res.status()
            )));
        }

        let session: CreatedSession = res.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!(
                "決済ゲートウェイの応答を読み取れませんでした: {e}"
            ))
        })?;

        let url = session.url.ok_or_else(|| {
            AppError::ExternalServiceError("決済ゲートウェイの応答に URL がありません".into())
        })?;

        Ok(CheckoutSession { url })
    }

    fn verify_notification_signature(
        &self,
        payload: &[u8],
        signature_header: &str,
    ) -> AppResult<()> {
        signature::verify(
            &self.config.webhook_secret,
            payload,
            signature_header,
            chrono::Utc::now().timestamp(),
            self.config.signature_tolerance_secs,
        )
    }
}
