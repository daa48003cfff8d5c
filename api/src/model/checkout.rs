use garde::Validate;
use kernel::model::{checkout::CheckoutSession, id::EventId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCheckoutRequest {
    #[garde(skip)]
    pub event_id: EventId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    pub url: String,
}

impl From<CheckoutSession> for CheckoutSessionResponse {
    fn from(value: CheckoutSession) -> Self {
        let CheckoutSession { url } = value;
        Self { url }
    }
}
