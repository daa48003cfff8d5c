use strum::{AsRefStr, EnumString};

pub mod event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentProvider {
    Stripe,
}

// Payment の状態遷移はこのコアでは {absent} -> SUCCESS のみ
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Success,
}

#[derive(Debug, PartialEq, Eq)]
pub enum SettlementOutcome {
    Committed,
    // 同一 transaction_id の通知が再送されたため、何も書き込まなかった
    AlreadyProcessed,
}
