use strum::AsRefStr;

pub mod event;

// 参加リクエストの拒否理由。呼び出し側はこのコードをそのまま
// レスポンスに載せるため、文言解析を前提にしない
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EnrollmentRejection {
    NotOpen,
    AlreadyEnded,
    IsHost,
    RequiresPayment,
    AlreadyJoined,
    Full,
}

#[derive(Debug, PartialEq, Eq)]
pub enum JoinOutcome {
    Joined,
    Rejected(EnrollmentRejection),
}
