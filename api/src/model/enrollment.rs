use kernel::model::enrollment::EnrollmentRejection;
use serde::Serialize;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinEventResponse {
    pub success: bool,
    // 拒否理由コード。呼び出し側はこのコードで分岐し、message は表示専用
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub message: String,
}

impl JoinEventResponse {
    pub fn joined() -> Self {
        Self {
            success: true,
            reason: None,
            message: "Successfully joined the event".into(),
        }
    }

    pub fn rejected(rejection: EnrollmentRejection) -> Self {
        let message = match rejection {
            EnrollmentRejection::NotOpen => "Event is not open for joining",
            EnrollmentRejection::AlreadyEnded => "Event has already ended",
            EnrollmentRejection::IsHost => "Host cannot join their own event",
            EnrollmentRejection::RequiresPayment => "This event requires payment",
            EnrollmentRejection::AlreadyJoined => "You have already joined this event",
            EnrollmentRejection::Full => "Event is already full",
        };
        Self {
            success: false,
            reason: Some(rejection.as_ref().to_string()),
            message: message.into(),
        }
    }
}
