use crate::model::{
    enrollment::EnrollmentRejection,
    id::{EventId, UserId},
};
use chrono::{DateTime, Utc};
use strum::{AsRefStr, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Open,
    Full,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone)]
pub struct Event {
    pub event_id: EventId,
    pub host_id: UserId,
    pub title: String,
    pub status: EventStatus,
    pub date: DateTime<Utc>,
    pub joining_fee: i64,
    pub max_participants: i32,
    // participants テーブルから導出した現在の参加者数
    pub participant_count: i64,
}

impl Event {
    // 参加リクエストを受け付けられる状態かを検査する。
    // 最初に満たされなかった条件の拒否理由を返す
    pub fn validate_join(
        &self,
        now: DateTime<Utc>,
        actor: UserId,
    ) -> Result<(), EnrollmentRejection> {
        match self.status {
            EventStatus::Open => {}
            EventStatus::Full | EventStatus::Completed | EventStatus::Cancelled => {
                return Err(EnrollmentRejection::NotOpen)
            }
        }
        if self.date <= now {
            return Err(EnrollmentRejection::AlreadyEnded);
        }
        if self.host_id == actor {
            return Err(EnrollmentRejection::IsHost);
        }
        Ok(())
    }

    pub fn has_room(&self) -> bool {
        self.participant_count < self.max_participants as i64
    }

    pub fn is_free(&self) -> bool {
        self.joining_fee == 0
    }
}
