use kernel::model::{
    event::{Event, EventStatus},
    id::{EventId, UserId},
};
use shared::error::AppError;
use sqlx::types::chrono::{DateTime, Utc};
use std::str::FromStr;

// イベントを参加者数付きで取得する際に使う型
#[derive(sqlx::FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub host_id: UserId,
    pub title: String,
    pub event_status: String,
    pub event_date: DateTime<Utc>,
    pub joining_fee: i64,
    pub max_participants: i32,
    pub participant_count: i64,
}

impl TryFrom<EventRow> for Event {
    type Error = AppError;

    fn try_from(value: EventRow) -> Result<Self, Self::Error> {
        let EventRow {
            event_id,
            host_id,
            title,
            event_status,
            event_date,
            joining_fee,
            max_participants,
            participant_count,
        } = value;
        let status = EventStatus::from_str(&event_status).map_err(|_| {
            AppError::ConversionEntityError(format!("不明なイベント状態です: {event_status}"))
        })?;
        Ok(Event {
            event_id,
            host_id,
            title,
            status,
            date: event_date,
            joining_fee,
            max_participants,
            participant_count,
        })
    }
}
