use crate::model::{event::Event, id::EventId};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait EventRepository: Send + Sync {
    // イベントを参加者数付きで取得する
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
}
