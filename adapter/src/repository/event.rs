use crate::database::{model::event::EventRow, ConnectionPool};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{event::Event, id::EventId};
use kernel::repository::event::EventRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct EventRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EventRepository for EventRepositoryImpl {
    // イベントを取得する。参加者数は participants テーブルから導出する
    // （独立したカウンタ列は持たない）
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>> {
        let row: Option<EventRow> = sqlx::query_as(
            r#"
                SELECT
                e.event_id,
                e.host_id,
                e.title,
                e.event_status,
                e.event_date,
                e.joining_fee,
                e.max_participants,
                COUNT(p.participant_id) AS participant_count
                FROM events AS e
                LEFT JOIN participants AS p ON p.event_id = e.event_id
                WHERE e.event_id = $1
                GROUP BY e.event_id
                ;
            "#,
        )
        .bind(event_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Event::try_from).transpose()
    }
}
