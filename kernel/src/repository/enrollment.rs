use crate::model::{
    enrollment::{event::JoinEvent, JoinOutcome},
    id::{EventId, UserId},
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait EnrollmentRepository: Send + Sync {
    // (event_id, user_id) の参加レコードが既に存在するかを調べる（事前チェック用）
    async fn already_joined(&self, event_id: EventId, user_id: UserId) -> AppResult<bool>;
    // 参加レコードの挿入と参加回数の加算を 1 トランザクションで行う。
    // 一意制約違反は AlreadyJoined の拒否として返す
    async fn join(&self, event: JoinEvent) -> AppResult<JoinOutcome>;
}
