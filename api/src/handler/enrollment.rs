use crate::{extractor::AuthorizedUser, model::enrollment::JoinEventResponse};
use axum::{
    extract::{Path, State},
    Json,
};
use kernel::model::{
    enrollment::{event::JoinEvent, EnrollmentRejection, JoinOutcome},
    id::EventId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// 無料イベントへの参加登録を行う。
//
// 事前チェックはすべてトランザクション外の読み取りであり、あくまで
// 一般的なケースを早期に弾くためのもの。同時リクエストに対する正しさは
// 最後の join 呼び出し内の一意制約が保証する
pub async fn join_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<JoinEventResponse>> {
    let event = registry
        .event_repository()
        .find_by_id(event_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Event not found".into()))?;

    // ① 開催状態・開催日・主催者チェック
    if let Err(rejection) = event.validate_join(chrono::Utc::now(), user.id()) {
        return Ok(Json(JoinEventResponse::rejected(rejection)));
    }

    // ② 有料イベントはチェックアウト経由でしか参加できない
    if !event.is_free() {
        return Ok(Json(JoinEventResponse::rejected(
            EnrollmentRejection::RequiresPayment,
        )));
    }

    // ③ 重複参加チェック
    if registry
        .enrollment_repository()
        .already_joined(event_id, user.id())
        .await?
    {
        return Ok(Json(JoinEventResponse::rejected(
            EnrollmentRejection::AlreadyJoined,
        )));
    }

    // ④ 定員チェック
    if !event.has_room() {
        return Ok(Json(JoinEventResponse::rejected(EnrollmentRejection::Full)));
    }

    // ⑤ 参加レコードの挿入と参加回数の加算（ここだけがトランザクション）
    let outcome = registry
        .enrollment_repository()
        .join(JoinEvent::new(event_id, user.id()))
        .await?;

    match outcome {
        JoinOutcome::Joined => Ok(Json(JoinEventResponse::joined())),
        JoinOutcome::Rejected(rejection) => Ok(Json(JoinEventResponse::rejected(rejection))),
    }
}
