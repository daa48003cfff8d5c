use crate::database::ConnectionPool;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    enrollment::{event::JoinEvent, EnrollmentRejection, JoinOutcome},
    id::{EventId, ParticipantId, UserId},
};
use kernel::repository::enrollment::EnrollmentRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct EnrollmentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl EnrollmentRepository for EnrollmentRepositoryImpl {
    async fn already_joined(&self, event_id: EventId, user_id: UserId) -> AppResult<bool> {
        let row = sqlx::query(
            r#"
                SELECT participant_id
                FROM participants
                WHERE event_id = $1 AND user_id = $2
                ;
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.is_some())
    }

    // 参加登録を行う、すなわち participants テーブルへのレコード追加と
    // users.events_attended の加算を 1 トランザクションで行う。
    //
    // 事前チェックはハンドラ側で済んでいるが、それはあくまで参考情報であり、
    // 同一ユーザーの同時リクエストに対する正しさはここの
    // (event_id, user_id) 一意制約が保証する。制約違反は
    // 「すでに参加済み」という個別の結果として返す
    async fn join(&self, event: JoinEvent) -> AppResult<JoinOutcome> {
        let mut tx = self.db.begin().await?;

        let participant_id = ParticipantId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO participants (participant_id, event_id, user_id)
                VALUES ($1, $2, $3)
                ;
            "#,
        )
        .bind(participant_id)
        .bind(event.event_id)
        .bind(event.user_id)
        .execute(&mut *tx)
        .await;

        match res {
            Ok(res) => {
                if res.rows_affected() < 1 {
                    return Err(AppError::NoRowsAffectedError(
                        "No participant record has been created".into(),
                    ));
                }
            }
            Err(e) if is_unique_violation(&e) => {
                // 並行リクエストに先を越された場合。トランザクションは破棄される
                return Ok(JoinOutcome::Rejected(EnrollmentRejection::AlreadyJoined));
            }
            Err(e) => return Err(AppError::SpecificOperationError(e)),
        }

        let res = sqlx::query(
            r#"
                UPDATE users
                SET events_attended = events_attended + 1
                WHERE user_id = $1
                ;
            "#,
        )
        .bind(event.user_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "No user record has been updated".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(JoinOutcome::Joined)
    }
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(de) if de.is_unique_violation())
}
