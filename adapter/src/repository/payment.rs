use crate::database::ConnectionPool;
use crate::repository::enrollment::is_unique_violation;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::{ParticipantId, PaymentId},
    payment::{event::SettlePayment, PaymentStatus, SettlementOutcome},
};
use kernel::repository::payment::PaymentRepository;
use shared::error::{AppError, AppResult};

#[derive(new)]
pub struct PaymentRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl PaymentRepository for PaymentRepositoryImpl {
    // 決済確定操作を行う。同じ通知が何度届いても書き込みは一度きりになるよう、
    // transaction_id の既存チェックと各書き込みを同一トランザクションに収める。
    // チェックをすり抜けた並行配送は payments.transaction_id の一意制約が止める
    async fn settle(&self, event: SettlePayment) -> AppResult<SettlementOutcome> {
        let mut tx = self.db.begin().await?;

        // トランザクション分離レベルを SERIALIZABLE に設定する
        self.set_transaction_serializable(&mut tx).await?;

        let existing = sqlx::query(
            r#"
                SELECT payment_id
                FROM payments
                WHERE transaction_id = $1
                ;
            "#,
        )
        .bind(&event.transaction_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        // 再送された通知。何も書き込まずに終了する
        if existing.is_some() {
            return Ok(SettlementOutcome::AlreadyProcessed);
        }

        let payment_id = PaymentId::new();
        let res = sqlx::query(
            r#"
                INSERT INTO payments
                (payment_id, event_id, user_id, amount, provider,
                payment_status, transaction_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                ;
            "#,
        )
        .bind(payment_id)
        .bind(event.event_id)
        .bind(event.user_id)
        .bind(event.amount)
        .bind(event.provider.as_ref())
        .bind(PaymentStatus::Success.as_ref())
        .bind(&event.transaction_id)
        .execute(&mut *tx)
        .await;

        match res {
            Ok(res) => {
                if res.rows_affected() < 1 {
                    return Err(AppError::NoRowsAffectedError(
                        "No payment record has been created".into(),
                    ));
                }
            }
            Err(e) if is_unique_violation(&e) => {
                return Ok(SettlementOutcome::AlreadyProcessed);
            }
            Err(e) => return Err(AppError::SpecificOperationError(e)),
        }

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
                // 別のトランザクション ID で同じ参加登録が既に確定している。
                // 決済レコードごとロールバックし、運用での突き合わせ用に記録を残す
                tracing::warn!(
                    transaction_id = %event.transaction_id,
                    event_id = %event.event_id,
                    user_id = %event.user_id,
                    "participant already enrolled; settlement rolled back"
                );
                return Ok(SettlementOutcome::AlreadyProcessed);
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

        Ok(SettlementOutcome::Committed)
    }
}

impl PaymentRepositoryImpl {
    // settle メソッドでのトランザクションを利用するにあたり
    // トランザクション分離レベルを SERIALIZABLE にするために
    // 内部的に使うメソッド
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> AppResult<()> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}
