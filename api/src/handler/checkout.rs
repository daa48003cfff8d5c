use crate::{
    extractor::AuthorizedUser,
    model::checkout::{CheckoutSessionResponse, CreateCheckoutRequest},
};
use axum::{extract::State, Json};
use garde::Validate;
use kernel::model::checkout::event::CreateCheckoutSession;
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// 有料イベントのチェックアウトセッションを作成し、リダイレクト先を返す。
//
// 定員や重複参加のチェックは意図的に行わない。セッション作成は支払い完了を
// 保証しないため、ここで席を確保すると放棄されたチェックアウトが
// 席を占有し続けてしまう。確定は決済通知の受信時に行う
pub async fn start_checkout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateCheckoutRequest>,
) -> AppResult<Json<CheckoutSessionResponse>> {
    req.validate(&())?;

    let event = registry
        .event_repository()
        .find_by_id(req.event_id)
        .await?
        .ok_or_else(|| AppError::EntityNotFound("Event not found".into()))?;

    if event.is_free() {
        return Err(AppError::UnprocessableEntity(
            "This event does not require payment".into(),
        ));
    }

    let session = registry
        .payment_gateway()
        .create_checkout_session(CreateCheckoutSession::new(
            event.event_id,
            user.id(),
            event.title,
            event.joining_fee,
        ))
        .await?;

    Ok(Json(session.into()))
}
