pub mod event;

#[derive(Debug)]
pub struct CheckoutSession {
    // ゲートウェイ側の決済ページへのリダイレクト先。中身には関知しない
    pub url: String,
}
