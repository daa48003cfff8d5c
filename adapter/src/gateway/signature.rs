use constant_time_eq::constant_time_eq;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use shared::error::{AppError, AppResult};

type HmacSha256 = Hmac<Sha256>;

// 署名ヘッダーは `t=<unix秒>,v1=<hex(HMAC-SHA256("t.body"))>` 形式。
// 署名を生のリクエストボディに対して検証する。
// タイムスタンプが許容範囲外の通知はリプレイとみなして拒否する
pub fn verify(
    secret: &str,
    payload: &[u8],
    signature_header: &str,
    now_unix: i64,
    tolerance_secs: i64,
) -> AppResult<()> {
    let mut timestamp: Option<i64> = None;
    let mut candidates: Vec<&str> = Vec::new();

    for part in signature_header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", v)) => timestamp = v.parse().ok(),
            Some(("v1", v)) => candidates.push(v),
            _ => {}
        }
    }

    let Some(timestamp) = timestamp else {
        return Err(AppError::InvalidSignatureError(
            "署名ヘッダーの形式が不正です".into(),
        ));
    };
    if candidates.is_empty() {
        return Err(AppError::InvalidSignatureError(
            "署名ヘッダーに v1 署名がありません".into(),
        ));
    }
    if (now_unix - timestamp).abs() > tolerance_secs {
        return Err(AppError::InvalidSignatureError(
            "署名のタイムスタンプが許容範囲外です".into(),
        ));
    }

    let expected = compute(secret, payload, timestamp);
    if candidates
        .iter()
        .any(|c| constant_time_eq(c.as_bytes(), expected.as_bytes()))
    {
        Ok(())
    } else {
        Err(AppError::InvalidSignatureError(
            "署名が一致しません".into(),
        ))
    }
}

// 検証と同じ方式でヘッダー値を生成する（テストやローカルでの動作確認用）
pub fn sign(secret: &str, payload: &[u8], timestamp: i64) -> String {
    format!("t={timestamp},v1={}", compute(secret, payload, timestamp))
}

fn compute(secret: &str, payload: &[u8], timestamp: i64) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    mac.finalize()
        .into_bytes()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}
