//! UseCase: メッセージ中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayMessageUseCase::execute() メソッド
//! - 受信したエンベロープを同じルームの他のメンバーへそのまま転送する処理
//!
//! ### なぜこのテストが必要か
//! - 転送内容が送信されたテキストと完全に一致することを保証
//! - 別ルームへの漏れがないこと（ルーム間の分離）を確認
//! - 不正なメッセージがそのメッセージだけ破棄されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：chatMessage / videoEvent の転送、送信順序の維持
//! - 異常系：JSON でない、不明な type、サーバー専用の type、未登録の送信者
//! - エッジケース：ルームに送信者しかいない（転送先なし）

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, RoomRepository},
    infrastructure::dto::Envelope,
};

use super::{
    error::RelayError,
    fan_out::{FanOutReport, fan_out},
};

/// メッセージ中継のユースケース
pub struct RelayMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl RelayMessageUseCase {
    /// 新しい RelayMessageUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// メッセージ中継を実行
    ///
    /// `text` は加工せずにそのまま転送します。パースは形式の検証とログ出力のためだけに行います。
    ///
    /// # Arguments
    ///
    /// * `from` - 送信者の接続 ID
    /// * `text` - 受信したテキストフレーム
    ///
    /// # Returns
    ///
    /// * `Ok(FanOutReport)` - 宛先ごとの送信結果
    /// * `Err(RelayError)` - このメッセージは破棄された（接続は維持する）
    pub async fn execute(&self, from: &ConnectionId, text: &str) -> Result<FanOutReport, RelayError> {
        // 1. 形式の検証
        let envelope = Envelope::parse(text).map_err(|e| RelayError::Malformed(e.to_string()))?;
        if !envelope.is_relayable() {
            return Err(RelayError::NotRelayable(envelope.kind()));
        }

        // 2. 送信者のルームを解決
        let room_id = self
            .repository
            .room_of(from)
            .await
            .ok_or_else(|| RelayError::NotAdmitted(from.clone()))?;

        match &envelope {
            Envelope::VideoEvent { action, time, .. } => {
                tracing::info!("Video event in room {}: {:?} {}", room_id, action, time);
            }
            Envelope::ChatMessage {
                username, message, ..
            } => {
                tracing::info!(
                    "Chat message in room {} from {}: {}",
                    room_id,
                    username.as_deref().unwrap_or("Guest"),
                    message
                );
            }
            other => {
                tracing::debug!("Relaying '{}' in room {}", other.kind(), room_id);
            }
        }

        // 3. 送信者以外のメンバーへそのまま転送
        let recipients = self.repository.members_of(&room_id, from).await;
        Ok(fan_out(&recipients, text))
    }
}
