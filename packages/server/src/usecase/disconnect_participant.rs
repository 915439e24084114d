//! UseCase: 参加者切断処理（退室と退室通知）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectParticipantUseCase::execute() メソッド
//! - 退室処理（レジストリからの削除、空ルームの削除、残りのメンバーへの userLeft 通知）
//!
//! ### なぜこのテストが必要か
//! - 空になったルームがレジストリに残らないことを保証
//! - 残ったメンバーにだけ userLeft が 1 回届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：2 人のうち 1 人が退室
//! - エッジケース：最後の 1 人が退室（通知対象なし、ルーム削除）
//! - 異常系：未登録の接続の退室

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, Departure, DisplayLabel, RoomRepository},
    infrastructure::dto::Envelope,
};

use super::{
    error::DisconnectError,
    fan_out::{FanOutReport, fan_out_envelope},
};

/// 退室の結果
#[derive(Debug, Clone)]
pub struct Leave {
    pub departure: Departure,
    /// userLeft の送信結果（ルームが削除された場合は空）
    pub notified: FanOutReport,
}

/// 参加者切断のユースケース
pub struct DisconnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl DisconnectParticipantUseCase {
    /// 新しい DisconnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 退室を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断された接続の ID
    ///
    /// # Returns
    ///
    /// * `Ok(Leave)` - 退室成功
    /// * `Err(DisconnectError)` - 接続が登録されていない
    pub async fn execute(&self, connection_id: &ConnectionId) -> Result<Leave, DisconnectError> {
        // 1. レジストリから削除（最後の 1 人ならルームも削除される）
        let departure = self
            .repository
            .unregister(connection_id)
            .await
            .map_err(|_| DisconnectError::NotRegistered(connection_id.clone()))?;

        tracing::info!(
            "Connection '{}' disconnected from room '{}'. Remaining clients: {}",
            connection_id,
            departure.room_id,
            departure.remaining
        );

        // 2. 削除時点で残っていたメンバーへ退室を通知
        let notified = if departure.survivors.is_empty() {
            FanOutReport::default()
        } else {
            let left = Envelope::user_left(DisplayLabel::departed_guest().into_string());
            fan_out_envelope(&departure.survivors, &left)
        };

        Ok(Leave {
            departure,
            notified,
        })
    }
}
