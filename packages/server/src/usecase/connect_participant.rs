//! UseCase: 参加者接続処理（ルームへの入室と入室通知）
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ConnectParticipantUseCase::execute() メソッド
//! - 入室処理（定員チェック、ルーム作成、既存メンバーへの userJoined 通知）
//!
//! ### なぜこのテストが必要か
//! - 定員 2 人を超えた参加が拒否され、レジストリが変化しないことを保証
//! - 入室通知が既存メンバーにだけ 1 回届くことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：空のルームへの入室、1 人いるルームへの入室
//! - 異常系：満室のルームへの入室試行

use std::sync::Arc;

use crate::{
    domain::{
        Admitted, ClientSender, ConnectionId, DisplayLabel, RepositoryError, RoomId, RoomRepository,
        Timestamp,
    },
    infrastructure::dto::Envelope,
};

use super::{
    error::ConnectError,
    fan_out::{FanOutReport, fan_out_envelope},
};

/// 入室成功時の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub room_id: RoomId,
    /// 入室後の人数（roomInfo の usersInRoom）
    pub users_in_room: usize,
    /// userJoined の送信結果
    pub notified: FanOutReport,
}

/// 参加者接続のユースケース
pub struct ConnectParticipantUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl ConnectParticipantUseCase {
    /// 新しい ConnectParticipantUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 入室を実行
    ///
    /// # Arguments
    ///
    /// * `room_id` - 接続リクエストから解決したルーム ID
    /// * `connection_id` - サーバーが割り当てた接続 ID
    /// * `sender` - この接続へのメッセージ送信チャンネル
    ///
    /// # Returns
    ///
    /// * `Ok(Admission)` - 入室成功（既存メンバーには userJoined 送信済み）
    /// * `Err(ConnectError::RoomFull)` - 満室のため拒否
    pub async fn execute(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        sender: ClientSender,
    ) -> Result<Admission, ConnectError> {
        // 1. 定員チェックと登録（通知対象も同じ排他領域で取得する）
        let Admitted { room, others } = self
            .repository
            .register(
                room_id.clone(),
                connection_id.clone(),
                sender,
                Timestamp::now(),
            )
            .await
            .map_err(|e| match e {
                RepositoryError::RoomFull(id) => ConnectError::RoomFull(id),
                RepositoryError::AlreadyRegistered(id) => ConnectError::AlreadyRegistered(id),
                e @ RepositoryError::ConnectionNotFound(_) => ConnectError::Registry(e),
            })?;

        let users_in_room = room.occupancy();
        tracing::info!(
            "Connection '{}' joined room '{}'. Total clients in room: {}",
            connection_id,
            room_id,
            users_in_room
        );

        // 2. 登録時点で既にいたメンバーへ入室を通知
        let joined = Envelope::user_joined(DisplayLabel::joined_guest(users_in_room).into_string());
        let notified = fan_out_envelope(&others, &joined);

        Ok(Admission {
            room_id,
            users_in_room,
            notified,
        })
    }
}
