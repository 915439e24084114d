//! UseCase 層のエラー定義

use thiserror::Error;

use crate::domain::{ConnectionId, RepositoryError, RoomId};

/// 参加者接続時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectError {
    /// 定員に達している（キューには入れず拒否する）
    #[error("Room '{0}' is full")]
    RoomFull(RoomId),

    #[error("Connection '{0}' is already registered")]
    AlreadyRegistered(ConnectionId),

    /// 入室とは無関係なレジストリのエラー（満室として扱わない）
    #[error("Registry error: {0}")]
    Registry(RepositoryError),
}

/// 参加者切断時のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DisconnectError {
    #[error("Connection '{0}' is not registered")]
    NotRegistered(ConnectionId),
}

/// メッセージ中継時のエラー（いずれもそのメッセージ 1 件だけを破棄する）
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    /// エンベロープとしてパースできない
    #[error("Malformed message: {0}")]
    Malformed(String),

    /// サーバーだけが送信する種類をクライアントが送ってきた
    #[error("Message type '{0}' cannot be relayed")]
    NotRelayable(&'static str),

    /// 送信者がどのルームにも登録されていない
    #[error("Connection '{0}' is not admitted to any room")]
    NotAdmitted(ConnectionId),
}

/// 個々の宛先への送信エラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeliveryError {
    /// 宛先の送信キューが既に閉じている（切断処理中）
    #[error("Receiver closed")]
    ReceiverClosed,
}
