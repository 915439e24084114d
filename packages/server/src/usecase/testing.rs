//! UseCase テスト用の Repository ラッパー
//!
//! 登録・削除の直後で一時停止させ、その間に別の接続の処理を割り込ませるために使います。

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::{
    domain::{
        Admitted, ClientSender, ConnectionId, Departure, Recipient, RepositoryError, Room, RoomId,
        RoomRepository, Timestamp,
    },
    infrastructure::repository::InMemoryRoomRepository,
};

/// 次の register / unregister の直後で停止する Repository
pub struct PausingRoomRepository {
    inner: Arc<InMemoryRoomRepository>,
    pause_next_register: AtomicBool,
    pause_next_unregister: AtomicBool,
    /// 停止したことを通知する
    pub paused: Notify,
    /// 停止を解除する
    pub resume: Notify,
}

impl PausingRoomRepository {
    pub fn new(inner: Arc<InMemoryRoomRepository>) -> Self {
        Self {
            inner,
            pause_next_register: AtomicBool::new(false),
            pause_next_unregister: AtomicBool::new(false),
            paused: Notify::new(),
            resume: Notify::new(),
        }
    }

    pub fn pause_after_next_register(&self) {
        self.pause_next_register.store(true, Ordering::SeqCst);
    }

    pub fn pause_after_next_unregister(&self) {
        self.pause_next_unregister.store(true, Ordering::SeqCst);
    }

    async fn pause_if(&self, flag: &AtomicBool) {
        if flag.swap(false, Ordering::SeqCst) {
            self.paused.notify_one();
            self.resume.notified().await;
        }
    }
}

#[async_trait]
impl RoomRepository for PausingRoomRepository {
    async fn register(
        &self,
        room_id: RoomId,
        connection_id: ConnectionId,
        sender: ClientSender,
        joined_at: Timestamp,
    ) -> Result<Admitted, RepositoryError> {
        let result = self
            .inner
            .register(room_id, connection_id, sender, joined_at)
            .await;
        self.pause_if(&self.pause_next_register).await;
        result
    }

    async fn unregister(
        &self,
        connection_id: &ConnectionId,
    ) -> Result<Departure, RepositoryError> {
        let result = self.inner.unregister(connection_id).await;
        self.pause_if(&self.pause_next_unregister).await;
        result
    }

    async fn members_of(&self, room_id: &RoomId, exclude: &ConnectionId) -> Vec<Recipient> {
        self.inner.members_of(room_id, exclude).await
    }

    async fn room_of(&self, connection_id: &ConnectionId) -> Option<RoomId> {
        self.inner.room_of(connection_id).await
    }

    async fn get_room(&self, room_id: &RoomId) -> Option<Room> {
        self.inner.get_room(room_id).await
    }

    async fn count_rooms(&self) -> usize {
        self.inner.count_rooms().await
    }
}
