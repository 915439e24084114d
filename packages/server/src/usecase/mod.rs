//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層から呼び出され、Domain 層を操作します。

pub mod connect_participant;
pub mod disconnect_participant;
pub mod error;
pub mod fan_out;
pub mod relay_message;

#[cfg(test)]
pub(crate) mod testing;

pub use connect_participant::{Admission, ConnectParticipantUseCase};
pub use disconnect_participant::{DisconnectParticipantUseCase, Leave};
pub use error::{ConnectError, DeliveryError, DisconnectError, RelayError};
pub use fan_out::{Delivery, FanOutReport, fan_out};
pub use relay_message::RelayMessageUseCase;
