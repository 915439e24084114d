//! ファンアウト処理
//!
//! 宛先ごとの送信結果を集約して返します。1 件の送信失敗で残りの宛先への
//! 送信が中断されることはありません。

use crate::{
    domain::{ConnectionId, Recipient},
    infrastructure::dto::Envelope,
};

use super::error::DeliveryError;

/// Outcome of pushing one payload to one recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub connection_id: ConnectionId,
    pub result: Result<(), DeliveryError>,
}

/// Per-recipient results of a fan-out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FanOutReport {
    pub deliveries: Vec<Delivery>,
}

impl FanOutReport {
    pub fn delivered(&self) -> usize {
        self.deliveries.iter().filter(|d| d.result.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &Delivery> {
        self.deliveries.iter().filter(|d| d.result.is_err())
    }

    pub fn is_empty(&self) -> bool {
        self.deliveries.is_empty()
    }
}

/// Push `payload` to every recipient
///
/// Pushes go to the recipients' outbound queues, so the order of payloads from
/// one caller is kept per recipient.
pub fn fan_out(recipients: &[Recipient], payload: &str) -> FanOutReport {
    let deliveries = recipients
        .iter()
        .map(|recipient| {
            let result = recipient
                .sender
                .send(payload.to_string())
                .map_err(|_| DeliveryError::ReceiverClosed);
            if let Err(e) = &result {
                tracing::warn!(
                    "Failed to deliver to connection '{}': {}",
                    recipient.connection_id,
                    e
                );
            }
            Delivery {
                connection_id: recipient.connection_id.clone(),
                result,
            }
        })
        .collect();

    FanOutReport { deliveries }
}

/// Serialize a server-synthesized envelope and push it to every recipient
pub fn fan_out_envelope(recipients: &[Recipient], envelope: &Envelope) -> FanOutReport {
    match envelope.to_json() {
        Ok(payload) => fan_out(recipients, &payload),
        Err(e) => {
            tracing::error!("Failed to serialize '{}' envelope: {}", envelope.kind(), e);
            FanOutReport::default()
        }
    }
}
