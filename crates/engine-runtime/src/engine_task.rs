//! Central engine task.
//!
//! Pulls order events off an inbound message stream, feeds each one
//! through a `Matcher`, and publishes + persists every resulting
//! trade. Used by the `engine` binary against a live NATS
//! subscription, and directly by tests against an in-memory stream.

use engine_core::Matcher;
use engine_protocol::{decode_event, encode_trade};
use futures_util::{Stream, StreamExt};
use tracing::{debug, info, warn};

use crate::bus::TradePublisher;
use crate::error::SinkError;
use crate::sink::TradeSink;

/// Run the engine loop to completion (the stream ends when the
/// subscription is unsubscribed or the connection drops).
///
/// Decode failures are logged and the message is dropped; everything
/// else propagates, since a sink failure means the engine can no
/// longer reliably record fills and must stop.
pub async fn run<S>(
    mut inbound: S,
    matcher: &Matcher,
    publisher: &dyn TradePublisher,
    trades_subject: &str,
    sink: &mut TradeSink,
) -> Result<(), SinkError>
where
    S: Stream<Item = Vec<u8>> + Unpin,
{
    while let Some(payload) = inbound.next().await {
        let event = match decode_event(&payload) {
            Ok(event) => event,
            Err(err) => {
                warn!(error = %err, "dropping undecodable order event");
                continue;
            }
        };

        info!(order_id = %event.order_id(), symbol = %event.symbol(), "processing order event");

        let trades = matcher.handle_event(event);
        for trade in &trades {
            info!(
                buy = %trade.buy_order_id,
                sell = %trade.sell_order_id,
                qty = trade.qty,
                price = trade.price,
                "trade executed"
            );

            let encoded = encode_trade(trade);

            if let Err(err) = publisher.publish_trade(trades_subject, encoded.clone()).await {
                warn!(error = %err, "failed to publish trade");
            }

            sink.write(&encoded).await?;
            debug!(buy = %trade.buy_order_id, sell = %trade.sell_order_id, "trade persisted to sink");
        }
    }

    Ok(())
}
