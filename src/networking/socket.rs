use std::sync::Arc;

use futures::{FutureExt, StreamExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{event, Level};
use warp::ws::{Message, WebSocket};

use crate::networking::dispatcher::Dispatcher;
use crate::networking::envelope;
use crate::networking::network::{Connection, ConnectionId, Connections};

/// Owns one upgraded socket end-to-end. Responses are queued on an
/// unbounded channel and forwarded to the sink by a separate task, so the
/// receive loop never holds the write half. Messages are handled strictly
/// in arrival order: the response to message N is queued before message
/// N+1 is read.
pub async fn client_connection(
    ws: WebSocket,
    id: ConnectionId,
    connections: Connections,
    dispatcher: Arc<Dispatcher>,
) {
    let (client_ws_sender, mut client_ws_rcv) = ws.split();
    let (client_sender, client_rcv) = mpsc::unbounded_channel();
    let client_rcv = UnboundedReceiverStream::new(client_rcv);
    tokio::task::spawn(client_rcv.forward(client_ws_sender).map(move |result| {
        if let Err(e) = result {
            event!(Level::WARN, "error sending websocket msg to {}: {}", id, e);
        }
    }));

    connections.write().await.insert(
        id,
        Connection {
            sender: Some(client_sender.clone()),
        },
    );
    event!(Level::INFO, "{} connected", id);

    while let Some(result) = client_ws_rcv.next().await {
        let message = match result {
            Ok(message) => message,
            Err(e) => {
                event!(Level::WARN, "error receiving ws message for {}: {}", id, e);
                break;
            }
        };
        if message.is_close() {
            break;
        }
        if message.is_ping() || message.is_pong() {
            continue;
        }

        // Text frames carry actions. Any other data frame is undecodable
        // and gets the fallback envelope; the connection itself stays up.
        let response = match message.to_str() {
            Ok(text) => dispatcher.dispatch(text).await,
            Err(_) => envelope::unknown_action(),
        };

        // a send failure means the peer is already gone; the handler
        // result is simply discarded
        if client_sender.send(Ok(Message::text(response))).is_err() {
            break;
        }
    }

    connections.write().await.remove(&id);
    event!(Level::INFO, "{} disconnected", id);
}
