use std::sync::Arc;

use tracing::{event, Level};
use uuid::Uuid;
use warp::{Rejection, Reply};

use crate::networking::dispatcher::Dispatcher;
use crate::networking::network::{ConnectionId, Connections, MAX_MESSAGE_SIZE};
use crate::networking::socket;

/// Minimal landing page; the real client talks to `/ws`.
const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head><title>Lawtest</title></head>
  <body>
    <h1>Lawtest</h1>
    <p>Connect a WebSocket client to <code>/ws</code> to browse branches,
    take tests, and author new ones.</p>
  </body>
</html>
"#;

pub async fn ws_upgrade_handler(
    ws: warp::ws::Ws,
    connections: Connections,
    dispatcher: Arc<Dispatcher>,
) -> std::result::Result<impl Reply, Rejection> {
    let id: ConnectionId = Uuid::new_v4();
    event!(Level::DEBUG, "upgrading connection {}", id);
    Ok(ws
        .max_message_size(MAX_MESSAGE_SIZE)
        .on_upgrade(move |socket| socket::client_connection(socket, id, connections, dispatcher)))
}

pub async fn index_handler() -> std::result::Result<impl Reply, Rejection> {
    Ok(warp::reply::html(LANDING_PAGE))
}
