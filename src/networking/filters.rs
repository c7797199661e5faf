use std::convert::Infallible;
use std::sync::Arc;

use warp::{Filter, Reply};

use crate::networking::dispatcher::Dispatcher;
use crate::networking::handlers::{index_handler, ws_upgrade_handler};
use crate::networking::network::Connections;

/// websocket upgrade filter.
pub fn ws_upgrade_route_filter(
    connections: Connections,
    dispatcher: Arc<Dispatcher>,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    warp::path("ws")
        .and(warp::ws())
        .and(with_connections(connections))
        .and(with_dispatcher(dispatcher))
        .and_then(ws_upgrade_handler)
}

/// landing page filter.
pub fn index_route_filter() -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone
{
    warp::path::end().and_then(index_handler)
}

/// inject the connection registry
fn with_connections(
    connections: Connections,
) -> impl Filter<Extract = (Connections,), Error = Infallible> + Clone {
    warp::any().map(move || connections.clone())
}

/// inject the shared dispatch table
fn with_dispatcher(
    dispatcher: Arc<Dispatcher>,
) -> impl Filter<Extract = (Arc<Dispatcher>,), Error = Infallible> + Clone {
    warp::any().map(move || dispatcher.clone())
}
