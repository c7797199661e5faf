use std::collections::HashMap;
use std::sync::Arc;

use config::Config;
use tokio::sync::{mpsc, RwLock};
use tracing::{event, Level};
use uuid::Uuid;
use warp::ws::Message;
use warp::Filter;

use crate::networking::dispatcher::Dispatcher;
use crate::networking::filters::{index_route_filter, ws_upgrade_route_filter};

/// Largest complete message, after fragment reassembly, that the upgrade
/// will accept. Oversized messages fail at the transport and never reach
/// the dispatcher, which bounds per-connection buffering.
pub const MAX_MESSAGE_SIZE: usize = 64 * 1024;

pub type ConnectionId = Uuid;

/// One live socket as seen by the rest of the system. The sender is the
/// handle responses are queued through; dropping it closes the outbound
/// half.
#[derive(Debug, Clone)]
pub struct Connection {
    pub sender: Option<mpsc::UnboundedSender<std::result::Result<Message, warp::Error>>>,
}

pub type Connections = Arc<RwLock<HashMap<ConnectionId, Connection>>>;

/// Configuration for the network listener, host/port etc.
pub struct Network {
    config_settings: Config,
    connections: Connections,
    dispatcher: Arc<Dispatcher>,
}

pub async fn run(config_settings: Config, dispatcher: Arc<Dispatcher>) -> crate::Result<()> {
    let network = Network::new(config_settings, dispatcher);
    network.run_server().await
}

impl Network {
    pub fn new(config_settings: Config, dispatcher: Arc<Dispatcher>) -> Network {
        Network {
            config_settings,
            connections: Arc::new(RwLock::new(HashMap::new())),
            dispatcher,
        }
    }

    /// Runs warp::serve to listen for incoming connections
    pub async fn run_server(&self) -> crate::Result<()> {
        let host: [u8; 4] = self.config_settings.get::<[u8; 4]>("network.host")?;
        let port: u16 = self.config_settings.get::<u16>("network.port")?;

        let routes = index_route_filter().or(ws_upgrade_route_filter(
            self.connections.clone(),
            self.dispatcher.clone(),
        ));
        event!(Level::INFO, "listening on {:?}:{}", host, port);
        warp::serve(routes).run((host, port)).await;
        Ok(())
    }
}
