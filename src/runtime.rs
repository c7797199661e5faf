use std::sync::Arc;

use clap::{App, Arg};
use tokio::signal;
use tokio::sync::{broadcast, mpsc, RwLock};
use tracing::{event, Level};

use crate::catalog::Catalog;
use crate::networking::dispatcher::Dispatcher;
use crate::storage::Storage;
use crate::users::UserDirectory;

///
/// The entry point to the lawtest server runtime
///
pub async fn run() -> crate::Result<()> {
    //
    // handle shutdown messages w/ broadcast channel
    //
    let (notify_shutdown, _) = broadcast::channel(1);
    let (shutdown_complete_tx, shutdown_complete_rx) = mpsc::channel(1);
    let mut runtime = Runtime {
        _notify_shutdown: notify_shutdown,
        _shutdown_complete_tx: shutdown_complete_tx,
        _shutdown_complete_rx: shutdown_complete_rx,
    };

    tokio::select! {
        res = runtime.run() => {
            if let Err(err) = res {
                event!(Level::ERROR, "runtime err {:?}", err)
            }
        },
        _ = signal::ctrl_c() => {
            event!(Level::INFO, "Shutting down!")
        }
    }

    Ok(())
}

//
// The runtime state exposes a run method that main calls to initialize
// the stores and the network listener and prepare for shutdown.
//
struct Runtime {
    _notify_shutdown: broadcast::Sender<()>,
    _shutdown_complete_rx: mpsc::Receiver<()>,
    _shutdown_complete_tx: mpsc::Sender<()>,
}

impl Runtime {
    async fn run(&mut self) -> crate::Result<()> {
        //
        // handle command-line arguments
        //
        let matches = App::new("Lawtest Runtime")
            .about("Runs a Lawtest server")
            .arg(
                Arg::with_name("config")
                    .short("c")
                    .long("config")
                    .takes_value(true)
                    .help("config file name"),
            )
            .get_matches();

        let config_name = match matches.value_of("config") {
            Some(name) => name,
            None => "config",
        };

        let mut settings = config::Config::default();
        settings.merge(config::File::with_name(config_name))?;

        //
        // load the stores from disk
        //
        let load_catalog_from_disk = match settings.get::<bool>("storage.load_catalog_from_disk") {
            Ok(can_load) => can_load,
            Err(_) => true,
        };
        let (catalog, users) = if load_catalog_from_disk {
            (
                Storage::load_catalog_from_disk()?,
                Storage::load_users_from_disk()?,
            )
        } else {
            (Catalog::new(), UserDirectory::new())
        };

        //
        // instantiate shared state.
        //
        // the catalog and user directory are shared by every connection and
        // are wrapped in Tokio::RwLock for read().await / write().await
        // access. The dispatch table is built once here and shared
        // read-only across connections.
        //
        let catalog_lock = Arc::new(RwLock::new(catalog));
        let users_lock = Arc::new(RwLock::new(users));
        let dispatcher = Arc::new(Dispatcher::new(
            catalog_lock.clone(),
            users_lock.clone(),
            true,
        ));

        crate::networking::network::run(settings, dispatcher).await
    }
}
