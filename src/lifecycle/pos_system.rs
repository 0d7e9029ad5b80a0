use crate::clients::{MenuClient, OrderClient};
use crate::config::PosConfig;
use crate::orders::OrderDesk;
use tracing::{error, info};

/// The runtime orchestrator of the shop: both stores, their clients and their tasks.
///
/// `PosSystem` is responsible for:
/// - **Lifecycle Management**: starting and stopping the menu and order store actors
/// - **Wiring**: handing out clients and order desks bound to the running stores
///
/// # Example
///
/// ```ignore
/// let system = PosSystem::new(&PosConfig::default());
/// let desk = system.order_desk();
/// let key = desk.place_order(&mut cart, "", OrderType::Takeaway, Utc::now()).await?;
///
/// drop(desk);
/// system.shutdown().await?;
/// ```
pub struct PosSystem {
    /// Client for the Order store
    pub order_client: OrderClient,

    /// Client for the Menu store
    pub menu_client: MenuClient,

    /// Task handles of the store actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PosSystem {
    /// Spawns the menu and order stores. Must be called inside a Tokio runtime.
    pub fn new(config: &PosConfig) -> Self {
        let (menu_actor, menu_client) = crate::menu_actor::new(config.store_buffer);
        let (order_actor, order_client) = crate::order_actor::new(config.store_buffer);

        // Neither store has dependencies (Context = ())
        let menu_handle = tokio::spawn(menu_actor.run(()));
        let order_handle = tokio::spawn(order_actor.run(()));

        info!(shop = %config.shop_name, buffer = config.store_buffer, "Stores started");

        Self {
            order_client,
            menu_client,
            handles: vec![menu_handle, order_handle],
        }
    }

    /// An order desk working against this system's order store.
    pub fn order_desk(&self) -> OrderDesk<OrderClient> {
        OrderDesk::new(self.order_client.clone())
    }

    /// Gracefully shuts down both stores.
    ///
    /// Drops this system's clients and waits for the store tasks. A store only stops once
    /// *every* clone of its client is gone, so drop desks and other clones first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down stores...");

        drop(self.order_client);
        drop(self.menu_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Shutdown complete.");
        Ok(())
    }
}
