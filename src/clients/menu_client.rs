//! # Menu Client
//!
//! The actor-backed [`MenuStore`].

use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::menu_actor::MenuError;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use crate::store::{MenuCallback, MenuStore, Subscription};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Menu actor.
#[derive(Clone)]
pub struct MenuClient {
    inner: ResourceClient<MenuItem>,
}

impl MenuClient {
    pub fn new(inner: ResourceClient<MenuItem>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<MenuItem> for MenuClient {
    type Error = MenuError;

    fn inner(&self) -> &ResourceClient<MenuItem> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.into_entity_error::<MenuError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => MenuError::NotFound(id),
            Err(other) => MenuError::Store(other.to_string()),
        }
    }
}

#[async_trait]
impl MenuStore for MenuClient {
    #[instrument(skip(self))]
    async fn create_item(&self, item: MenuItemCreate) -> Result<MenuItemId, MenuError> {
        debug!("Sending request");
        self.inner.create(item).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    async fn update_item(&self, id: MenuItemId, update: MenuItemUpdate) -> Result<MenuItem, MenuError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    async fn delete_item(&self, id: MenuItemId) -> Result<(), MenuError> {
        self.delete(id).await
    }

    async fn menu_once(&self) -> Result<Vec<MenuItem>, MenuError> {
        let mut items = self.list().await?;
        items.sort_by_key(|item| item.id);
        Ok(items)
    }

    async fn subscribe_menu(&self, callback: MenuCallback) -> Result<Subscription, MenuError> {
        let feed = self.inner.subscribe().await.map_err(Self::map_error)?;
        Ok(Subscription::forward(feed, move |mut items: Vec<MenuItem>| {
            items.sort_by_key(|item| item.id);
            callback(items)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockClient;
    use crate::model::Category;

    fn defaults() -> Vec<MenuItemCreate> {
        vec![
            MenuItemCreate::new("Cà Phê Muối", 29_000, Category::Coffee),
            MenuItemCreate::new("Sữa Hạt Điều", 39_000, Category::Healthy),
        ]
    }

    #[tokio::test]
    async fn test_seed_fills_empty_menu() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_list().return_ok(vec![]);
        mock.expect_create().return_ok(MenuItemId(1));
        mock.expect_create().return_ok(MenuItemId(2));

        let created = MenuClient::new(mock.client()).seed_if_empty(defaults()).await.unwrap();

        assert_eq!(created, 2);
        mock.verify();
    }

    #[tokio::test]
    async fn test_seed_leaves_existing_menu_alone() {
        let mut mock = MockClient::<MenuItem>::new();
        mock.expect_list()
            .return_ok(vec![MenuItem::new(4, "Bạc Xỉu", 25_000, Category::Coffee)]);

        let created = MenuClient::new(mock.client()).seed_if_empty(defaults()).await.unwrap();

        assert_eq!(created, 0);
        mock.verify();
    }
}
