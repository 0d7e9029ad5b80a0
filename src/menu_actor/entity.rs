//! [`ActorEntity`] implementation for [`MenuItem`].

use super::error::MenuError;
use crate::framework::ActorEntity;
use crate::model::{MenuItem, MenuItemCreate, MenuItemId, MenuItemUpdate};
use async_trait::async_trait;

fn check_name(name: &str) -> Result<(), MenuError> {
    if name.trim().is_empty() {
        return Err(MenuError::Validation("name must not be blank".into()));
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for MenuItem {
    type Id = MenuItemId;
    type Create = MenuItemCreate;
    type Update = MenuItemUpdate;
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = MenuError;

    fn from_create_params(id: MenuItemId, params: MenuItemCreate) -> Result<Self, MenuError> {
        check_name(&params.name)?;
        Ok(MenuItem {
            id,
            name: params.name.trim().to_string(),
            price: params.price,
            category: params.category,
            image: params.image,
        })
    }

    /// # Fields Updated
    /// - `name`: must stay non-blank
    /// - `price`, `category`, `image`
    async fn on_update(&mut self, update: MenuItemUpdate, _ctx: &()) -> Result<(), MenuError> {
        if let Some(name) = update.name {
            check_name(&name)?;
            self.name = name.trim().to_string();
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(image) = update.image {
            self.image = Some(image);
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: (), _ctx: &()) -> Result<(), MenuError> {
        Ok(())
    }
}
