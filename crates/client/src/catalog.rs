//! Menu management: categories and items.

use reqwest::Method;

use orderlink_core::{CategoryId, ItemId};

use crate::api::AuthorizedClient;
use crate::error::ApiError;
use crate::types::{Category, CategoryInput, CategoryList, Item, ItemInput, ItemList};

impl AuthorizedClient<'_> {
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let list: CategoryList = self.get("categories").await?;
        Ok(list.categories)
    }

    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, ApiError> {
        let category: Category = self.send_json(Method::POST, "categories", input).await?;
        tracing::info!(category = %category.id, "category created");
        Ok(category)
    }

    pub async fn update_category(&self, id: &CategoryId, input: &CategoryInput) -> Result<Category, ApiError> {
        self.send_json(Method::PUT, &format!("categories/{id}"), input).await
    }

    pub async fn delete_category(&self, id: &CategoryId) -> Result<(), ApiError> {
        self.delete(&format!("categories/{id}")).await?;
        tracing::info!(category = %id, "category deleted");
        Ok(())
    }

    pub async fn list_items(&self) -> Result<Vec<Item>, ApiError> {
        let list: ItemList = self.get("items").await?;
        Ok(list.items)
    }

    pub async fn create_item(&self, input: &ItemInput) -> Result<Item, ApiError> {
        let item: Item = self.send_json(Method::POST, "items", input).await?;
        tracing::info!(item = %item.id, "item created");
        Ok(item)
    }

    pub async fn update_item(&self, id: &ItemId, input: &ItemInput) -> Result<Item, ApiError> {
        self.send_json(Method::PUT, &format!("items/{id}"), input).await
    }

    pub async fn delete_item(&self, id: &ItemId) -> Result<(), ApiError> {
        self.delete(&format!("items/{id}")).await?;
        tracing::info!(item = %id, "item deleted");
        Ok(())
    }
}
