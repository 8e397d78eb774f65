//! In-memory catalog backend.
//!
//! All six tables live behind one `RwLock` so that a delete and the detaching
//! of its children happen atomically. Suitable for tests and local runs; state
//! is lost on restart.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;
use crate::ports::{EntityStore, ProductStore, Stores};
use crate::search::Taxonomy;
use crate::types::{
    Banner, Category, Entity, EntityKind, Product, ProductFilter, SubofSub, Subcategory, Unit,
};

#[derive(Debug, Default)]
struct Tables {
    categories: Vec<Category>,
    subcategories: Vec<Subcategory>,
    sub_of_subs: Vec<SubofSub>,
    units: Vec<Unit>,
    products: Vec<Product>,
    banners: Vec<Banner>,
}

impl Tables {
    /// Null out every reference to a deleted record.
    fn release(&mut self, kind: EntityKind, id: Uuid) {
        match kind {
            EntityKind::Category => {
                for s in self.subcategories.iter_mut().filter(|s| s.category == Some(id)) {
                    s.category = None;
                }
                for p in self.products.iter_mut().filter(|p| p.category == Some(id)) {
                    p.category = None;
                }
            }
            EntityKind::Subcategory => {
                for ss in self.sub_of_subs.iter_mut().filter(|ss| ss.sub_category == Some(id)) {
                    ss.sub_category = None;
                }
                for p in self.products.iter_mut().filter(|p| p.sub_category == Some(id)) {
                    p.sub_category = None;
                }
            }
            EntityKind::SubofSub => {
                for p in self.products.iter_mut().filter(|p| p.sub_of_sub == Some(id)) {
                    p.sub_of_sub = None;
                }
            }
            EntityKind::Unit | EntityKind::Product | EntityKind::Banner => {}
        }
    }
}

/// Shared in-memory catalog. Cloning shares the underlying tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store handles backed by this catalog.
    pub fn stores(&self) -> Stores {
        let this = Arc::new(self.clone());
        Stores {
            categories: this.clone(),
            subcategories: this.clone(),
            sub_of_subs: this.clone(),
            units: this.clone(),
            products: this.clone(),
            banners: this,
        }
    }
}

macro_rules! memory_entity_store {
    ($ty:ty, $table:ident) => {
        #[async_trait]
        impl EntityStore<$ty> for MemoryCatalog {
            async fn list(&self) -> Result<Vec<$ty>> {
                Ok(self.tables.read().await.$table.clone())
            }

            async fn get(&self, id: Uuid) -> Result<Option<$ty>> {
                let tables = self.tables.read().await;
                Ok(tables.$table.iter().find(|e| e.uuid == id).cloned())
            }

            async fn insert(&self, entity: &$ty) -> Result<()> {
                self.tables.write().await.$table.push(entity.clone());
                Ok(())
            }

            async fn update(&self, entity: &$ty) -> Result<bool> {
                let mut tables = self.tables.write().await;
                match tables.$table.iter_mut().find(|e| e.uuid == entity.uuid) {
                    Some(slot) => {
                        *slot = entity.clone();
                        Ok(true)
                    }
                    None => Ok(false),
                }
            }

            async fn delete(&self, id: Uuid) -> Result<bool> {
                let mut tables = self.tables.write().await;
                let before = tables.$table.len();
                tables.$table.retain(|e| e.uuid != id);
                let removed = tables.$table.len() != before;
                if removed {
                    tables.release(<$ty as Entity>::KIND, id);
                }
                Ok(removed)
            }
        }
    };
}

memory_entity_store!(Category, categories);
memory_entity_store!(Subcategory, subcategories);
memory_entity_store!(SubofSub, sub_of_subs);
memory_entity_store!(Unit, units);
memory_entity_store!(Product, products);
memory_entity_store!(Banner, banners);

#[async_trait]
impl ProductStore for MemoryCatalog {
    async fn filter_products(&self, filter: ProductFilter) -> Result<Vec<Product>> {
        let tables = self.tables.read().await;
        Ok(tables
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn search_products(&self, query: &str) -> Result<Vec<Product>> {
        let needle = query.to_lowercase();
        let tables = self.tables.read().await;
        let taxonomy = Taxonomy {
            categories: &tables.categories,
            subcategories: &tables.subcategories,
            sub_of_subs: &tables.sub_of_subs,
        };
        Ok(tables
            .products
            .iter()
            .filter(|p| taxonomy.product_matches(p, &needle))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn category(name: &str) -> Category {
        Category {
            uuid: Uuid::new_v4(),
            name: name.into(),
            description: None,
            image: None,
        }
    }

    #[tokio::test]
    async fn insert_list_preserves_order() {
        let catalog = MemoryCatalog::new();
        let stores = catalog.stores();
        for name in ["Wood", "Metal", "Glass"] {
            stores.categories.insert(&category(name)).await.unwrap();
        }
        let names: Vec<String> = stores
            .categories
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, ["Wood", "Metal", "Glass"]);
    }

    #[tokio::test]
    async fn update_and_delete_report_missing_rows() {
        let stores = MemoryCatalog::new().stores();
        let wood = category("Wood");
        assert!(!stores.categories.update(&wood).await.unwrap());
        assert!(!stores.categories.delete(wood.uuid).await.unwrap());

        stores.categories.insert(&wood).await.unwrap();
        let mut renamed = wood.clone();
        renamed.name = "Hardwood".into();
        assert!(stores.categories.update(&renamed).await.unwrap());
        assert_eq!(
            stores.categories.get(wood.uuid).await.unwrap().unwrap().name,
            "Hardwood"
        );
        assert!(stores.categories.delete(wood.uuid).await.unwrap());
        assert!(stores.categories.get(wood.uuid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn deleting_category_detaches_subcategories() {
        let stores = MemoryCatalog::new().stores();
        let wood = category("Wood");
        stores.categories.insert(&wood).await.unwrap();
        let teak = Subcategory {
            uuid: Uuid::new_v4(),
            name: "Teak".into(),
            description: None,
            image: None,
            category: Some(wood.uuid),
        };
        stores.subcategories.insert(&teak).await.unwrap();

        stores.categories.delete(wood.uuid).await.unwrap();
        let teak = stores.subcategories.get(teak.uuid).await.unwrap().unwrap();
        assert_eq!(teak.category, None);
    }

    #[tokio::test]
    async fn clones_share_tables() {
        let catalog = MemoryCatalog::new();
        let other = catalog.clone();
        let wood = category("Wood");
        catalog.stores().categories.insert(&wood).await.unwrap();
        assert!(other.stores().categories.get(wood.uuid).await.unwrap().is_some());
    }
}
