//! Catalog service: CRUD for every entity, foreign-key resolution, delete
//! rules, search and the list-by-ancestor filter.
//!
//! Handlers decode and validate request bodies into payloads; everything past
//! that point (reference checks, persistence, logging) happens here.

use chrono::{SubsecRound, Utc};
use rust_decimal::Decimal;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{CatalogError, Result};
use crate::payload::{
    BannerPatch, CategoryPatch, NewBanner, NewCategory, NewProduct, NewSubcategory, NewSubofSub,
    NewUnit, ProductPatch, SubcategoryPatch, SubofSubPatch, UnitPatch,
};
use crate::ports::{EntityStore, Stores};
use crate::types::{
    AncestorKind, Banner, Category, Entity, Product, ProductFilter, SubofSub, Subcategory, Unit,
};

/// Scale every stored price is kept at.
const PRICE_SCALE: u32 = 2;

async fn fetch<E, S>(store: &S, id: Uuid) -> Result<E>
where
    E: Entity,
    S: EntityStore<E> + ?Sized,
{
    store.get(id).await?.ok_or(CatalogError::NotFound(E::KIND))
}

/// Check that an optional foreign key points at an existing row.
async fn resolve<E, S>(store: &S, id: Option<Uuid>, field: &'static str) -> Result<()>
where
    E: Entity,
    S: EntityStore<E> + ?Sized,
{
    if let Some(id) = id {
        if store.get(id).await?.is_none() {
            return Err(CatalogError::Reference {
                kind: E::KIND,
                field,
            });
        }
    }
    Ok(())
}

async fn persist_update<E, S>(store: &S, entity: E) -> Result<E>
where
    E: Entity,
    S: EntityStore<E> + ?Sized,
{
    if !store.update(&entity).await? {
        return Err(CatalogError::NotFound(E::KIND));
    }
    info!("Updated {} {}", E::KIND, entity.uuid());
    Ok(entity)
}

async fn remove<E, S>(store: &S, id: Uuid) -> Result<()>
where
    E: Entity,
    S: EntityStore<E> + ?Sized,
{
    if !store.delete(id).await? {
        return Err(CatalogError::NotFound(E::KIND));
    }
    info!("Deleted {} {}", E::KIND, id);
    Ok(())
}

fn normalize_price(price: &mut Decimal) {
    price.rescale(PRICE_SCALE);
}

pub struct CatalogService {
    stores: Stores,
}

impl CatalogService {
    pub fn new(stores: Stores) -> Self {
        Self { stores }
    }

    pub fn stores(&self) -> &Stores {
        &self.stores
    }

    // ── Category ──────────────────────────────────────────────

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        self.stores.categories.list().await
    }

    pub async fn create_category(&self, new: NewCategory) -> Result<Category> {
        let category = new.into_entity(Uuid::new_v4());
        self.stores.categories.insert(&category).await?;
        info!("Created Category {} '{}'", category.uuid, category.name);
        Ok(category)
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Category> {
        fetch(&*self.stores.categories, id).await
    }

    pub async fn update_category(&self, id: Uuid, patch: CategoryPatch) -> Result<Category> {
        let mut category = self.get_category(id).await?;
        patch.apply_to(&mut category);
        persist_update(&*self.stores.categories, category).await
    }

    /// Subcategories and products of the category are detached, not removed.
    pub async fn delete_category(&self, id: Uuid) -> Result<()> {
        remove::<Category, _>(&*self.stores.categories, id).await
    }

    // ── Subcategory ───────────────────────────────────────────

    pub async fn list_subcategories(&self) -> Result<Vec<Subcategory>> {
        self.stores.subcategories.list().await
    }

    pub async fn create_subcategory(&self, new: NewSubcategory) -> Result<Subcategory> {
        resolve::<Category, _>(&*self.stores.categories, new.category, "category").await?;
        let subcategory = new.into_entity(Uuid::new_v4());
        self.stores.subcategories.insert(&subcategory).await?;
        info!(
            "Created Sub category {} '{}'",
            subcategory.uuid, subcategory.name
        );
        Ok(subcategory)
    }

    pub async fn get_subcategory(&self, id: Uuid) -> Result<Subcategory> {
        fetch(&*self.stores.subcategories, id).await
    }

    pub async fn update_subcategory(
        &self,
        id: Uuid,
        patch: SubcategoryPatch,
    ) -> Result<Subcategory> {
        let mut subcategory = self.get_subcategory(id).await?;
        resolve::<Category, _>(
            &*self.stores.categories,
            patch.category.value().copied(),
            "category",
        )
        .await?;
        patch.apply_to(&mut subcategory);
        persist_update(&*self.stores.subcategories, subcategory).await
    }

    pub async fn delete_subcategory(&self, id: Uuid) -> Result<()> {
        remove::<Subcategory, _>(&*self.stores.subcategories, id).await
    }

    // ── SubofSub ──────────────────────────────────────────────

    pub async fn list_sub_of_subs(&self) -> Result<Vec<SubofSub>> {
        self.stores.sub_of_subs.list().await
    }

    pub async fn create_sub_of_sub(&self, new: NewSubofSub) -> Result<SubofSub> {
        resolve::<Subcategory, _>(
            &*self.stores.subcategories,
            new.sub_category,
            "sub_category",
        )
        .await?;
        let sub_of_sub = new.into_entity(Uuid::new_v4());
        self.stores.sub_of_subs.insert(&sub_of_sub).await?;
        info!(
            "Created Sub of sub category {} '{}'",
            sub_of_sub.uuid, sub_of_sub.name
        );
        Ok(sub_of_sub)
    }

    pub async fn get_sub_of_sub(&self, id: Uuid) -> Result<SubofSub> {
        fetch(&*self.stores.sub_of_subs, id).await
    }

    pub async fn update_sub_of_sub(&self, id: Uuid, patch: SubofSubPatch) -> Result<SubofSub> {
        let mut sub_of_sub = self.get_sub_of_sub(id).await?;
        resolve::<Subcategory, _>(
            &*self.stores.subcategories,
            patch.sub_category.value().copied(),
            "sub_category",
        )
        .await?;
        patch.apply_to(&mut sub_of_sub);
        persist_update(&*self.stores.sub_of_subs, sub_of_sub).await
    }

    pub async fn delete_sub_of_sub(&self, id: Uuid) -> Result<()> {
        remove::<SubofSub, _>(&*self.stores.sub_of_subs, id).await
    }

    // ── Unit ──────────────────────────────────────────────────

    pub async fn list_units(&self) -> Result<Vec<Unit>> {
        self.stores.units.list().await
    }

    pub async fn create_unit(&self, new: NewUnit) -> Result<Unit> {
        let unit = new.into_entity(Uuid::new_v4());
        self.stores.units.insert(&unit).await?;
        info!("Created Unit {} '{}'", unit.uuid, unit.name);
        Ok(unit)
    }

    pub async fn get_unit(&self, id: Uuid) -> Result<Unit> {
        fetch(&*self.stores.units, id).await
    }

    pub async fn update_unit(&self, id: Uuid, patch: UnitPatch) -> Result<Unit> {
        let mut unit = self.get_unit(id).await?;
        patch.apply_to(&mut unit);
        persist_update(&*self.stores.units, unit).await
    }

    /// Refused while any product still measures in this unit.
    pub async fn delete_unit(&self, id: Uuid) -> Result<()> {
        self.get_unit(id).await?;
        let count = self
            .stores
            .products
            .filter_products(ProductFilter::Unit(id))
            .await?
            .len();
        if count > 0 {
            return Err(CatalogError::InUse {
                kind: Unit::KIND,
                count,
            });
        }
        remove::<Unit, _>(&*self.stores.units, id).await
    }

    // ── Product ───────────────────────────────────────────────

    /// All products, or the search result when `search` is non-empty.
    pub async fn list_products(&self, search: Option<&str>) -> Result<Vec<Product>> {
        match search.filter(|q| !q.is_empty()) {
            Some(query) => self.search(query).await,
            None => self.stores.products.list().await,
        }
    }

    /// Dedicated search: an empty or missing query is rejected.
    pub async fn search_products(&self, query: Option<&str>) -> Result<Vec<Product>> {
        match query.filter(|q| !q.is_empty()) {
            Some(query) => self.search(query).await,
            None => Err(CatalogError::Invalid("search query required".into())),
        }
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>> {
        let products = self.stores.products.search_products(query).await?;
        debug!("Search '{}' matched {} product(s)", query, products.len());
        Ok(products)
    }

    /// Products whose `kind` reference equals `id` exactly. The ancestor must exist.
    pub async fn list_by_ancestor(&self, kind: AncestorKind, id: Uuid) -> Result<Vec<Product>> {
        match kind {
            AncestorKind::Category => {
                self.get_category(id).await?;
            }
            AncestorKind::SubCategory => {
                self.get_subcategory(id).await?;
            }
            AncestorKind::SubOfSub => {
                self.get_sub_of_sub(id).await?;
            }
        }
        self.stores.products.filter_products(kind.filter(id)).await
    }

    async fn resolve_product_refs(
        &self,
        unit: Option<Uuid>,
        category: Option<Uuid>,
        sub_category: Option<Uuid>,
        sub_of_sub: Option<Uuid>,
    ) -> Result<()> {
        resolve::<Unit, _>(&*self.stores.units, unit, "unit").await?;
        resolve::<Category, _>(&*self.stores.categories, category, "category").await?;
        resolve::<Subcategory, _>(&*self.stores.subcategories, sub_category, "sub_category")
            .await?;
        resolve::<SubofSub, _>(&*self.stores.sub_of_subs, sub_of_sub, "sub_of_sub").await
    }

    pub async fn create_product(&self, new: NewProduct) -> Result<Product> {
        self.resolve_product_refs(
            Some(new.unit),
            new.category,
            new.sub_category,
            new.sub_of_sub,
        )
        .await?;
        // Postgres keeps microseconds; match it so create and get agree.
        let mut product = new.into_entity(Uuid::new_v4(), Utc::now().trunc_subsecs(6));
        normalize_price(&mut product.price);
        self.stores.products.insert(&product).await?;
        info!("Created Product {} '{}'", product.uuid, product.name);
        Ok(product)
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product> {
        fetch(&*self.stores.products, id).await
    }

    pub async fn update_product(&self, id: Uuid, patch: ProductPatch) -> Result<Product> {
        let mut product = self.get_product(id).await?;
        self.resolve_product_refs(
            patch.unit,
            patch.category.value().copied(),
            patch.sub_category.value().copied(),
            patch.sub_of_sub.value().copied(),
        )
        .await?;
        patch.apply_to(&mut product);
        normalize_price(&mut product.price);
        persist_update(&*self.stores.products, product).await
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<()> {
        remove::<Product, _>(&*self.stores.products, id).await
    }

    // ── Banner ────────────────────────────────────────────────

    pub async fn list_banners(&self) -> Result<Vec<Banner>> {
        self.stores.banners.list().await
    }

    pub async fn create_banner(&self, new: NewBanner) -> Result<Banner> {
        let banner = new.into_entity(Uuid::new_v4());
        self.stores.banners.insert(&banner).await?;
        info!("Created Banner {} '{}'", banner.uuid, banner.name);
        Ok(banner)
    }

    pub async fn get_banner(&self, id: Uuid) -> Result<Banner> {
        fetch(&*self.stores.banners, id).await
    }

    pub async fn update_banner(&self, id: Uuid, patch: BannerPatch) -> Result<Banner> {
        let mut banner = self.get_banner(id).await?;
        patch.apply_to(&mut banner);
        persist_update(&*self.stores.banners, banner).await
    }

    pub async fn delete_banner(&self, id: Uuid) -> Result<()> {
        remove::<Banner, _>(&*self.stores.banners, id).await
    }
}
