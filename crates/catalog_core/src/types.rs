//! Catalog entity types.
//!
//! Every entity is keyed by a v4 UUID assigned at creation. Child entities
//! hold their parent's id only; children are found by querying, never through
//! back-pointers.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CatalogError;

// ── Kinds ─────────────────────────────────────────────────────

/// The six record types the catalog stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Category,
    Subcategory,
    SubofSub,
    Unit,
    Product,
    Banner,
}

impl EntityKind {
    /// Human-readable name, used in response messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Subcategory => "Sub category",
            Self::SubofSub => "Sub of sub category",
            Self::Unit => "Unit",
            Self::Product => "Product",
            Self::Banner => "Banner",
        }
    }

    /// Name of the path identifier in "<field> uuid is required" messages.
    pub fn id_label(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Subcategory => "sub category",
            Self::SubofSub => "subs of subs",
            Self::Unit => "unit",
            Self::Product => "product",
            Self::Banner => "banner",
        }
    }

    /// Key under which the entity (or a list of it) appears in the envelope.
    pub fn envelope_key(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Subcategory => "sub_category",
            Self::SubofSub => "subs_of",
            Self::Unit => "unit",
            Self::Product => "product",
            Self::Banner => "banner",
        }
    }

    /// Parse a raw path segment into an identifier of this kind.
    pub fn parse_id(self, raw: &str) -> Result<Uuid, CatalogError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(CatalogError::MissingId(self));
        }
        Uuid::parse_str(raw).map_err(|_| CatalogError::MalformedId {
            kind: self,
            raw: raw.to_string(),
        })
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Implemented by every stored record.
pub trait Entity: Clone + Send + Sync + 'static {
    const KIND: EntityKind;

    fn uuid(&self) -> Uuid;
}

// ── Taxonomy ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Category {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Subcategory {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct SubofSub {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub sub_category: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Unit {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
}

// ── Products & banners ────────────────────────────────────────

/// A sellable item. `price` is serialized as a decimal string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Product {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub unit: Uuid,
    pub quantity: i32,
    pub image_one: Option<String>,
    pub image_two: Option<String>,
    pub image_three: Option<String>,
    pub image_four: Option<String>,
    pub image_five: Option<String>,
    pub video: Option<String>,
    pub status: bool,
    pub is_featured: bool,
    pub category: Option<Uuid>,
    pub sub_category: Option<Uuid>,
    pub sub_of_sub: Option<Uuid>,
    pub sold_by: Option<String>,
    pub material: Option<String>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub warranty: i32,
    pub number_of_box: i32,
    pub features: Option<String>,
    pub country_of_origin: Option<String>,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::FromRow))]
pub struct Banner {
    pub uuid: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_status: bool,
}

macro_rules! impl_entity {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Entity for $ty {
                const KIND: EntityKind = EntityKind::$kind;

                fn uuid(&self) -> Uuid {
                    self.uuid
                }
            }
        )*
    };
}

impl_entity! {
    Category => Category,
    Subcategory => Subcategory,
    SubofSub => SubofSub,
    Unit => Unit,
    Product => Product,
    Banner => Banner,
}

// ── Product filters ───────────────────────────────────────────

/// Ancestor level selected by the list-by-ancestor endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AncestorKind {
    Category,
    SubCategory,
    SubOfSub,
}

impl AncestorKind {
    pub const SELECTORS: [&'static str; 3] = ["category", "sub_category", "sub_of_sub"];

    /// Parse the `{identifier}` path selector.
    pub fn from_selector(selector: &str) -> Result<Self, CatalogError> {
        match selector {
            "category" => Ok(Self::Category),
            "sub_category" => Ok(Self::SubCategory),
            "sub_of_sub" => Ok(Self::SubOfSub),
            other => Err(CatalogError::Invalid(format!(
                "invalid identifier '{}': expected one of {}",
                other,
                Self::SELECTORS.join(", ")
            ))),
        }
    }

    /// The table the ancestor id must resolve in.
    pub fn entity_kind(self) -> EntityKind {
        match self {
            Self::Category => EntityKind::Category,
            Self::SubCategory => EntityKind::Subcategory,
            Self::SubOfSub => EntityKind::SubofSub,
        }
    }

    pub fn filter(self, id: Uuid) -> ProductFilter {
        match self {
            Self::Category => ProductFilter::Category(id),
            Self::SubCategory => ProductFilter::SubCategory(id),
            Self::SubOfSub => ProductFilter::SubOfSub(id),
        }
    }
}

/// Flat equality filter on one of a product's reference columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductFilter {
    Category(Uuid),
    SubCategory(Uuid),
    SubOfSub(Uuid),
    Unit(Uuid),
}

impl ProductFilter {
    /// Column holding the reference.
    pub fn column(self) -> &'static str {
        match self {
            Self::Category(_) => "category",
            Self::SubCategory(_) => "sub_category",
            Self::SubOfSub(_) => "sub_of_sub",
            Self::Unit(_) => "unit",
        }
    }

    pub fn id(self) -> Uuid {
        match self {
            Self::Category(id) | Self::SubCategory(id) | Self::SubOfSub(id) | Self::Unit(id) => id,
        }
    }

    pub fn matches(self, product: &Product) -> bool {
        match self {
            Self::Category(id) => product.category == Some(id),
            Self::SubCategory(id) => product.sub_category == Some(id),
            Self::SubOfSub(id) => product.sub_of_sub == Some(id),
            Self::Unit(id) => product.unit == id,
        }
    }
}
