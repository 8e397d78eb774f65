//! Typed request payloads.
//!
//! `New*` structs carry a full create body; `*Patch` structs carry a partial
//! update where every field may be absent. Nullable fields in patches use
//! [`Patch`] so that an omitted key and an explicit `null` stay distinct.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{CatalogError, FieldErrors, NON_FIELD_ERRORS};
use crate::schema::{self, Mode, Schema};
use crate::types::{Banner, Category, Product, SubofSub, Subcategory, Unit};

// ── Patch ─────────────────────────────────────────────────────

/// Three-state update value for nullable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    /// Key not present in the body: keep the stored value.
    #[default]
    Absent,
    /// Explicit `null`: clear the stored value.
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// The new value, if one was supplied.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn apply(self, slot: &mut Option<T>) {
        match self {
            Self::Absent => {}
            Self::Null => *slot = None,
            Self::Value(v) => *slot = Some(v),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<T>::deserialize(deserializer).map(|v| match v {
            Some(v) => Self::Value(v),
            None => Self::Null,
        })
    }
}

/// Decode prices through the same parser validation uses, so JSON numbers
/// never pass through `f64`.
fn decimal<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
    let value = Value::deserialize(deserializer)?;
    schema::parse_decimal(&value).ok_or_else(|| D::Error::custom("A valid number is required."))
}

fn optional_decimal<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Decimal>, D::Error> {
    decimal(deserializer).map(Some)
}

fn set<T>(value: Option<T>, slot: &mut T) {
    if let Some(v) = value {
        *slot = v;
    }
}

// ── Decoding ──────────────────────────────────────────────────

/// A request body validated against a schema before decoding.
pub trait Payload: DeserializeOwned {
    const MODE: Mode;

    fn schema() -> &'static Schema;

    fn from_json(body: Value) -> Result<Self, CatalogError> {
        schema::validate(Self::schema(), &body, Self::MODE).map_err(CatalogError::Validation)?;
        serde_json::from_value(body).map_err(|e| {
            CatalogError::Validation(FieldErrors::single(NON_FIELD_ERRORS, e.to_string()))
        })
    }
}

macro_rules! payload {
    ($ty:ty, $mode:ident, $schema:ident) => {
        impl Payload for $ty {
            const MODE: Mode = Mode::$mode;

            fn schema() -> &'static Schema {
                &schema::$schema
            }
        }
    };
}

payload!(NewCategory, Create, CATEGORY);
payload!(CategoryPatch, Partial, CATEGORY);
payload!(NewSubcategory, Create, SUBCATEGORY);
payload!(SubcategoryPatch, Partial, SUBCATEGORY);
payload!(NewSubofSub, Create, SUB_OF_SUB);
payload!(SubofSubPatch, Partial, SUB_OF_SUB);
payload!(NewUnit, Create, UNIT);
payload!(UnitPatch, Partial, UNIT);
payload!(NewProduct, Create, PRODUCT);
payload!(ProductPatch, Partial, PRODUCT);
payload!(NewBanner, Create, BANNER);
payload!(BannerPatch, Partial, BANNER);

fn default_true() -> bool {
    true
}

// ── Category ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl NewCategory {
    pub fn into_entity(self, uuid: Uuid) -> Category {
        Category {
            uuid,
            name: self.name,
            description: self.description,
            image: self.image,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub image: Patch<String>,
}

impl CategoryPatch {
    pub fn apply_to(self, category: &mut Category) {
        set(self.name, &mut category.name);
        self.description.apply(&mut category.description);
        self.image.apply(&mut category.image);
    }
}

// ── Subcategory ───────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct NewSubcategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<Uuid>,
}

impl NewSubcategory {
    pub fn into_entity(self, uuid: Uuid) -> Subcategory {
        Subcategory {
            uuid,
            name: self.name,
            description: self.description,
            image: self.image,
            category: self.category,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubcategoryPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub image: Patch<String>,
    #[serde(default)]
    pub category: Patch<Uuid>,
}

impl SubcategoryPatch {
    pub fn apply_to(self, subcategory: &mut Subcategory) {
        set(self.name, &mut subcategory.name);
        self.description.apply(&mut subcategory.description);
        self.image.apply(&mut subcategory.image);
        self.category.apply(&mut subcategory.category);
    }
}

// ── SubofSub ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct NewSubofSub {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub sub_category: Option<Uuid>,
}

impl NewSubofSub {
    pub fn into_entity(self, uuid: Uuid) -> SubofSub {
        SubofSub {
            uuid,
            name: self.name,
            description: self.description,
            image: self.image,
            sub_category: self.sub_category,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubofSubPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub image: Patch<String>,
    #[serde(default)]
    pub sub_category: Patch<Uuid>,
}

impl SubofSubPatch {
    pub fn apply_to(self, sub_of_sub: &mut SubofSub) {
        set(self.name, &mut sub_of_sub.name);
        self.description.apply(&mut sub_of_sub.description);
        self.image.apply(&mut sub_of_sub.image);
        self.sub_category.apply(&mut sub_of_sub.sub_category);
    }
}

// ── Unit ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct NewUnit {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewUnit {
    pub fn into_entity(self, uuid: Uuid) -> Unit {
        Unit {
            uuid,
            name: self.name,
            description: self.description,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UnitPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
}

impl UnitPatch {
    pub fn apply_to(self, unit: &mut Unit) {
        set(self.name, &mut unit.name);
        self.description.apply(&mut unit.description);
    }
}

// ── Product ───────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "decimal")]
    pub price: Decimal,
    pub unit: Uuid,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default)]
    pub image_one: Option<String>,
    #[serde(default)]
    pub image_two: Option<String>,
    #[serde(default)]
    pub image_three: Option<String>,
    #[serde(default)]
    pub image_four: Option<String>,
    #[serde(default)]
    pub image_five: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
    #[serde(default = "default_true")]
    pub status: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub category: Option<Uuid>,
    #[serde(default)]
    pub sub_category: Option<Uuid>,
    #[serde(default)]
    pub sub_of_sub: Option<Uuid>,
    #[serde(default)]
    pub sold_by: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub warranty: i32,
    #[serde(default)]
    pub number_of_box: i32,
    #[serde(default)]
    pub features: Option<String>,
    #[serde(default)]
    pub country_of_origin: Option<String>,
}

impl NewProduct {
    pub fn into_entity(self, uuid: Uuid, created: DateTime<Utc>) -> Product {
        Product {
            uuid,
            name: self.name,
            description: self.description,
            price: self.price,
            unit: self.unit,
            quantity: self.quantity,
            image_one: self.image_one,
            image_two: self.image_two,
            image_three: self.image_three,
            image_four: self.image_four,
            image_five: self.image_five,
            video: self.video,
            status: self.status,
            is_featured: self.is_featured,
            category: self.category,
            sub_category: self.sub_category,
            sub_of_sub: self.sub_of_sub,
            sold_by: self.sold_by,
            material: self.material,
            brand: self.brand,
            color: self.color,
            size: self.size,
            warranty: self.warranty,
            number_of_box: self.number_of_box,
            features: self.features,
            country_of_origin: self.country_of_origin,
            created,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default, deserialize_with = "optional_decimal")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub unit: Option<Uuid>,
    #[serde(default)]
    pub quantity: Option<i32>,
    #[serde(default)]
    pub image_one: Patch<String>,
    #[serde(default)]
    pub image_two: Patch<String>,
    #[serde(default)]
    pub image_three: Patch<String>,
    #[serde(default)]
    pub image_four: Patch<String>,
    #[serde(default)]
    pub image_five: Patch<String>,
    #[serde(default)]
    pub video: Patch<String>,
    #[serde(default)]
    pub status: Option<bool>,
    #[serde(default)]
    pub is_featured: Option<bool>,
    #[serde(default)]
    pub category: Patch<Uuid>,
    #[serde(default)]
    pub sub_category: Patch<Uuid>,
    #[serde(default)]
    pub sub_of_sub: Patch<Uuid>,
    #[serde(default)]
    pub sold_by: Patch<String>,
    #[serde(default)]
    pub material: Patch<String>,
    #[serde(default)]
    pub brand: Patch<String>,
    #[serde(default)]
    pub color: Patch<String>,
    #[serde(default)]
    pub size: Patch<String>,
    #[serde(default)]
    pub warranty: Option<i32>,
    #[serde(default)]
    pub number_of_box: Option<i32>,
    #[serde(default)]
    pub features: Patch<String>,
    #[serde(default)]
    pub country_of_origin: Patch<String>,
}

impl ProductPatch {
    /// `created` and `uuid` are never touched.
    pub fn apply_to(self, product: &mut Product) {
        set(self.name, &mut product.name);
        self.description.apply(&mut product.description);
        set(self.price, &mut product.price);
        set(self.unit, &mut product.unit);
        set(self.quantity, &mut product.quantity);
        self.image_one.apply(&mut product.image_one);
        self.image_two.apply(&mut product.image_two);
        self.image_three.apply(&mut product.image_three);
        self.image_four.apply(&mut product.image_four);
        self.image_five.apply(&mut product.image_five);
        self.video.apply(&mut product.video);
        set(self.status, &mut product.status);
        set(self.is_featured, &mut product.is_featured);
        self.category.apply(&mut product.category);
        self.sub_category.apply(&mut product.sub_category);
        self.sub_of_sub.apply(&mut product.sub_of_sub);
        self.sold_by.apply(&mut product.sold_by);
        self.material.apply(&mut product.material);
        self.brand.apply(&mut product.brand);
        self.color.apply(&mut product.color);
        self.size.apply(&mut product.size);
        set(self.warranty, &mut product.warranty);
        set(self.number_of_box, &mut product.number_of_box);
        self.features.apply(&mut product.features);
        self.country_of_origin.apply(&mut product.country_of_origin);
    }
}

// ── Banner ────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct NewBanner {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_true")]
    pub is_status: bool,
}

impl NewBanner {
    pub fn into_entity(self, uuid: Uuid) -> Banner {
        Banner {
            uuid,
            name: self.name,
            description: self.description,
            image: self.image,
            is_status: self.is_status,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannerPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Patch<String>,
    #[serde(default)]
    pub image: Patch<String>,
    #[serde(default)]
    pub is_status: Option<bool>,
}

impl BannerPatch {
    pub fn apply_to(self, banner: &mut Banner) {
        set(self.name, &mut banner.name);
        self.description.apply(&mut banner.description);
        self.image.apply(&mut banner.image);
        set(self.is_status, &mut banner.is_status);
    }
}
