//! Product search predicate shared by the in-memory backend.
//!
//! A product matches when the needle occurs (case-insensitively) in:
//! its name or description, the name of its category, the name of any
//! subcategory of that category, or the name of any sub-of-sub category
//! under one of those subcategories. The hierarchy is walked from
//! `product.category` only.

use uuid::Uuid;

use crate::types::{Category, Product, SubofSub, Subcategory};

/// Snapshot of the taxonomy tables a search runs against.
pub struct Taxonomy<'a> {
    pub categories: &'a [Category],
    pub subcategories: &'a [Subcategory],
    pub sub_of_subs: &'a [SubofSub],
}

fn contains(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl Taxonomy<'_> {
    /// `needle_lower` must already be lowercased.
    pub fn product_matches(&self, product: &Product, needle_lower: &str) -> bool {
        if contains(&product.name, needle_lower) {
            return true;
        }
        if product
            .description
            .as_deref()
            .is_some_and(|d| contains(d, needle_lower))
        {
            return true;
        }
        let Some(category_id) = product.category else {
            return false;
        };
        self.category_matches(category_id, needle_lower)
    }

    fn category_matches(&self, category_id: Uuid, needle_lower: &str) -> bool {
        let own_name = self
            .categories
            .iter()
            .find(|c| c.uuid == category_id)
            .is_some_and(|c| contains(&c.name, needle_lower));
        if own_name {
            return true;
        }

        self.subcategories
            .iter()
            .filter(|s| s.category == Some(category_id))
            .any(|s| {
                contains(&s.name, needle_lower)
                    || self
                        .sub_of_subs
                        .iter()
                        .filter(|ss| ss.sub_category == Some(s.uuid))
                        .any(|ss| contains(&ss.name, needle_lower))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn product(name: &str, category: Option<Uuid>) -> Product {
        Product {
            uuid: Uuid::new_v4(),
            name: name.into(),
            description: Some("Solid hardwood".into()),
            price: Decimal::new(50000, 2),
            unit: Uuid::new_v4(),
            quantity: 0,
            image_one: None,
            image_two: None,
            image_three: None,
            image_four: None,
            image_five: None,
            video: None,
            status: true,
            is_featured: false,
            category,
            sub_category: None,
            sub_of_sub: None,
            sold_by: None,
            material: None,
            brand: None,
            color: None,
            size: None,
            warranty: 0,
            number_of_box: 0,
            features: None,
            country_of_origin: None,
            created: Utc::now(),
        }
    }

    struct Fixture {
        categories: Vec<Category>,
        subcategories: Vec<Subcategory>,
        sub_of_subs: Vec<SubofSub>,
    }

    impl Fixture {
        fn new() -> Self {
            let wood = Category {
                uuid: Uuid::new_v4(),
                name: "Wood".into(),
                description: None,
                image: None,
            };
            let teak = Subcategory {
                uuid: Uuid::new_v4(),
                name: "Teak".into(),
                description: None,
                image: None,
                category: Some(wood.uuid),
            };
            let burmese = SubofSub {
                uuid: Uuid::new_v4(),
                name: "Burmese".into(),
                description: None,
                image: None,
                sub_category: Some(teak.uuid),
            };
            Self {
                categories: vec![wood],
                subcategories: vec![teak],
                sub_of_subs: vec![burmese],
            }
        }

        fn taxonomy(&self) -> Taxonomy<'_> {
            Taxonomy {
                categories: &self.categories,
                subcategories: &self.subcategories,
                sub_of_subs: &self.sub_of_subs,
            }
        }
    }

    #[test]
    fn matches_own_text_case_insensitively() {
        let fixture = Fixture::new();
        let table = product("Dining Table", None);
        assert!(fixture.taxonomy().product_matches(&table, "table"));
        assert!(fixture.taxonomy().product_matches(&table, "hardwood"));
        assert!(!fixture.taxonomy().product_matches(&table, "chair"));
    }

    #[test]
    fn matches_through_hierarchy() {
        let fixture = Fixture::new();
        let table = product("Dining Table", Some(fixture.categories[0].uuid));
        assert!(fixture.taxonomy().product_matches(&table, "wood"));
        assert!(fixture.taxonomy().product_matches(&table, "teak"));
        assert!(fixture.taxonomy().product_matches(&table, "burm"));
    }

    #[test]
    fn uncategorised_product_ignores_hierarchy() {
        let fixture = Fixture::new();
        let table = product("Dining Table", None);
        assert!(!fixture.taxonomy().product_matches(&table, "teak"));
    }
}
