//! Declarative request schemas.
//!
//! Each entity has one [`Schema`]: an ordered list of [`FieldSpec`]s. A single
//! routine, [`validate`], checks a JSON body against any schema and returns a
//! field-level error map. Bodies are decoded into typed payloads only after
//! they pass.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;
use uuid::Uuid;

use crate::error::{FieldErrors, NON_FIELD_ERRORS};
use crate::types::EntityKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Reference to a stored media file (image or video).
    Media,
    Decimal,
    Integer,
    Boolean,
    Reference(EntityKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    NotBlank,
    MaxLength(usize),
    NonNegative,
    /// Total significant digits, whole part plus decimal places.
    MaxDigits(u32),
    MaxDecimalPlaces(u32),
}

#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub nullable: bool,
    pub rules: &'static [Rule],
}

impl FieldSpec {
    pub const fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            nullable: false,
            rules: &[],
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn nullable(self) -> Self {
        Self {
            nullable: true,
            ..self
        }
    }

    pub const fn rules(self, rules: &'static [Rule]) -> Self {
        Self { rules, ..self }
    }
}

#[derive(Debug)]
pub struct Schema {
    pub entity: EntityKind,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Whether required fields must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Create,
    Partial,
}

// ── Entity schemas ────────────────────────────────────────────

const NAME_RULES: &[Rule] = &[Rule::NotBlank, Rule::MaxLength(255)];
const SHORT_TEXT: &[Rule] = &[Rule::MaxLength(255)];
const COUNT_RULES: &[Rule] = &[Rule::NonNegative];
/// Matches the `NUMERIC(10,2)` price column.
const PRICE_RULES: &[Rule] = &[
    Rule::NonNegative,
    Rule::MaxDigits(10),
    Rule::MaxDecimalPlaces(2),
];

const NAME: FieldSpec = FieldSpec::new("name", FieldKind::Text)
    .required()
    .rules(NAME_RULES);
const DESCRIPTION: FieldSpec = FieldSpec::new("description", FieldKind::Text).nullable();
const IMAGE: FieldSpec = FieldSpec::new("image", FieldKind::Media).nullable();

const fn short_text(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Text)
        .nullable()
        .rules(SHORT_TEXT)
}

const fn media(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Media).nullable()
}

const fn count(name: &'static str) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Integer).rules(COUNT_RULES)
}

const fn reference(name: &'static str, kind: EntityKind) -> FieldSpec {
    FieldSpec::new(name, FieldKind::Reference(kind)).nullable()
}

pub static CATEGORY: Schema = Schema {
    entity: EntityKind::Category,
    fields: &[NAME, DESCRIPTION, IMAGE],
};

pub static SUBCATEGORY: Schema = Schema {
    entity: EntityKind::Subcategory,
    fields: &[
        NAME,
        DESCRIPTION,
        IMAGE,
        reference("category", EntityKind::Category),
    ],
};

pub static SUB_OF_SUB: Schema = Schema {
    entity: EntityKind::SubofSub,
    fields: &[
        NAME,
        DESCRIPTION,
        IMAGE,
        reference("sub_category", EntityKind::Subcategory),
    ],
};

pub static UNIT: Schema = Schema {
    entity: EntityKind::Unit,
    fields: &[NAME, DESCRIPTION],
};

pub static PRODUCT: Schema = Schema {
    entity: EntityKind::Product,
    fields: &[
        NAME,
        DESCRIPTION,
        FieldSpec::new("price", FieldKind::Decimal)
            .required()
            .rules(PRICE_RULES),
        FieldSpec::new("unit", FieldKind::Reference(EntityKind::Unit)).required(),
        count("quantity"),
        media("image_one"),
        media("image_two"),
        media("image_three"),
        media("image_four"),
        media("image_five"),
        media("video"),
        FieldSpec::new("status", FieldKind::Boolean),
        FieldSpec::new("is_featured", FieldKind::Boolean),
        reference("category", EntityKind::Category),
        reference("sub_category", EntityKind::Subcategory),
        reference("sub_of_sub", EntityKind::SubofSub),
        short_text("sold_by"),
        short_text("material"),
        short_text("brand"),
        short_text("color"),
        short_text("size"),
        count("warranty"),
        count("number_of_box"),
        FieldSpec::new("features", FieldKind::Text).nullable(),
        short_text("country_of_origin"),
    ],
};

pub static BANNER: Schema = Schema {
    entity: EntityKind::Banner,
    fields: &[
        NAME,
        DESCRIPTION,
        IMAGE,
        FieldSpec::new("is_status", FieldKind::Boolean),
    ],
};

// ── Validation ────────────────────────────────────────────────

/// Check `body` against `schema`. Keys the schema does not name are ignored.
pub fn validate(schema: &Schema, body: &Value, mode: Mode) -> Result<(), FieldErrors> {
    let Some(object) = body.as_object() else {
        return Err(FieldErrors::single(
            NON_FIELD_ERRORS,
            format!(
                "Invalid data. Expected a dictionary, but got {}.",
                json_type_name(body)
            ),
        ));
    };

    let mut errors = FieldErrors::new();
    for field in schema.fields {
        match object.get(field.name) {
            None => {
                if mode == Mode::Create && field.required {
                    errors.add(field.name, "This field is required.");
                }
            }
            Some(Value::Null) => {
                if !field.nullable {
                    errors.add(field.name, "This field may not be null.");
                }
            }
            Some(value) => {
                if let Err(message) = check_field(field, value) {
                    errors.add(field.name, message);
                }
            }
        }
    }
    errors.into_result()
}

fn check_field(field: &FieldSpec, value: &Value) -> Result<(), String> {
    match field.kind {
        FieldKind::Text | FieldKind::Media => {
            let text = value.as_str().ok_or("Not a valid string.")?;
            check_text_rules(field.rules, text)
        }
        FieldKind::Decimal => {
            let number = parse_decimal(value).ok_or("A valid number is required.")?;
            check_decimal_rules(field.rules, number)
        }
        FieldKind::Integer => {
            let number = value.as_i64().ok_or("A valid integer is required.")?;
            if number > i64::from(i32::MAX) {
                return Err(format!(
                    "Ensure this value is less than or equal to {}.",
                    i32::MAX
                ));
            }
            if field.rules.contains(&Rule::NonNegative) && number < 0 {
                return Err("Ensure this value is greater than or equal to 0.".into());
            }
            if number < i64::from(i32::MIN) {
                return Err(format!(
                    "Ensure this value is greater than or equal to {}.",
                    i32::MIN
                ));
            }
            Ok(())
        }
        FieldKind::Boolean => value
            .as_bool()
            .map(|_| ())
            .ok_or_else(|| "Must be a valid boolean.".into()),
        FieldKind::Reference(_) => value
            .as_str()
            .and_then(|s| Uuid::parse_str(s).ok())
            .map(|_| ())
            .ok_or_else(|| "Must be a valid UUID.".into()),
    }
}

fn check_text_rules(rules: &[Rule], text: &str) -> Result<(), String> {
    for rule in rules {
        match *rule {
            Rule::NotBlank if text.trim().is_empty() => {
                return Err("This field may not be blank.".into());
            }
            Rule::MaxLength(max) if text.chars().count() > max => {
                return Err(format!(
                    "Ensure this field has no more than {max} characters."
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

fn check_decimal_rules(rules: &[Rule], number: Decimal) -> Result<(), String> {
    let places = number.normalize().scale();
    let whole = whole_digits(number);
    let max_places = rules.iter().find_map(|rule| match *rule {
        Rule::MaxDecimalPlaces(places) => Some(places),
        _ => None,
    });
    for rule in rules {
        match *rule {
            Rule::NonNegative if number.is_sign_negative() && !number.is_zero() => {
                return Err("Ensure this value is greater than or equal to 0.".into());
            }
            Rule::MaxDigits(max) if whole + places > max => {
                return Err(format!(
                    "Ensure that there are no more than {max} digits in total."
                ));
            }
            Rule::MaxDigits(max) => {
                let max_whole = max.saturating_sub(max_places.unwrap_or(0));
                if whole > max_whole {
                    return Err(format!(
                        "Ensure that there are no more than {max_whole} digits before the decimal point."
                    ));
                }
            }
            Rule::MaxDecimalPlaces(places) if number.normalize().scale() > places => {
                return Err(format!(
                    "Ensure that there are no more than {places} decimal places."
                ));
            }
            _ => {}
        }
    }
    Ok(())
}

fn whole_digits(number: Decimal) -> u32 {
    let whole = number.abs().trunc();
    if whole.is_zero() {
        0
    } else {
        whole.normalize().to_string().len() as u32
    }
}

/// Decimals arrive either as JSON numbers or as numeric strings.
pub(crate) fn parse_decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "str",
        Value::Array(_) => "list",
        Value::Object(_) => "dict",
    }
}
