//! Menu item model, its fixed vocabularies, and boundary validation.
//!
//! [`MenuItemInput`] is the unvalidated shape that arrives from the admin UI
//! or a CSV row. [`MenuItemInput::into_menu_item`] is the only way to obtain
//! a [`MenuItem`], so every draft and published row has passed the same
//! checks.

use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors, ValidationErrorsKind};

use crate::error::CoreError;

/// Wire format of `lastChecked`.
pub const LAST_CHECKED_FORMAT: &str = "%Y-%m-%d";

static LAST_CHECKED_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid lastChecked regex"));

// ---------------------------------------------------------------------------
// Vocabularies
// ---------------------------------------------------------------------------

/// Menu section an item is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Savory Empanadas")]
    SavoryEmpanadas,
    #[serde(rename = "Dessert Empanadas")]
    DessertEmpanadas,
    #[serde(rename = "Combos")]
    Combos,
    #[serde(rename = "Sandwiches")]
    Sandwiches,
    #[serde(rename = "Sides")]
    Sides,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Self::SavoryEmpanadas,
        Self::DessertEmpanadas,
        Self::Combos,
        Self::Sandwiches,
        Self::Sides,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SavoryEmpanadas => "Savory Empanadas",
            Self::DessertEmpanadas => "Dessert Empanadas",
            Self::Combos => "Combos",
            Self::Sandwiches => "Sandwiches",
            Self::Sides => "Sides",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown category '{s}'"))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Badge shown next to an item. Declaration order is the canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tag {
    New,
    #[serde(rename = "Most-Loved")]
    MostLoved,
    Vegan,
    Spicy,
}

impl Tag {
    pub const ALL: [Tag; 4] = [Self::New, Self::MostLoved, Self::Vegan, Self::Spicy];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::MostLoved => "Most-Loved",
            Self::Vegan => "Vegan",
            Self::Spicy => "Spicy",
        }
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown tag '{s}'"))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Delivery platforms the site links out to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Doordash,
    Grubhub,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Self::Doordash, Self::Grubhub];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Doordash => "doordash",
            Self::Grubhub => "grubhub",
        }
    }
}

// ---------------------------------------------------------------------------
// Validated model
// ---------------------------------------------------------------------------

/// Per-platform prices. Absent means "not sold on that platform".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prices {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doordash: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grubhub: Option<f64>,
}

impl Prices {
    pub fn get(&self, platform: Platform) -> Option<f64> {
        match platform {
            Platform::Doordash => self.doordash,
            Platform::Grubhub => self.grubhub,
        }
    }
}

/// Per-platform order URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLinks {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doordash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grubhub: Option<String>,
}

impl OrderLinks {
    pub fn get(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::Doordash => self.doordash.as_deref(),
            Platform::Grubhub => self.grubhub.as_deref(),
        }
    }
}

/// A validated menu item. Shared by the draft and published tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: Category,
    pub prices: Prices,
    pub order_links: OrderLinks,
    pub tags: BTreeSet<Tag>,
    pub image: Option<String>,
    pub is_active: bool,
    pub last_checked: Option<NaiveDate>,
}

impl MenuItem {
    /// Serialized form stored in change-log `before`/`after` columns.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

// ---------------------------------------------------------------------------
// Input DTOs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct PricesInput {
    #[validate(custom(function = "validate_price"))]
    pub doordash: Option<f64>,
    #[validate(custom(function = "validate_price"))]
    pub grubhub: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct OrderLinksInput {
    #[validate(url(message = "must be an absolute URL"))]
    pub doordash: Option<String>,
    #[validate(url(message = "must be an absolute URL"))]
    pub grubhub: Option<String>,
}

/// Unvalidated menu item as submitted by the admin UI or parsed from CSV.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemInput {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[validate(custom(function = "validate_category"))]
    pub category: String,
    #[validate(nested)]
    pub prices: PricesInput,
    #[validate(nested)]
    pub order_links: OrderLinksInput,
    #[serde(default)]
    #[validate(custom(function = "validate_tags"))]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    #[validate(
        regex(path = *LAST_CHECKED_PATTERN, message = "must match YYYY-MM-DD"),
        custom(function = "validate_calendar_date")
    )]
    pub last_checked: Option<String>,
}

impl MenuItemInput {
    /// Validate and normalise into a [`MenuItem`].
    ///
    /// Empty `description`/`image` become absent; `isActive` defaults to true.
    pub fn into_menu_item(self) -> Result<MenuItem, CoreError> {
        self.validate()
            .map_err(|e| CoreError::Validation(describe_errors(&e)))?;

        let category = self.category.parse().map_err(CoreError::Validation)?;
        let tags = self
            .tags
            .iter()
            .map(|t| t.parse::<Tag>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(CoreError::Validation)?;
        let last_checked = self
            .last_checked
            .as_deref()
            .map(|d| NaiveDate::parse_from_str(d, LAST_CHECKED_FORMAT))
            .transpose()
            .map_err(|e| CoreError::Validation(format!("lastChecked: {e}")))?;

        Ok(MenuItem {
            id: self.id,
            name: self.name,
            description: non_empty(self.description),
            category,
            prices: Prices {
                doordash: self.prices.doordash,
                grubhub: self.prices.grubhub,
            },
            order_links: OrderLinks {
                doordash: non_empty(self.order_links.doordash),
                grubhub: non_empty(self.order_links.grubhub),
            },
            tags,
            image: non_empty(self.image),
            is_active: self.is_active.unwrap_or(true),
            last_checked,
        })
    }
}

impl From<&MenuItem> for MenuItemInput {
    fn from(item: &MenuItem) -> Self {
        Self {
            id: item.id.clone(),
            name: item.name.clone(),
            description: item.description.clone(),
            category: item.category.as_str().to_string(),
            prices: PricesInput {
                doordash: item.prices.doordash,
                grubhub: item.prices.grubhub,
            },
            order_links: OrderLinksInput {
                doordash: item.order_links.doordash.clone(),
                grubhub: item.order_links.grubhub.clone(),
            },
            tags: item.tags.iter().map(|t| t.as_str().to_string()).collect(),
            image: item.image.clone(),
            is_active: Some(item.is_active),
            last_checked: item
                .last_checked
                .map(|d| d.format(LAST_CHECKED_FORMAT).to_string()),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Custom validators
// ---------------------------------------------------------------------------

fn validation_error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

fn validate_category(category: &str) -> Result<(), ValidationError> {
    category
        .parse::<Category>()
        .map(|_| ())
        .map_err(|msg| validation_error("category", msg))
}

fn validate_tags(tags: &[String]) -> Result<(), ValidationError> {
    for tag in tags {
        tag.parse::<Tag>()
            .map_err(|msg| validation_error("tags", msg))?;
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<(), ValidationError> {
    if !price.is_finite() || price < 0.0 {
        return Err(validation_error(
            "price",
            format!("{price} is not a valid price"),
        ));
    }
    Ok(())
}

fn validate_calendar_date(date: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(date, LAST_CHECKED_FORMAT)
        .map(|_| ())
        .map_err(|_| validation_error("date", format!("'{date}' is not a calendar date")))
}

// ---------------------------------------------------------------------------
// Error rendering
// ---------------------------------------------------------------------------

/// Flatten `validator` errors into one deterministic, human-readable line.
pub fn describe_errors(errors: &ValidationErrors) -> String {
    let mut lines = Vec::new();
    collect_errors(errors, "", &mut lines);
    lines.sort();
    lines.join("; ")
}

fn collect_errors(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    for (field, kind) in errors.errors() {
        let path = match (prefix.is_empty(), field.as_ref()) {
            (_, "__all__") => prefix.to_string(),
            (true, f) => wire_name(f),
            (false, f) => format!("{prefix}.{}", wire_name(f)),
        };
        match kind {
            ValidationErrorsKind::Field(list) => {
                for err in list {
                    let msg = err
                        .message
                        .as_deref()
                        .map(str::to_string)
                        .unwrap_or_else(|| err.code.to_string());
                    if path.is_empty() {
                        out.push(msg);
                    } else {
                        out.push(format!("{path}: {msg}"));
                    }
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_errors(inner, &path, out),
            ValidationErrorsKind::List(items) => {
                for (idx, inner) in items {
                    collect_errors(inner, &format!("{path}[{idx}]"), out);
                }
            }
        }
    }
}

/// Field names as they appear in JSON and CSV headers (`order_links` -> `orderLinks`).
fn wire_name(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn beef_empanada() -> MenuItemInput {
        MenuItemInput {
            id: "a1".into(),
            name: "Beef Empanada".into(),
            category: "Savory Empanadas".into(),
            prices: PricesInput {
                doordash: Some(3.5),
                grubhub: None,
            },
            order_links: OrderLinksInput {
                doordash: Some("https://x/a".into()),
                grubhub: None,
            },
            is_active: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn valid_input_converts() {
        let item = beef_empanada().into_menu_item().unwrap();
        assert_eq!(item.id, "a1");
        assert_eq!(item.category, Category::SavoryEmpanadas);
        assert_eq!(item.prices.get(Platform::Doordash), Some(3.5));
        assert_eq!(item.order_links.get(Platform::Doordash), Some("https://x/a"));
        assert!(item.tags.is_empty());
        assert!(item.is_active);
    }

    #[test]
    fn is_active_defaults_to_true() {
        let input = MenuItemInput {
            is_active: None,
            ..beef_empanada()
        };
        assert!(input.into_menu_item().unwrap().is_active);
    }

    #[test]
    fn empty_optional_strings_normalise_to_none() {
        let input = MenuItemInput {
            description: Some(String::new()),
            image: Some(String::new()),
            ..beef_empanada()
        };
        let item = input.into_menu_item().unwrap();
        assert_eq!(item.description, None);
        assert_eq!(item.image, None);
    }

    #[test]
    fn empty_name_is_rejected() {
        let input = MenuItemInput {
            name: String::new(),
            ..beef_empanada()
        };
        let err = input.into_menu_item().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("name"));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let input = MenuItemInput {
            category: "Drinks".into(),
            ..beef_empanada()
        };
        let err = input.into_menu_item().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("Drinks"));
    }

    #[test]
    fn unknown_tag_is_rejected() {
        let input = MenuItemInput {
            tags: vec!["Vegan".into(), "Gluten-Free".into()],
            ..beef_empanada()
        };
        assert_matches!(input.into_menu_item(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn duplicate_tags_collapse_in_canonical_order() {
        let input = MenuItemInput {
            tags: vec!["Spicy".into(), "New".into(), "Spicy".into()],
            ..beef_empanada()
        };
        let item = input.into_menu_item().unwrap();
        let tags: Vec<Tag> = item.tags.into_iter().collect();
        assert_eq!(tags, vec![Tag::New, Tag::Spicy]);
    }

    #[test]
    fn malformed_order_link_is_rejected() {
        let input = MenuItemInput {
            order_links: OrderLinksInput {
                doordash: Some("not a url".into()),
                grubhub: None,
            },
            ..beef_empanada()
        };
        let err = input.into_menu_item().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.contains("orderLinks.doordash"));
    }

    #[test]
    fn last_checked_must_match_pattern() {
        let input = MenuItemInput {
            last_checked: Some("10/14/2026".into()),
            ..beef_empanada()
        };
        assert_matches!(input.into_menu_item(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn last_checked_must_be_real_date() {
        let input = MenuItemInput {
            last_checked: Some("2026-02-30".into()),
            ..beef_empanada()
        };
        assert_matches!(input.into_menu_item(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn last_checked_parses() {
        let input = MenuItemInput {
            last_checked: Some("2026-10-14".into()),
            ..beef_empanada()
        };
        let item = input.into_menu_item().unwrap();
        assert_eq!(item.last_checked, NaiveDate::from_ymd_opt(2026, 10, 14));
    }

    #[test]
    fn item_without_prices_is_accepted() {
        let input = MenuItemInput {
            category: "Combos".into(),
            prices: PricesInput::default(),
            ..beef_empanada()
        };
        let item = input.into_menu_item().unwrap();
        assert_eq!(item.prices.get(Platform::Doordash), None);
        assert_eq!(item.prices.get(Platform::Grubhub), None);
    }

    #[test]
    fn error_paths_use_wire_names() {
        let input = MenuItemInput {
            last_checked: Some("yesterday".into()),
            ..beef_empanada()
        };
        let err = input.into_menu_item().unwrap_err();
        assert_matches!(err, CoreError::Validation(msg) if msg.starts_with("lastChecked:"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let input = MenuItemInput {
            prices: PricesInput {
                doordash: Some(-1.0),
                grubhub: None,
            },
            ..beef_empanada()
        };
        assert_matches!(input.into_menu_item(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn input_from_item_converts_back_to_same_item() {
        let item = MenuItemInput {
            description: Some("Ground beef, olives".into()),
            tags: vec!["Most-Loved".into()],
            last_checked: Some("2026-01-02".into()),
            ..beef_empanada()
        }
        .into_menu_item()
        .unwrap();

        let again = MenuItemInput::from(&item).into_menu_item().unwrap();
        assert_eq!(again, item);
    }

    #[test]
    fn serializes_with_camel_case_wire_names() {
        let item = beef_empanada().into_menu_item().unwrap();
        let json = item.snapshot();
        assert_eq!(json["category"], "Savory Empanadas");
        assert_eq!(json["orderLinks"]["doordash"], "https://x/a");
        assert_eq!(json["isActive"], true);
        assert!(json["prices"].get("grubhub").is_none());
    }
}
