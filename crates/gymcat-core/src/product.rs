use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog category. Stored and serialized with the storefront's labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    #[serde(rename = "Pre-workout")]
    PreWorkout,
    #[serde(rename = "Protein-powder")]
    ProteinPowder,
}

impl ProductType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ProductType::PreWorkout => "Pre-workout",
            ProductType::ProteinPowder => "Protein-powder",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ProductType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pre-workout" => Ok(ProductType::PreWorkout),
            "Protein-powder" => Ok(ProductType::ProteinPowder),
            other => Err(format!("unknown product type \"{other}\"")),
        }
    }
}

/// Per-serving macros. Absent values default to `0` once either calories or
/// protein was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutrition {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

/// A catalog entry. `flavour` is the natural key: at most one stored product
/// per flavour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub flavour: String,
    #[serde(rename = "type")]
    pub product_type: ProductType,
    /// Always `> 0` and `<= 100000`, with a scale of two.
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    /// At most 10 entries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub benefits: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    /// In `[0, 5]`, one decimal place.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Decimal>,
}

impl Product {
    /// Returns `true` when `other` carries the same catalog content, i.e. a
    /// stored copy of `other` would not need rewriting to match `self`.
    ///
    /// Decimals compare by value, so `39.9` and a stored `39.90` match.
    #[must_use]
    pub fn content_matches(&self, other: &Product) -> bool {
        self.changed_fields(other).is_empty()
    }

    /// Names of the fields whose values differ between `self` and `other`.
    /// `flavour` is the lookup key and is not compared.
    #[must_use]
    pub fn changed_fields(&self, other: &Product) -> Vec<&'static str> {
        let mut changed = Vec::new();
        if self.product_type != other.product_type {
            changed.push("type");
        }
        if self.price != other.price {
            changed.push("price");
        }
        if self.description != other.description {
            changed.push("description");
        }
        if self.rating != other.rating {
            changed.push("rating");
        }
        if self.ingredients != other.ingredients {
            changed.push("ingredients");
        }
        if self.benefits != other.benefits {
            changed.push("benefits");
        }
        if self.nutrition != other.nutrition {
            changed.push("nutrition");
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vanilla() -> Product {
        Product {
            flavour: "Vanilla".to_string(),
            product_type: ProductType::ProteinPowder,
            price: Decimal::new(3999, 2),
            description: Some("Whey protein with 35g of protein per serving.".to_string()),
            ingredients: Some(vec!["whey isolate".to_string(), "cocoa".to_string()]),
            benefits: Some(vec!["Supports lean muscle growth".to_string()]),
            nutrition: Some(Nutrition {
                calories: 0.0,
                protein: 35.0,
                carbs: 0.0,
                fat: 0.0,
            }),
            rating: Some(Decimal::new(45, 1)),
        }
    }

    #[test]
    fn product_type_labels_round_trip_through_from_str() {
        for kind in [ProductType::PreWorkout, ProductType::ProteinPowder] {
            assert_eq!(kind.as_str().parse::<ProductType>().unwrap(), kind);
        }
        assert!("Creatine".parse::<ProductType>().is_err());
    }

    #[test]
    fn product_type_serializes_with_storefront_label() {
        let json = serde_json::to_string(&ProductType::PreWorkout).unwrap();
        assert_eq!(json, "\"Pre-workout\"");
    }

    #[test]
    fn identical_products_match() {
        assert!(vanilla().content_matches(&vanilla()));
    }

    #[test]
    fn price_change_is_the_only_changed_field() {
        let mut newer = vanilla();
        newer.price = Decimal::new(4499, 2);
        assert_eq!(newer.changed_fields(&vanilla()), vec!["price"]);
    }

    #[test]
    fn stored_scale_does_not_register_as_a_change() {
        let mut stored = vanilla();
        stored.price = Decimal::new(399_900, 4);
        stored.rating = Some(Decimal::new(450, 2));
        assert!(vanilla().content_matches(&stored));
    }

    #[test]
    fn one_cent_is_a_change() {
        let mut stored = vanilla();
        stored.price = Decimal::new(3998, 2);
        assert_eq!(vanilla().changed_fields(&stored), vec!["price"]);
    }

    #[test]
    fn ingredient_order_matters() {
        let mut reordered = vanilla();
        reordered.ingredients = Some(vec!["cocoa".to_string(), "whey isolate".to_string()]);
        assert_eq!(reordered.changed_fields(&vanilla()), vec!["ingredients"]);
    }

    #[test]
    fn nutrition_compares_all_four_fields() {
        let mut changed = vanilla();
        changed.nutrition = Some(Nutrition {
            fat: 2.0,
            ..changed.nutrition.unwrap()
        });
        assert_eq!(changed.changed_fields(&vanilla()), vec!["nutrition"]);
    }

    #[test]
    fn dropping_a_rating_is_a_change() {
        let mut unrated = vanilla();
        unrated.rating = None;
        assert_eq!(unrated.changed_fields(&vanilla()), vec!["rating"]);
    }

    #[test]
    fn product_serializes_type_field_name() {
        let json = serde_json::to_value(vanilla()).unwrap();
        assert_eq!(json["type"], "Protein-powder");
        assert_eq!(json["flavour"], "Vanilla");
        assert_eq!(json["price"], "39.99");
    }
}
