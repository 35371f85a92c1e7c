use std::{fmt, num::IntErrorKind};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Body of a create-recipe request, built fresh from the form on every submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cooking_time: CookingTime,
    pub category: String,
}

impl Recipe {
    /// Builds a payload from raw form text. Nothing is validated; empty and
    /// malformed values are carried through as-is.
    pub fn from_form_values(
        title: &str,
        ingredients: &str,
        instructions: &str,
        cooking_time: &str,
        category: &str,
    ) -> Self {
        Self {
            title: title.to_string(),
            ingredients: split_ingredients(ingredients),
            instructions: instructions.to_string(),
            cooking_time: CookingTime::parse(cooking_time),
            category: category.to_string(),
        }
    }
}

/// Splits a comma-separated ingredient line and trims every element.
///
/// Empty elements are kept, so `""` becomes `[""]` and `"a,,b"` keeps its
/// middle entry. A byte-order mark counts as whitespace.
pub fn split_ingredients(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|item| item.trim_matches(is_form_whitespace).to_string())
        .collect()
}

fn is_form_whitespace(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Cooking time in minutes, or the not-a-number sentinel when the input had
/// no leading integer. The sentinel serializes as JSON `null`. Digit runs
/// beyond the `i64` range saturate at its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CookingTime {
    Minutes(i64),
    NotANumber,
}

impl CookingTime {
    /// Lenient integer parse with browser `parseInt` rules: leading
    /// whitespace, an optional sign and an optional `0x` prefix are accepted,
    /// and anything after the leading digits is ignored.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_start_matches(is_form_whitespace);
        let (negative, mut rest) = match trimmed.strip_prefix('-') {
            Some(unsigned) => (true, unsigned),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };

        let mut radix = 10;
        if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
            radix = 16;
            rest = hex;
        }

        let digits_len = rest
            .char_indices()
            .find(|(_, c)| !c.is_digit(radix))
            .map(|(idx, _)| idx)
            .unwrap_or(rest.len());
        let digits = &rest[..digits_len];
        if digits.is_empty() {
            return Self::NotANumber;
        }

        let signed = if negative {
            format!("-{digits}")
        } else {
            digits.to_string()
        };
        match i64::from_str_radix(&signed, radix) {
            Ok(value) => Self::Minutes(value),
            Err(err) => match err.kind() {
                IntErrorKind::NegOverflow => Self::Minutes(i64::MIN),
                IntErrorKind::PosOverflow => Self::Minutes(i64::MAX),
                _ => Self::NotANumber,
            },
        }
    }

    pub fn is_nan(self) -> bool {
        matches!(self, Self::NotANumber)
    }
}

impl fmt::Display for CookingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minutes(value) => write!(f, "{value}"),
            Self::NotANumber => f.write_str("NaN"),
        }
    }
}

impl Serialize for CookingTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Minutes(value) => serializer.serialize_i64(*value),
            Self::NotANumber => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for CookingTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(Option::<i64>::deserialize(deserializer)?
            .map(Self::Minutes)
            .unwrap_or(Self::NotANumber))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn splits_and_trims_ingredients() {
        assert_eq!(
            split_ingredients(" flour, sugar ,eggs "),
            vec!["flour", "sugar", "eggs"]
        );
    }

    #[test]
    fn empty_ingredients_yield_single_empty_entry() {
        assert_eq!(split_ingredients(""), vec![""]);
        assert_eq!(split_ingredients("a,,b"), vec!["a", "", "b"]);
    }

    #[test]
    fn parses_cooking_time_like_parse_int() {
        assert_eq!(CookingTime::parse("45"), CookingTime::Minutes(45));
        assert_eq!(CookingTime::parse("  30 min"), CookingTime::Minutes(30));
        assert_eq!(CookingTime::parse("-5"), CookingTime::Minutes(-5));
        assert_eq!(CookingTime::parse("+7"), CookingTime::Minutes(7));
        assert_eq!(CookingTime::parse("3.9"), CookingTime::Minutes(3));
        assert_eq!(CookingTime::parse("0x1A"), CookingTime::Minutes(26));
    }

    #[test]
    fn non_numeric_cooking_time_is_nan() {
        assert!(CookingTime::parse("abc").is_nan());
        assert!(CookingTime::parse("").is_nan());
        assert!(CookingTime::parse("-").is_nan());
        assert!(CookingTime::parse("0x").is_nan());
    }

    #[test]
    fn cooking_time_keeps_i64_bounds_and_saturates_beyond() {
        assert_eq!(
            CookingTime::parse("-9223372036854775808"),
            CookingTime::Minutes(i64::MIN)
        );
        assert_eq!(
            CookingTime::parse("9223372036854775807"),
            CookingTime::Minutes(i64::MAX)
        );
        assert_eq!(
            CookingTime::parse("99999999999999999999"),
            CookingTime::Minutes(i64::MAX)
        );
        assert_eq!(
            CookingTime::parse("-99999999999999999999"),
            CookingTime::Minutes(i64::MIN)
        );
        assert_eq!(
            serde_json::to_value(CookingTime::parse("99999999999999999999")).expect("serialize"),
            json!(i64::MAX)
        );
    }

    #[test]
    fn byte_order_mark_is_trimmed_like_whitespace() {
        assert_eq!(
            split_ingredients("\u{feff}salt, \u{feff}pepper\u{feff}"),
            vec!["salt", "pepper"]
        );
        assert_eq!(CookingTime::parse("\u{feff}12"), CookingTime::Minutes(12));
    }

    #[test]
    fn nan_cooking_time_serializes_as_null_not_omitted() {
        let recipe = Recipe::from_form_values("Soup", "water", "boil", "abc", "Dinner");
        let value = serde_json::to_value(&recipe).expect("serialize");
        assert_eq!(
            value,
            json!({
                "title": "Soup",
                "ingredients": ["water"],
                "instructions": "boil",
                "cookingTime": null,
                "category": "Dinner",
            })
        );
    }

    #[test]
    fn recipe_deserializes_null_cooking_time() {
        let recipe: Recipe = serde_json::from_value(json!({
            "title": "t",
            "ingredients": [""],
            "instructions": "",
            "cookingTime": null,
            "category": "",
        }))
        .expect("deserialize");
        assert_eq!(recipe.cooking_time, CookingTime::NotANumber);
        assert_eq!(recipe.cooking_time.to_string(), "NaN");
    }
}
