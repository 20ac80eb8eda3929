/// Cat document model
///
/// Stored shape: `{_id: ObjectId, name: string, age: int32, features: [string]}`.
/// Documents are printed as single-line JSON.
///
/// Collections written by other tools may hold ages that are not integers
/// (for example the raw text typed at a prompt). Those decode as
/// [`Age::Unrecognized`] and print unchanged instead of failing the whole read.
use mongodb::bson::oid::ObjectId;
use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Age as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Age {
    Years(i32),

    /// Any other stored value, kept as is
    Unrecognized(Bson),
}

impl Age {
    /// The age in years, if it is an integer
    pub fn years(&self) -> Option<i32> {
        match self {
            Age::Years(years) => Some(*years),
            Age::Unrecognized(_) => None,
        }
    }
}

impl From<i32> for Age {
    fn from(years: i32) -> Self {
        Age::Years(years)
    }
}

impl PartialEq<i32> for Age {
    fn eq(&self, other: &i32) -> bool {
        self.years() == Some(*other)
    }
}

/// A cat document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cat {
    /// Assigned by the store on insert
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,

    pub name: String,

    pub age: Age,

    /// Ordered, duplicates only avoided by `add_feature`
    #[serde(default)]
    pub features: Vec<String>,
}

impl Cat {
    /// Creates a cat without an id
    pub fn new(name: impl Into<String>, age: i32, features: Vec<String>) -> Self {
        Cat {
            id: None,
            name: name.into(),
            age: Age::Years(age),
            features,
        }
    }

    /// Returns the cat with the given id
    pub fn with_id(mut self, id: ObjectId) -> Self {
        self.id = Some(id);
        self
    }
}

impl fmt::Display for Cat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson;

    #[test]
    fn test_display_without_id() {
        let cat = Cat::new("Tom", 3, vec!["grey".to_string(), "loud".to_string()]);
        assert_eq!(
            cat.to_string(),
            r#"{"name":"Tom","age":3,"features":["grey","loud"]}"#
        );
    }

    #[test]
    fn test_display_includes_id() {
        let id = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();
        let cat = Cat::new("Tom", 3, vec![]).with_id(id);
        let shown = cat.to_string();
        assert!(shown.contains("65a1b2c3d4e5f60718293a4b"));
        assert!(shown.contains(r#""name":"Tom""#));
    }

    #[test]
    fn test_bson_document_shape() {
        let cat = Cat::new("Tom", 3, vec!["grey".to_string()]);
        let document = bson::to_document(&cat).unwrap();
        assert!(!document.contains_key("_id"));
        assert_eq!(document.get_str("name").unwrap(), "Tom");
        assert_eq!(document.get_i32("age").unwrap(), 3);
        assert_eq!(document.get_array("features").unwrap().len(), 1);
    }

    #[test]
    fn test_non_integer_age_is_kept() {
        let document = bson::doc! { "name": "Kit", "age": "three", "features": ["shy"] };
        let cat: Cat = bson::from_document(document).unwrap();
        assert_eq!(cat.age, Age::Unrecognized(Bson::String("three".to_string())));
        assert_eq!(cat.age.years(), None);
        assert!(cat.to_string().contains(r#""age":"three""#));
    }

    #[test]
    fn test_int64_age_decodes_as_years() {
        let document = bson::doc! { "name": "Kit", "age": 4_i64 };
        let cat: Cat = bson::from_document(document).unwrap();
        assert_eq!(cat.age, 4);
    }

    #[test]
    fn test_missing_features_default_to_empty() {
        let document = bson::doc! { "name": "Kit", "age": 1 };
        let cat: Cat = bson::from_document(document).unwrap();
        assert!(cat.features.is_empty());
        assert!(cat.id.is_none());
    }
}
