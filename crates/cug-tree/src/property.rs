//! Property values stored on tree nodes

use serde::{Deserialize, Serialize};

/// Typed property value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum PropertyValue {
    /// Single string
    String(String),
    /// Ordered, possibly empty, string array
    Strings(Vec<String>),
    /// Single boolean
    Boolean(bool),
    /// Single 64-bit integer
    Long(i64),
}

impl PropertyValue {
    /// Multi-valued string property from any string iterator
    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PropertyValue::Strings(values.into_iter().map(Into::into).collect())
    }

    /// Whether the value is multi-valued
    pub fn is_array(&self) -> bool {
        matches!(self, PropertyValue::Strings(_))
    }

    /// Number of values
    pub fn count(&self) -> usize {
        match self {
            PropertyValue::Strings(values) => values.len(),
            _ => 1,
        }
    }

    /// String array contents, `None` for any other type
    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            PropertyValue::Strings(values) => Some(values),
            _ => None,
        }
    }

    /// Single string contents, `None` for any other type
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Type name
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "String",
            PropertyValue::Strings(_) => "Strings",
            PropertyValue::Boolean(_) => "Boolean",
            PropertyValue::Long(_) => "Long",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_accessors() {
        let value = PropertyValue::strings(["everyone", "admins"]);
        assert!(value.is_array());
        assert_eq!(value.count(), 2);
        assert_eq!(value.as_strings().unwrap()[0], "everyone");
        assert_eq!(value.as_string(), None);

        let single = PropertyValue::String("everyone".into());
        assert!(!single.is_array());
        assert_eq!(single.as_strings(), None);
        assert_eq!(single.type_name(), "String");
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_string(&PropertyValue::strings(["a"])).unwrap();
        assert_eq!(json, r#"{"type":"Strings","value":["a"]}"#);
    }
}
