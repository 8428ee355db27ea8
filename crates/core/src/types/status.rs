//! Product lifecycle status.

use serde::{Deserialize, Serialize};

/// Product lifecycle status.
///
/// The catalog backend writes `draft`/`active`/`inactive`. Its list
/// endpoint historically reported live products as `published`, so that
/// value is accepted on input and maps to [`Active`](Self::Active).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    Draft,
    #[serde(alias = "published")]
    Active,
    Inactive,
}

impl ProductStatus {
    /// All statuses, in the order the edit form presents them.
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Draft];

    /// Wire value written to the catalog backend.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    /// Merchant-facing label. The product list shows live products as
    /// "Published" while the edit form says "Active".
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Active => "Published",
            Self::Inactive => "Inactive",
        }
    }

    /// Whether products with this status are visible on the storefront.
    #[must_use]
    pub const fn is_live(self) -> bool {
        matches!(self, Self::Active)
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" | "published" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_canonical_values() {
        assert_eq!("draft".parse::<ProductStatus>().unwrap(), ProductStatus::Draft);
        assert_eq!("active".parse::<ProductStatus>().unwrap(), ProductStatus::Active);
        assert_eq!(
            "inactive".parse::<ProductStatus>().unwrap(),
            ProductStatus::Inactive
        );
    }

    #[test]
    fn test_from_str_published_alias() {
        assert_eq!(
            "published".parse::<ProductStatus>().unwrap(),
            ProductStatus::Active
        );
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("archived".parse::<ProductStatus>().is_err());
    }

    #[test]
    fn test_deserialize_published_alias() {
        let status: ProductStatus = serde_json::from_str("\"published\"").unwrap();
        assert_eq!(status, ProductStatus::Active);
    }

    #[test]
    fn test_serialize_canonical_value() {
        // Active always writes back as "active", never "published"
        let json = serde_json::to_string(&ProductStatus::Active).unwrap();
        assert_eq!(json, "\"active\"");
    }

    #[test]
    fn test_labels() {
        assert_eq!(ProductStatus::Active.label(), "Published");
        assert_eq!(ProductStatus::Draft.label(), "Draft");
        assert_eq!(ProductStatus::Inactive.label(), "Inactive");
    }
}
