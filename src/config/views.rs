//! Per-view configuration
//!
//! A [`ViewSpec`] is the declarative half of a view: which ranking rule
//! it uses, with which weights, and which record fields its search box
//! reaches. Specs come from the built-in catalog or from `[views.*]`
//! tables in `pagina.toml`.

use serde::{Deserialize, Serialize};

/// Record fields a search box can reach.
pub const KNOWN_SEARCH_FIELDS: &[&str] = &["title", "author", "tags"];

/// Ranking rule selector for a configured view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankKind {
    /// Weighted sum of likes and comments.
    #[default]
    Engagement,
    /// Newest first.
    Recency,
    /// Input order, no ranking.
    None,
}

/// Declarative spec for one named view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSpec {
    /// Which ranking rule the view uses.
    #[serde(default)]
    pub rank: RankKind,

    /// Weight for the likes counter (engagement rank only).
    #[serde(default = "default_likes_weight")]
    pub likes_weight: f64,

    /// Weight for the comments counter (engagement rank only).
    #[serde(default = "default_comments_weight")]
    pub comments_weight: f64,

    /// Record fields reachable from the view's search box, in match
    /// order. Empty means the view has no search.
    #[serde(default)]
    pub search_fields: Vec<String>,
}

impl Default for ViewSpec {
    fn default() -> Self {
        Self {
            rank: RankKind::default(),
            likes_weight: default_likes_weight(),
            comments_weight: default_comments_weight(),
            search_fields: Vec::new(),
        }
    }
}

impl ViewSpec {
    /// Validate weights and search field names.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("likes_weight", self.likes_weight),
            ("comments_weight", self.comments_weight),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} must be finite and >= 0, got {}", name, value));
            }
        }
        for field in &self.search_fields {
            if !KNOWN_SEARCH_FIELDS.contains(&field.as_str()) {
                return Err(format!(
                    "unknown search field '{}' (expected one of {:?})",
                    field, KNOWN_SEARCH_FIELDS
                ));
            }
        }
        Ok(())
    }
}

fn default_likes_weight() -> f64 {
    2.0 // likes count double
}

fn default_comments_weight() -> f64 {
    3.0 // comments carry the conversation
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_spec_gets_feed_defaults() {
        let spec: ViewSpec = toml::from_str("").unwrap();
        assert_eq!(spec.rank, RankKind::Engagement);
        assert_eq!(spec.likes_weight, 2.0);
        assert_eq!(spec.comments_weight, 3.0);
        assert!(spec.search_fields.is_empty());
    }

    #[test]
    fn rank_names_are_kebab_case() {
        let spec: ViewSpec = toml::from_str(r#"rank = "recency""#).unwrap();
        assert_eq!(spec.rank, RankKind::Recency);
        let spec: ViewSpec = toml::from_str(r#"rank = "none""#).unwrap();
        assert_eq!(spec.rank, RankKind::None);
    }

    #[test]
    fn negative_weights_fail_validation() {
        let spec = ViewSpec {
            likes_weight: -1.0,
            ..ViewSpec::default()
        };
        assert!(spec.validate().unwrap_err().contains("likes_weight"));
    }

    #[test]
    fn non_finite_weights_fail_validation() {
        let spec = ViewSpec {
            comments_weight: f64::INFINITY,
            ..ViewSpec::default()
        };
        assert!(spec.validate().is_err());
    }

    #[test]
    fn unknown_search_field_fails_validation() {
        let spec = ViewSpec {
            search_fields: vec!["title".to_string(), "body".to_string()],
            ..ViewSpec::default()
        };
        assert!(spec.validate().unwrap_err().contains("body"));
    }

    #[test]
    fn known_search_fields_pass_validation() {
        let spec = ViewSpec {
            search_fields: vec!["title".to_string(), "author".to_string(), "tags".to_string()],
            ..ViewSpec::default()
        };
        assert!(spec.validate().is_ok());
    }
}
