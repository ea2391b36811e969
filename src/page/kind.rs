//! Page classification.
//!
//! Pages are tagged by an ordered list of substring rules matched against
//! the route id; the first matching rule wins. Paths with dynamic segments
//! (`[slug]`, `[...slug]`) are templates and classify as `dynamic` before any
//! rule is consulted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Classification tag of a discovered page.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum PageType {
    #[default]
    Static,
    /// Route template with unresolved parameters; never emitted as a URL.
    Dynamic,
    Attorney,
    Blog,
    Location,
    PracticeArea,
    NearMe,
}

impl PageType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
            Self::Attorney => "attorney",
            Self::Blog => "blog",
            Self::Location => "location",
            Self::PracticeArea => "practice-area",
            Self::NearMe => "near-me",
        }
    }

    #[inline]
    pub fn is_dynamic(self) -> bool {
        matches!(self, Self::Dynamic)
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `[[discovery.rules]]` entry: route ids containing `contains` get `type`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyRule {
    pub contains: String,
    #[serde(rename = "type")]
    pub page_type: PageType,
}

impl ClassifyRule {
    pub fn new(contains: impl Into<String>, page_type: PageType) -> Self {
        Self {
            contains: contains.into(),
            page_type,
        }
    }
}

/// Built-in rule list, used when the config declares none.
pub fn default_rules() -> Vec<ClassifyRule> {
    vec![
        ClassifyRule::new("/blog", PageType::Blog),
        ClassifyRule::new("/attorneys", PageType::Attorney),
        ClassifyRule::new("/practice-areas", PageType::PracticeArea),
        ClassifyRule::new("/locations", PageType::Location),
        ClassifyRule::new("near-me", PageType::NearMe),
    ]
}

/// Classify a route id.
pub fn classify(route_id: &str, rules: &[ClassifyRule]) -> PageType {
    if is_dynamic_route(route_id) {
        return PageType::Dynamic;
    }
    rules
        .iter()
        .find(|rule| route_id.contains(rule.contains.as_str()))
        .map_or(PageType::Static, |rule| rule.page_type)
}

/// Whether any segment is a framework route parameter (`[id]`, `[...rest]`).
pub fn is_dynamic_route(path: &str) -> bool {
    path.split('/')
        .any(|segment| segment.len() > 2 && segment.starts_with('[') && segment.ends_with(']'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_default_rules() {
        let rules = default_rules();
        assert_eq!(classify("/", &rules), PageType::Static);
        assert_eq!(classify("/about", &rules), PageType::Static);
        assert_eq!(classify("/blog", &rules), PageType::Blog);
        assert_eq!(classify("/blog/post-1", &rules), PageType::Blog);
        assert_eq!(classify("/attorneys/jane-doe", &rules), PageType::Attorney);
        assert_eq!(
            classify("/practice-areas/car-accidents", &rules),
            PageType::PracticeArea
        );
        assert_eq!(classify("/locations/raleigh", &rules), PageType::Location);
        assert_eq!(
            classify("/car-accident-lawyer-near-me", &rules),
            PageType::NearMe
        );
    }

    #[test]
    fn test_classify_first_rule_wins() {
        let rules = vec![
            ClassifyRule::new("/blog", PageType::Blog),
            ClassifyRule::new("/attorneys", PageType::Attorney),
        ];
        assert_eq!(classify("/blog/attorneys-we-love", &rules), PageType::Blog);
    }

    #[test]
    fn test_classify_dynamic_precedes_rules() {
        let rules = default_rules();
        assert_eq!(classify("/blog/[slug]", &rules), PageType::Dynamic);
        assert_eq!(classify("/[...catchall]", &rules), PageType::Dynamic);
    }

    #[test]
    fn test_is_dynamic_route() {
        assert!(is_dynamic_route("/blog/[slug]"));
        assert!(!is_dynamic_route("/blog/slug"));
        assert!(!is_dynamic_route("/[]"));
    }

    #[test]
    fn test_rule_deserializes_type_field() {
        let rule: ClassifyRule =
            toml::from_str("contains = \"/casos\"\ntype = \"practice-area\"").unwrap();
        assert_eq!(rule, ClassifyRule::new("/casos", PageType::PracticeArea));
    }
}
