//! English/Spanish page pairs.

use super::{DiscoveredPage, Language};
use serde::Serialize;

/// hreflang value pointing at the fallback variant.
pub const X_DEFAULT: &str = "x-default";

/// The English and Spanish rendition of one logical page.
///
/// Both sides are optional; discovery never emits a pair with neither.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LanguagePair {
    /// Language-neutral key (the English-side path).
    pub route_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub en: Option<DiscoveredPage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub es: Option<DiscoveredPage>,
}

/// One `<xhtml:link rel="alternate">` target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alternate {
    pub hreflang: &'static str,
    pub path: String,
}

impl LanguagePair {
    pub fn new(route_id: impl Into<String>) -> Self {
        Self {
            route_id: route_id.into(),
            en: None,
            es: None,
        }
    }

    #[inline]
    pub fn get(&self, lang: Language) -> Option<&DiscoveredPage> {
        match lang {
            Language::En => self.en.as_ref(),
            Language::Es => self.es.as_ref(),
        }
    }

    fn slot_mut(&mut self, lang: Language) -> &mut Option<DiscoveredPage> {
        match lang {
            Language::En => &mut self.en,
            Language::Es => &mut self.es,
        }
    }

    /// Fill the page's language side. An occupied side is left untouched and
    /// the rejected page is handed back.
    pub fn insert(&mut self, page: DiscoveredPage) -> Result<(), DiscoveredPage> {
        let slot = self.slot_mut(page.language);
        if slot.is_some() {
            return Err(page);
        }
        *slot = Some(page);
        Ok(())
    }

    /// Existing sides, English first.
    pub fn pages(&self) -> impl Iterator<Item = &DiscoveredPage> {
        self.en.iter().chain(self.es.iter())
    }

    pub fn is_complete(&self) -> bool {
        self.en.is_some() && self.es.is_some()
    }

    /// The language with no page, if exactly one side exists.
    pub fn missing(&self) -> Option<Language> {
        match (&self.en, &self.es) {
            (Some(page), None) | (None, Some(page)) => Some(page.language.counterpart()),
            _ => None,
        }
    }

    /// hreflang links for this pair: one per existing side, plus
    /// `x-default` when the default-language side exists.
    pub fn alternates(&self) -> Vec<Alternate> {
        let mut links: Vec<Alternate> = self
            .pages()
            .map(|page| Alternate {
                hreflang: page.language.code(),
                path: page.path.clone(),
            })
            .collect();

        if let Some(default) = self.get(Language::DEFAULT) {
            links.push(Alternate {
                hreflang: X_DEFAULT,
                path: default.path.clone(),
            });
        }
        links
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageType;
    use crate::utils::date::DateTimeUtc;

    fn page(path: &str, language: Language) -> DiscoveredPage {
        DiscoveredPage::new(
            path,
            language,
            PageType::Static,
            DateTimeUtc::from_ymd(2025, 1, 1),
        )
    }

    #[test]
    fn test_insert_fills_each_side_once() {
        let mut pair = LanguagePair::new("/about");
        assert_eq!(pair.pages().count(), 0);
        assert!(pair.insert(page("/about", Language::En)).is_ok());
        assert!(pair.insert(page("/es/about", Language::Es)).is_ok());
        assert!(pair.is_complete());

        let rejected = pair.insert(page("/about", Language::En)).unwrap_err();
        assert_eq!(rejected.path, "/about");
        assert_eq!(pair.pages().count(), 2);
    }

    #[test]
    fn test_missing_side() {
        let mut pair = LanguagePair::new("/contact");
        assert_eq!(pair.missing(), None);
        pair.insert(page("/contact", Language::En)).unwrap();
        assert_eq!(pair.missing(), Some(Language::Es));
    }

    #[test]
    fn test_alternates_complete_pair() {
        let mut pair = LanguagePair::new("/about");
        pair.insert(page("/es/about", Language::Es)).unwrap();
        pair.insert(page("/about", Language::En)).unwrap();

        let links = pair.alternates();
        assert_eq!(
            links,
            vec![
                Alternate { hreflang: "en", path: "/about".into() },
                Alternate { hreflang: "es", path: "/es/about".into() },
                Alternate { hreflang: X_DEFAULT, path: "/about".into() },
            ]
        );
    }

    #[test]
    fn test_alternates_never_dangle() {
        let mut english_only = LanguagePair::new("/resources");
        english_only.insert(page("/resources", Language::En)).unwrap();
        assert!(english_only.alternates().iter().all(|l| l.hreflang != "es"));

        let mut spanish_only = LanguagePair::new("/recursos");
        spanish_only.insert(page("/es/recursos", Language::Es)).unwrap();
        let links = spanish_only.alternates();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].hreflang, "es");
    }
}
