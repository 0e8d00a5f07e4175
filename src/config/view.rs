//! Detail and list view descriptors. Renderers are pure functions of the entity.

use crate::config::form::SelectOption;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub type Display<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;
pub type BadgesFn<T> = Arc<dyn Fn(&T) -> Vec<Badge> + Send + Sync>;

pub fn display<T, F>(f: F) -> Display<T>
where
    F: Fn(&T) -> String + Send + Sync + 'static,
{
    Arc::new(f)
}

pub fn badges<T, F>(f: F) -> BadgesFn<T>
where
    F: Fn(&T) -> Vec<Badge> + Send + Sync + 'static,
{
    Arc::new(f)
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Badge {
    pub label: String,
    pub color: String,
}

impl Badge {
    pub fn new(label: impl Into<String>, color: impl Into<String>) -> Self {
        Badge {
            label: label.into(),
            color: color.into(),
        }
    }
}

#[derive(Clone)]
pub struct DetailHeader<T> {
    pub title: Display<T>,
    pub subtitle: Option<Display<T>>,
    pub avatar: Option<Display<T>>,
    pub badges: Option<BadgesFn<T>>,
}

impl<T> DetailHeader<T> {
    pub fn new(title: Display<T>) -> Self {
        DetailHeader {
            title,
            subtitle: None,
            avatar: None,
            badges: None,
        }
    }
}

#[derive(Clone)]
pub struct DetailItem<T> {
    pub label: String,
    pub value: Display<T>,
}

impl<T> DetailItem<T> {
    pub fn new<F>(label: impl Into<String>, value: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        DetailItem {
            label: label.into(),
            value: Arc::new(value),
        }
    }
}

#[derive(Clone)]
pub struct DetailSection<T> {
    pub title: String,
    pub items: Vec<DetailItem<T>>,
}

impl<T> DetailSection<T> {
    pub fn new(title: impl Into<String>, items: Vec<DetailItem<T>>) -> Self {
        DetailSection {
            title: title.into(),
            items,
        }
    }
}

/// Detail view resolved to plain strings for one entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedDetail {
    pub title: String,
    pub subtitle: Option<String>,
    pub avatar: Option<String>,
    pub badges: Vec<Badge>,
    /// (section title, [(label, value)])
    pub sections: Vec<(String, Vec<(String, String)>)>,
}

#[derive(Clone)]
pub struct DetailConfig<T> {
    pub header: DetailHeader<T>,
    pub sections: Vec<DetailSection<T>>,
}

impl<T> DetailConfig<T> {
    pub fn resolve(&self, entity: &T) -> ResolvedDetail {
        ResolvedDetail {
            title: (self.header.title)(entity),
            subtitle: self.header.subtitle.as_ref().map(|f| f(entity)),
            avatar: self.header.avatar.as_ref().map(|f| f(entity)),
            badges: self.header.badges.as_ref().map(|f| f(entity)).unwrap_or_default(),
            sections: self
                .sections
                .iter()
                .map(|s| {
                    let rows = s.items.iter().map(|i| (i.label.clone(), (i.value)(entity))).collect();
                    (s.title.clone(), rows)
                })
                .collect(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchStrategy {
    /// Load everything, filter on the client.
    Frontend,
    /// The server filters via the `search` parameter.
    Backend,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Buttons,
    Dropdown,
    Grid,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterDescriptor {
    pub id: String,
    pub label: String,
    pub kind: FilterKind,
    pub options: Vec<SelectOption>,
}

impl FilterDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FilterKind, options: Vec<SelectOption>) -> Self {
        FilterDescriptor {
            id: id.into(),
            label: label.into(),
            kind,
            options,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoBanner {
    pub title: String,
    pub message: String,
}

#[derive(Clone)]
pub struct ListItem<T> {
    pub title: Display<T>,
    pub subtitle: Option<Display<T>>,
    pub description: Option<Display<T>>,
    pub avatar: Option<Display<T>>,
    pub badges: Option<BadgesFn<T>>,
}

impl<T> ListItem<T> {
    pub fn new(title: Display<T>) -> Self {
        ListItem {
            title,
            subtitle: None,
            description: None,
            avatar: None,
            badges: None,
        }
    }
}

#[derive(Clone)]
pub struct ListConfig<T> {
    pub title: String,
    pub description: String,
    pub search_placeholder: String,
    pub filters: Vec<FilterDescriptor>,
    pub item: ListItem<T>,
    pub search_strategy: SearchStrategy,
    pub min_search_length: usize,
    pub info: Option<InfoBanner>,
}

impl<T> ListConfig<T> {
    pub fn new(title: impl Into<String>, item: ListItem<T>) -> Self {
        ListConfig {
            title: title.into(),
            description: String::new(),
            search_placeholder: "Search...".into(),
            filters: Vec::new(),
            item,
            search_strategy: SearchStrategy::Backend,
            min_search_length: 0,
            info: None,
        }
    }

    fn term_is_active(&self, term: &str) -> bool {
        let t = term.trim();
        !t.is_empty() && t.chars().count() >= self.min_search_length
    }

    /// Whether an item's title, subtitle or description contains `term` (case-insensitive).
    pub fn matches(&self, item: &T, term: &str) -> bool {
        let needle = term.trim().to_lowercase();
        let fields = [Some(&self.item.title), self.item.subtitle.as_ref(), self.item.description.as_ref()];
        fields
            .into_iter()
            .flatten()
            .any(|f| f(item).to_lowercase().contains(&needle))
    }

    /// Client-side search for the frontend strategy. Backend-searched lists and terms
    /// shorter than `min_search_length` return the items unchanged.
    pub fn search(&self, items: Vec<T>, term: &str) -> Vec<T> {
        if self.search_strategy != SearchStrategy::Frontend || !self.term_is_active(term) {
            return items;
        }
        items.into_iter().filter(|i| self.matches(i, term)).collect()
    }

    /// Filters to send for the backend strategy (`search=<term>`), empty otherwise.
    pub fn search_filters(&self, term: &str) -> Vec<(String, Value)> {
        if self.search_strategy != SearchStrategy::Backend || !self.term_is_active(term) {
            return Vec::new();
        }
        vec![("search".to_string(), Value::String(term.trim().to_string()))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Kid {
        name: String,
        class: String,
    }

    fn kid(name: &str, class: &str) -> Kid {
        Kid {
            name: name.into(),
            class: class.into(),
        }
    }

    fn list(strategy: SearchStrategy) -> ListConfig<Kid> {
        let mut item = ListItem::new(display(|k: &Kid| k.name.clone()));
        item.subtitle = Some(display(|k: &Kid| format!("Class {}", k.class)));
        let mut l = ListConfig::new("Kids", item);
        l.search_strategy = strategy;
        l.min_search_length = 2;
        l
    }

    #[test]
    fn frontend_search_filters_by_rendered_text() {
        let l = list(SearchStrategy::Frontend);
        let kids = vec![kid("Anna", "1a"), kid("Ben", "2b"), kid("Hannah", "1a")];
        let hits = l.search(kids.clone(), "ANN");
        assert_eq!(hits, vec![kid("Anna", "1a"), kid("Hannah", "1a")]);
        assert_eq!(l.search(kids.clone(), "class 2b"), vec![kid("Ben", "2b")]);
        assert_eq!(l.search(kids.clone(), "a").len(), 3);
    }

    #[test]
    fn backend_strategy_leaves_items_and_builds_filters() {
        let l = list(SearchStrategy::Backend);
        let kids = vec![kid("Anna", "1a")];
        assert_eq!(l.search(kids.clone(), "zzz"), kids);
        assert_eq!(l.search_filters(" an "), vec![("search".to_string(), Value::String("an".into()))]);
        assert!(l.search_filters("a").is_empty());
        assert!(list(SearchStrategy::Frontend).search_filters("anna").is_empty());
    }

    #[test]
    fn detail_resolves_all_parts() {
        let mut header = DetailHeader::new(display(|k: &Kid| k.name.clone()));
        header.badges = Some(badges(|k: &Kid| vec![Badge::new(k.class.clone(), "blue")]));
        let detail = DetailConfig {
            header,
            sections: vec![DetailSection::new("School", vec![DetailItem::new("Class", |k: &Kid| k.class.clone())])],
        };
        let r = detail.resolve(&kid("Anna", "1a"));
        assert_eq!(r.title, "Anna");
        assert_eq!(r.subtitle, None);
        assert_eq!(r.badges, vec![Badge::new("1a", "blue")]);
        assert_eq!(r.sections, vec![("School".to_string(), vec![("Class".to_string(), "1a".to_string())])]);
    }
}
