//! Gear recommendations and their aggregation.
//!
//! Rules push `(category, item)` pairs into a [`RecommendationSet`] as they
//! run.  The set refuses a pair whose `(category, name)` it already holds,
//! so later rules can never duplicate what an earlier rule suggested.
//! [`aggregate`] groups the surviving items by category in first-seen order.

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RecommendationItem {
    pub name: String,
    pub description: String,
    /// Whether the renderer may attach an affiliate link.
    #[cfg_attr(feature = "serde", serde(rename = "affiliatePlaceholder", alias = "affiliateFlag"))]
    pub affiliate_flag: bool,
}

impl RecommendationItem {
    pub fn new(name: impl Into<String>, description: impl Into<String>, affiliate_flag: bool) -> Self {
        Self { name: name.into(), description: description.into(), affiliate_flag }
    }
}

/// One category and its items, in insertion order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    pub category: String,
    pub items: Vec<RecommendationItem>,
}

/// Insertion-ordered, `(category, name)`-unique collection.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecommendationSet {
    entries: Vec<(String, RecommendationItem)>,
}

impl RecommendationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item` under `category`.  Returns `false` (and keeps the first
    /// one) if the pair is already present.
    pub fn push(&mut self, category: impl Into<String>, item: RecommendationItem) -> bool {
        let category = category.into();
        if self.contains(&category, &item.name) {
            return false;
        }
        self.entries.push((category, item));
        true
    }

    pub fn contains(&self, category: &str, name: &str) -> bool {
        self.entries.iter().any(|(c, i)| c == category && i.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RecommendationItem)> {
        self.entries.iter().map(|(c, i)| (c.as_str(), i))
    }

    /// Grouped view, see [`aggregate`].
    pub fn aggregate(&self) -> Vec<Recommendation> {
        aggregate(self.entries.iter().cloned())
    }
}

/// Group `(category, item)` pairs by category.
///
/// Categories appear in the order they were first seen; items keep their
/// order within a category and repeats of `(category, name)` are dropped.
pub fn aggregate<C, I>(items: I) -> Vec<Recommendation>
where
    C: Into<String>,
    I: IntoIterator<Item = (C, RecommendationItem)>,
{
    let mut groups: Vec<Recommendation> = Vec::new();
    for (category, item) in items {
        let category = category.into();
        let group = match groups.iter().position(|g| g.category == category) {
            Some(idx) => &mut groups[idx],
            None => {
                groups.push(Recommendation { category, items: Vec::new() });
                let last = groups.len() - 1;
                &mut groups[last]
            }
        };
        if group.items.iter().all(|i| i.name != item.name) {
            group.items.push(item);
        }
    }
    groups
}
