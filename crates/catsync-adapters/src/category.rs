//! Category hierarchy builder.
//!
//! Each platform exposes categories differently; all of them end up as an
//! ordered list of `"A > B > C"` paths plus one default category.
//!
//! | platform   | input shape                         | dedupe | default               |
//! |------------|-------------------------------------|--------|-----------------------|
//! | PrestaShop | per-level buckets of per-locale paths | no   | last path, deepest level |
//! | Magento    | flat list with slash-delimited id paths | no | lowest `level` entry  |
//! | Shopify    | product type plus tags              | yes    | product type          |

use std::collections::HashMap;

use catsync_core::Localized;

/// Separator between hierarchy segments.
pub const PATH_SEPARATOR: &str = " > ";

/// Single-locale hierarchy output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hierarchy {
    pub categories: Vec<String>,
    /// Empty when the product has no category.
    pub default: String,
}

/// Per-locale hierarchy output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalizedHierarchy {
    pub categories: Localized<Vec<String>>,
    pub default: Localized<String>,
}

// ---------------------------------------------------------------------------
// Leveled buckets (PrestaShop)
// ---------------------------------------------------------------------------

/// Collects precomputed per-locale paths across depth levels.
///
/// `levels` must be ordered shallowest first. Paths keep encounter order and
/// are not deduplicated. The default category for a locale is the last path
/// of the deepest level that carries that locale.
#[must_use]
pub fn from_leveled_buckets(levels: &[Vec<Localized<String>>]) -> LocalizedHierarchy {
    let mut hierarchy = LocalizedHierarchy::default();

    for level in levels {
        for entry in level {
            for (locale, path) in entry.iter() {
                hierarchy
                    .categories
                    .get_or_insert_with(locale, Vec::new)
                    .push(path.clone());
                hierarchy.default.insert(locale, path.clone());
            }
        }
    }

    hierarchy
}

/// Sort key for level bucket names such as `"lvl2"` or `"level_10"`.
///
/// Numeric suffixes sort numerically so `lvl10` comes after `lvl2`; names
/// without digits sort last, alphabetically.
#[must_use]
pub fn level_sort_key(name: &str) -> (u64, String) {
    let digits: String = name.chars().filter(char::is_ascii_digit).collect();
    let depth = digits.parse::<u64>().unwrap_or(u64::MAX);
    (depth, name.to_owned())
}

// ---------------------------------------------------------------------------
// Flat list with numeric parent paths (Magento)
// ---------------------------------------------------------------------------

/// A category as Magento reports it on a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatCategory {
    pub id: String,
    pub name: String,
    /// Depth; `1` is the catalog root.
    pub level: i64,
    /// Slash-delimited ancestor ids ending in this category, e.g. `"1/2/34"`.
    pub path: String,
}

/// `id -> name` lookup over every category seen in one response.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    names: HashMap<String, String>,
}

impl CategoryIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a category name. The first name seen for an id wins.
    pub fn insert(&mut self, id: impl Into<String>, name: impl Into<String>) {
        let name = name.into();
        if name.trim().is_empty() {
            return;
        }
        self.names.entry(id.into()).or_insert(name);
    }

    #[must_use]
    pub fn name(&self, id: &str) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Resolves a slash path into a hierarchy string, skipping ids with no
    /// known name (typically the elided catalog roots).
    ///
    /// Returns `None` when no segment resolves.
    #[must_use]
    pub fn resolve_path(&self, path: &str) -> Option<String> {
        let segments: Vec<&str> = path
            .split('/')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .filter_map(|id| self.name(id))
            .collect();

        if segments.is_empty() {
            None
        } else {
            Some(segments.join(PATH_SEPARATOR))
        }
    }
}

impl<'a> FromIterator<&'a FlatCategory> for CategoryIndex {
    fn from_iter<I: IntoIterator<Item = &'a FlatCategory>>(iter: I) -> Self {
        let mut index = Self::new();
        for category in iter {
            index.insert(category.id.clone(), category.name.clone());
        }
        index
    }
}

/// Builds hierarchy paths for one product's categories using a shared index.
///
/// The default is the name of the category with the lowest `level`; ties go
/// to the first one encountered.
#[must_use]
pub fn from_flat_list(categories: &[FlatCategory], index: &CategoryIndex) -> Hierarchy {
    let paths = categories
        .iter()
        .filter_map(|category| index.resolve_path(&category.path))
        .collect();

    let default = categories
        .iter()
        .min_by_key(|category| category.level)
        .map(|category| category.name.clone())
        .unwrap_or_default();

    Hierarchy {
        categories: paths,
        default,
    }
}

// ---------------------------------------------------------------------------
// Product type and tags (Shopify)
// ---------------------------------------------------------------------------

/// Composes categories from a primary product type followed by tags, with
/// exact duplicates and blanks removed.
#[must_use]
pub fn from_type_and_tags(product_type: Option<&str>, tags: &[String]) -> Hierarchy {
    let default = product_type
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or_default()
        .to_owned();

    let mut categories: Vec<String> = Vec::with_capacity(tags.len() + 1);
    let candidates = std::iter::once(default.as_str()).chain(tags.iter().map(String::as_str));
    for candidate in candidates {
        if candidate.is_empty() || categories.iter().any(|c| c == candidate) {
            continue;
        }
        categories.push(candidate.to_owned());
    }

    Hierarchy {
        categories,
        default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(id: &str, name: &str, level: i64, path: &str) -> FlatCategory {
        FlatCategory {
            id: id.to_owned(),
            name: name.to_owned(),
            level,
            path: path.to_owned(),
        }
    }

    fn paths(entries: &[(&str, &str)]) -> Localized<String> {
        entries
            .iter()
            .map(|(locale, path)| ((*locale).to_owned(), (*path).to_owned()))
            .collect()
    }

    // -----------------------------------------------------------------------
    // from_leveled_buckets
    // -----------------------------------------------------------------------

    #[test]
    fn leveled_buckets_collect_paths_per_locale() {
        let levels = vec![
            vec![paths(&[("en-US", "Men"), ("lt-LT", "Vyrai")])],
            vec![
                paths(&[("en-US", "Men > Shoes"), ("lt-LT", "Vyrai > Batai")]),
                paths(&[("en-US", "Men > Shirts")]),
            ],
        ];
        let hierarchy = from_leveled_buckets(&levels);

        assert_eq!(
            hierarchy.categories.get("en-US").unwrap(),
            &vec!["Men", "Men > Shoes", "Men > Shirts"]
        );
        assert_eq!(
            hierarchy.categories.get("lt-LT").unwrap(),
            &vec!["Vyrai", "Vyrai > Batai"]
        );
        assert_eq!(
            hierarchy.default.get("en-US").map(String::as_str),
            Some("Men > Shirts")
        );
        assert_eq!(
            hierarchy.default.get("lt-LT").map(String::as_str),
            Some("Vyrai > Batai")
        );
    }

    #[test]
    fn leveled_buckets_keep_duplicates() {
        let levels = vec![vec![paths(&[("en-US", "Sale")]), paths(&[("en-US", "Sale")])]];
        let hierarchy = from_leveled_buckets(&levels);
        assert_eq!(hierarchy.categories.get("en-US").unwrap().len(), 2);
    }

    #[test]
    fn leveled_buckets_empty_input() {
        let hierarchy = from_leveled_buckets(&[]);
        assert!(hierarchy.categories.is_empty());
        assert!(hierarchy.default.is_empty());
    }

    #[test]
    fn level_sort_key_orders_numerically() {
        let mut names = vec!["lvl10", "lvl2", "other", "lvl0"];
        names.sort_by_key(|name| level_sort_key(name));
        assert_eq!(names, vec!["lvl0", "lvl2", "lvl10", "other"]);
    }

    // -----------------------------------------------------------------------
    // from_flat_list
    // -----------------------------------------------------------------------

    #[test]
    fn flat_list_resolves_paths_and_picks_lowest_level() {
        let categories = vec![flat("10", "Root", 1, "1/10"), flat("20", "Sub", 2, "1/10/20")];
        let index: CategoryIndex = categories.iter().collect();
        let hierarchy = from_flat_list(&categories, &index);
        assert_eq!(hierarchy.categories, vec!["Root", "Root > Sub"]);
        assert_eq!(hierarchy.default, "Root");
    }

    #[test]
    fn flat_list_uses_names_from_shared_index() {
        let other_product = vec![flat("34", "Shoes", 3, "1/2/34")];
        let this_product = vec![flat("663", "Sneakers", 4, "1/2/34/663")];
        let index: CategoryIndex = other_product.iter().chain(this_product.iter()).collect();
        let hierarchy = from_flat_list(&this_product, &index);
        assert_eq!(hierarchy.categories, vec!["Shoes > Sneakers"]);
        assert_eq!(hierarchy.default, "Sneakers");
    }

    #[test]
    fn flat_list_ties_go_to_first_encountered() {
        let categories = vec![flat("5", "Men", 2, "1/5"), flat("6", "Women", 2, "1/6")];
        let index: CategoryIndex = categories.iter().collect();
        assert_eq!(from_flat_list(&categories, &index).default, "Men");
    }

    #[test]
    fn flat_list_drops_fully_unresolvable_paths() {
        let categories = vec![flat("9", "", 2, "1/9")];
        let index: CategoryIndex = categories.iter().collect();
        let hierarchy = from_flat_list(&categories, &index);
        assert!(hierarchy.categories.is_empty());
        assert!(index.is_empty());
    }

    #[test]
    fn flat_list_without_categories_has_empty_default() {
        let hierarchy = from_flat_list(&[], &CategoryIndex::new());
        assert!(hierarchy.categories.is_empty());
        assert_eq!(hierarchy.default, "");
    }

    // -----------------------------------------------------------------------
    // from_type_and_tags
    // -----------------------------------------------------------------------

    #[test]
    fn type_and_tags_dedupes_in_order() {
        let tags = vec!["Shoes".to_owned(), "summer".to_owned(), "summer".to_owned()];
        let hierarchy = from_type_and_tags(Some("Shoes"), &tags);
        assert_eq!(hierarchy.categories, vec!["Shoes", "summer"]);
        assert_eq!(hierarchy.default, "Shoes");
    }

    #[test]
    fn type_and_tags_without_type() {
        let tags = vec!["sale".to_owned(), String::new()];
        let hierarchy = from_type_and_tags(None, &tags);
        assert_eq!(hierarchy.categories, vec!["sale"]);
        assert_eq!(hierarchy.default, "");
    }
}
