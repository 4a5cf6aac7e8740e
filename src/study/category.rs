use serde::Serialize;

use crate::study::word::WordEntry;

pub const ALL: &str = "all";
pub const UNCATEGORIZED: &str = "uncategorized";

pub const BUSINESS: &str = "business";
pub const BUSINESS_2: &str = "business_2";
pub const BUSINESS_3: &str = "business_3";
pub const BUSINESS_4: &str = "business_4";
pub const BUSINESS_5: &str = "business_5";
pub const FINANCE: &str = "finance";
pub const HR: &str = "hr";
pub const MARKETING: &str = "marketing";
pub const SCHEDULE: &str = "schedule";
pub const QUALITY: &str = "quality";
pub const NEGOTIATION: &str = "negotiation";
pub const OPERATIONS: &str = "operations";
pub const TECHNOLOGY: &str = "technology";
pub const TRAVEL: &str = "travel";
pub const HOSPITALITY: &str = "hospitality";
pub const LEGAL: &str = "legal";
pub const HEALTH: &str = "health";
pub const EDUCATION: &str = "education";
pub const ENVIRONMENT: &str = "environment";
pub const REAL_ESTATE: &str = "real_estate";

/// Generic buckets used when no keyword rule matches a word.
pub const BUSINESS_BUCKETS: [&str; 5] = [BUSINESS, BUSINESS_2, BUSINESS_3, BUSINESS_4, BUSINESS_5];

const DEFAULT_ICON: &str = "🏷️";
const DEFAULT_COLOR: &str = "#6200EE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub color: &'static str,
}

impl Category {
    const fn new(id: &'static str, name: &'static str, icon: &'static str) -> Self {
        Self {
            id,
            name,
            icon,
            color: DEFAULT_COLOR,
        }
    }

    /// Sentinels are filter keys, not something a word can be tagged with by hand.
    pub fn is_selectable(&self) -> bool {
        self.id != ALL
    }
}

static CATALOG: [Category; 22] = [
    Category::new(ALL, "All", "✨"),
    Category::new(BUSINESS, "Business / Office (1)", "🏢"),
    Category::new(BUSINESS_2, "Business / Office (2)", "🏢"),
    Category::new(BUSINESS_3, "Business / Office (3)", "🏢"),
    Category::new(BUSINESS_4, "Business / Office (4)", "🏢"),
    Category::new(BUSINESS_5, "Business / Office (5)", "🏢"),
    Category::new(FINANCE, "Accounting / Finance / Payment", "💰"),
    Category::new(HR, "Personnel / Hiring", "👥"),
    Category::new(MARKETING, "Sales / Marketing", "📣"),
    Category::new(SCHEDULE, "Scheduling / Time", "🗓️"),
    Category::new(QUALITY, "Quality / Inspection", "✅"),
    Category::new(NEGOTIATION, "Business Negotiation", "🤝"),
    Category::new(OPERATIONS, "Operations / Production / Logistics", "🏭"),
    Category::new(TECHNOLOGY, "Technology / IT", "💻"),
    Category::new(TRAVEL, "Business Trips / Travel / Transit", "✈️"),
    Category::new(HOSPITALITY, "Lodging / Dining / Service", "🍽️"),
    Category::new(LEGAL, "Legal / Regulation", "⚖️"),
    Category::new(HEALTH, "Health / Safety / Medical", "🩺"),
    Category::new(EDUCATION, "Education / Training", "📚"),
    Category::new(ENVIRONMENT, "Environment / Energy", "🌿"),
    Category::new(REAL_ESTATE, "Real Estate / Facilities", "🏠"),
    Category {
        id: UNCATEGORIZED,
        name: "Uncategorized",
        icon: "❔",
        color: DEFAULT_COLOR,
    },
];

pub fn catalog() -> &'static [Category] {
    &CATALOG
}

pub fn find_by_id(id: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|c| c.id == id)
}

pub fn is_selectable(id: &str) -> bool {
    find_by_id(id).is_some_and(Category::is_selectable)
}

/// `all` keeps everything; any other id, `uncategorized` included, is an exact tag match.
pub fn matches(word: &WordEntry, category_id: &str) -> bool {
    category_id == ALL || word.category_id == category_id
}

pub fn filter<'a>(words: &'a [WordEntry], category_id: &str) -> Vec<&'a WordEntry> {
    words.iter().filter(|w| matches(w, category_id)).collect()
}

pub fn count(words: &[WordEntry], category_id: &str) -> usize {
    words.iter().filter(|w| matches(w, category_id)).count()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCount {
    #[serde(flatten)]
    pub category: Category,
    pub word_count: usize,
}

pub fn counts(words: &[WordEntry]) -> Vec<CategoryCount> {
    CATALOG
        .iter()
        .map(|category| CategoryCount {
            category: *category,
            word_count: count(words, category.id),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(id: i64, category_id: &str) -> WordEntry {
        WordEntry {
            category_id: category_id.to_string(),
            ..WordEntry::new(id, "term", "meaning")
        }
    }

    #[test]
    fn catalog_starts_with_all_and_ends_with_uncategorized() {
        assert_eq!(catalog().first().map(|c| c.id), Some(ALL));
        assert_eq!(catalog().last().map(|c| c.id), Some(UNCATEGORIZED));
    }

    #[test]
    fn all_is_not_selectable() {
        assert!(!is_selectable(ALL));
        assert!(is_selectable(UNCATEGORIZED));
        assert!(is_selectable(FINANCE));
        assert!(!is_selectable("nope"));
    }

    #[test]
    fn sentinel_filters() {
        let words = vec![word(1, FINANCE), word(2, UNCATEGORIZED), word(3, FINANCE)];
        assert_eq!(filter(&words, ALL).len(), 3);
        assert_eq!(filter(&words, UNCATEGORIZED).len(), 1);
        assert_eq!(count(&words, FINANCE), 2);
        assert_eq!(count(&words, TRAVEL), 0);
    }

    #[test]
    fn counts_cover_whole_catalog() {
        let words = vec![word(1, HR)];
        let rows = counts(&words);
        assert_eq!(rows.len(), catalog().len());
        let hr = rows.iter().find(|r| r.category.id == HR).unwrap();
        assert_eq!(hr.word_count, 1);
        let all = rows.iter().find(|r| r.category.id == ALL).unwrap();
        assert_eq!(all.word_count, 1);
    }
}
