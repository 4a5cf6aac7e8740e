//! Keyword-based category assignment for vocabulary words.
//!
//! Priority: manual override on the exact term, then the ordered keyword
//! rules (earlier rules win ties), then a stable hash bucket among the
//! generic business categories.

use sha2::{Digest, Sha256};

use crate::study::category::{
    BUSINESS_BUCKETS, EDUCATION, ENVIRONMENT, FINANCE, HEALTH, HOSPITALITY, HR, LEGAL, MARKETING,
    OPERATIONS, REAL_ESTATE, TECHNOLOGY, TRAVEL,
};
use crate::study::word::WordEntry;

const MANUAL_OVERRIDES: &[(&str, &str)] = &[
    ("banquet", HOSPITALITY),
    ("ingredient", HOSPITALITY),
    ("recipe", HOSPITALITY),
    ("beverage", HOSPITALITY),
    ("cuisine", HOSPITALITY),
    ("commute", TRAVEL),
    ("itinerary", TRAVEL),
    ("fare", TRAVEL),
    ("luggage", TRAVEL),
    ("warehouse", OPERATIONS),
    ("inventory", OPERATIONS),
    ("logistics", OPERATIONS),
    ("resume", HR),
    ("candidate", HR),
    ("invoice", FINANCE),
    ("receipt", FINANCE),
    ("tax", FINANCE),
    ("audit", LEGAL),
    ("regulation", LEGAL),
    ("contract", LEGAL),
    ("diagnosis", HEALTH),
    ("clinic", HEALTH),
    ("insurance", FINANCE),
    ("property", REAL_ESTATE),
    ("tenant", REAL_ESTATE),
    ("lease", REAL_ESTATE),
];

const KEYWORD_RULES: &[(&str, &[&str])] = &[
    (
        TRAVEL,
        &[
            "travel", "trip", "tour", "journey", "itinerary", "luggage", "baggage", "fare",
            "ticket", "boarding", "departure", "arrival", "terminal", "commute", "shuttle",
            "vehicle", "driver", "garage", "parking", "bus", "train", "rail", "subway", "metro",
            "airline", "airport", "flight", "passport", "visa", "customs", "station", "route",
        ],
    ),
    (
        HOSPITALITY,
        &[
            "hotel", "inn", "motel", "suite", "guest", "room", "housekeeping", "banquet",
            "catering", "dining", "restaurant", "cafe", "bar", "kitchen", "meal", "menu",
            "ingredient", "beverage", "cuisine", "chef", "cook", "reservation",
        ],
    ),
    (
        FINANCE,
        &[
            "finance", "budget", "revenue", "expense", "earnings", "dividend", "payment",
            "payable", "receivable", "invoice", "receipt", "refund", "tax", "fee", "charge",
            "credit", "debit", "loan", "mortgage", "interest", "liability", "equity", "capital",
            "treasury", "fund", "premium", "valuation", "audit",
        ],
    ),
    (
        HR,
        &[
            "employee", "employer", "staff", "personnel", "candidate", "applicant", "resume",
            "cv", "recruit", "hiring", "recruitment", "interview", "vacancy", "career",
            "training", "orientation", "intern", "internship", "salary", "wage", "payroll",
            "benefit", "retirement", "resignation",
        ],
    ),
    (
        MARKETING,
        &[
            "market", "marketing", "promotion", "advert", "ad ", "campaign", "publicity",
            "brand", "brochure", "catalog", "customer", "client", "consumer", "sale", "sales",
            "retail", "merchandise", "discount", "coupon", "pricing", "survey", "audience",
            "launch", "release", "feature",
        ],
    ),
    (
        OPERATIONS,
        &[
            "inventory", "stock", "supply", "warehouse", "shipping", "cargo", "freight",
            "delivery", "dispatch", "pack", "package", "logistics", "distribution", "factory",
            "plant", "assembly", "production", "manufacture", "equipment", "machine",
            "machinery", "device", "installation", "maintenance", "repair", "construction",
            "facility", "storage", "inspection", "quality", "defect", "warranty", "capacity",
            "raw material", "material",
        ],
    ),
    (
        TECHNOLOGY,
        &[
            "tech", "software", "hardware", "device", "computer", "digital", "online",
            "internet", "web", "server", "system", "network", "data", "database", "cloud", "ai",
            "robot", "automation", "program", "code", "application", "security", "encryption",
            "password", "platform",
        ],
    ),
    (
        LEGAL,
        &[
            "law", "legal", "compliance", "contract", "agreement", "policy", "regulation",
            "license", "permit", "liability", "litigation", "lawsuit", "court", "statute",
            "patent", "copyright", "trademark", "legislation", "ban",
        ],
    ),
    (
        HEALTH,
        &[
            "health", "medical", "clinic", "hospital", "vaccine", "treatment", "medicine",
            "drug", "pharmacy", "patient", "surgery", "infection", "disease", "injury", "safety",
            "wellness", "hygiene",
        ],
    ),
    (
        EDUCATION,
        &[
            "education", "academy", "school", "student", "training", "lesson", "course",
            "curriculum", "lecture", "seminar", "workshop", "certificate", "exam", "study",
            "learn", "tutor", "professor",
        ],
    ),
    (
        ENVIRONMENT,
        &[
            "environment", "eco", "green", "sustain", "recycle", "waste", "emission",
            "pollution", "climate", "energy", "fuel", "power", "conservation", "renewable",
            "carbon",
        ],
    ),
    (
        REAL_ESTATE,
        &[
            "property", "estate", "rent", "rental", "lease", "tenant", "landlord",
            "construction", "building", "renovation", "facility", "utility", "apartment",
            "housing", "residence", "real estate",
        ],
    ),
];

pub fn classify(term: &str, meaning: &str) -> &'static str {
    let term = term.to_lowercase();
    let meaning = meaning.to_lowercase();

    if let Some((_, category)) = MANUAL_OVERRIDES.iter().find(|(word, _)| *word == term) {
        return category;
    }

    for (category, keywords) in KEYWORD_RULES {
        if keywords.iter().any(|k| term.contains(k) || meaning.contains(k)) {
            return category;
        }
    }

    business_bucket(&term)
}

/// Stable across processes: the bucket comes from a SHA-256 digest, not a seeded hasher.
fn business_bucket(normalized_term: &str) -> &'static str {
    let digest = Sha256::digest(normalized_term.as_bytes());
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    let index = u64::from_be_bytes(head) % BUSINESS_BUCKETS.len() as u64;
    BUSINESS_BUCKETS[index as usize]
}

pub fn apply(word: &WordEntry) -> WordEntry {
    WordEntry {
        category_id: classify(&word.term, &word.meaning).to_string(),
        ..word.clone()
    }
}

/// Re-classifies every word still tagged `uncategorized`. Returns how many changed.
pub fn backfill(words: &mut [WordEntry]) -> usize {
    let mut changed = 0;
    for word in words.iter_mut().filter(|w| w.is_uncategorized()) {
        *word = apply(word);
        changed += 1;
    }
    changed
}
