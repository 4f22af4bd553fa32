//! Recommendation catalog and the rule set that selects from it.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{AssessmentAnswer, Pattern};

/// A single piece of advice shown with the result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Key into the static catalog: the baseline entry or one per pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKey {
    Baseline,
    Pattern(Pattern),
}

/// Static catalog row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

impl CatalogEntry {
    pub fn to_recommendation(&self) -> Recommendation {
        Recommendation {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
        }
    }
}

const TRACK_CYCLE: CatalogEntry = CatalogEntry {
    id: "track-cycle",
    title: "Track your cycle",
    description: "Log the start and end of each period along with flow and symptoms. \
                  A few months of records makes changes easy to spot and to discuss.",
};

const CONSULT_PROVIDER: CatalogEntry = CatalogEntry {
    id: "irregular-consult-provider",
    title: "Talk to a healthcare provider",
    description: "Cycles that are very short, very long or unpredictable can have many \
                  causes. A provider can check for conditions such as thyroid issues or PCOS.",
};

const IRON_NUTRITION: CatalogEntry = CatalogEntry {
    id: "heavy-iron-nutrition",
    title: "Support your iron levels",
    description: "Heavy or long periods can lower iron. Include iron-rich foods like leafy \
                  greens, beans and lean meats, and ask about testing if you feel tired or dizzy.",
};

const PAIN_MANAGEMENT: CatalogEntry = CatalogEntry {
    id: "pain-management",
    title: "Manage period pain",
    description: "Heat, gentle movement and over-the-counter pain relief help many people. \
                  Pain that stops daily activities deserves a conversation with a provider.",
};

const REGULAR_MAINTENANCE: CatalogEntry = CatalogEntry {
    id: "regular-maintenance",
    title: "Keep up healthy habits",
    description: "Your cycle looks typical. Regular sleep, balanced meals and exercise help \
                  keep it that way.",
};

const DEVELOPING_EDUCATION: CatalogEntry = CatalogEntry {
    id: "developing-education",
    title: "Give your body time",
    description: "Cycles often take a few years to settle after they start. Learning what \
                  is normal and keeping a simple log helps you notice anything unusual.",
};

static BY_ID: Lazy<HashMap<&'static str, &'static CatalogEntry>> = Lazy::new(|| {
    [
        &TRACK_CYCLE,
        &CONSULT_PROVIDER,
        &IRON_NUTRITION,
        &PAIN_MANAGEMENT,
        &REGULAR_MAINTENANCE,
        &DEVELOPING_EDUCATION,
    ]
    .into_iter()
    .map(|entry| (entry.id, entry))
    .collect()
});

/// Read access to the fixed recommendation catalog.
pub struct RecommendationCatalog;

impl RecommendationCatalog {
    /// Returns the entry for a key. Every key has one.
    pub fn entry(key: CatalogKey) -> &'static CatalogEntry {
        match key {
            CatalogKey::Baseline => &TRACK_CYCLE,
            CatalogKey::Pattern(Pattern::Irregular) => &CONSULT_PROVIDER,
            CatalogKey::Pattern(Pattern::Heavy) => &IRON_NUTRITION,
            CatalogKey::Pattern(Pattern::Pain) => &PAIN_MANAGEMENT,
            CatalogKey::Pattern(Pattern::Regular) => &REGULAR_MAINTENANCE,
            CatalogKey::Pattern(Pattern::Developing) => &DEVELOPING_EDUCATION,
        }
    }

    /// Looks up an entry by recommendation id.
    pub fn find(id: &str) -> Option<&'static CatalogEntry> {
        BY_ID.get(id).copied()
    }
}

/// Stateless rule set mapping a pattern to recommendations.
pub struct RecommendationEngine;

impl RecommendationEngine {
    /// Baseline first, then the entry for `pattern` if any. Deduplicated by id.
    pub fn generate(pattern: Option<Pattern>) -> Vec<Recommendation> {
        let keys = std::iter::once(CatalogKey::Baseline).chain(pattern.map(CatalogKey::Pattern));

        let mut seen = HashSet::new();
        keys.map(RecommendationCatalog::entry)
            .filter(|entry| seen.insert(entry.id))
            .map(CatalogEntry::to_recommendation)
            .collect()
    }

    /// Generates recommendations for the pattern stored on `answer`.
    pub fn generate_for(answer: &AssessmentAnswer) -> Vec<Recommendation> {
        Self::generate(answer.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn no_pattern_yields_only_baseline() {
        let recs = RecommendationEngine::generate(None);
        assert_eq!(ids(&recs), vec!["track-cycle"]);
    }

    #[test]
    fn every_pattern_yields_baseline_plus_one() {
        for pattern in Pattern::ALL {
            let recs = RecommendationEngine::generate(Some(*pattern));
            assert_eq!(recs.len(), 2, "pattern {pattern}");
            assert_eq!(recs[0].id, "track-cycle");
            assert_ne!(recs[1].id, "track-cycle");
        }
    }

    #[test]
    fn pattern_specific_ids() {
        let second = |p| RecommendationEngine::generate(Some(p))[1].id.clone();
        assert_eq!(second(Pattern::Irregular), "irregular-consult-provider");
        assert_eq!(second(Pattern::Heavy), "heavy-iron-nutrition");
        assert_eq!(second(Pattern::Pain), "pain-management");
        assert_eq!(second(Pattern::Regular), "regular-maintenance");
        assert_eq!(second(Pattern::Developing), "developing-education");
    }

    #[test]
    fn catalog_ids_are_unique() {
        let mut seen = HashSet::new();
        let keys = std::iter::once(CatalogKey::Baseline)
            .chain(Pattern::ALL.iter().copied().map(CatalogKey::Pattern));
        for key in keys {
            assert!(seen.insert(RecommendationCatalog::entry(key).id));
        }
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn find_resolves_every_catalog_id() {
        for pattern in Pattern::ALL {
            let entry = RecommendationCatalog::entry(CatalogKey::Pattern(*pattern));
            assert_eq!(RecommendationCatalog::find(entry.id), Some(entry));
        }
        assert!(RecommendationCatalog::find("drink-more-coffee").is_none());
    }

    #[test]
    fn generate_for_reads_stored_pattern() {
        let answer = AssessmentAnswer {
            pattern: Some(Pattern::Pain),
            ..Default::default()
        };
        assert_eq!(
            ids(&RecommendationEngine::generate_for(&answer)),
            vec!["track-cycle", "pain-management"]
        );
    }
}
