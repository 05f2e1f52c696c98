//! Advisory calculator suggesting a growth score from a category and achievement tier.
//!
//! Callers may freely override the suggestion; nothing here validates `score3`.

use serde::{Deserialize, Serialize};

/// Achievement tiers, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AchievementTier {
    T4,
    T3,
    T2,
    T1,
}

impl AchievementTier {
    pub const fn ordered() -> [Self; 4] {
        [Self::T4, Self::T3, Self::T2, Self::T1]
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::T4 => "Transformative",
            Self::T3 => "Outstanding",
            Self::T2 => "Standard",
            Self::T1 => "Foundational",
        }
    }

    pub const fn description(self) -> &'static str {
        match self {
            Self::T4 => "Transformative results affecting the whole organization",
            Self::T3 => "Results reaching beyond the department",
            Self::T2 => "Reliable delivery of assigned work as expected",
            Self::T1 => "Basic delivery meeting the minimum expectation",
        }
    }
}

/// Base scores per tier before the category coefficient applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct TierScores {
    pub t4: u32,
    pub t3: u32,
    pub t2: u32,
    pub t1: u32,
}

impl TierScores {
    pub const fn base(&self, tier: AchievementTier) -> u32 {
        match tier {
            AchievementTier::T4 => self.t4,
            AchievementTier::T3 => self.t3,
            AchievementTier::T2 => self.t2,
            AchievementTier::T1 => self.t1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthCategory {
    pub id: String,
    pub name: String,
    pub target: String,
    pub coefficient: f64,
    pub scores: TierScores,
}

impl GrowthCategory {
    fn new(id: &str, name: &str, target: &str, coefficient: f64, scores: TierScores) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            target: target.to_string(),
            coefficient,
            scores,
        }
    }

    /// `min(100, round(base × coefficient))`.
    pub fn score(&self, tier: AchievementTier) -> u32 {
        let scaled = (f64::from(self.scores.base(tier)) * self.coefficient).round();
        if scaled >= 100.0 {
            100
        } else if scaled <= 0.0 {
            0
        } else {
            scaled as u32
        }
    }
}

pub fn standard_categories() -> Vec<GrowthCategory> {
    vec![
        GrowthCategory::new(
            "skill",
            "Skill growth",
            "Techniques that raise the quality or efficiency of daily work",
            1.0,
            TierScores {
                t4: 120,
                t3: 100,
                t2: 80,
                t1: 50,
            },
        ),
        GrowthCategory::new(
            "qualification",
            "Certification",
            "Objective proof such as national or vendor certifications",
            1.1,
            TierScores {
                t4: 130,
                t3: 110,
                t2: 90,
                t1: 60,
            },
        ),
        GrowthCategory::new(
            "knowledge",
            "Knowledge depth",
            "Systematic industry or academic knowledge, shared inside and outside the company",
            1.0,
            TierScores {
                t4: 120,
                t3: 100,
                t2: 80,
                t1: 50,
            },
        ),
        GrowthCategory::new(
            "leadership",
            "Leadership",
            "Running teams, managing projects, and coaching members",
            1.2,
            TierScores {
                t4: 140,
                t3: 120,
                t2: 95,
                t1: 70,
            },
        ),
    ]
}

/// Breakdown of a suggested growth score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSuggestion {
    pub category: String,
    pub tier: AchievementTier,
    pub base_score: u32,
    pub coefficient: f64,
    pub score: u32,
}

/// Suggest a growth score for one of the standard categories; `None` for an unknown category.
pub fn suggest_growth_score(category_id: &str, tier: AchievementTier) -> Option<ScoreSuggestion> {
    standard_categories()
        .into_iter()
        .find(|category| category.id == category_id)
        .map(|category| ScoreSuggestion {
            tier,
            base_score: category.scores.base(tier),
            coefficient: category.coefficient,
            score: category.score(tier),
            category: category.id,
        })
}
