//! Turns a finished answer set into per-skill ratings.
//!
//! All functions here are pure. Star rating and category are both derived from
//! [`ScoreCategory::from_score`], so their tier boundaries cannot drift apart.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::model::{AnswerSet, AnswerValue, Question, Skill};

/// Qualitative tier for a skill's raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreCategory {
    Excellent,
    VeryGood,
    Good,
    Fair,
    NeedsImprovement,
}

impl ScoreCategory {
    /// Highest tier first.
    pub const ALL: [ScoreCategory; 5] = [
        ScoreCategory::Excellent,
        ScoreCategory::VeryGood,
        ScoreCategory::Good,
        ScoreCategory::Fair,
        ScoreCategory::NeedsImprovement,
    ];

    #[must_use]
    pub fn from_score(score: i32) -> Self {
        if score > 6 {
            ScoreCategory::Excellent
        } else if score > 4 {
            ScoreCategory::VeryGood
        } else if score > 2 {
            ScoreCategory::Good
        } else if score > 0 {
            ScoreCategory::Fair
        } else {
            ScoreCategory::NeedsImprovement
        }
    }

    /// Star count paired with this tier, `1..=5`.
    #[must_use]
    pub fn stars(self) -> u8 {
        match self {
            ScoreCategory::Excellent => 5,
            ScoreCategory::VeryGood => 4,
            ScoreCategory::Good => 3,
            ScoreCategory::Fair => 2,
            ScoreCategory::NeedsImprovement => 1,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ScoreCategory::Excellent => "Excellent",
            ScoreCategory::VeryGood => "Very Good",
            ScoreCategory::Good => "Good",
            ScoreCategory::Fair => "Fair",
            ScoreCategory::NeedsImprovement => "Needs Improvement",
        }
    }

    /// Feedback sentence for this tier, naming the skill.
    #[must_use]
    pub fn narrative(self, skill_name: &str) -> String {
        match self {
            ScoreCategory::Excellent => format!(
                "You have a well-developed skill in {skill_name}. Keep nurturing this strength."
            ),
            ScoreCategory::VeryGood => format!(
                "You have a strong foundation in {skill_name}. There's still room for growth."
            ),
            ScoreCategory::Good => format!(
                "You have a good base in {skill_name}. Consider ways to further develop this area."
            ),
            ScoreCategory::Fair => format!(
                "Your skill in {skill_name} could use some development. Focus on improving this area."
            ),
            ScoreCategory::NeedsImprovement => format!(
                "You may want to prioritize developing your skill in {skill_name}. \
                 Consider seeking support or resources to help you in this area."
            ),
        }
    }
}

impl fmt::Display for ScoreCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sum of answers for `skill`: positive statements add, negative statements subtract.
///
/// Unanswered slots count as zero, so partial sessions score without failing.
#[must_use]
pub fn score_skill(skill: Skill, questions: &[Question], answers: &AnswerSet) -> i32 {
    questions
        .iter()
        .zip(answers.iter())
        .filter(|(question, _)| question.skill == skill)
        .map(|(question, answer)| {
            let value = i32::from(answer.map_or(0, AnswerValue::value));
            if question.positive { value } else { -value }
        })
        .sum()
}

#[must_use]
pub fn star_rating(score: i32) -> u8 {
    ScoreCategory::from_score(score).stars()
}

#[must_use]
pub fn category(score: i32) -> ScoreCategory {
    ScoreCategory::from_score(score)
}

#[must_use]
pub fn narrative(skill_name: &str, category: ScoreCategory) -> String {
    category.narrative(skill_name)
}

/// Derived rating for one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub skill: Skill,
    pub raw_score: i32,
    pub star_rating: u8,
    pub category: ScoreCategory,
    pub narrative: String,
}

impl ScoreResult {
    #[must_use]
    pub fn for_skill(skill: Skill, questions: &[Question], answers: &AnswerSet) -> Self {
        let raw_score = score_skill(skill, questions, answers);
        let category = category(raw_score);
        Self {
            skill,
            raw_score,
            star_rating: category.stars(),
            category,
            narrative: narrative(skill.name(), category),
        }
    }
}

/// Scores each skill in the order given.
#[must_use]
pub fn score_all(
    skills: impl IntoIterator<Item = Skill>,
    questions: &[Question],
    answers: &AnswerSet,
) -> Vec<ScoreResult> {
    skills
        .into_iter()
        .map(|skill| ScoreResult::for_skill(skill, questions, answers))
        .collect()
}
