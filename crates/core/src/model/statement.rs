use serde::{Deserialize, Serialize};

use crate::model::Skill;

/// Catalog sentence tagged with the skill it measures.
///
/// `positive` is true when agreeing with the statement indicates strength in the skill
/// and false when agreement indicates a deficit.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Statement {
    text: String,
    skill: Skill,
    positive: bool,
}

impl Statement {
    /// A statement whose agreement signals a developed skill.
    #[must_use]
    pub fn developed(skill: Skill, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            skill,
            positive: true,
        }
    }

    /// A statement whose agreement signals an underdeveloped skill.
    #[must_use]
    pub fn underdeveloped(skill: Skill, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            skill,
            positive: false,
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn skill(&self) -> Skill {
        self.skill
    }

    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.positive
    }
}

/// A statement placed at a fixed position in one session's question order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    pub skill: Skill,
    pub positive: bool,
}

impl From<&Statement> for Question {
    fn from(statement: &Statement) -> Self {
        Self {
            text: statement.text.clone(),
            skill: statement.skill,
            positive: statement.positive,
        }
    }
}
