use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the seven developmental capabilities assessed by the quiz.
///
/// Declaration order is the order results are reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    ReceivingLove,
    ExploringPlayfully,
    ThinkingForYourself,
    InitiatingPower,
    ExpandingCompetence,
    IncreasingResponsibility,
    ExpandingLove,
}

impl Skill {
    /// Every skill, in catalog declaration order.
    pub const ALL: [Skill; 7] = [
        Skill::ReceivingLove,
        Skill::ExploringPlayfully,
        Skill::ThinkingForYourself,
        Skill::InitiatingPower,
        Skill::ExpandingCompetence,
        Skill::IncreasingResponsibility,
        Skill::ExpandingLove,
    ];

    /// Human-readable display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Skill::ReceivingLove => "Receiving Love",
            Skill::ExploringPlayfully => "Exploring Playfully",
            Skill::ThinkingForYourself => "Thinking for Yourself",
            Skill::InitiatingPower => "Initiating Power",
            Skill::ExpandingCompetence => "Expanding Competence",
            Skill::IncreasingResponsibility => "Increasing Responsibility",
            Skill::ExpandingLove => "Expanding Love",
        }
    }

    /// One-line capability statement shown under the skill name on the results screen.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Skill::ReceivingLove => "I can receive love because I am loved just as I am",
            Skill::ExploringPlayfully => "I can try new behaviors because I am protected",
            Skill::ThinkingForYourself => {
                "I can become my own person as I remain connected to others"
            }
            Skill::InitiatingPower => "I can use my power for healthy relationships",
            Skill::ExpandingCompetence => "I can grow my competence in new environments",
            Skill::IncreasingResponsibility => "I can manage my internal world and behavior",
            Skill::ExpandingLove => "I can meet my needs and honor the needs of others",
        }
    }

    /// Stable machine key, matching the serde representation.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Skill::ReceivingLove => "receiving_love",
            Skill::ExploringPlayfully => "exploring_playfully",
            Skill::ThinkingForYourself => "thinking_for_yourself",
            Skill::InitiatingPower => "initiating_power",
            Skill::ExpandingCompetence => "expanding_competence",
            Skill::IncreasingResponsibility => "increasing_responsibility",
            Skill::ExpandingLove => "expanding_love",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
