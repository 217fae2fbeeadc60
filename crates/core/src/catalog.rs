//! Built-in statement catalog.
//!
//! Each skill carries five "developed" statements (agreement signals strength) and five
//! "underdeveloped" statements (agreement signals a deficit).

use std::sync::{Arc, LazyLock};

use crate::model::{Skill, Statement};

/// Statements for one skill, split by polarity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillStatements {
    skill: Skill,
    developed: Vec<Statement>,
    underdeveloped: Vec<Statement>,
}

impl SkillStatements {
    #[must_use]
    pub fn new<D, U>(skill: Skill, developed: D, underdeveloped: U) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        U: IntoIterator,
        U::Item: Into<String>,
    {
        Self {
            skill,
            developed: developed
                .into_iter()
                .map(|text| Statement::developed(skill, text))
                .collect(),
            underdeveloped: underdeveloped
                .into_iter()
                .map(|text| Statement::underdeveloped(skill, text))
                .collect(),
        }
    }

    #[must_use]
    pub fn skill(&self) -> Skill {
        self.skill
    }

    #[must_use]
    pub fn developed(&self) -> &[Statement] {
        &self.developed
    }

    #[must_use]
    pub fn underdeveloped(&self) -> &[Statement] {
        &self.underdeveloped
    }

    /// Developed statements followed by underdeveloped ones.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.developed.iter().chain(self.underdeveloped.iter())
    }
}

/// Immutable set of skills and their statements.
///
/// Skill order is declaration order and drives the order of reported results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    entries: Vec<SkillStatements>,
}

impl Catalog {
    #[must_use]
    pub fn new(entries: Vec<SkillStatements>) -> Self {
        Self { entries }
    }

    /// The process-wide built-in catalog, constructed on first use.
    #[must_use]
    pub fn builtin() -> Arc<Catalog> {
        Arc::clone(&BUILTIN)
    }

    #[must_use]
    pub fn entries(&self) -> &[SkillStatements] {
        &self.entries
    }

    pub fn skills(&self) -> impl Iterator<Item = Skill> + '_ {
        self.entries.iter().map(SkillStatements::skill)
    }

    /// Every statement, grouped by skill in declaration order.
    pub fn statements(&self) -> impl Iterator<Item = &Statement> {
        self.entries.iter().flat_map(SkillStatements::statements)
    }

    /// Total number of statements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .map(|entry| entry.developed.len() + entry.underdeveloped.len())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static BUILTIN: LazyLock<Arc<Catalog>> = LazyLock::new(|| {
    Arc::new(Catalog::new(
        BUILTIN_TABLE
            .iter()
            .map(|(skill, developed, underdeveloped)| {
                SkillStatements::new(*skill, *developed, *underdeveloped)
            })
            .collect(),
    ))
});

type CatalogRow = (Skill, [&'static str; 5], [&'static str; 5]);

const BUILTIN_TABLE: [CatalogRow; 7] = [
    (
        Skill::ReceivingLove,
        [
            "I believe my physical needs are important",
            "I can comfort and calm myself when I am upset",
            "I can communicate my needs to others, even if it's inconvenient",
            "I take care of my body",
            "I believe I'm a beloved child of God",
        ],
        [
            "I worry that people might abandon me",
            "I avoid getting emotionally close to others",
            "I avoid being vulnerable and receiving help",
            "I feel shame about myself",
            "I have negative thoughts about myself",
        ],
    ),
    (
        Skill::ExploringPlayfully,
        [
            "I enjoy trying new activities",
            "I feel safe enough to take healthy risks",
            "I can laugh at my own mistakes",
            "I am curious about people and ideas that are different from me",
            "I can ask for help when I try something new",
        ],
        [
            "I avoid situations where I might fail",
            "I feel anxious when things are unfamiliar",
            "I stick to routines even when they no longer help me",
            "I feel foolish when I make mistakes in front of others",
            "I hold back from new experiences unless I know how they will turn out",
        ],
    ),
    (
        Skill::ThinkingForYourself,
        [
            "I can say no without feeling guilty",
            "I form my own opinions after considering the facts",
            "I can disagree with someone and stay connected to them",
            "I know what I like and what I don't like",
            "I make decisions based on my own values",
        ],
        [
            "I go along with others to avoid conflict",
            "I need others' approval before I make a decision",
            "I feel lost when people I care about disagree with me",
            "I change my opinions to fit in with the group",
            "I let others make choices for me",
        ],
    ),
    (
        Skill::InitiatingPower,
        [
            "I take initiative to solve problems",
            "I use my influence to help others",
            "I can take charge when a situation calls for it",
            "I speak up when something is unfair",
            "I follow through on the goals I set",
        ],
        [
            "I wait for others to act before I do",
            "I use anger or pressure to get my way",
            "I feel powerless to change my circumstances",
            "I avoid leadership roles",
            "I give up when things get difficult",
        ],
    ),
    (
        Skill::ExpandingCompetence,
        [
            "I learn new skills when my situation changes",
            "I adapt well to new places and people",
            "I seek feedback so I can improve",
            "I am confident I can figure things out",
            "I apply what I have learned in one area to another",
        ],
        [
            "I feel overwhelmed when I have to learn something new",
            "I doubt my abilities in unfamiliar settings",
            "I avoid responsibilities I haven't handled before",
            "I take criticism as a personal attack",
            "I compare myself to others and feel behind",
        ],
    ),
    (
        Skill::IncreasingResponsibility,
        [
            "I can name what I am feeling",
            "I can calm myself down when I am angry",
            "I take responsibility for my actions",
            "I keep my commitments",
            "I return to joy after a hard day",
        ],
        [
            "I blame others when things go wrong",
            "My emotions control how I behave",
            "I make excuses for my mistakes",
            "I stay upset long after a conflict",
            "I act impulsively and regret it later",
        ],
    ),
    (
        Skill::ExpandingLove,
        [
            "I care for others while still caring for myself",
            "I can forgive people who have hurt me",
            "I notice when others need support",
            "I make room for the needs of the people around me",
            "I give generously without expecting something back",
        ],
        [
            "I neglect my own needs to please others",
            "I hold grudges",
            "I find it hard to care about people outside my circle",
            "I feel resentful when I help others",
            "I expect others to meet all my needs",
        ],
    ),
];
