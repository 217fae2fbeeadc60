use rand::Rng;
use rand::seq::SliceRandom;
use std::sync::Arc;

use lifeskills_core::Catalog;
use lifeskills_core::model::Question;

/// Produces the question order for a session from a catalog.
#[derive(Debug, Clone)]
pub struct QuestionBank {
    catalog: Arc<Catalog>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    /// Bank over the built-in seven-skill catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self::new(Catalog::builtin())
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Number of questions a session will contain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Every statement as a question, in catalog order.
    #[must_use]
    pub fn questions(&self) -> Vec<Question> {
        self.catalog.statements().map(Question::from).collect()
    }

    /// Flattens the catalog and applies a uniform (Fisher-Yates) shuffle across all
    /// skills and polarities.
    #[must_use]
    pub fn build_session<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Question> {
        let mut questions = self.questions();
        questions.as_mut_slice().shuffle(rng);
        questions
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lifeskills_core::SkillStatements;
    use lifeskills_core::model::Skill;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn sorted_texts(questions: &[Question]) -> Vec<(String, bool)> {
        let mut texts: Vec<_> = questions
            .iter()
            .map(|q| (q.text.clone(), q.positive))
            .collect();
        texts.sort();
        texts
    }

    #[test]
    fn session_is_a_permutation_of_the_catalog() {
        let bank = QuestionBank::builtin();
        let mut rng = StdRng::seed_from_u64(11);
        let shuffled = bank.build_session(&mut rng);

        assert_eq!(shuffled.len(), bank.len());
        assert_eq!(sorted_texts(&shuffled), sorted_texts(&bank.questions()));
        for skill in Skill::ALL {
            assert!(shuffled.iter().any(|q| q.skill == skill), "{skill:?} missing");
        }
    }

    #[test]
    fn same_seed_same_order() {
        let bank = QuestionBank::builtin();
        let a = bank.build_session(&mut StdRng::seed_from_u64(3));
        let b = bank.build_session(&mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn repeated_calls_change_the_order() {
        let bank = QuestionBank::builtin();
        let mut rng = StdRng::seed_from_u64(5);
        let first = bank.build_session(&mut rng);
        let differs = (0..5).any(|_| bank.build_session(&mut rng) != first);
        assert!(differs);
        assert_ne!(first, bank.questions());
    }

    #[test]
    fn shuffle_is_roughly_uniform() {
        let catalog = Catalog::new(vec![SkillStatements::new(
            Skill::ReceivingLove,
            ["A", "B"],
            ["C"],
        )]);
        let bank = QuestionBank::new(Arc::new(catalog));
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<String, u32> = HashMap::new();

        for _ in 0..6_000 {
            let order: String = bank
                .build_session(&mut rng)
                .iter()
                .map(|q| q.text.as_str())
                .collect();
            *counts.entry(order).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for (order, count) in counts {
            assert!((800..=1_200).contains(&count), "{order}: {count}");
        }
    }
}
