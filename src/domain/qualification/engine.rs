//! Qualification engine - pure transition functions over a session.
//!
//! The engine owns no mutable state. Every operation takes the current
//! [`QualificationSession`] by reference and returns a [`Transition`] holding
//! the successor session and the events produced on the way, so the whole
//! flow can be exercised without any I/O.
//!
//! # Flow
//!
//! Products are visited best tier first. Within a product, questions are
//! asked in order:
//!
//! - "no" moves to the next question; after the last one the product is
//!   qualified and the run ends.
//! - "yes" disqualifies the current product. If the question is a common
//!   question, every product it maps to is marked auto-disqualified. The
//!   scan then moves forward, skipping auto-disqualified products, to the
//!   next eligible product. When none is left the run is exhausted.
//!
//! Auto-disqualification only affects products after the current one.
//! A product with no questions is qualified as soon as it is reached.

use std::sync::Arc;

use super::{AnsweredQuestion, QualificationError, QualificationEvent, QualificationSession};
use crate::domain::catalog::{Catalog, Product, Question};
use crate::domain::foundation::{Percentage, SessionId};

/// Result of one transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The successor session.
    pub session: QualificationSession,
    /// Events in the order they happened.
    pub events: Vec<QualificationEvent>,
    /// The answered question, for answer transitions.
    pub answered: Option<AnsweredQuestion>,
}

impl Transition {
    /// True when this transition ended the run.
    pub fn completed(&self) -> bool {
        self.events.iter().any(QualificationEvent::is_terminal)
    }
}

/// Drives qualification sessions over a shared catalog.
#[derive(Debug, Clone)]
pub struct QualificationEngine {
    catalog: Arc<Catalog>,
}

impl QualificationEngine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Starts a new run.
    ///
    /// An empty catalog ends immediately with `Exhausted`; a first product
    /// without questions ends immediately with `Qualified`.
    pub fn start(&self, session_id: SessionId) -> Result<Transition, QualificationError> {
        let mut session = QualificationSession::new(session_id);
        let mut events = vec![QualificationEvent::ProgressChanged {
            percent: Percentage::ZERO,
        }];
        self.enter_next_eligible(&mut session, 0, &mut events)?;

        Ok(Transition {
            session,
            events,
            answered: None,
        })
    }

    /// Discards the old run and starts a brand-new one.
    ///
    /// The catalog and common-question table are shared, so nothing but the
    /// session is reset.
    pub fn restart(&self, session_id: SessionId) -> Result<Transition, QualificationError> {
        self.start(session_id)
    }

    /// The question awaiting an answer.
    pub fn current_question(
        &self,
        session: &QualificationSession,
    ) -> Result<&Question, QualificationError> {
        if session.is_complete() {
            return Err(QualificationError::SessionComplete(*session.id()));
        }
        self.catalog
            .product(session.current_product_index())
            .and_then(|p| p.question(session.current_question_index()))
            .ok_or(QualificationError::NoCurrentQuestion {
                session_id: *session.id(),
                product_index: session.current_product_index(),
                question_index: session.current_question_index(),
            })
    }

    /// The product currently being qualified for, while the run is active.
    pub fn current_product(&self, session: &QualificationSession) -> Option<&Product> {
        if session.is_complete() {
            return None;
        }
        self.catalog.product(session.current_product_index())
    }

    /// The winning product, once the run has qualified.
    pub fn qualified_product(&self, session: &QualificationSession) -> Option<&Product> {
        session
            .qualified_product()
            .and_then(|id| self.catalog.product_by_id(id))
    }

    /// Asked questions over distinct questions in the whole catalog.
    ///
    /// Skipped products never add to the numerator, so runs with skips end
    /// below 100%.
    pub fn progress(&self, session: &QualificationSession) -> Percentage {
        Percentage::from_ratio(
            session.asked_questions().len(),
            self.catalog.distinct_question_count(),
        )
    }

    /// Applies an answer to the current question. `true` disqualifies.
    pub fn answer(
        &self,
        session: &QualificationSession,
        value: bool,
    ) -> Result<Transition, QualificationError> {
        let question = self.current_question(session)?;
        let product_index = session.current_product_index();
        let product = self
            .catalog
            .product(product_index)
            .ok_or(QualificationError::NoCurrentQuestion {
                session_id: *session.id(),
                product_index,
                question_index: session.current_question_index(),
            })?;

        let mut next = session.clone();
        next.record_response(question.text(), value);
        let mut events = vec![QualificationEvent::ProgressChanged {
            percent: self.progress(&next),
        }];

        if value {
            if let Some(linked) = self.catalog.common_questions().lookup(question.text()) {
                next.auto_disqualify(linked.iter().cloned());
            }
            events.push(QualificationEvent::disqualified(product));
            self.enter_next_eligible(&mut next, product_index + 1, &mut events)?;
        } else if next.current_question_index() + 1 < product.question_count() {
            next.advance_question();
            let index = next.current_question_index();
            if let Some(upcoming) = product.question(index) {
                events.push(QualificationEvent::question_presented(product, index, upcoming));
            }
        } else {
            next.finish_qualified(*product.id())?;
            events.push(QualificationEvent::qualified(product));
        }

        let answered = AnsweredQuestion {
            product_id: *product.id(),
            question_id: *question.id(),
            question: question.text().to_string(),
            answer: value,
        };

        Ok(Transition {
            session: next,
            events,
            answered: Some(answered),
        })
    }

    /// Scans forward from `from`, skipping auto-disqualified products, and
    /// positions the session on the first eligible one.
    fn enter_next_eligible(
        &self,
        session: &mut QualificationSession,
        from: usize,
        events: &mut Vec<QualificationEvent>,
    ) -> Result<(), QualificationError> {
        for (index, candidate) in self.catalog.products().iter().enumerate().skip(from) {
            if session.is_auto_disqualified(candidate.name()) {
                events.push(QualificationEvent::auto_disqualified(candidate));
                continue;
            }

            session.move_to_product(index);
            match candidate.question(0) {
                Some(first) => {
                    events.push(QualificationEvent::question_presented(candidate, 0, first));
                }
                None => {
                    session.finish_qualified(*candidate.id())?;
                    events.push(QualificationEvent::qualified(candidate));
                }
            }
            return Ok(());
        }

        session.finish_exhausted(self.catalog.len())?;
        events.push(QualificationEvent::Exhausted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{CommonQuestionTable, Tier};
    use crate::domain::foundation::ProductId;
    use crate::domain::qualification::QualificationStatus;

    fn product(name: &str, tier: Tier, questions: &[&str]) -> Product {
        Product::new(ProductId::derived(name), name, tier)
            .with_question_texts(questions.iter().copied())
    }

    fn engine(products: Vec<Product>, table: CommonQuestionTable) -> QualificationEngine {
        QualificationEngine::new(Arc::new(Catalog::new(products, table).unwrap()))
    }

    fn four_tiers(table: CommonQuestionTable) -> QualificationEngine {
        engine(
            vec![
                product("A", Tier::Preferred, &["a1", "a2"]),
                product("B", Tier::Standard, &["b1", "b2"]),
                product("C", Tier::Graded, &["c1"]),
                product("D", Tier::Modified, &["d1", "d2"]),
            ],
            table,
        )
    }

    fn start(engine: &QualificationEngine) -> QualificationSession {
        engine.start(SessionId::new()).unwrap().session
    }

    fn answer_all(
        engine: &QualificationEngine,
        mut session: QualificationSession,
        answers: &[bool],
    ) -> (QualificationSession, Vec<QualificationEvent>) {
        let mut events = Vec::new();
        for &value in answers {
            let transition = engine.answer(&session, value).unwrap();
            events.extend(transition.events);
            session = transition.session;
        }
        (session, events)
    }

    fn asked_products(events: &[QualificationEvent]) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for event in events {
            if let QualificationEvent::QuestionPresented { product_name, .. } = event {
                if names.last() != Some(product_name) {
                    names.push(product_name.clone());
                }
            }
        }
        names
    }

    // Start

    #[test]
    fn start_presents_first_question_of_best_product() {
        let engine = four_tiers(CommonQuestionTable::new());
        let transition = engine.start(SessionId::new()).unwrap();

        assert_eq!(
            transition.events[0],
            QualificationEvent::ProgressChanged {
                percent: Percentage::ZERO
            }
        );
        match &transition.events[1] {
            QualificationEvent::QuestionPresented {
                product_name,
                question,
                index_in_product,
                total_for_product,
                ..
            } => {
                assert_eq!(product_name, "A");
                assert_eq!(question, "a1");
                assert_eq!(*index_in_product, 0);
                assert_eq!(*total_for_product, 2);
            }
            other => panic!("Expected QuestionPresented, got {:?}", other),
        }
        assert_eq!(engine.current_question(&transition.session).unwrap().text(), "a1");
        assert!(transition.answered.is_none());
    }

    #[test]
    fn empty_catalog_is_exhausted_immediately() {
        let engine = engine(vec![], CommonQuestionTable::new());
        let transition = engine.start(SessionId::new()).unwrap();

        assert_eq!(transition.session.status(), QualificationStatus::Exhausted);
        assert!(transition.session.asked_questions().is_empty());
        assert_eq!(transition.events.last(), Some(&QualificationEvent::Exhausted));
        assert!(transition.completed());
        assert_eq!(engine.progress(&transition.session), Percentage::ZERO);
    }

    #[test]
    fn product_without_questions_is_qualified_without_asking() {
        let engine = engine(vec![product("A", Tier::Preferred, &[])], CommonQuestionTable::new());
        let transition = engine.start(SessionId::new()).unwrap();

        assert_eq!(transition.session.status(), QualificationStatus::Qualified);
        assert_eq!(engine.qualified_product(&transition.session).map(Product::name), Some("A"));
        assert!(transition.session.asked_questions().is_empty());
        assert!(matches!(
            engine.current_question(&transition.session),
            Err(QualificationError::SessionComplete(_))
        ));
    }

    #[test]
    fn product_without_questions_after_disqualification_is_qualified() {
        let engine = engine(
            vec![
                product("A", Tier::Preferred, &["a1"]),
                product("B", Tier::Standard, &[]),
                product("C", Tier::Graded, &["c1"]),
            ],
            CommonQuestionTable::new(),
        );
        let transition = engine.answer(&start(&engine), true).unwrap();

        assert_eq!(transition.session.status(), QualificationStatus::Qualified);
        assert_eq!(engine.qualified_product(&transition.session).map(Product::name), Some("B"));
        assert!(matches!(
            transition.events.last(),
            Some(QualificationEvent::Qualified { product_name, .. }) if product_name == "B"
        ));
    }

    // Answering "no"

    #[test]
    fn all_no_answers_qualify_best_product_only() {
        let engine = four_tiers(CommonQuestionTable::new());
        let (session, events) = answer_all(&engine, start(&engine), &[false, false]);

        assert_eq!(session.status(), QualificationStatus::Qualified);
        assert_eq!(engine.qualified_product(&session).map(Product::name), Some("A"));
        assert_eq!(asked_products(&events), vec!["A"]);
        assert_eq!(session.asked_questions().len(), 2);
    }

    #[test]
    fn no_answer_advances_within_product() {
        let engine = four_tiers(CommonQuestionTable::new());
        let transition = engine.answer(&start(&engine), false).unwrap();

        assert_eq!(transition.session.current_product_index(), 0);
        assert_eq!(transition.session.current_question_index(), 1);
        assert!(!transition.completed());
        assert_eq!(transition.session.response("a1"), Some(false));
        assert_eq!(
            transition.answered.as_ref().map(|a| a.question.as_str()),
            Some("a1")
        );
    }

    // Answering "yes"

    #[test]
    fn all_yes_answers_visit_every_product_then_exhaust() {
        let engine = four_tiers(CommonQuestionTable::new());
        let (session, events) = answer_all(&engine, start(&engine), &[true, true, true, true]);

        assert_eq!(session.status(), QualificationStatus::Exhausted);
        assert!(engine.qualified_product(&session).is_none());
        assert_eq!(session.current_product_index(), 4);
        assert_eq!(events.last(), Some(&QualificationEvent::Exhausted));

        let disqualified: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                QualificationEvent::Disqualified { product_name, .. } => Some(product_name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(disqualified, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn yes_answer_moves_to_next_product_first_question() {
        let engine = four_tiers(CommonQuestionTable::new());
        let session = answer_all(&engine, start(&engine), &[false]).0;
        let transition = engine.answer(&session, true).unwrap();

        assert_eq!(transition.session.current_product_index(), 1);
        assert_eq!(transition.session.current_question_index(), 0);
        assert_eq!(engine.current_question(&transition.session).unwrap().text(), "b1");
    }

    #[test]
    fn yes_answer_emits_events_in_order() {
        let engine = four_tiers(CommonQuestionTable::new());
        let transition = engine.answer(&start(&engine), true).unwrap();
        let kinds: Vec<&str> = transition.events.iter().map(QualificationEvent::kind).collect();
        assert_eq!(kinds, vec!["progress_changed", "disqualified", "question_presented"]);
    }

    // Common questions

    #[test]
    fn common_question_skips_linked_products_via_auto_disqualification() {
        let table = CommonQuestionTable::new()
            .with_entry("A1!", ["B", "D"])
            .unwrap();
        let engine = four_tiers(table);

        let transition = engine.answer(&start(&engine), true).unwrap();
        let kinds: Vec<&str> = transition.events.iter().map(QualificationEvent::kind).collect();
        assert_eq!(
            kinds,
            vec!["progress_changed", "disqualified", "auto_disqualified", "question_presented"]
        );
        assert_eq!(transition.session.current_product_index(), 2);
        assert!(transition.session.is_auto_disqualified("B"));
        assert!(transition.session.is_auto_disqualified("D"));

        let (session, events) = answer_all(&engine, transition.session, &[true]);
        assert_eq!(session.status(), QualificationStatus::Exhausted);
        assert!(events.iter().any(|e| matches!(
            e,
            QualificationEvent::AutoDisqualified { product_name, .. } if product_name == "D"
        )));
        assert!(!events.iter().any(|e| matches!(
            e,
            QualificationEvent::Disqualified { product_name, .. } if product_name == "D"
        )));
        assert!(!session.asked_questions().contains("b1"));
        assert!(!session.asked_questions().contains("d1"));
    }

    #[test]
    fn common_question_answered_no_has_no_effect() {
        let table = CommonQuestionTable::new().with_entry("a1", ["B"]).unwrap();
        let engine = four_tiers(table);
        let transition = engine.answer(&start(&engine), false).unwrap();
        assert!(transition.session.auto_disqualified_products().is_empty());
    }

    #[test]
    fn auto_disqualification_never_reaches_back() {
        // "b1" links back to A, which was already passed.
        let table = CommonQuestionTable::new().with_entry("b1", ["A", "C"]).unwrap();
        let engine = four_tiers(table);
        let (session, events) = answer_all(&engine, start(&engine), &[true, true]);

        assert_eq!(session.current_product_index(), 3);
        let auto: Vec<&str> = events
            .iter()
            .filter_map(|e| match e {
                QualificationEvent::AutoDisqualified { product_name, .. } => Some(product_name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(auto, vec!["C"]);
    }

    #[test]
    fn common_question_skipping_every_remaining_product_exhausts() {
        let table = CommonQuestionTable::new()
            .with_entry("a1", ["B", "C", "D"])
            .unwrap();
        let engine = four_tiers(table);
        let transition = engine.answer(&start(&engine), true).unwrap();

        assert_eq!(transition.session.status(), QualificationStatus::Exhausted);
        assert_eq!(transition.events.last(), Some(&QualificationEvent::Exhausted));
        assert_eq!(
            transition
                .events
                .iter()
                .filter(|e| matches!(e, QualificationEvent::AutoDisqualified { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn identical_text_outside_table_is_asked_again() {
        let engine = engine(
            vec![
                product("A", Tier::Preferred, &["same?"]),
                product("B", Tier::Standard, &["same?", "b2"]),
            ],
            CommonQuestionTable::new(),
        );
        let transition = engine.answer(&start(&engine), true).unwrap();
        assert_eq!(engine.current_question(&transition.session).unwrap().text(), "same?");
        assert_eq!(transition.session.current_product_index(), 1);
    }

    // Invariant violations

    #[test]
    fn answering_completed_session_fails() {
        let engine = four_tiers(CommonQuestionTable::new());
        let (session, _) = answer_all(&engine, start(&engine), &[false, false]);

        assert_eq!(
            engine.answer(&session, false),
            Err(QualificationError::SessionComplete(*session.id()))
        );
    }

    #[test]
    fn answering_session_from_other_catalog_fails_loudly() {
        let long = four_tiers(CommonQuestionTable::new());
        let short = engine(vec![product("A", Tier::Preferred, &["a1"])], CommonQuestionTable::new());
        let session = answer_all(&long, start(&long), &[true]).0;

        assert!(matches!(
            short.answer(&session, false),
            Err(QualificationError::NoCurrentQuestion { product_index: 1, .. })
        ));
    }

    #[test]
    fn answer_does_not_mutate_input_session() {
        let engine = four_tiers(CommonQuestionTable::new());
        let session = start(&engine);
        let before = session.clone();
        let _ = engine.answer(&session, true).unwrap();
        assert_eq!(session, before);
    }

    // Progress

    #[test]
    fn progress_counts_asked_over_catalog_distinct() {
        let engine = engine(
            vec![
                product("Preferred", Tier::Preferred, &["q1", "q2"]),
                product("Standard", Tier::Standard, &["q3"]),
            ],
            CommonQuestionTable::new(),
        );
        let (session, events) = answer_all(&engine, start(&engine), &[false, false]);

        assert_eq!(engine.qualified_product(&session).map(Product::name), Some("Preferred"));
        assert_eq!(session.asked_questions().len(), 2);
        assert_eq!(engine.progress(&session).value(), 66);
        assert!(events.contains(&QualificationEvent::ProgressChanged {
            percent: Percentage::new(66)
        }));
    }

    #[test]
    fn first_answer_qualifying_never_touches_later_products() {
        let table = CommonQuestionTable::new()
            .with_entry("q1 common with graded", ["Graded"])
            .unwrap();
        let engine = engine(
            vec![
                product("Preferred", Tier::Preferred, &["q1"]),
                product("Standard", Tier::Standard, &["q1 common with graded"]),
                product("Graded", Tier::Graded, &["q2"]),
            ],
            table,
        );
        let transition = engine.answer(&start(&engine), false).unwrap();

        assert_eq!(engine.qualified_product(&transition.session).map(Product::name), Some("Preferred"));
        assert_eq!(transition.session.asked_questions().len(), 1);
        assert!(transition.session.auto_disqualified_products().is_empty());
        assert!(!transition.events.iter().any(|e| matches!(
            e,
            QualificationEvent::QuestionPresented { product_name, .. } if product_name != "Preferred"
        )));
    }

    #[test]
    fn restart_returns_fresh_session_and_keeps_catalog() {
        let table = CommonQuestionTable::new().with_entry("a1", ["B"]).unwrap();
        let engine = four_tiers(table.clone());
        let (finished, _) = answer_all(&engine, start(&engine), &[true, true, true]);
        assert!(finished.is_complete());

        let fresh = engine.restart(SessionId::new()).unwrap().session;
        assert_ne!(fresh.id(), finished.id());
        assert_eq!(fresh.status(), QualificationStatus::InProgress);
        assert_eq!(fresh.current_product_index(), 0);
        assert_eq!(fresh.current_question_index(), 0);
        assert!(fresh.asked_questions().is_empty());
        assert!(fresh.auto_disqualified_products().is_empty());
        assert!(fresh.responses().is_empty());
        assert_eq!(engine.catalog().common_questions(), &table);
        assert_eq!(engine.catalog().len(), 4);
    }
}
