//! End-to-end flow through the controller, the way a front end drives it.

use flagquiz::config::rng_from_seed;
use flagquiz::controller::parse_pick;
use flagquiz::{CountryPool, QuizConfig, QuizController, SessionEvent};

#[test]
fn test_front_end_loop() {
    let config = QuizConfig {
        seed: Some(5),
        max_rounds: Some(10),
        ..Default::default()
    };
    let (session, seed) = config.start_session();
    assert_eq!(seed, 5);

    let mut controller = QuizController::new(session);
    let events = controller.subscribe();

    // Always pick the middle flag, typed as "2".
    for _ in 0..10 {
        let choice = parse_pick("2").unwrap();
        let expected_correct = controller.round().correct_index == choice;
        let feedback = controller.answer(choice).unwrap();
        assert_eq!(feedback.is_correct(), expected_correct);
        controller.acknowledge().unwrap();
    }

    let stats = controller.stats();
    assert_eq!(stats.answered, 10);
    assert_eq!(stats.correct + stats.wrong, 10);

    let received: Vec<SessionEvent> = events.try_iter().collect();
    assert_eq!(received.len(), 20);
    let answered = received
        .iter()
        .filter(|e| matches!(e, SessionEvent::Answered(_)))
        .count();
    assert_eq!(answered, 10);
}

#[test]
fn test_custom_pool_from_config() {
    let pool = QuizConfig::resolve_countries(Some("Ireland, Italy, Nigeria, Poland"), None).unwrap();
    let config = QuizConfig {
        countries: pool.clone(),
        seed: Some(77),
        max_rounds: None,
    };
    let (session, _) = config.start_session();
    assert_eq!(session.score(), 0);

    let controller = QuizController::from(session);
    for name in &controller.round().countries {
        assert!(pool.contains(name));
    }
}

#[test]
fn test_reset_starts_over() {
    let session = flagquiz::QuizSession::start(["UK", "US", "Spain"], rng_from_seed(3)).unwrap();
    let mut controller = QuizController::new(session);

    let correct = controller.round().correct_index;
    controller.answer(correct).unwrap();
    assert_eq!(controller.score(), 1);

    controller.reset(CountryPool::default());
    assert_eq!(controller.score(), 0);
    assert!(controller.history().is_empty());
    assert_eq!(controller.format_history(), "No answers yet.");
}
