
use quizmaster::error::{GeneratorError, QuizError};
use quizmaster::generator::GenerationRequest;
use quizmaster::model::Difficulty;
use quizmaster::store::SessionStore;
use test_utils::{opening_batch, question, scripted_service};

#[tokio::test]
async fn create_session_serves_first_question_and_seeds_queue() {
    let (service, handle, store) = scripted_service();
    handle.push_batch(opening_batch());

    let created = service.create_session("space").await.unwrap();
    assert_eq!(created.question.text, "opener");

    // The initial call carries the theme, batch 5, easy.
    let calls = handle.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(
        calls[0],
        GenerationRequest {
            theme: Some("space".to_string()),
            difficulty: Difficulty::Easy,
            batch_size: 5,
        }
    );

    let session = store.load(&created.session_id).await.unwrap().unwrap();
    assert_eq!(session.theme, "space");
    assert_eq!(session.difficulty, Difficulty::Easy);
    assert_eq!(session.consecutive_wrong, 0);
    assert_eq!(session.queue.len(), 4);
    assert_eq!(session.history.len(), 1);
    assert_eq!(session.history[0].text, "opener");
}

#[tokio::test]
async fn create_session_rejects_empty_theme() {
    let (service, handle, _store) = scripted_service();

    let err = service.create_session("  ").await.unwrap_err();
    assert!(matches!(err, QuizError::InvalidInput(_)));
    // The generator must not have been touched.
    assert_eq!(handle.call_count(), 0);
}

#[tokio::test]
async fn create_session_surfaces_generation_unavailable() {
    let (service, handle, store) = scripted_service();
    handle.push_error(GeneratorError::Api("model overloaded".to_string()));

    let err = service.create_session("space").await.unwrap_err();
    assert!(matches!(err, QuizError::GenerationUnavailable));

    // An empty batch is the same failure, and neither persists a session.
    handle.push_batch(Vec::new());
    let err = service.create_session("space").await.unwrap_err();
    assert!(matches!(err, QuizError::GenerationUnavailable));
    assert!(store.load("anything").await.unwrap().is_none());
}

#[tokio::test]
async fn malformed_questions_are_never_served() {
    let (service, handle, store) = scripted_service();
    // Creation batch opens with a three-option question; it must be treated
    // as absent, so the well-formed one becomes the first question.
    let mut short_options = question("bad", Difficulty::Easy);
    short_options.options.pop();
    handle.push_batch(vec![short_options, question("good", Difficulty::Easy)]);

    let created = service.create_session("space").await.unwrap();
    assert_eq!(created.question.text, "good");

    let session = store.load(&created.session_id).await.unwrap().unwrap();
    assert!(session.queue.is_empty());
    assert!(session.history.iter().all(|q| q.text != "bad"));
}

#[tokio::test]
async fn create_session_with_only_malformed_questions_is_unavailable() {
    let (service, handle, _store) = scripted_service();
    let mut duplicated = question("dup", Difficulty::Easy);
    duplicated.options[3] = duplicated.options[0].clone();
    handle.push_batch(vec![duplicated]);

    let err = service.create_session("space").await.unwrap_err();
    assert!(matches!(err, QuizError::GenerationUnavailable));
}

#[tokio::test]
async fn correct_answer_promotes_difficulty() {
    let (service, handle, _store) = scripted_service();
    handle.push_batch(opening_batch());
    let created = service.create_session("space").await.unwrap();

    // "opener" has correct_index 1.
    let outcome = service.submit_answer(&created.session_id, 1).await.unwrap();
    assert!(outcome.correct);
    assert_eq!(outcome.new_difficulty, Difficulty::Medium);
    assert_eq!(outcome.explanation.as_deref(), Some("because opener"));
}

#[tokio::test]
async fn three_wrong_answers_at_hard_demote_to_medium() {
    let (service, handle, store) = scripted_service();
    handle.push_batch(opening_batch());
    let created = service.create_session("space").await.unwrap();

    // Force the session up to hard first.
    let mut session = store.load(&created.session_id).await.unwrap().unwrap();
    session.difficulty = Difficulty::Hard;
    store
        .save(
            &created.session_id,
            &session,
            service.config().session_ttl,
        )
        .await
        .unwrap();

    let first = service.submit_answer(&created.session_id, 0).await.unwrap();
    assert!(!first.correct);
    assert_eq!(first.new_difficulty, Difficulty::Hard);

    let second = service.submit_answer(&created.session_id, 0).await.unwrap();
    assert_eq!(second.new_difficulty, Difficulty::Hard);

    let third = service.submit_answer(&created.session_id, 0).await.unwrap();
    assert_eq!(third.new_difficulty, Difficulty::Medium);

    let session = store.load(&created.session_id).await.unwrap().unwrap();
    assert_eq!(session.consecutive_wrong, 0);
}

#[tokio::test]
async fn submit_answer_rejects_out_of_range_index() {
    let (service, handle, _store) = scripted_service();
    handle.push_batch(opening_batch());
    let created = service.create_session("space").await.unwrap();

    let err = service
        .submit_answer(&created.session_id, 4)
        .await
        .unwrap_err();
    assert!(matches!(err, QuizError::InvalidInput(_)));
}

#[tokio::test]
async fn submit_answer_without_history_reports_no_active_question() {
    let (service, _handle, store) = scripted_service();

    // Persist a session that has never been served a question.
    let session = quizmaster::Session::new("space");
    store
        .save("bare", &session, service.config().session_ttl)
        .await
        .unwrap();

    let err = service.submit_answer("bare", 0).await.unwrap_err();
    assert!(matches!(err, QuizError::NoActiveQuestion));
}

#[tokio::test]
async fn unknown_session_id_reports_not_found() {
    let (service, _handle, _store) = scripted_service();

    let err = service.next_question("nope").await.unwrap_err();
    assert!(matches!(err, QuizError::SessionNotFound));
    let err = service.submit_answer("nope", 0).await.unwrap_err();
    assert!(matches!(err, QuizError::SessionNotFound));
    let err = service.next_batch("nope", 3).await.unwrap_err();
    assert!(matches!(err, QuizError::SessionNotFound));
}

#[tokio::test]
async fn next_question_serves_and_persists() {
    let (service, handle, store) = scripted_service();
    handle.push_batch(opening_batch());
    let created = service.create_session("space").await.unwrap();

    let q = service.next_question(&created.session_id).await.unwrap();
    assert_eq!(q.difficulty, Difficulty::Easy);

    let session = store.load(&created.session_id).await.unwrap().unwrap();
    assert_eq!(session.history.len(), 2);
    assert_eq!(session.history[1].text, q.text);
}

#[tokio::test]
async fn exhausted_session_reports_session_exhausted_but_persists() {
    let (service, handle, store) = scripted_service();
    handle.push_batch(vec![question("only", Difficulty::Easy)]);
    let created = service.create_session("space").await.unwrap();

    // Queue is empty and the script has run out, so top-ups produce nothing.
    let err = service.next_question(&created.session_id).await.unwrap_err();
    assert!(matches!(err, QuizError::SessionExhausted));

    // Exhaustion is terminal for content, not for the record.
    let session = store.load(&created.session_id).await.unwrap();
    assert!(session.is_some());
    let err = service.next_question(&created.session_id).await.unwrap_err();
    assert!(matches!(err, QuizError::SessionExhausted));
}

#[tokio::test]
async fn next_batch_stops_early_on_exhaustion() {
    let (service, handle, _store) = scripted_service();
    handle.push_batch(opening_batch());
    let created = service.create_session("space").await.unwrap();

    let batch = service.next_batch(&created.session_id, 10).await.unwrap();
    // 4 left in the queue after the opener, nothing more to generate.
    assert_eq!(batch.total_returned, 4);
    assert_eq!(batch.questions.len(), 4);

    let texts: Vec<&str> = batch.questions.iter().map(|q| q.text.as_str()).collect();
    let mut unique = texts.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), texts.len(), "no question served twice");
}

#[tokio::test]
async fn low_queue_top_up_requests_batch_of_six_without_theme() {
    let (service, handle, _store) = scripted_service();
    handle.push_batch(opening_batch());
    let created = service.create_session("space").await.unwrap();

    // Queue holds 4 questions, above the low-water mark, so the first pull
    // is served straight from the buffer.
    service.next_question(&created.session_id).await.unwrap();
    assert_eq!(handle.call_count(), 1, "creation call only");

    // Now the queue holds 3, at the low-water mark: exactly one top-up.
    handle.push_batch(vec![question("fresh", Difficulty::Easy)]);
    service.next_question(&created.session_id).await.unwrap();

    let calls = handle.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(
        calls[1],
        GenerationRequest {
            theme: None,
            difficulty: Difficulty::Easy,
            batch_size: 6,
        }
    );
}

#[tokio::test]
async fn full_game_round_trip() {
    let (service, handle, _store) = scripted_service();
    handle.push_batch(opening_batch());
    let created = service.create_session("space").await.unwrap();

    // Answer the opener correctly: easy -> medium.
    let outcome = service.submit_answer(&created.session_id, 1).await.unwrap();
    assert_eq!(outcome.new_difficulty, Difficulty::Medium);

    // The buffer has no medium question left, so the medium session falls
    // back to an easy one without generating (the queue is still deep).
    let q = service.next_question(&created.session_id).await.unwrap();
    assert_eq!(q.text, "easy-1");
    assert_eq!(handle.call_count(), 1);

    // Answer it correctly: medium -> hard.
    let outcome = service.submit_answer(&created.session_id, 1).await.unwrap();
    assert_eq!(outcome.new_difficulty, Difficulty::Hard);

    // At hard with the queue at the low-water mark the next pull refills,
    // then serves the first buffered hard question.
    handle.push_batch(vec![question("hard-fresh", Difficulty::Hard)]);
    let q = service.next_question(&created.session_id).await.unwrap();
    assert_eq!(q.text, "hard-1");
    assert_eq!(handle.call_count(), 2);
}
