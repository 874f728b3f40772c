use std::sync::Arc;

use quiz_core::model::{AnswerMap, Question, QuestionId, QuizSnapshot, User, Username};
use quiz_core::time::fixed_now;
use storage::sqlite::SqliteRepository;
use storage::{KeyValueStore, QUIZ_PROGRESS_KEY, SessionStore, Storage, USER_KEY};

fn snapshot() -> QuizSnapshot {
    let questions = (0..3)
        .map(|id| {
            Question::new(
                QuestionId::new(id),
                format!("Question {id}"),
                "Casablanca",
                vec![
                    "Vertigo".into(),
                    "Casablanca".into(),
                    "Psycho".into(),
                    "Rebecca".into(),
                ],
                "multiple",
            )
            .unwrap()
        })
        .collect();
    let mut answers = AnswerMap::new();
    answers.record(QuestionId::new(0), "Casablanca");
    QuizSnapshot {
        questions,
        current_index: 1,
        answers,
        time_left: 201,
        timestamp: fixed_now(),
    }
}

#[tokio::test]
async fn sqlite_local_state_upserts_and_removes() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_local_state?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    repo.migrate().await.expect("migrations are idempotent");

    assert_eq!(repo.get(USER_KEY).await.unwrap(), None);
    repo.set(USER_KEY, "first").await.unwrap();
    repo.set(USER_KEY, "second").await.unwrap();
    assert_eq!(repo.get(USER_KEY).await.unwrap().as_deref(), Some("second"));

    repo.remove(USER_KEY).await.unwrap();
    assert_eq!(repo.get(USER_KEY).await.unwrap(), None);
}

#[tokio::test]
async fn session_store_survives_on_sqlite() {
    let storage = Storage::sqlite("sqlite:file:memdb_session_store?mode=memory&cache=shared")
        .await
        .expect("open storage");
    let store = SessionStore::new(Arc::clone(&storage.local_state));

    let user = User::new(Username::parse("Ingrid").unwrap(), fixed_now());
    store.save_user(&user).await.unwrap();
    store.save_snapshot(&snapshot()).await.unwrap();

    assert_eq!(store.load_user().await.unwrap(), Some(user));
    let loaded = store.load_snapshot().await.unwrap().expect("snapshot");
    assert_eq!(loaded.current_index, 1);
    assert_eq!(loaded.time_left, 201);
    assert_eq!(loaded.answers.get(QuestionId::new(0)), Some("Casablanca"));

    store.clear_all().await.unwrap();
    assert_eq!(storage.local_state.get(USER_KEY).await.unwrap(), None);
    assert_eq!(storage.local_state.get(QUIZ_PROGRESS_KEY).await.unwrap(), None);
}
