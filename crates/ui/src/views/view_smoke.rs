use std::sync::Arc;

use quiz_core::model::{
    AnswerMap, QuestionId, QuizRun, QuizSnapshot, ResultsSummary, SessionScreen, User, Username,
};
use quiz_core::time::{AUTO_ADVANCE_DELAY, TIMER_INTERVAL, fixed_now};
use storage::{KeyValueStore, QUIZ_PROGRESS_KEY, SessionStore, USER_KEY};

use super::test_harness::{FakeSource, ViewHarness, question, setup_view_harness};
use crate::vm::QuizIntent;

fn user() -> User {
    User::new(Username::parse("Ada").unwrap(), fixed_now())
}

async fn stored_snapshot(harness: &ViewHarness) -> QuizSnapshot {
    SessionStore::new(Arc::new(harness.kv.clone()))
        .load_snapshot()
        .await
        .unwrap()
        .expect("snapshot persisted")
}

fn quiz_screen() -> SessionScreen {
    SessionScreen::Quiz {
        user: user(),
        resume: None,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn login_view_smoke_renders_form() {
    let mut harness = setup_view_harness(SessionScreen::Login, FakeSource::with_size(10));
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Quiz Master"), "missing title in {html}");
    assert!(html.contains("Enter your name to start..."), "missing input in {html}");
    assert!(html.contains("Start Quiz"), "missing submit in {html}");
    assert_eq!(harness.source.fetches(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_loads_first_question() {
    let mut harness = setup_view_harness(quiz_screen(), FakeSource::with_size(10));
    harness.rebuild();
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question text 0"), "missing question in {html}");
    assert!(html.contains("1 / 10"), "missing counter in {html}");
    assert!(html.contains("5:00"), "missing timer in {html}");
    assert!(html.contains("Right 0"), "missing option in {html}");
    assert!(html.contains("Ada"), "missing username in {html}");
    assert_eq!(harness.source.fetches(), 1);
    assert!(harness.kv.get(QUIZ_PROGRESS_KEY).await.unwrap().is_some());
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_locks_after_pick_then_advances() {
    let mut harness = setup_view_harness(quiz_screen(), FakeSource::with_size(10));
    harness.rebuild();
    harness.settle().await;

    harness.handles.send(QuizIntent::Select("Wrong 0a".into()));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("option-card selected"), "missing selection in {html}");

    // a stale advance for another question is ignored
    harness.handles.send(QuizIntent::Advance { from: 5 });
    harness.settle().await;
    assert!(harness.render().contains("Question text 0"));

    harness.handles.send(QuizIntent::Advance { from: 0 });
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question text 1"), "did not advance: {html}");
    assert!(html.contains("2 / 10"), "missing counter in {html}");
    assert!(!html.contains("option-card selected"), "selection leaked: {html}");
}

#[tokio::test(start_paused = true)]
async fn quiz_view_timer_counts_down_once_per_second() {
    let mut harness = setup_view_harness(quiz_screen(), FakeSource::with_size(10));
    harness.rebuild();
    harness.settle().await;
    assert!(harness.render().contains("5:00"));

    for _ in 0..3 {
        harness.advance(TIMER_INTERVAL).await;
    }

    let html = harness.render();
    assert!(html.contains("4:57"), "timer did not count down: {html}");
    assert_eq!(stored_snapshot(&harness).await.time_left, 297);
}

#[tokio::test(start_paused = true)]
async fn quiz_view_pick_locks_then_advances_after_delay() {
    let mut harness = setup_view_harness(quiz_screen(), FakeSource::with_size(10));
    harness.rebuild();
    harness.settle().await;

    harness.pick("Right 0");
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("option-card selected"), "missing selection in {html}");
    assert!(html.contains("Question text 0"), "advanced too early: {html}");

    // locked until the auto-advance fires
    harness.pick("Wrong 0a");
    harness.settle().await;

    harness.advance(AUTO_ADVANCE_DELAY).await;
    let html = harness.render();
    assert!(html.contains("Question text 1"), "did not auto-advance: {html}");
    assert!(html.contains("2 / 10"), "missing counter in {html}");

    let snapshot = stored_snapshot(&harness).await;
    assert_eq!(snapshot.current_index, 1);
    assert_eq!(snapshot.answers.get(QuestionId::new(0)), Some("Right 0"));
    assert_eq!(snapshot.answers.len(), 1);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_logout_waits_for_queued_writes() {
    let mut harness = setup_view_harness(quiz_screen(), FakeSource::with_size(10));
    harness.rebuild();
    harness.settle().await;

    harness.handles.send(QuizIntent::Select("Right 0".into()));
    harness.handles.send(QuizIntent::Tick);
    harness.logout();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Start Quiz"), "not back at login: {html}");
    assert_eq!(harness.kv.get(QUIZ_PROGRESS_KEY).await.unwrap(), None);
    assert_eq!(harness.kv.get(USER_KEY).await.unwrap(), None);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_last_answer_shows_results() {
    let mut harness = setup_view_harness(quiz_screen(), FakeSource::with_size(1));
    harness.rebuild();
    harness.settle().await;

    harness.handles.send(QuizIntent::Select("Right 0".into()));
    harness.settle().await;
    harness.handles.send(QuizIntent::Advance { from: 0 });
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Quiz Completed!"), "missing results in {html}");
    assert!(html.contains("100%"), "missing score in {html}");
    assert!(html.contains("Outstanding!"), "missing grade message in {html}");
    assert_eq!(harness.kv.get(QUIZ_PROGRESS_KEY).await.unwrap(), None);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_fetch_error() {
    let mut harness = setup_view_harness(quiz_screen(), FakeSource::failing());
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Failed to load questions"), "missing error in {html}");
    assert!(html.contains("Log out"), "missing logout in {html}");
    assert!(!html.contains("Question text"), "unexpected question in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_resumes_snapshot_without_fetching() {
    let mut run = QuizRun::new((0..10).map(question).collect(), 300).unwrap();
    for id in 0..2 {
        run.select_answer(&format!("Right {id}")).unwrap();
        run.advance();
    }
    for _ in 0..255 {
        run.tick();
    }
    let screen = SessionScreen::Quiz {
        user: user(),
        resume: Some(run.snapshot(fixed_now())),
    };

    let mut harness = setup_view_harness(screen, FakeSource::with_size(10));
    harness.rebuild();
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Question text 2"), "missing question in {html}");
    assert!(html.contains("3 / 10"), "missing counter in {html}");
    assert!(html.contains("0:45"), "missing timer in {html}");
    assert!(html.contains("time-warning"), "missing warning in {html}");
    assert_eq!(harness.source.fetches(), 0);
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_summary() {
    let questions: Vec<_> = (0..10).map(question).collect();
    let mut answers = AnswerMap::new();
    for id in 0..7 {
        answers.record(QuestionId::new(id), format!("Right {id}"));
    }
    answers.record(QuestionId::new(7), "Wrong 7a");
    let summary = ResultsSummary::tally(questions, answers, 330);

    let mut harness = setup_view_harness(
        SessionScreen::Results {
            user: user(),
            summary,
        },
        FakeSource::with_size(10),
    );
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Here's how you did, Ada"), "missing subtitle in {html}");
    assert!(html.contains("70%"), "missing score in {html}");
    assert!(html.contains("Great Job!"), "missing grade message in {html}");
    assert!(html.contains("Unanswered"), "missing unanswered in {html}");
    assert!(html.contains("5m 30s"), "missing time spent in {html}");
    assert!(html.contains("7 / 10"), "missing score label in {html}");
    assert!(html.contains("Try Again"), "missing restart in {html}");
    assert!(html.contains("Review answers"), "missing review in {html}");
}
