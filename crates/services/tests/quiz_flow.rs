use std::sync::Arc;

use async_trait::async_trait;
use quest_core::model::{CourseId, LeaderboardEntry, StudentId};
use quest_core::notify::Dismissal;
use quest_core::time::{fixed_clock, fixed_now};
use services::{AppServices, QuizError, QuizRun, Source, StatsGateway};
use storage::repository::{LeaderboardRepository, Storage, StorageError};

fn services() -> AppServices {
    AppServices::from_storage(&Storage::in_memory(), fixed_clock(), StudentId::new("ada")).unwrap()
}

fn answer_all(run: &mut QuizRun, correctly: bool) {
    while let Some(question) = run.current_question() {
        let answer = question.answer();
        let choice = if correctly { answer } else { usize::from(answer == 0) };
        run.answer(choice).unwrap();
    }
}

#[tokio::test]
async fn finished_quiz_updates_stats_and_leaderboard() {
    let app = services();
    let quiz = app.quiz();
    let student = app.student().clone();

    let mut run = quiz.start(&CourseId::new("space"), 0).unwrap();
    answer_all(&mut run, true);
    let report = quiz.complete(&mut run, &student, "Ada").await.unwrap();

    assert!(report.submission.completed);
    assert_eq!(report.submission.student_name, "Ada");
    assert_eq!(report.leaderboard, Some(Source::Remote));
    assert_eq!(report.stats.total_sessions, 1);
    assert_eq!(report.stats.total_correct, 3);
    assert_eq!(report.stats.accuracy, 100);
    assert_eq!(report.stats.completed_courses(), 1);

    let board = app.leaderboard().top(10).await.unwrap();
    assert_eq!(board.entries.len(), 1);
    assert_eq!(board.entries[0].score, report.submission.points);
    assert_eq!(board.entries[0].course_topic, "space");
}

#[tokio::test]
async fn recent_sessions_keep_the_last_three() {
    let app = services();
    let quiz = app.quiz();
    let student = app.student().clone();

    for round in 0..4 {
        let mut run = quiz.start(&CourseId::new("fractions"), round % 2).unwrap();
        answer_all(&mut run, round % 2 == 0);
        quiz.complete(&mut run, &student, "Ada").await.unwrap();
    }

    let stats = app.stats().fetch_stats(&student).await.unwrap();
    assert_eq!(stats.total_sessions, 4);
    assert_eq!(stats.recent_sessions.len(), 3);
    assert_eq!(stats.recent_sessions[0].correct, 0);
    assert_eq!(stats.recent_sessions[1].correct, 3);
    assert_eq!(stats.total_correct, 6);
    assert_eq!(stats.total_wrong, 6);
    assert_eq!(stats.accuracy, 50);
}

#[tokio::test]
async fn unknown_course_is_rejected() {
    let app = services();
    let err = app.quiz().start(&CourseId::new("history"), 0).unwrap_err();
    assert!(matches!(err, QuizError::UnknownCourse(id) if id == "history"));
}

struct DownLeaderboard;

#[async_trait]
impl LeaderboardRepository for DownLeaderboard {
    async fn add_entry(&self, _entry: &LeaderboardEntry) -> Result<(), StorageError> {
        Err(StorageError::Connection("remote store unreachable".into()))
    }

    async fn top_entries(&self, _limit: u32) -> Result<Vec<LeaderboardEntry>, StorageError> {
        Err(StorageError::Connection("remote store unreachable".into()))
    }
}

#[tokio::test]
async fn offline_scores_land_in_the_local_list() {
    let mut storage = Storage::in_memory();
    storage.leaderboard = Arc::new(DownLeaderboard);
    let app = AppServices::from_storage(&storage, fixed_clock(), StudentId::new("kid")).unwrap();
    let quiz = app.quiz();

    let mut run = quiz.start(&CourseId::new("fractions"), 0).unwrap();
    answer_all(&mut run, true);
    let report = quiz
        .complete(&mut run, app.student(), "Kid")
        .await
        .unwrap();
    assert_eq!(report.leaderboard, Some(Source::Local));

    let board = app.leaderboard().top(10).await.unwrap();
    assert_eq!(board.source, Source::Local);
    assert_eq!(board.entries[0].player_name, "Kid");
}

#[tokio::test]
async fn modals_resolve_in_enqueue_order() {
    let center = services().notifications();
    center.attach_host();

    let handles: Vec<_> = (0..4).map(|i| center.alert(format!("alert {i}"))).collect();
    let mut now = fixed_now();
    let mut shown = Vec::new();

    for _ in 0..handles.len() {
        let active = center.snapshot().active.unwrap();
        shown.push(active.request.message.clone());
        assert_eq!(center.snapshot().toasts.len(), 0);
        center.dismiss_at(active.id, Dismissal::Button(0), now).unwrap();
        now += chrono::Duration::milliseconds(300);
        center.poll_at(now);
    }

    assert_eq!(shown, ["alert 0", "alert 1", "alert 2", "alert 3"]);
    for handle in handles {
        assert!(handle.await);
    }
    assert!(center.snapshot().active.is_none());
}
