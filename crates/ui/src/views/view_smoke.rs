use std::sync::Arc;

use quest_core::model::{CareerStats, LeaderboardEntry, SessionSubmission, StudentId};
use quest_core::time::fixed_now;
use services::StatsGateway;
use storage::repository::{
    CareerStatsRepository, LeaderboardRepository, Storage, StorageError,
};

use super::test_harness::{ViewKind, setup_view_harness, setup_view_harness_with_storage};

#[tokio::test(flavor = "current_thread")]
async fn course_select_lists_builtin_courses() {
    let mut harness = setup_view_harness(ViewKind::CourseSelect);
    let html = harness.render_settled().await;
    assert!(html.contains("Fraction Kingdom"), "missing course in {html}");
    assert!(html.contains("Space Explorers"), "missing course in {html}");
    assert!(html.contains("Countdown to Launch"), "missing chapter in {html}");
    assert!(html.contains("Playing as ada"), "missing student in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn story_view_renders_paragraphs() {
    let mut harness = setup_view_harness(ViewKind::Story {
        course_id: "space".into(),
        chapter: 1,
    });
    let html = harness.render_settled().await;
    assert!(html.contains("Into Orbit"), "missing title in {html}");
    assert!(html.contains("star charts"), "missing story in {html}");
    assert!(html.contains("Start the challenge"), "missing cta in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn story_view_handles_unknown_course() {
    let mut harness = setup_view_harness(ViewKind::Story {
        course_id: "history".into(),
        chapter: 0,
    });
    let html = harness.render_settled().await;
    assert!(html.contains("does not exist"), "missing not-found in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_starts_with_full_timer() {
    let mut harness = setup_view_harness(ViewKind::Quiz {
        course_id: "fractions".into(),
        chapter: 0,
    });
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");
    assert!(html.contains("1:00"), "missing timer in {html}");
    assert!(html.contains("timer--normal"), "missing band in {html}");
    assert!(html.contains("Combo 0"), "missing combo in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn career_view_shows_empty_state() {
    let mut harness = setup_view_harness(ViewKind::Career);
    let html = harness.render_settled().await;
    assert!(html.contains("No adventures played yet"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn career_view_shows_totals_after_a_session() {
    let mut harness = setup_view_harness(ViewKind::Career);
    let submission = SessionSubmission {
        course_title: "Space Explorers".into(),
        points: 55,
        correct: 3,
        completed: true,
        ..SessionSubmission::new(Some("space"))
    };
    harness
        .app
        .stats()
        .submit_session(&StudentId::new("ada"), submission)
        .await
        .expect("submit session");

    let html = harness.render_settled().await;
    assert!(html.contains("1 sessions"), "missing totals in {html}");
    assert!(html.contains("Space Explorers"), "missing course row in {html}");
}

struct Offline;

#[async_trait::async_trait]
impl CareerStatsRepository for Offline {
    async fn get_stats(&self, _key: &str) -> Result<Option<CareerStats>, StorageError> {
        Err(StorageError::Connection("offline".into()))
    }

    async fn put_stats(&self, _key: &str, _stats: &CareerStats) -> Result<(), StorageError> {
        Err(StorageError::Connection("offline".into()))
    }
}

#[async_trait::async_trait]
impl LeaderboardRepository for Offline {
    async fn add_entry(&self, _entry: &LeaderboardEntry) -> Result<(), StorageError> {
        Err(StorageError::Status(503))
    }

    async fn top_entries(&self, _limit: u32) -> Result<Vec<LeaderboardEntry>, StorageError> {
        Err(StorageError::Status(503))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn career_view_renders_error_state() {
    let mut storage = Storage::in_memory();
    storage.career_stats = Arc::new(Offline);
    let mut harness = setup_view_harness_with_storage(ViewKind::Career, &storage);
    let html = harness.render_settled().await;
    assert!(html.contains("could not be loaded"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn leaderboard_view_marks_local_scores() {
    let mut storage = Storage::in_memory();
    storage.leaderboard = Arc::new(Offline);
    let mut harness = setup_view_harness_with_storage(ViewKind::Leaderboard, &storage);
    harness
        .app
        .leaderboard()
        .submit(LeaderboardEntry::new("Bo", 70, fixed_now()).with_course("space"))
        .await
        .expect("local fallback");

    let html = harness.render_settled().await;
    assert!(html.contains("Offline"), "missing notice in {html}");
    assert!(html.contains("Bo"), "missing player in {html}");
    assert!(html.contains("70"), "missing score in {html}");
}
