use chrono::Duration;
use quest_core::model::{CareerStats, LeaderboardEntry, SessionSubmission};
use quest_core::time::fixed_now;
use storage::local::{load_local_leaderboard, push_local_leaderboard};
use storage::repository::{CareerStatsRepository, LeaderboardRepository, LocalStore, Storage};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo
}

#[tokio::test]
async fn sqlite_career_document_round_trip() {
    let repo = connect("memdb_stats").await;
    assert!(repo.get_stats("ada").await.unwrap().is_none());

    let mut stats = CareerStats::default();
    let submission = SessionSubmission {
        points: 40,
        correct: 4,
        wrong: 1,
        completed: true,
        ..SessionSubmission::new(Some("fractions"))
    };
    stats.accumulate(&submission, fixed_now());
    repo.put_stats("ada", &stats).await.unwrap();

    stats.accumulate(&submission, fixed_now() + Duration::minutes(5));
    repo.put_stats("ada", &stats).await.unwrap();

    let fetched = repo.get_stats("ada").await.unwrap().expect("document");
    assert_eq!(fetched, stats);
    assert_eq!(fetched.total_sessions, 2);
    assert_eq!(fetched.recent_sessions.len(), 2);
}

#[tokio::test]
async fn sqlite_leaderboard_orders_by_score_then_time() {
    let repo = connect("memdb_leaderboard").await;
    let now = fixed_now();
    repo.add_entry(&LeaderboardEntry::new("late", 70, now + Duration::seconds(9)))
        .await
        .unwrap();
    repo.add_entry(&LeaderboardEntry::new("early", 70, now))
        .await
        .unwrap();
    repo.add_entry(
        &LeaderboardEntry::new("top", 95, now)
            .with_course("science")
            .with_accuracy(90),
    )
    .await
    .unwrap();

    let top = repo.top_entries(2).await.unwrap();
    let names: Vec<&str> = top.iter().map(|e| e.player_name.as_str()).collect();
    assert_eq!(names, vec!["top", "early"]);
    assert_eq!(top[0].course_topic, "science");
    assert_eq!(top[0].accuracy, 90);
}

#[tokio::test]
async fn sqlite_local_items_back_the_fallback_list() {
    let repo = connect("memdb_local").await;
    repo.set_item("k", "one").await.unwrap();
    repo.set_item("k", "two").await.unwrap();
    assert_eq!(repo.get_item("k").await.unwrap().as_deref(), Some("two"));
    repo.remove_item("k").await.unwrap();
    assert!(repo.get_item("k").await.unwrap().is_none());

    push_local_leaderboard(&repo, LeaderboardEntry::new("a", 10, fixed_now()))
        .await
        .unwrap();
    push_local_leaderboard(&repo, LeaderboardEntry::new("b", 30, fixed_now()))
        .await
        .unwrap();
    let entries = load_local_leaderboard(&repo).await.unwrap();
    assert_eq!(entries[0].player_name, "b");
}

#[tokio::test]
async fn storage_sqlite_wires_all_repositories() {
    let storage = Storage::sqlite("sqlite:file:memdb_storage?mode=memory&cache=shared")
        .await
        .expect("storage");
    storage
        .career_stats
        .put_stats("kid", &CareerStats::default())
        .await
        .unwrap();
    assert!(storage.career_stats.get_stats("kid").await.unwrap().is_some());
    storage.local.set_item("x", "y").await.unwrap();
    assert!(storage.leaderboard.top_entries(5).await.unwrap().is_empty());
}
