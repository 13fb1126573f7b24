use std::sync::Arc;
use std::time::Duration;

use trackscore_insights::*;

fn service() -> Arc<AskService> {
    Arc::new(AskService::seeded(DEFAULT_LATENCY, 99))
}

// ---------------------------------------------------------------------------
// Ask service
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn answer_arrives_after_latency() {
    let service = service();
    let start = tokio::time::Instant::now();
    let answer = service
        .ask("reduce returns for T-Shirts", &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(answer.id, "2");
    assert!(start.elapsed() >= DEFAULT_LATENCY);
}

#[tokio::test(start_paused = true)]
async fn cancelled_ask_returns_cancelled() {
    let service = service();
    let token = CancellationToken::new();
    let pending = {
        let service = Arc::clone(&service);
        let token = token.clone();
        tokio::spawn(async move { service.ask("why so many returns", &token).await })
    };
    tokio::time::sleep(Duration::from_millis(500)).await;
    token.cancel();
    let result = pending.await.unwrap();
    assert!(matches!(result, Err(InsightError::Cancelled)));
}

#[tokio::test(start_paused = true)]
async fn empty_query_fails_without_waiting() {
    let service = service();
    let start = tokio::time::Instant::now();
    let result = service.ask("  ", &CancellationToken::new()).await;
    assert!(matches!(result, Err(InsightError::EmptyQuery)));
    assert_eq!(start.elapsed(), Duration::ZERO);
}

// ---------------------------------------------------------------------------
// Ask session
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn new_question_cancels_the_previous_one() {
    let session = Arc::new(AskSession::new(service()));
    let first = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit("what should i do today").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(session.has_pending());

    let second = session.submit("show profit trend").await.unwrap();
    assert_eq!(second.kind, ResponseKind::Graph);
    assert!(matches!(first.await.unwrap(), Err(InsightError::Cancelled)));
    assert!(!session.has_pending());
}

#[tokio::test(start_paused = true)]
async fn closing_the_session_cancels_pending() {
    let session = Arc::new(AskSession::new(service()));
    let pending = {
        let session = Arc::clone(&session);
        tokio::spawn(async move { session.submit("give me a roadmap").await })
    };
    tokio::time::sleep(Duration::from_millis(100)).await;
    session.close();
    assert!(matches!(pending.await.unwrap(), Err(InsightError::Cancelled)));
}

// ---------------------------------------------------------------------------
// Plan to playground
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn plan_answer_round_trips_through_the_playground() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local-storage.json");

    let answer = service()
        .ask("Implementation plan to reach 2 lakh profit", &CancellationToken::new())
        .await
        .unwrap();
    let goal = answer.plan.as_ref().unwrap().to_playground_goal();

    let mut repo = PlaygroundRepository::new(FileStore::new(&path));
    repo.save(&goal).unwrap();
    let stored = repo.store().get(PLAYGROUND_KEY).unwrap().unwrap();

    // A fresh store over the same file stands in for a page reload.
    let reloaded = PlaygroundRepository::new(FileStore::new(&path));
    let loaded = reloaded.load().unwrap().unwrap();
    assert_eq!(loaded, goal);
    assert_eq!(serde_json::to_string(&loaded).unwrap(), stored);
    assert_eq!(reloaded.store().get(PLAYGROUND_KEY).unwrap().unwrap(), stored);
}

#[test]
fn toggled_steps_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("local-storage.json");
    let goal = PlaygroundGoal {
        goal: "Cut RTO below 12%".into(),
        timeframe: "3 months".into(),
        steps: vec![
            PlanStep::new("Enable TrackScore", "Operations", "Threshold 75"),
            PlanStep::new("Prepaid nudges", "Payments", "UPI cashback"),
            PlanStep::new("Courier review", "Logistics", "Compare two partners"),
        ],
    };

    let mut repo = PlaygroundRepository::new(FileStore::new(&path));
    repo.save(&goal).unwrap();
    repo.toggle_step(0).unwrap();
    repo.toggle_step(2).unwrap();

    let loaded = PlaygroundRepository::new(FileStore::new(&path))
        .load()
        .unwrap()
        .unwrap();
    let done: Vec<bool> = loaded.steps.iter().map(|s| s.done).collect();
    assert_eq!(done, vec![true, false, true]);
    assert_eq!(loaded.progress_percent(), 67);
}
