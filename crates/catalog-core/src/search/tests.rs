use super::*;
use crate::testing::{ids, items, FakeCatalog};

const DEBOUNCE: Duration = Duration::from_millis(500);

fn controller(api: &Arc<FakeCatalog>) -> SearchController {
    SearchController::new(api.clone(), DEBOUNCE, 50)
}

async fn pause(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

#[tokio::test(start_paused = true)]
async fn test_typing_burst_issues_one_request() {
    let api = Arc::new(FakeCatalog::new().with_search("ani", items([7, 8]), Duration::ZERO));
    let search = controller(&api);

    search.input("a");
    pause(100).await;
    search.input("an");
    pause(100).await;
    search.input("ani");

    let snapshot = search.settled().await;
    assert_eq!(snapshot.status, SearchStatus::Settled);
    assert_eq!(snapshot.query, "ani");
    assert_eq!(ids(&snapshot.results), vec![7, 8]);
    assert_eq!(api.calls(), vec!["search:ani"]);
}

#[tokio::test(start_paused = true)]
async fn test_nothing_sent_before_quiet_period() {
    let api = Arc::new(FakeCatalog::new());
    let search = controller(&api);

    search.input("naruto");
    assert_eq!(search.snapshot().status, SearchStatus::Pending);
    pause(499).await;
    assert!(api.calls().is_empty());

    search.settled().await;
    assert_eq!(api.calls(), vec!["search:naruto"]);
}

#[tokio::test(start_paused = true)]
async fn test_blank_query_clears_without_request() {
    let api = Arc::new(FakeCatalog::new().with_search("naruto", items([1]), Duration::ZERO));
    let search = controller(&api);

    search.input("naruto");
    assert_eq!(search.settled().await.results.len(), 1);

    search.input("   ");
    let snapshot = search.settled().await;
    assert_eq!(snapshot.status, SearchStatus::Idle);
    assert!(snapshot.results.is_empty());
    assert_eq!(api.call_count("search:"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failure_clears_results_and_reports_error() {
    let api = Arc::new(FakeCatalog::new().with_search("naruto", items([1, 2]), Duration::ZERO));
    api.fail("search:boom");
    let search = controller(&api);

    search.input("naruto");
    search.settled().await;

    search.input("boom");
    let snapshot = search.settled().await;
    assert_eq!(snapshot.status, SearchStatus::Error);
    assert!(snapshot.results.is_empty());
    assert!(snapshot.error.is_some_and(|e| e.contains("503")));
}

#[tokio::test(start_paused = true)]
async fn test_slow_superseded_response_is_discarded() {
    let api = Arc::new(
        FakeCatalog::new()
            .with_search("slow", items([1]), Duration::from_millis(1000))
            .with_search("fast", items([2]), Duration::ZERO),
    );
    let search = controller(&api);

    search.input("slow");
    pause(600).await;
    assert_eq!(search.snapshot().status, SearchStatus::InFlight);

    search.input("fast");
    let snapshot = search.settled().await;
    assert_eq!(ids(&snapshot.results), vec![2]);

    // let the slow request finish
    pause(2000).await;
    let snapshot = search.snapshot();
    assert_eq!(snapshot.query, "fast");
    assert_eq!(ids(&snapshot.results), vec![2]);
    assert_eq!(api.calls(), vec!["search:slow", "search:fast"]);
}

#[tokio::test(start_paused = true)]
async fn test_repeated_input_is_ignored() {
    let api = Arc::new(FakeCatalog::new().with_search("bebop", items([3]), Duration::ZERO));
    let search = controller(&api);

    search.input("bebop");
    search.settled().await;
    search.input("bebop");
    assert_eq!(search.snapshot().status, SearchStatus::Settled);
    pause(1000).await;
    assert_eq!(api.call_count("search:"), 1);
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_transitions() {
    let api = Arc::new(FakeCatalog::new().with_search("eva", items([4]), Duration::from_millis(50)));
    let search = controller(&api);
    let mut updates = search.subscribe();

    search.input("eva");
    assert_eq!(updates.borrow_and_update().status, SearchStatus::Pending);

    updates.changed().await.unwrap();
    assert_eq!(updates.borrow_and_update().status, SearchStatus::InFlight);

    updates.changed().await.unwrap();
    let settled = updates.borrow_and_update().clone();
    assert_eq!(settled.status, SearchStatus::Settled);
    assert_eq!(ids(&settled.results), vec![4]);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_pending_timer() {
    let api = Arc::new(FakeCatalog::new());
    let search = controller(&api);

    search.input("lain");
    drop(search);
    pause(1000).await;
    assert!(api.calls().is_empty());
}
