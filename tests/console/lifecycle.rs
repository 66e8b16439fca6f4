use std::time::Duration;

use housing_console::{
    dashboard::{Amenity, Dashboard},
    entities::{Resident, Room},
    screens::{DisposeHandle, ListScreen, LoadOutcome, ResidentEditScreen, SaveOutcome},
};
use tokio::sync::Notify;

use super::support::{InMemoryStore, facility, resident, room};

/// Disposes the screen while its request is parked on `gate`, then lets the
/// request finish.
fn dispose_then_release(handle: DisposeHandle, gate: std::sync::Arc<Notify>) {
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.dispose();
        gate.notify_one();
    });
}

#[tokio::test]
async fn given_disposed_edit_screen_when_record_arrives_late_then_it_is_not_applied() {
    let store = InMemoryStore::new()
        .with_rooms(vec![Room::with_id(26756)])
        .with_residents(vec![resident(1, "ada@example.com", Some(Room::with_id(42674)))])
        .shared();
    let gate = store.hold("find_resident");
    let mut screen = ResidentEditScreen::new(store.clone());
    dispose_then_release(screen.dispose_handle(), gate);

    let outcome = screen.open(Some(1)).await;

    assert_eq!(outcome, LoadOutcome::Discarded);
    assert_eq!(screen.form().id, None);
    assert!(screen.rooms().is_empty());
}

#[tokio::test]
async fn given_disposed_list_when_query_arrives_late_then_records_stay_empty() {
    let store = InMemoryStore::new()
        .with_rooms(vec![room(1, "A-1")])
        .shared();
    let gate = store.hold("query_rooms");
    let mut screen = ListScreen::<Room>::new(store);
    dispose_then_release(screen.dispose_handle(), gate);

    let outcome = screen.load().await;

    assert_eq!(outcome, LoadOutcome::Discarded);
    assert!(screen.records().is_empty());
}

#[tokio::test]
async fn given_disposed_dashboard_when_facilities_arrive_late_then_rooms_are_unchanged() {
    let store = InMemoryStore::new()
        .with_rooms(vec![room(1, "A-1"), room(2, "A-2")])
        .with_facilities(vec![facility(5, &[Amenity::Wifi], Some(room(2, "A-2")))])
        .shared();
    let mut dashboard = Dashboard::new(store.clone());
    dashboard.load().await;
    let gate = store.hold("query_facilities");
    dispose_then_release(dashboard.dispose_handle(), gate);

    let outcome = dashboard.apply_filter(Some("wifi")).await;

    assert_eq!(outcome, LoadOutcome::Discarded);
    assert_eq!(dashboard.rooms().len(), 2);
}

#[tokio::test]
async fn given_disposed_screen_when_load_requested_then_store_is_not_reached() {
    let store = InMemoryStore::new().shared();
    let mut screen = ListScreen::<Resident>::new(store.clone());
    screen.dispose();

    assert_eq!(screen.load().await, LoadOutcome::Discarded);
    assert_eq!(store.call_count("query_residents"), 0);
}

#[tokio::test]
async fn given_disposed_edit_screen_when_save_resolves_late_then_outcome_is_discarded() {
    let store = InMemoryStore::new().shared();
    let gate = store.hold("create_resident");
    let mut screen = ResidentEditScreen::new(store.clone());
    screen.form_mut().email = Some("ada@example.com".to_string());
    dispose_then_release(screen.dispose_handle(), gate);

    let outcome = screen.save().await;

    assert_eq!(outcome, SaveOutcome::Discarded);
    assert!(!screen.is_saving());
}
