use housing_console::{
    dashboard::Amenity,
    entities::{Facility, Resident, Room},
    screens::{DeleteOutcome, DetailScreen, ListScreen, LoadOutcome},
};

use super::support::{InMemoryStore, facility, ids, resident, room};

fn building() -> InMemoryStore {
    InMemoryStore::new()
        .with_rooms(vec![room(1, "A-1"), room(2, "A-2")])
        .with_residents(vec![
            resident(10, "ada@example.com", Some(room(1, "A-1"))),
            resident(11, "bob@example.com", Some(room(2, "A-2"))),
            resident(12, "cy@example.com", Some(room(1, "A-1"))),
        ])
        .with_facilities(vec![facility(20, &[Amenity::Wifi], Some(room(1, "A-1")))])
}

#[tokio::test]
async fn given_rooms_when_list_loads_then_records_and_total_are_shown() {
    let store = building().shared();
    let mut screen = ListScreen::<Room>::new(store);

    let outcome = screen.load().await;

    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(ids(screen.records()), vec![Some(1), Some(2)]);
    assert_eq!(screen.total_count(), Some(2));
    assert!(!screen.is_loading());
}

#[tokio::test]
async fn given_room_id_when_resident_list_loads_then_only_its_residents_are_shown() {
    let store = building().shared();
    let mut screen = ListScreen::<Resident>::residents(store.clone(), Some(1));

    screen.load().await;

    assert_eq!(ids(screen.records()), vec![Some(10), Some(12)]);
    let call = store
        .calls("query_residents")
        .pop()
        .expect("resident query should be issued");
    assert_eq!(call.param("roomId.equals"), Some("1"));
}

#[tokio::test]
async fn given_loaded_list_when_reload_fails_then_previous_records_stay() {
    let store = building().shared();
    let mut screen = ListScreen::<Facility>::new(store.clone());
    screen.load().await;

    store.fail("query_facilities");
    let outcome = screen.load().await;

    assert_eq!(outcome, LoadOutcome::Failed);
    assert_eq!(ids(screen.records()), vec![Some(20)]);
    assert!(!screen.is_loading());

    store.recover("query_facilities");
    assert_eq!(screen.load().await, LoadOutcome::Loaded);
}

#[tokio::test]
async fn given_room_with_residents_and_facility_when_deleted_then_no_cascade_is_attempted() {
    let store = building().shared();
    let mut screen = ListScreen::<Room>::new(store.clone());
    screen.load().await;

    let outcome = screen.delete(room(1, "A-1")).await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(ids(screen.records()), vec![Some(2)]);
    assert_eq!(store.call_count("delete_room"), 1);
    assert_eq!(store.call_count("delete_resident"), 0);
    assert_eq!(store.call_count("delete_facility"), 0);
    assert_eq!(store.call_count("update_resident"), 0);
    assert_eq!(store.call_count("update_facility"), 0);
    assert_eq!(store.residents().len(), 3);
    assert_eq!(store.facilities().len(), 1);
}

#[tokio::test]
async fn given_room_filtered_residents_when_one_is_deleted_then_reload_keeps_filter() {
    let store = building().shared();
    let mut screen = ListScreen::<Resident>::residents(store.clone(), Some(1));
    screen.load().await;

    let outcome = screen
        .delete(resident(10, "ada@example.com", Some(room(1, "A-1"))))
        .await;

    assert_eq!(outcome, DeleteOutcome::Deleted);
    assert_eq!(ids(screen.records()), vec![Some(12)]);
    let reload = store
        .calls("query_residents")
        .pop()
        .expect("list should reload");
    assert_eq!(reload.param("roomId.equals"), Some("1"));
}

#[tokio::test]
async fn given_delete_dialog_when_cancelled_then_nothing_is_deleted() {
    let store = building().shared();
    let screen = ListScreen::<Facility>::new(store.clone());
    let mut dialog = screen.delete_dialog(Facility::with_id(20));

    assert_eq!(dialog.cancel(), DeleteOutcome::Dismissed);
    assert_eq!(dialog.confirm_delete().await, DeleteOutcome::Dismissed);
    assert_eq!(store.call_count("delete_facility"), 0);
}

#[tokio::test]
async fn given_delete_fails_when_confirmed_then_list_is_unchanged() {
    let store = building().shared();
    store.fail("delete_resident");
    let mut screen = ListScreen::<Resident>::new(store.clone());
    screen.load().await;

    let outcome = screen.delete(Resident::with_id(11)).await;

    assert!(matches!(outcome, DeleteOutcome::Failed(_)));
    assert_eq!(screen.records().len(), 3);
    assert_eq!(store.call_count("query_residents"), 1);
}

#[tokio::test]
async fn given_unsaved_record_when_delete_confirmed_then_request_is_rejected_locally() {
    let store = building().shared();
    let screen = ListScreen::<Room>::new(store.clone());
    let mut dialog = screen.delete_dialog(Room::new());

    let outcome = dialog.confirm_delete().await;

    assert!(matches!(outcome, DeleteOutcome::Failed(_)));
    assert_eq!(store.call_count("delete_room"), 0);
}

#[tokio::test]
async fn given_record_id_when_detail_loads_then_record_or_not_found_is_reported() {
    let store = building().shared();
    let mut screen = DetailScreen::<Resident>::new(store);

    assert_eq!(screen.load(11).await, LoadOutcome::Loaded);
    assert_eq!(
        screen.record().and_then(|resident| resident.email.as_deref()),
        Some("bob@example.com")
    );
    assert_eq!(screen.load(404).await, LoadOutcome::NotFound);
}

#[tokio::test]
async fn given_server_without_total_header_when_list_loads_then_count_fills_total() {
    let store = building().without_total_count().shared();
    let mut screen = ListScreen::<Resident>::residents(store.clone(), Some(1));

    let outcome = screen.load().await;

    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(ids(screen.records()), vec![Some(10), Some(12)]);
    assert_eq!(screen.total_count(), Some(2));
    let count = store
        .calls("count_residents")
        .pop()
        .expect("count should be requested");
    assert_eq!(count.param("roomId.equals"), Some("1"));
}

#[tokio::test]
async fn given_server_with_total_header_when_list_loads_then_count_is_not_requested() {
    let store = building().shared();
    let mut screen = ListScreen::<Facility>::new(store.clone());

    screen.load().await;

    assert_eq!(screen.total_count(), Some(1));
    assert_eq!(store.call_count("count_facilities"), 0);
}

#[tokio::test]
async fn given_count_fails_when_list_loads_then_records_show_without_total() {
    let store = building().without_total_count().shared();
    store.fail("count_rooms");
    let mut screen = ListScreen::<Room>::new(store.clone());

    let outcome = screen.load().await;

    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(ids(screen.records()), vec![Some(1), Some(2)]);
    assert_eq!(screen.total_count(), None);
    assert!(!screen.is_loading());
}
