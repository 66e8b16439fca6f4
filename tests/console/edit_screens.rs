use housing_console::{
    dashboard::Amenity,
    entities::Room,
    screens::{
        FacilityEditScreen, FormError, LoadOutcome, RecordForm, ResidentEditScreen,
        RoomEditScreen, SaveOutcome,
    },
};

use serde_json::json;

use super::support::{InMemoryStore, facility, ids, resident, room};

#[tokio::test]
async fn given_resident_room_outside_candidates_when_open_then_selector_keeps_assigned_room() {
    let store = InMemoryStore::new()
        .with_rooms(vec![Room::with_id(26756)])
        .with_residents(vec![resident(
            1,
            "ada@example.com",
            Some(Room::with_id(42674)),
        )])
        .shared();
    let mut screen = ResidentEditScreen::new(store);

    let outcome = screen.open(Some(1)).await;

    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(ids(screen.rooms()), vec![Some(42674), Some(26756)]);
    assert_eq!(screen.form().room, Some(Room::with_id(42674)));
}

#[tokio::test]
async fn given_resident_room_among_candidates_when_open_then_room_is_not_duplicated() {
    let store = InMemoryStore::new()
        .with_rooms(vec![room(26756, "A-1"), room(42674, "A-2")])
        .with_residents(vec![resident(
            1,
            "ada@example.com",
            Some(room(42674, "A-2")),
        )])
        .shared();
    let mut screen = ResidentEditScreen::new(store);

    screen.open(Some(1)).await;

    assert_eq!(ids(screen.rooms()), vec![Some(26756), Some(42674)]);
}

#[tokio::test]
async fn given_facility_holding_room_when_open_then_free_rooms_plus_own_room_are_offered() {
    let store = InMemoryStore::new()
        .with_rooms(vec![room(10, "A-10"), room(11, "A-11"), room(12, "A-12")])
        .with_facilities(vec![
            facility(5, &[Amenity::Wifi], Some(room(10, "A-10"))),
            facility(6, &[], Some(room(12, "A-12"))),
        ])
        .shared();
    let mut screen = FacilityEditScreen::new(store.clone());

    screen.open(Some(5)).await;

    assert_eq!(ids(screen.rooms()), vec![Some(10), Some(11)]);
    let call = store
        .calls("query_rooms")
        .pop()
        .expect("candidate query should be issued");
    assert_eq!(call.param("facilityId.specified"), Some("false"));
}

#[tokio::test]
async fn given_candidate_query_fails_when_open_then_selector_still_holds_assigned_room() {
    let store = InMemoryStore::new()
        .with_residents(vec![resident(1, "ada@example.com", Some(Room::with_id(7)))])
        .shared();
    store.fail("query_rooms");
    let mut screen = ResidentEditScreen::new(store);

    let outcome = screen.open(Some(1)).await;

    assert_eq!(outcome, LoadOutcome::Loaded);
    assert_eq!(ids(screen.rooms()), vec![Some(7)]);
}

#[tokio::test]
async fn given_missing_record_when_open_then_not_found_and_candidates_still_load() {
    let store = InMemoryStore::new()
        .with_rooms(vec![room(1, "A-1")])
        .shared();
    let mut screen = ResidentEditScreen::new(store);

    let outcome = screen.open(Some(99)).await;

    assert_eq!(outcome, LoadOutcome::NotFound);
    assert_eq!(ids(screen.rooms()), vec![Some(1)]);
    assert_eq!(screen.form().id, None);
}

#[tokio::test]
async fn given_new_resident_without_email_when_save_then_invalid_and_nothing_sent() {
    let store = InMemoryStore::new().with_rooms(vec![room(3, "C-3")]).shared();
    let mut screen = ResidentEditScreen::new(store.clone());
    screen.open(None).await;
    screen
        .form_mut()
        .set_field("firstname", "Ada")
        .expect("firstname should set");

    let outcome = screen.save().await;

    assert_eq!(
        outcome,
        SaveOutcome::Invalid(FormError::MissingRequired(vec!["email".to_string()]))
    );
    assert_eq!(store.call_count("create_resident"), 0);
    assert!(!screen.is_saving());
    assert_eq!(screen.form().firstname.as_deref(), Some("Ada"));
}

#[tokio::test]
async fn given_new_resident_with_selected_room_when_save_then_created_with_room() {
    let store = InMemoryStore::new().with_rooms(vec![room(3, "C-3")]).shared();
    let mut screen = ResidentEditScreen::new(store.clone());
    screen.open(None).await;
    screen
        .form_mut()
        .set_field("email", "ada@example.com")
        .expect("email should set");
    screen.select_room(Some(3)).expect("room 3 is a candidate");

    let outcome = screen.save().await;

    let SaveOutcome::Saved(saved) = outcome else {
        panic!("save should succeed: {outcome:?}");
    };
    assert!(saved.id.is_some());
    assert_eq!(saved.room, Some(room(3, "C-3")));
    assert_eq!(store.call_count("create_resident"), 1);
    assert_eq!(store.call_count("update_resident"), 0);
    assert_eq!(store.residents().len(), 1);
}

#[tokio::test]
async fn given_room_outside_selector_when_selected_then_rejected() {
    let store = InMemoryStore::new().with_rooms(vec![room(3, "C-3")]).shared();
    let mut screen = ResidentEditScreen::new(store);
    screen.open(None).await;

    let err = screen
        .select_room(Some(4))
        .expect_err("room 4 is not offered");

    assert!(matches!(err, FormError::InvalidValue { .. }));
    assert_eq!(screen.form().room, None);
}

#[tokio::test]
async fn given_existing_room_when_save_then_update_is_sent() {
    let store = InMemoryStore::new()
        .with_rooms(vec![room(8, "H-8")])
        .shared();
    let mut screen = RoomEditScreen::new(store.clone());
    assert_eq!(screen.load(8).await, LoadOutcome::Loaded);
    screen
        .form_mut()
        .set_field("floor", "2")
        .expect("floor should set");

    let outcome = screen.save().await;

    assert!(outcome.is_saved());
    assert_eq!(store.call_count("update_room"), 1);
    assert_eq!(store.call_count("create_room"), 0);
    assert_eq!(store.rooms()[0].floor, Some(2));
}

#[tokio::test]
async fn given_update_fails_when_save_then_form_keeps_entered_data() {
    let store = InMemoryStore::new()
        .with_rooms(vec![room(8, "H-8")])
        .shared();
    store.fail("update_room");
    let mut screen = RoomEditScreen::new(store.clone());
    screen.load(8).await;
    screen
        .form_mut()
        .set_field("roomno", "H-9")
        .expect("roomno should set");

    let outcome = screen.save().await;

    assert!(matches!(outcome, SaveOutcome::Failed(_)));
    assert!(!screen.is_saving());
    assert_eq!(screen.form().roomno.as_deref(), Some("H-9"));
    assert_eq!(store.rooms()[0].roomno.as_deref(), Some("H-8"));
}

#[tokio::test]
async fn given_new_facility_when_saved_without_changes_then_flags_are_false() {
    let store = InMemoryStore::new().shared();
    let mut screen = FacilityEditScreen::new(store.clone());
    screen.open(None).await;
    assert_eq!(screen.form().a_c, Some(false));

    let outcome = screen.save().await;

    let SaveOutcome::Saved(saved) = outcome else {
        panic!("facility save should succeed: {outcome:?}");
    };
    assert_eq!(
        (saved.a_c, saved.parking, saved.wifi),
        (Some(false), Some(false), Some(false))
    );
    assert_eq!(store.facilities().len(), 1);
}

#[tokio::test]
async fn given_bound_record_when_form_rebuilt_then_reconciliation_is_idempotent() {
    let store = InMemoryStore::new()
        .with_rooms(vec![room(2, "B-2")])
        .with_residents(vec![resident(1, "ada@example.com", Some(room(9, "Z-9")))])
        .shared();
    let mut screen = ResidentEditScreen::new(store);
    screen.open(Some(1)).await;
    let once = screen.rooms().to_vec();

    let bound = screen
        .form()
        .to_record()
        .expect("loaded resident should be valid");
    screen.update_form(&bound);
    screen.apply_room_candidates(vec![room(2, "B-2")]);

    assert_eq!(screen.rooms(), once.as_slice());
    assert_eq!(ids(&once), vec![Some(9), Some(2)]);
}

#[tokio::test]
async fn given_loaded_room_when_changes_saved_then_only_edited_fields_are_patched() {
    let stored = Room {
        floor: Some(1),
        r#type: Some("single".to_string()),
        ..room(8, "H-8")
    };
    let store = InMemoryStore::new().with_rooms(vec![stored]).shared();
    let mut screen = RoomEditScreen::new(store.clone());
    assert_eq!(screen.load(8).await, LoadOutcome::Loaded);
    screen
        .form_mut()
        .set_field("floor", "2")
        .expect("floor should set");

    let outcome = screen.save_changes().await;

    let SaveOutcome::Saved(saved) = outcome else {
        panic!("patch should succeed: {outcome:?}");
    };
    assert_eq!(saved.floor, Some(2));
    assert_eq!(saved.r#type.as_deref(), Some("single"));
    let patch = store
        .calls("partial_update_room")
        .pop()
        .expect("patch should be sent");
    assert_eq!(patch.body, Some(json!({ "id": 8, "floor": 2 })));
    assert_eq!(store.call_count("update_room"), 0);
    assert_eq!(store.rooms()[0].roomno.as_deref(), Some("H-8"));
}

#[tokio::test]
async fn given_resident_moved_when_changes_saved_then_patch_carries_new_room_only() {
    let store = InMemoryStore::new()
        .with_rooms(vec![room(1, "A-1"), room(2, "A-2")])
        .with_residents(vec![resident(7, "ada@example.com", Some(room(1, "A-1")))])
        .shared();
    let mut screen = ResidentEditScreen::new(store.clone());
    screen.open(Some(7)).await;
    screen.select_room(Some(2)).expect("room 2 is a candidate");

    let outcome = screen.save_changes().await;

    assert!(outcome.is_saved());
    let patch = store
        .calls("partial_update_resident")
        .pop()
        .expect("patch should be sent");
    assert_eq!(
        patch.body,
        Some(json!({ "id": 7, "room": { "id": 2, "roomno": "A-2" } }))
    );
    let stored = &store.residents()[0];
    assert_eq!(stored.email.as_deref(), Some("ada@example.com"));
    assert_eq!(stored.room.as_ref().and_then(|room| room.id), Some(2));
}

#[tokio::test]
async fn given_new_room_when_changes_saved_then_full_create_is_sent() {
    let store = InMemoryStore::new().shared();
    let mut screen = RoomEditScreen::new(store.clone());
    screen
        .form_mut()
        .set_field("roomno", "K-1")
        .expect("roomno should set");

    let outcome = screen.save_changes().await;

    assert!(outcome.is_saved());
    assert_eq!(store.call_count("create_room"), 1);
    assert_eq!(store.call_count("partial_update_room"), 0);
}

#[tokio::test]
async fn given_patch_fails_when_changes_saved_then_form_keeps_entered_data() {
    let store = InMemoryStore::new()
        .with_facilities(vec![facility(5, &[], Some(room(10, "A-10")))])
        .shared();
    store.fail("partial_update_facility");
    let mut screen = FacilityEditScreen::new(store.clone());
    screen.open(Some(5)).await;
    screen
        .form_mut()
        .set_field("wifi", "true")
        .expect("wifi should set");

    let outcome = screen.save_changes().await;

    assert!(matches!(outcome, SaveOutcome::Failed(_)));
    assert!(!screen.is_saving());
    assert_eq!(screen.form().wifi, Some(true));
    assert_eq!(store.facilities()[0].wifi, Some(false));
}
