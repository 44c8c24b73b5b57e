use std::sync::Arc;

use chrono::NaiveDate;
use eyre::eyre;
use pretty_assertions::assert_eq;
use rstest::rstest;
use studyspot_app::AppState;
use studyspot_app::auth::MockAuthenticator;
use studyspot_app::handlers::booking::submit_booking;
use studyspot_core::availability::{BookingRequest, SlotSelection};
use studyspot_core::clock::FixedClock;
use studyspot_core::errors::{BookingError, ValidationError};
use studyspot_db::SpaceCatalog;
use studyspot_db::mock::MockKvStore;

use crate::test_utils::{TestContext, at, day, other_user, start};

const NIGHT_OWL: &str = "Night Owl";

fn request(date: Option<NaiveDate>, slot: Option<&str>) -> BookingRequest {
    BookingRequest {
        date,
        slot: slot.map(|s| s.parse().unwrap()),
        notes: None,
    }
}

#[test_log::test]
fn booking_snapshots_the_space_and_survives_a_restart() {
    let (mut ctx, user) = TestContext::new().signed_in();
    let req = BookingRequest {
        notes: Some("Window seat please".to_string()),
        ..request(Some(day(2025, 6, 2)), Some("1:00 PM - 6:00 PM"))
    };

    let booking = submit_booking(&mut ctx.state, &user, 3, &req).unwrap();

    assert_eq!(booking.user_id, user.id);
    assert_eq!(booking.user_name, "User");
    assert_eq!(booking.space_name, "Summit Co-Work Hub");
    assert_eq!(booking.space_location, "BGC, Taguig");
    assert_eq!(booking.price, 1500.0);
    assert_eq!(booking.date, day(2025, 6, 2));
    assert_eq!(booking.time_slot, "1:00 PM - 6:00 PM");
    assert_eq!(booking.notes.as_deref(), Some("Window seat please"));
    assert_eq!(booking.created_at, start());

    let reopened = ctx.reopen();
    assert_eq!(reopened.bookings.get(booking.id), Some(&booking));
}

#[test]
fn slot_can_be_picked_by_position() {
    let (mut ctx, user) = TestContext::new().signed_in();

    let booking = submit_booking(&mut ctx.state, &user, 5, &request(Some(day(2025, 6, 1)), Some("2")))
        .unwrap();

    assert_eq!(booking.time_slot, NIGHT_OWL);
}

#[test]
fn blank_notes_are_dropped() {
    let (mut ctx, user) = TestContext::new().signed_in();
    let req = BookingRequest {
        notes: Some("   ".to_string()),
        ..request(Some(day(2025, 6, 1)), Some(NIGHT_OWL))
    };

    let booking = submit_booking(&mut ctx.state, &user, 5, &req).unwrap();
    assert_eq!(booking.notes, None);
}

#[rstest]
#[case(None, None, ValidationError::MissingDate)]
#[case(None, Some(NIGHT_OWL), ValidationError::MissingDate)]
#[case(Some(day(2025, 5, 31)), None, ValidationError::PastDate)]
#[case(Some(day(2025, 5, 31)), Some(NIGHT_OWL), ValidationError::PastDate)]
#[case(Some(day(2025, 6, 1)), None, ValidationError::MissingSlot)]
#[case(Some(day(2025, 6, 1)), Some("Lunch"), ValidationError::InvalidSlot)]
#[case(Some(day(2025, 6, 1)), Some("3"), ValidationError::InvalidSlot)]
#[case(Some(day(2025, 6, 1)), Some("0"), ValidationError::SlotPast)]
fn rejected_requests_leave_nothing_behind(
    #[case] date: Option<NaiveDate>,
    #[case] slot: Option<&str>,
    #[case] expected: ValidationError,
) {
    let (mut ctx, user) = TestContext::starting_at(at(day(2025, 6, 1), 12, 30)).signed_in();

    let err = submit_booking(&mut ctx.state, &user, 5, &request(date, slot)).unwrap_err();

    assert!(matches!(err, BookingError::Validation(ref v) if *v == expected));
    assert!(err.is_user_error());
    assert!(ctx.state.bookings.is_empty());
}

#[test]
fn taken_slot_is_refused_for_everyone() {
    let (mut ctx, user) = TestContext::new().signed_in();
    let req = request(Some(day(2025, 6, 3)), Some("9:00 AM - 1:00 PM"));
    submit_booking(&mut ctx.state, &other_user(), 4, &req).unwrap();

    let err = submit_booking(&mut ctx.state, &user, 4, &req).unwrap_err();
    assert_eq!(
        err.to_string(),
        "This time slot is already booked for the selected date"
    );

    let same_slot_next_day = request(Some(day(2025, 6, 4)), Some("9:00 AM - 1:00 PM"));
    assert!(submit_booking(&mut ctx.state, &user, 4, &same_slot_next_day).is_ok());
}

#[test]
fn unknown_space_is_not_bookable() {
    let (mut ctx, user) = TestContext::new().signed_in();

    let err = submit_booking(&mut ctx.state, &user, 42, &request(Some(day(2025, 6, 2)), Some("0")))
        .unwrap_err();
    assert!(matches!(err, BookingError::SpaceNotFound(42)));
}

#[test]
fn night_owl_closes_at_two_but_yesterday_is_still_yesterday() {
    let (mut ctx, user) = TestContext::starting_at(at(day(2025, 6, 1), 23, 30)).signed_in();
    assert!(submit_booking(&mut ctx.state, &user, 5, &request(Some(day(2025, 6, 1)), Some(NIGHT_OWL))).is_ok());

    ctx.clock.set(at(day(2025, 6, 2), 1, 0));
    let err = submit_booking(&mut ctx.state, &user, 5, &request(Some(day(2025, 6, 1)), Some(NIGHT_OWL)))
        .unwrap_err();
    assert_eq!(err.to_string(), "Cannot book a date in the past");
}

#[test]
fn slot_ending_at_midnight_stays_open_all_evening() {
    let (mut ctx, user) = TestContext::starting_at(at(day(2025, 6, 1), 23, 59)).signed_in();

    let booking = submit_booking(
        &mut ctx.state,
        &user,
        2,
        &request(Some(day(2025, 6, 1)), Some("6:00 PM - 12:00 AM")),
    );
    assert!(booking.is_ok());
}

#[test]
fn failed_save_is_reported_and_not_kept() {
    let mut kv = MockKvStore::new();
    kv.expect_get().returning(|_| Ok(None));
    kv.expect_set().returning(|_, _| Err(eyre!("disk full")));
    let mut state = AppState::new(
        Arc::new(kv),
        Arc::new(FixedClock::new(start())),
        SpaceCatalog::builtin().unwrap(),
        MockAuthenticator::new("user", "123"),
    )
    .unwrap();

    let err = submit_booking(
        &mut state,
        &other_user(),
        1,
        &request(Some(day(2025, 6, 2)), Some("0")),
    )
    .unwrap_err();

    assert!(matches!(err, BookingError::Storage(_)));
    assert!(!err.is_user_error());
    assert!(state.bookings.is_empty());
}
