use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDate};
use eyre::eyre;
use pretty_assertions::assert_eq;
use studyspot_app::AppState;
use studyspot_app::auth::MockAuthenticator;
use studyspot_app::handlers::booking::submit_booking;
use studyspot_app::handlers::dashboard::{cancel_booking, dashboard};
use studyspot_core::availability::BookingRequest;
use studyspot_core::clock::FixedClock;
use studyspot_core::errors::BookingError;
use studyspot_core::models::{Booking, User};
use studyspot_db::SpaceCatalog;
use studyspot_db::mock::MockKvStore;
use studyspot_db::schema::CANCELLATIONS_KEY;

use crate::test_utils::{TestContext, at, day, other_user, start};

fn book(state: &mut AppState, user: &User, space_id: u32, date: NaiveDate, slot: &str) -> Booking {
    let request = BookingRequest {
        date: Some(date),
        slot: Some(slot.parse().unwrap()),
        notes: None,
    };
    submit_booking(state, user, space_id, &request).unwrap()
}

#[test_log::test]
fn bookings_split_into_current_and_past_as_time_moves() {
    let (mut ctx, user) = TestContext::new().signed_in();
    let morning = book(&mut ctx.state, &user, 1, day(2025, 6, 1), "12:00 PM - 4:00 PM");
    ctx.clock.advance(Duration::minutes(1));
    let tomorrow = book(&mut ctx.state, &user, 1, day(2025, 6, 2), "8:00 AM - 12:00 PM");
    ctx.clock.advance(Duration::minutes(1));
    let evening = book(&mut ctx.state, &user, 1, day(2025, 6, 1), "4:00 PM - 8:00 PM");

    let view = dashboard(&ctx.state, &user);
    assert_eq!(view.current, vec![evening.clone(), tomorrow.clone(), morning.clone()]);
    assert!(view.past.is_empty());

    ctx.clock.set(at(day(2025, 6, 1), 16, 0));
    let view = dashboard(&ctx.state, &user);
    assert_eq!(view.current, vec![evening.clone(), tomorrow.clone()]);
    assert_eq!(view.past, vec![morning.clone()]);

    ctx.clock.set(at(day(2025, 6, 2), 0, 30));
    let view = dashboard(&ctx.state, &user);
    assert_eq!(view.current, vec![tomorrow]);
    assert_eq!(view.past, vec![evening, morning]);
}

#[test]
fn night_owl_booking_is_current_until_the_day_ends() {
    let (mut ctx, user) = TestContext::starting_at(at(day(2025, 6, 1), 22, 30)).signed_in();
    let night = book(&mut ctx.state, &user, 5, day(2025, 6, 1), "Night Owl");

    ctx.clock.set(at(day(2025, 6, 1), 23, 59));
    assert_eq!(dashboard(&ctx.state, &user).current, vec![night.clone()]);

    ctx.clock.set(at(day(2025, 6, 2), 1, 0));
    assert_eq!(dashboard(&ctx.state, &user).past, vec![night]);
}

#[test]
fn dashboard_shows_only_the_users_own_bookings() {
    let (mut ctx, user) = TestContext::new().signed_in();
    book(&mut ctx.state, &other_user(), 3, day(2025, 6, 2), "7:00 AM - 12:00 PM");

    let view = dashboard(&ctx.state, &user);
    assert!(view.is_empty());
}

#[test_log::test]
fn cancelling_frees_the_slot_and_logs_the_booking() {
    let (mut ctx, user) = TestContext::new().signed_in();
    let booking = book(&mut ctx.state, &user, 3, day(2025, 6, 2), "7:00 AM - 12:00 PM");
    ctx.clock.advance(Duration::hours(2));

    let record = cancel_booking(&mut ctx.state, &user, booking.id)
        .unwrap()
        .expect("own booking");

    assert_eq!(record.booking, booking);
    assert_eq!(record.cancelled_at, at(day(2025, 6, 1), 12, 0));

    let view = dashboard(&ctx.state, &user);
    assert!(view.current.is_empty());
    assert_eq!(view.cancelled, vec![record]);

    let again = book(&mut ctx.state, &other_user(), 3, day(2025, 6, 2), "7:00 AM - 12:00 PM");
    assert_ne!(again.id, booking.id);

    let reopened = ctx.reopen();
    assert_eq!(reopened.cancellations.len(), 1);
    assert_eq!(reopened.bookings.len(), 1);
}

#[test]
fn cancelled_history_is_newest_first() {
    let (mut ctx, user) = TestContext::new().signed_in();
    let first = book(&mut ctx.state, &user, 1, day(2025, 6, 3), "8:00 AM - 12:00 PM");
    let second = book(&mut ctx.state, &user, 2, day(2025, 6, 3), "10:00 AM - 2:00 PM");

    cancel_booking(&mut ctx.state, &user, first.id).unwrap();
    ctx.clock.advance(Duration::minutes(5));
    cancel_booking(&mut ctx.state, &user, second.id).unwrap();

    let ids: Vec<_> = dashboard(&ctx.state, &user)
        .cancelled
        .iter()
        .map(|r| r.booking.id)
        .collect();
    assert_eq!(ids, vec![second.id, first.id]);
}

#[test]
fn nothing_happens_for_unknown_or_foreign_bookings() {
    let (mut ctx, user) = TestContext::new().signed_in();
    let theirs = book(&mut ctx.state, &other_user(), 4, day(2025, 6, 2), "1:00 PM - 5:00 PM");

    assert_eq!(cancel_booking(&mut ctx.state, &user, theirs.id).unwrap(), None);
    assert_eq!(cancel_booking(&mut ctx.state, &user, 12345).unwrap(), None);

    let mine = book(&mut ctx.state, &user, 4, day(2025, 6, 3), "1:00 PM - 5:00 PM");
    assert!(cancel_booking(&mut ctx.state, &user, mine.id).unwrap().is_some());
    assert_eq!(cancel_booking(&mut ctx.state, &user, mine.id).unwrap(), None);

    assert_eq!(ctx.state.bookings.len(), 1);
    assert_eq!(ctx.state.cancellations.len(), 1);
}

#[test]
fn booking_stays_active_when_the_cancellation_cannot_be_logged() {
    let saved: Arc<Mutex<HashMap<String, String>>> = Arc::default();
    let mut kv = MockKvStore::new();
    let reads = saved.clone();
    kv.expect_get()
        .returning(move |key| Ok(reads.lock().unwrap().get(key).cloned()));
    kv.expect_set().returning(move |key, value| {
        if key == CANCELLATIONS_KEY {
            return Err(eyre!("disk full"));
        }
        saved.lock().unwrap().insert(key.to_string(), value.to_string());
        Ok(())
    });
    let mut state = AppState::new(
        Arc::new(kv),
        Arc::new(FixedClock::new(start())),
        SpaceCatalog::builtin().unwrap(),
        MockAuthenticator::new("user", "123"),
    )
    .unwrap();
    let user = other_user();
    let booking = book(&mut state, &user, 1, day(2025, 6, 2), "8:00 AM - 12:00 PM");

    let err = cancel_booking(&mut state, &user, booking.id).unwrap_err();

    assert!(matches!(err, BookingError::Storage(_)));
    assert_eq!(state.bookings.get(booking.id), Some(&booking));
    assert!(state.cancellations.is_empty());
}
