use super::*;

fn connected() -> SessionState {
    SessionState::default().apply(SessionEvent::Connected)
}

// =============================================================
// Reducer
// =============================================================

#[test]
fn initial_state_is_all_false_and_zero() {
    let state = SessionState::default();
    assert!(!state.wallet_connected);
    assert!(!state.joined_whitelist);
    assert!(!state.loading);
    assert_eq!(state.whitelisted_count, 0);
    assert_eq!(state.max_whitelisted, None);
}

#[test]
fn connected_only_sets_wallet_flag() {
    let state = connected();
    assert_eq!(state, SessionState { wallet_connected: true, ..SessionState::default() });
}

#[test]
fn membership_is_monotonic() {
    let state = connected().apply(SessionEvent::MembershipChecked(true));
    assert!(state.joined_whitelist);
    let state = state.apply(SessionEvent::MembershipChecked(false));
    assert!(state.joined_whitelist);
}

#[test]
fn negative_membership_check_keeps_false() {
    let state = connected().apply(SessionEvent::MembershipChecked(false));
    assert!(!state.joined_whitelist);
}

#[test]
fn count_is_replaced_by_latest_read() {
    let state = connected()
        .apply(SessionEvent::CountRefreshed(41))
        .apply(SessionEvent::CountRefreshed(42));
    assert_eq!(state.whitelisted_count, 42);
}

#[test]
fn join_lifecycle_toggles_loading() {
    let submitted = connected().apply(SessionEvent::JoinSubmitted);
    assert!(submitted.loading);
    assert!(!submitted.apply(SessionEvent::JoinConfirmed).loading);
    assert!(!submitted.apply(SessionEvent::JoinFailed).loading);
}

#[test]
fn join_failure_leaves_membership_untouched() {
    let state = connected()
        .apply(SessionEvent::JoinSubmitted)
        .apply(SessionEvent::JoinFailed);
    assert!(!state.joined_whitelist);
    assert!(state.wallet_connected);
}

#[test]
fn capacity_is_recorded() {
    let state = connected().apply(SessionEvent::CapacityRefreshed(100));
    assert_eq!(state.max_whitelisted, Some(100));
}

// =============================================================
// Affordance
// =============================================================

#[test]
fn affordance_is_total_over_the_three_flags() {
    for connected in [false, true] {
        for joined in [false, true] {
            for loading in [false, true] {
                let state = SessionState {
                    wallet_connected: connected,
                    joined_whitelist: joined,
                    loading,
                    ..SessionState::default()
                };
                let expected = match (connected, joined, loading) {
                    (false, _, _) => Affordance::Connect,
                    (true, true, _) => Affordance::Joined,
                    (true, false, true) => Affordance::Loading,
                    (true, false, false) => Affordance::Join,
                };
                assert_eq!(state.affordance(), expected, "{state:?}");
            }
        }
    }
}

#[test]
fn affordance_ignores_count() {
    let a = SessionState { whitelisted_count: 0, ..connected() };
    let b = SessionState { whitelisted_count: 99, ..connected() };
    assert_eq!(a.affordance(), b.affordance());
}

#[test]
fn affordance_labels_match_page_copy() {
    assert_eq!(Affordance::Connect.label(), "Connect your wallet");
    assert_eq!(Affordance::Joined.label(), "Thanks for joining the Whitelist!");
    assert_eq!(Affordance::Loading.label(), "Loading...");
    assert_eq!(Affordance::Join.label(), "Join the Whitelist");
}

#[test]
fn count_label_without_capacity() {
    let state = SessionState { whitelisted_count: 41, ..SessionState::default() };
    assert_eq!(state.count_label(), "41 have already joined the whitelist");
}

#[test]
fn count_label_with_capacity() {
    let state = SessionState { whitelisted_count: 41, max_whitelisted: Some(50), ..SessionState::default() };
    assert_eq!(state.count_label(), "41 have already joined the whitelist (50 spots total)");
}

// =============================================================
// InFlight
// =============================================================

#[test]
fn in_flight_rejects_duplicate_begin() {
    let mut flight = InFlight::default();
    assert!(flight.begin(Operation::Join));
    assert!(!flight.begin(Operation::Join));
    flight.end(Operation::Join);
    assert!(flight.begin(Operation::Join));
}

#[test]
fn in_flight_tracks_operations_independently() {
    let mut flight = InFlight::default();
    assert!(flight.begin(Operation::CheckMembership));
    assert!(flight.begin(Operation::RefreshCount));
    assert!(flight.contains(Operation::CheckMembership));
    assert!(!flight.contains(Operation::Join));
    flight.end(Operation::CheckMembership);
    flight.end(Operation::RefreshCount);
    assert!(flight.is_idle());
}

#[test]
fn operation_names_are_human_readable() {
    assert_eq!(Operation::CheckMembership.to_string(), "membership check");
    assert_eq!(Operation::Join.to_string(), "join");
}
