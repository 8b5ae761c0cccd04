use slicestore::features::users::{User, UserAction, UserReducer, UserState};
use slicestore::store::Reducer;

fn admin() -> User {
    User {
        id: 1,
        user_name: "admin".to_string(),
        is_admin: true,
    }
}

#[test]
fn initial_state_shows_user_name_and_nobody_signed_in() {
    let state = UserState::default();
    assert!(!state.mask_user_name);
    assert_eq!(state.current_user, None);
}

#[test]
fn toggle_mask_flips_only_the_flag() {
    let state = UserState {
        current_user: Some(admin()),
        ..UserState::default()
    };

    let next = UserReducer
        .reduce(&state, &UserAction::ToggleMaskUserName)
        .unwrap();

    assert!(next.mask_user_name);
    assert_eq!(next.current_user, Some(admin()));
}

#[test]
fn toggle_mask_twice_restores_the_state() {
    let initial = UserState::default();
    let once = UserReducer
        .reduce(&initial, &UserAction::ToggleMaskUserName)
        .unwrap();
    let twice = UserReducer
        .reduce(&once, &UserAction::ToggleMaskUserName)
        .unwrap();
    assert_eq!(twice, initial);
}

#[test]
fn set_and_clear_current_user() {
    let signed_in = UserReducer
        .reduce(
            &UserState::default(),
            &UserAction::SetCurrentUser { user: admin() },
        )
        .unwrap();
    assert_eq!(signed_in.current_user, Some(admin()));

    let signed_out = UserReducer
        .reduce(&signed_in, &UserAction::ClearCurrentUser)
        .unwrap();
    assert_eq!(signed_out.current_user, None);
}

#[test]
fn clearing_when_nobody_is_signed_in_is_a_no_op() {
    assert!(UserReducer
        .reduce(&UserState::default(), &UserAction::ClearCurrentUser)
        .is_none());
}
