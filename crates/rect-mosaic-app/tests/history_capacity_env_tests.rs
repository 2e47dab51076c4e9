//! Integration tests for the history capacity environment override.

use rect_mosaic_app::{HISTORY_CAPACITY_ENV_VAR, history_capacity_from_env, new_editor_session};

#[test]
fn history_capacity_env_tests_accepts_only_positive_integers() {
    // Safety:
    // - This file holds a single test, so no other thread reads the env.
    // - We reset the variable before returning.
    unsafe { std::env::remove_var(HISTORY_CAPACITY_ENV_VAR) };
    assert_eq!(history_capacity_from_env(), 20);

    // Safety: see rationale above.
    unsafe { std::env::set_var(HISTORY_CAPACITY_ENV_VAR, " 7 ") };
    assert_eq!(history_capacity_from_env(), 7);
    let session = new_editor_session().expect("session should be created");
    assert_eq!(session.history().capacity(), 7);

    for invalid in ["0", "-3", "lots", ""] {
        // Safety: see rationale above.
        unsafe { std::env::set_var(HISTORY_CAPACITY_ENV_VAR, invalid) };
        assert_eq!(history_capacity_from_env(), 20, "{invalid:?} should fall back");
    }

    // Safety: see rationale above.
    unsafe { std::env::remove_var(HISTORY_CAPACITY_ENV_VAR) };
}
