mod test_helpers;

use std::collections::HashMap;
use std::env;
use std::ffi::OsString;
use std::panic::{catch_unwind, AssertUnwindSafe};

use hop_mock::testing::env::EnvScope;

use crate::test_helpers::maybe_start_logging;

fn environ() -> HashMap<OsString, OsString> {
    env::vars_os().collect()
}

#[test]
fn overlay_is_visible_inside_scope() {
    maybe_start_logging();

    // scopes are reentrant, so holding one keeps other tests from touching the environment
    let _lock = EnvScope::new();
    let before = environ();
    {
        let _scope = EnvScope::set([
            ("HOP_MOCK_TEST_USER", "user"),
            ("HOP_MOCK_TEST_PASSWORD", "password"),
        ])
        .unwrap();

        assert_eq!(env::var("HOP_MOCK_TEST_USER").unwrap(), "user");
        assert_eq!(env::var("HOP_MOCK_TEST_PASSWORD").unwrap(), "password");
    }

    assert_eq!(environ(), before);
}

#[test]
fn restored_when_body_panics() {
    let _lock = EnvScope::new();
    let before = environ();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let scope = EnvScope::set([("HOP_MOCK_TEST_PANIC", "1")]).unwrap();
        scope.set_var("HOME", "/nonexistent").unwrap();
        panic!("test body failed");
    }));
    assert!(result.is_err());

    assert!(env::var_os("HOP_MOCK_TEST_PANIC").is_none());
    assert_eq!(environ(), before);
}

#[test]
fn nested_scopes_restore_in_order() {
    let outer = EnvScope::set([("HOP_MOCK_TEST_NESTED", "outer")]).unwrap();
    {
        let _inner = EnvScope::set([("HOP_MOCK_TEST_NESTED", "inner")]).unwrap();
        assert_eq!(env::var("HOP_MOCK_TEST_NESTED").unwrap(), "inner");
    }
    assert_eq!(env::var("HOP_MOCK_TEST_NESTED").unwrap(), "outer");
    drop(outer);

    let _lock = EnvScope::new();
    assert!(env::var_os("HOP_MOCK_TEST_NESTED").is_none());
}
