//! Custom assertion macros
//!
//! Assertions with clearer failure output for the archival tests.

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert that a room key is no longer in the registry (async context only)
#[macro_export]
macro_rules! assert_evicted {
    ($registry:expr, $key:expr) => {
        assert!(
            !$registry.exists($key).await,
            "Expected room {} to be evicted, but it is still live",
            $key
        );
    };
}

/// Assert that a room key is still in the registry (async context only)
#[macro_export]
macro_rules! assert_live {
    ($registry:expr, $key:expr) => {
        assert!(
            $registry.exists($key).await,
            "Expected room {} to be live, but it was evicted",
            $key
        );
    };
}
