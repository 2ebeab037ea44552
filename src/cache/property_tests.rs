//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the validity window and the store's write rules.

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use serde_json::json;

use crate::cache::{CacheKey, CacheStore};

// == Test Configuration ==
const MAX_TTL_SECS: u64 = 24 * 60 * 60;

fn epoch_base() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

// == Strategies ==
/// Generates ticker keys like "BTC-USD"
fn key_strategy() -> impl Strategy<Value = CacheKey> {
    prop_oneof![
        Just(CacheKey::Symbols),
        "[A-Z]{2,5}-[A-Z]{3,4}".prop_map(CacheKey::Ticker),
    ]
}

/// Generates fetch times within a year of the base
fn fetched_at_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..365 * 24 * 60 * 60 * 1000).prop_map(|ms| epoch_base() + Duration::milliseconds(ms))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // A key that was never written is never valid
    #[test]
    fn prop_missing_key_is_invalid(
        key in key_strategy(),
        ttl in 0u64..MAX_TTL_SECS,
        now in fetched_at_strategy()
    ) {
        let store = CacheStore::with_ttl_secs(ttl);
        prop_assert!(!store.is_valid(&key, now));
    }

    // Valid for every query in [T, T + ttl), invalid from T + ttl on
    #[test]
    fn prop_validity_window(
        key in key_strategy(),
        ttl in 1u64..MAX_TTL_SECS,
        fetched_at in fetched_at_strategy(),
        offset_ms in 0i64..(2 * MAX_TTL_SECS as i64 * 1000)
    ) {
        let mut store = CacheStore::with_ttl_secs(ttl);
        store.insert(key.clone(), json!({"k": key.to_string()}), fetched_at);

        let now = fetched_at + Duration::milliseconds(offset_ms);
        let expected = offset_ms < ttl as i64 * 1000;
        prop_assert_eq!(store.is_valid(&key, now), expected);
    }

    // Zero expiration means every check fails
    #[test]
    fn prop_zero_ttl_never_valid(
        key in key_strategy(),
        fetched_at in fetched_at_strategy(),
        offset_ms in -10_000i64..10_000
    ) {
        let mut store = CacheStore::with_ttl_secs(0);
        store.insert(key.clone(), json!(null), fetched_at);
        prop_assert!(!store.is_valid(&key, fetched_at + Duration::milliseconds(offset_ms)));
    }

    // Writing one key never changes the validity of another
    #[test]
    fn prop_keys_are_independent(
        a in key_strategy(),
        b in key_strategy(),
        fetched_at in fetched_at_strategy()
    ) {
        prop_assume!(a != b);
        let mut store = CacheStore::with_ttl_secs(300);
        store.insert(a.clone(), json!(1), fetched_at);

        prop_assert!(store.is_valid(&a, fetched_at));
        prop_assert!(!store.is_valid(&b, fetched_at));
        prop_assert_eq!(store.len(), 1);
    }

    // The latest write replaces payload and timestamp together
    #[test]
    fn prop_last_write_wins(
        key in key_strategy(),
        writes in prop::collection::vec((any::<u32>(), fetched_at_strategy()), 1..20)
    ) {
        let mut store = CacheStore::with_ttl_secs(300);
        for (value, at) in &writes {
            store.insert(key.clone(), json!(value), *at);
        }

        let (last_value, last_at) = writes.last().unwrap();
        let entry = store.get(&key).unwrap();
        prop_assert_eq!(entry.payload(), &json!(last_value));
        prop_assert_eq!(entry.fetched_at(), *last_at);
        prop_assert_eq!(store.len(), 1);
    }

    // Purging at time `now` removes exactly the entries invalid at `now`
    #[test]
    fn prop_cleanup_matches_validity(
        entries in prop::collection::vec((key_strategy(), fetched_at_strategy()), 1..30),
        now in fetched_at_strategy()
    ) {
        let mut store = CacheStore::with_ttl_secs(3600);
        for (key, at) in &entries {
            store.insert(key.clone(), json!(1), *at);
        }
        let keys: Vec<CacheKey> = entries.iter().map(|(k, _)| k.clone()).collect();
        let valid_before: Vec<bool> = keys.iter().map(|k| store.is_valid(k, now)).collect();

        store.cleanup_expired(now);

        for (key, was_valid) in keys.iter().zip(valid_before) {
            prop_assert_eq!(store.get(key).is_some(), was_valid);
        }
    }
}
