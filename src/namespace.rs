//! Hash map aliases shared across the crate.

use rapidhash::RapidHashMap;

/// Make it easier to switch between different hash backends.
pub type KeyMap<K, V> = RapidHashMap<K, V>;
