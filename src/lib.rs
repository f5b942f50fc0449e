//! # Linear Probing Map
//!
//! A Rust implementation of a hash map using open addressing with linear
//! probing over a flat backing store.
//!
//! Collisions are resolved by scanning forward one slot at a time from the
//! key's home slot. Each occupied slot caches the key's hash, so probing
//! compares hashes before keys and resizing never rehashes. Deletion leaves
//! a tombstone in place of the removed entry, keeping every surviving key
//! reachable; the table doubles once occupancy reaches the configured
//! load-factor threshold.
//!
//! The map is single-threaded and unsynchronized. Callers needing concurrent
//! access must serialize externally, for example behind a `Mutex`.
//!
//! ## Basic Usage
//!
//! ```rust
//! use probemap::LinearProbingMap;
//!
//! // Create a new map with the default capacity and load factor
//! let mut map = LinearProbingMap::new();
//!
//! // Insert values
//! map.insert("apple".to_string(), 1);
//! map.insert("banana".to_string(), 2);
//!
//! // Retrieve values
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // Update values; the previous value comes back
//! assert_eq!(map.insert("apple".to_string(), 10), Some(1));
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Remove values
//! assert_eq!(map.remove("apple"), Some(10));
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Snapshot Views
//!
//! Key, value, and entry views are materialized, independent copies; mutating
//! the map afterward does not affect a snapshot already taken.
//!
//! ```rust
//! use probemap::{LinearProbingMap, MapExtensions};
//!
//! let mut map = LinearProbingMap::new();
//! map.insert("a".to_string(), 1);
//! map.insert("b".to_string(), 2);
//!
//! let keys = map.keys();
//! map.remove("a");
//!
//! // The snapshot still holds both keys
//! assert_eq!(keys.len(), 2);
//! assert!(map.contains_key("b"));
//! assert!(!map.contains_key("a"));
//! ```

/// Module implementing the linear probing map engine
mod linear_probing_map;
/// Snapshot views and membership queries for the map
mod utils;

pub use linear_probing_map::{Iter, LinearProbingMap};
pub use utils::MapExtensions;
