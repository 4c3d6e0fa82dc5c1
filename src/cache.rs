use crate::models::{PlatformFilter, SortColumn, SortDirection};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Posts,
    Metrics,
}

// Hierarchical fetch keys: namespace, sub-resource, parameters. Structural
// equality is the dedupe contract: identical parameters always produce
// equal keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    PostsList {
        platform: PlatformFilter,
        sort_column: SortColumn,
        sort_direction: SortDirection,
    },
    PostDetail {
        id: String,
    },
    MetricsDailyByDays {
        days: i64,
    },
    MetricsDailyByRange {
        start_date: String,
        end_date: String,
    },
    MetricsSummary,
}

impl QueryKey {
    pub fn namespace(&self) -> Namespace {
        match self {
            Self::PostsList { .. } | Self::PostDetail { .. } => Namespace::Posts,
            Self::MetricsDailyByDays { .. }
            | Self::MetricsDailyByRange { .. }
            | Self::MetricsSummary => Namespace::Metrics,
        }
    }

    pub fn family(&self) -> &'static str {
        match self {
            Self::PostsList { .. } => "list",
            Self::PostDetail { .. } => "detail",
            Self::MetricsDailyByDays { .. } | Self::MetricsDailyByRange { .. } => "daily",
            Self::MetricsSummary => "summary",
        }
    }

    fn is_post_list(&self) -> bool {
        matches!(self, Self::PostsList { .. })
    }
}

#[derive(Debug, Default)]
pub struct QueryCache {
    entries: Mutex<HashMap<QueryKey, Value>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &QueryKey) -> Option<Value> {
        self.lock().get(key).cloned()
    }

    pub fn insert(&self, key: QueryKey, value: Value) {
        self.lock().insert(key, value);
    }

    // A successful create/update/delete invalidates the whole list family.
    pub fn invalidate_post_lists(&self) {
        self.lock().retain(|key, _| !key.is_post_list());
    }

    // An update additionally invalidates the affected detail key.
    pub fn invalidate_post_detail(&self, id: &str) {
        self.lock().remove(&QueryKey::PostDetail { id: id.to_string() });
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, Value>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// Cached rows must never cross users, so each authenticated caller gets
// their own cache.
#[derive(Debug, Default)]
pub struct CacheRegistry {
    per_user: Mutex<HashMap<String, Arc<QueryCache>>>,
}

impl CacheRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_user(&self, user_id: &str) -> Arc<QueryCache> {
        let mut per_user = self
            .per_user
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(per_user.entry(user_id.to_string()).or_default())
    }
}

// Single-slot memoization for derived values: recomputes only when the
// input changes.
#[derive(Debug, Default)]
pub struct Memo<I, O> {
    slot: Mutex<Option<(I, O)>>,
}

impl<I, O> Memo<I, O>
where
    I: PartialEq + Clone,
    O: Clone,
{
    pub fn new() -> Self {
        Self { slot: Mutex::new(None) }
    }

    pub fn get_or_compute(&self, input: &I, compute: impl FnOnce(&I) -> O) -> O {
        let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_input, cached_output)) = slot.as_ref() {
            if cached_input == input {
                return cached_output.clone();
            }
        }
        let output = compute(input);
        *slot = Some((input.clone(), output.clone()));
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn list_key() -> QueryKey {
        QueryKey::PostsList {
            platform: PlatformFilter::Instagram,
            sort_column: SortColumn::Likes,
            sort_direction: SortDirection::Desc,
        }
    }

    #[test]
    fn identical_parameters_produce_equal_keys() {
        assert_eq!(list_key(), list_key());

        let cache = QueryCache::new();
        cache.insert(list_key(), json!([1, 2]));
        cache.insert(list_key(), json!([3]));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&list_key()), Some(json!([3])));
    }

    #[test]
    fn different_parameters_produce_distinct_keys() {
        let other = QueryKey::PostsList {
            platform: PlatformFilter::Instagram,
            sort_column: SortColumn::Likes,
            sort_direction: SortDirection::Asc,
        };
        assert_ne!(list_key(), other);
    }

    #[test]
    fn namespace_and_family_are_hierarchical() {
        assert_eq!(list_key().namespace(), Namespace::Posts);
        assert_eq!(list_key().family(), "list");
        assert_eq!(QueryKey::MetricsSummary.namespace(), Namespace::Metrics);
        assert_eq!(QueryKey::MetricsSummary.family(), "summary");
        assert_eq!(
            QueryKey::MetricsDailyByDays { days: 30 }.family(),
            "daily"
        );
    }

    #[test]
    fn invalidating_lists_spares_other_families() {
        let cache = QueryCache::new();
        cache.insert(list_key(), json!([]));
        cache.insert(
            QueryKey::PostsList {
                platform: PlatformFilter::All,
                sort_column: SortColumn::PostedAt,
                sort_direction: SortDirection::Desc,
            },
            json!([]),
        );
        cache.insert(QueryKey::PostDetail { id: "p1".into() }, json!({}));
        cache.insert(QueryKey::MetricsSummary, json!({}));

        cache.invalidate_post_lists();

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&QueryKey::PostDetail { id: "p1".into() }).is_some());
        assert!(cache.get(&QueryKey::MetricsSummary).is_some());
        assert!(cache.get(&list_key()).is_none());
    }

    #[test]
    fn invalidating_detail_targets_one_id() {
        let cache = QueryCache::new();
        cache.insert(QueryKey::PostDetail { id: "p1".into() }, json!({}));
        cache.insert(QueryKey::PostDetail { id: "p2".into() }, json!({}));

        cache.invalidate_post_detail("p1");

        assert!(cache.get(&QueryKey::PostDetail { id: "p1".into() }).is_none());
        assert!(cache.get(&QueryKey::PostDetail { id: "p2".into() }).is_some());
    }

    #[test]
    fn registry_scopes_caches_by_user() {
        let registry = CacheRegistry::new();
        registry.for_user("alice").insert(list_key(), json!([1]));

        assert!(registry.for_user("bob").get(&list_key()).is_none());
        assert_eq!(registry.for_user("alice").get(&list_key()), Some(json!([1])));
    }

    #[test]
    fn memo_recomputes_only_when_input_changes() {
        let memo: Memo<Vec<i64>, i64> = Memo::new();
        let mut calls = 0;

        let sum = memo.get_or_compute(&vec![1, 2, 3], |input| {
            calls += 1;
            input.iter().sum()
        });
        assert_eq!(sum, 6);

        let sum = memo.get_or_compute(&vec![1, 2, 3], |input| {
            calls += 1;
            input.iter().sum()
        });
        assert_eq!(sum, 6);
        assert_eq!(calls, 1);

        let sum = memo.get_or_compute(&vec![10], |input| {
            calls += 1;
            input.iter().sum()
        });
        assert_eq!(sum, 10);
        assert_eq!(calls, 2);
    }
}
