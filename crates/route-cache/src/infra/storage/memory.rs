use {
    super::{CachedRoutesItem, RouteStore},
    anyhow::{Result, anyhow},
    std::{collections::BTreeMap, sync::Mutex},
};

/// [`RouteStore`] keeping items in an ordered map, with the same prefix and
/// ordering semantics as the DynamoDB store. Items never expire.
#[derive(Debug, Default)]
pub struct InMemoryRouteStore {
    items: Mutex<BTreeMap<(String, String), CachedRoutesItem>>,
}

impl InMemoryRouteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All stored items, ordered by partition and sort key.
    pub fn items(&self) -> Vec<CachedRoutesItem> {
        self.items
            .lock()
            .expect("route store lock poisoned")
            .values()
            .cloned()
            .collect()
    }
}

#[async_trait::async_trait]
impl RouteStore for InMemoryRouteStore {
    async fn latest(&self, partition_key: &str, sort_key_prefix: &str) -> Result<Option<Vec<u8>>> {
        let items = self
            .items
            .lock()
            .map_err(|_| anyhow!("route store lock poisoned"))?;
        let start = (partition_key.to_owned(), sort_key_prefix.to_owned());
        Ok(items
            .range(start..)
            .take_while(|((partition, sort), _)| {
                partition == partition_key && sort.starts_with(sort_key_prefix)
            })
            .last()
            .map(|(_, item)| item.payload.clone()))
    }

    async fn put(&self, item: CachedRoutesItem) -> Result<()> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| anyhow!("route store lock poisoned"))?;
        items.insert(
            (item.partition_key.clone(), item.sort_key.clone()),
            item,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(partition: &str, sort: &str, payload: &[u8]) -> CachedRoutesItem {
        CachedRoutesItem {
            partition_key: partition.to_owned(),
            sort_key: sort.to_owned(),
            payload: payload.to_vec(),
            expires_at: 0,
        }
    }

    #[tokio::test]
    async fn returns_greatest_sort_key_with_prefix() {
        let store = InMemoryRouteStore::new();
        for (partition, sort, payload) in [
            ("p", "V3#1#01", b"a"),
            ("p", "V3#1#03", b"b"),
            ("p", "V3#1#02", b"c"),
            ("p", "V3#10#09", b"d"),
            ("p", "V3#2#09", b"e"),
            ("q", "V3#1#09", b"f"),
        ] {
            store.put(item(partition, sort, payload)).await.unwrap();
        }

        assert_eq!(store.latest("p", "V3#1#").await.unwrap(), Some(b"b".to_vec()));
        assert_eq!(store.latest("q", "V3#1#").await.unwrap(), Some(b"f".to_vec()));
        assert_eq!(store.latest("p", "V2#1#").await.unwrap(), None);
        assert_eq!(store.latest("r", "V3#1#").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_replaces_items_with_the_same_key() {
        let store = InMemoryRouteStore::new();
        store.put(item("p", "s", b"old")).await.unwrap();
        store.put(item("p", "s", b"new")).await.unwrap();
        assert_eq!(store.items().len(), 1);
        assert_eq!(store.latest("p", "s").await.unwrap(), Some(b"new".to_vec()));
    }

    fn poisoned() -> InMemoryRouteStore {
        let store = InMemoryRouteStore::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = store.items.lock().unwrap();
            panic!("poison the lock");
        }));
        assert!(store.items.is_poisoned());
        store
    }

    #[tokio::test]
    async fn poisoned_lock_fails_reads_and_writes() {
        let store = poisoned();
        assert!(store.latest("p", "s").await.is_err());
        assert!(store.put(item("p", "s", b"x")).await.is_err());
    }

    #[test]
    #[should_panic(expected = "route store lock poisoned")]
    fn poisoned_lock_is_not_read_as_empty() {
        poisoned().items();
    }
}
