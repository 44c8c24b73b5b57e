use mockall::mock;

use crate::kv::KeyValueStore;

// Mock key-value backend for exercising storage failures
mock! {
    pub KvStore {}

    impl KeyValueStore for KvStore {
        fn get(&self, key: &str) -> eyre::Result<Option<String>>;

        fn set(&self, key: &str, value: &str) -> eyre::Result<()>;
    }
}
