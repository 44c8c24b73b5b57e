pub mod kv;

pub use kv::MockKvStore;
