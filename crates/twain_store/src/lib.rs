//! Question-group persistence for Twain.
//!
//! [`QuestionGroupStore`] is the seam between the service and its document
//! database. Two backends are provided:
//!
//! - [`InMemoryStore`]: process-local, for tests and single-process runs
//! - [`FirestoreStore`]: Cloud Firestore over its REST API
//!
//! Live views use [`QuestionGroupStore::subscribe`], which returns a
//! [`Subscription`] delivering full ordered snapshots until it is dropped.
//!
//! Queued videos are listed through [`VideoCatalog`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod firestore;
mod memory;
mod status;
mod store;
mod subscription;
mod video;

pub use firestore::value;
pub use firestore::{FIRESTORE_BASE_URL, FirestoreConfig, FirestoreConfigBuilder, FirestoreStore};
pub use memory::InMemoryStore;
pub use store::{QuestionGroupStore, StoreResult, TEST_COLLECTION, WriteProbe, sort_for_display};
pub use subscription::{Snapshot, Subscription};
pub use video::{
    BucketConfig, BucketConfigBuilder, BucketVideoCatalog, STORAGE_BASE_URL, StaticVideoCatalog,
    VideoCatalog,
};
