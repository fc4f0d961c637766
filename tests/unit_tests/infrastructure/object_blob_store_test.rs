use std::io;

use bytes::Bytes;
use futures::stream;

use bloodwork::application::ports::{BlobStore, BlobStoreError};
use bloodwork::domain::{DocumentId, StoragePath};
use bloodwork::infrastructure::storage::ObjectBlobStore;

fn create_test_store() -> (tempfile::TempDir, ObjectBlobStore) {
    let dir = tempfile::TempDir::new().unwrap();
    let store = ObjectBlobStore::local(dir.path().to_path_buf()).unwrap();
    (dir, store)
}

fn new_path() -> StoragePath {
    StoragePath::for_document(&DocumentId::new())
}

#[tokio::test]
async fn given_missing_directory_when_creating_local_store_then_directory_is_created() {
    let dir = tempfile::TempDir::new().unwrap();
    let nested = dir.path().join("uploads").join("reports");

    ObjectBlobStore::local(nested.clone()).unwrap();

    assert!(nested.is_dir());
}

#[tokio::test]
async fn given_valid_stream_when_storing_then_file_is_persisted() {
    let (dir, store) = create_test_store();
    let path = new_path();

    let chunks = vec![Ok(Bytes::from("hello ")), Ok(Bytes::from("world"))];
    let size = store.store(&path, Box::pin(stream::iter(chunks))).await.unwrap();

    assert_eq!(size, 11);
    assert!(dir.path().join(path.as_str()).is_file());
}

#[tokio::test]
async fn given_stored_file_when_fetching_then_bytes_match_original() {
    let (_dir, store) = create_test_store();
    let path = new_path();

    let content = b"test content";
    let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from(&content[..]))]));
    store.store(&path, byte_stream).await.unwrap();

    let fetched = store.fetch(&path).await.unwrap();
    assert_eq!(fetched, content);
}

#[tokio::test]
async fn given_stored_file_when_deleting_then_it_no_longer_exists() {
    let (_dir, store) = create_test_store();
    let path = new_path();
    let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from("data"))]));
    store.store(&path, byte_stream).await.unwrap();
    assert!(store.exists(&path).await.unwrap());

    store.delete(&path).await.unwrap();

    assert!(!store.exists(&path).await.unwrap());
    assert!(matches!(
        store.fetch(&path).await,
        Err(BlobStoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn given_missing_file_when_deleting_then_returns_not_found() {
    let (_dir, store) = create_test_store();

    let result = store.delete(&new_path()).await;

    assert!(matches!(result, Err(BlobStoreError::NotFound(_))));
}

#[tokio::test]
async fn given_stream_error_when_storing_then_returns_error_and_leaves_nothing() {
    let (_dir, store) = create_test_store();
    let path = new_path();

    let chunks: Vec<Result<Bytes, io::Error>> = vec![
        Ok(Bytes::from("partial")),
        Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "network drop",
        )),
    ];
    let result = store.store(&path, Box::pin(stream::iter(chunks))).await;

    assert!(result.is_err());
    assert!(!store.exists(&path).await.unwrap());
}

#[tokio::test]
async fn given_in_memory_store_when_round_tripping_then_behaves_like_local() {
    let store = ObjectBlobStore::in_memory();
    let path = new_path();

    let byte_stream = Box::pin(stream::iter(vec![Ok(Bytes::from("memory"))]));
    store.store(&path, byte_stream).await.unwrap();
    assert_eq!(store.fetch(&path).await.unwrap(), b"memory");

    store.delete(&path).await.unwrap();
    assert!(!store.exists(&path).await.unwrap());
}
