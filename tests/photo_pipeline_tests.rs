use std::str::FromStr;

use bytes::Bytes;
use estate_service::features::listings::models::{
    ListingStatus, PropertyType, TransactionType,
};
use estate_service::features::listings::repository::{delete_listing, save_listings};
use estate_service::features::listings::schemas::ListingIn;
use estate_service::features::photos::handlers::take_single_upload;
use estate_service::features::photos::schemas::{Pagination, PhotoUpload};
use estate_service::features::photos::service::ListingPhotoService;
use estate_service::features::photos::storage::PhotoStorage;
use estate_service::features::photos::validation::PhotoValidator;
use estate_service::utilities::errors::AppError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tempfile::TempDir;
use uuid::Uuid;

const MAX_UPLOAD_BYTES: u64 = 2 * 1024 * 1024;

async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();

    sqlx::migrate!("./migrations").run(&pool).await.unwrap();

    pool
}

async fn setup() -> (ListingPhotoService, SqlitePool, TempDir, Uuid) {
    let pool = test_pool().await;

    let saved = save_listings(
        &pool,
        vec![ListingIn {
            client_id: None,
            title: "With photos".to_string(),
            location: "Warsaw".to_string(),
            street: "Main 1".to_string(),
            price: 200_000,
            area: 70.0,
            property_type: PropertyType::Apartment,
            transaction_type: TransactionType::Sell,
            description: "Fixture listing".to_string(),
            floor: "1".to_string(),
            num_of_floors: "3".to_string(),
            build_year: "2004".to_string(),
            status: ListingStatus::Available,
        }],
    )
    .await
    .unwrap();

    let dir = TempDir::new().unwrap();
    let storage = PhotoStorage::init(dir.path()).await.unwrap();
    let validator = PhotoValidator::new(MAX_UPLOAD_BYTES);
    let service = ListingPhotoService::new(pool.clone(), storage, validator);

    (service, pool, dir, saved[0].id)
}

fn upload(listing_id: Uuid, filename: &str, content_type: &str, data: Vec<u8>) -> PhotoUpload {
    PhotoUpload {
        listing_id,
        filename: filename.to_string(),
        content_type: Some(content_type.to_string()),
        data: Bytes::from(data),
    }
}

fn stored_file_count(dir: &TempDir) -> usize {
    std::fs::read_dir(dir.path()).unwrap().count()
}

#[test]
fn validator_rejects_non_image_content_type_regardless_of_size() {
    let validator = PhotoValidator::new(MAX_UPLOAD_BYTES);

    let result = validator.validate(Some("text/plain"), 10);
    assert!(matches!(result, Err(AppError::InvalidImageTypeError(_))));

    // Content type check comes first: an empty text upload still reports
    // the type error, not the empty-upload one.
    let result = validator.validate(Some("text/plain"), 0);
    assert!(matches!(result, Err(AppError::InvalidImageTypeError(_))));

    let result = validator.validate(None, 10);
    assert!(matches!(result, Err(AppError::InvalidImageTypeError(_))));
}

#[test]
fn validator_rejects_empty_and_oversized_uploads_in_order() {
    let validator = PhotoValidator::new(MAX_UPLOAD_BYTES);

    let result = validator.validate(Some("image/png"), 0);
    assert!(matches!(result, Err(AppError::EmptyUploadError)));

    let result = validator.validate(Some("image/png"), MAX_UPLOAD_BYTES + 1);
    assert!(matches!(
        result,
        Err(AppError::PhotoTooLargeError { limit_bytes }) if limit_bytes == MAX_UPLOAD_BYTES
    ));

    assert!(validator.validate(Some("image/png"), MAX_UPLOAD_BYTES).is_ok());
}

#[test]
fn sanitize_strips_directory_components() {
    assert_eq!(
        PhotoStorage::sanitize_filename("../../etc/passwd").unwrap(),
        "passwd"
    );
    assert_eq!(
        PhotoStorage::sanitize_filename("dir\\evil.png").unwrap(),
        "evil.png"
    );
    assert_eq!(
        PhotoStorage::sanitize_filename("photo.jpg").unwrap(),
        "photo.jpg"
    );
}

#[test]
fn sanitize_rejects_names_without_a_file_component() {
    assert!(matches!(
        PhotoStorage::sanitize_filename(""),
        Err(AppError::InvalidFilenameError(_))
    ));
    assert!(matches!(
        PhotoStorage::sanitize_filename("uploads/"),
        Err(AppError::InvalidFilenameError(_))
    ));
    assert!(matches!(
        PhotoStorage::sanitize_filename(".."),
        Err(AppError::InvalidFilenameError(_))
    ));
}

#[test]
fn stored_names_keep_extension_and_never_collide() {
    let first = PhotoStorage::build_stored_name("house.png");
    let second = PhotoStorage::build_stored_name("house.png");

    assert!(first.ends_with(".png"));
    assert!(second.ends_with(".png"));
    assert_ne!(first, second);

    let bare = PhotoStorage::build_stored_name("house");
    assert!(!bare.contains('.'));
}

#[tokio::test]
async fn store_and_read_round_trip() {
    let (service, _pool, _dir, listing_id) = setup().await;
    let payload = vec![7u8; 1024];

    let stored = service
        .store_photo(upload(listing_id, "house.png", "image/png", payload.clone()))
        .await
        .unwrap();

    assert_eq!(stored.listing_id, listing_id);
    assert_eq!(stored.original_name, "house.png");
    assert!(stored.stored_name.ends_with(".png"));
    assert_eq!(stored.size_bytes, 1024);
    assert_eq!(stored.content_type.as_deref(), Some("image/png"));

    let (metadata, data) = service.read_photo(&stored.id).await.unwrap();
    assert_eq!(metadata.id, stored.id);
    assert_eq!(data, payload);
}

#[tokio::test]
async fn oversized_upload_writes_nothing() {
    let (service, _pool, dir, listing_id) = setup().await;
    let payload = vec![0u8; 3 * 1024 * 1024];

    let result = service
        .store_photo(upload(listing_id, "big.jpg", "image/jpeg", payload))
        .await;

    assert!(matches!(
        result,
        Err(AppError::PhotoTooLargeError { limit_bytes }) if limit_bytes == MAX_UPLOAD_BYTES
    ));
    assert_eq!(stored_file_count(&dir), 0);
    assert!(service.list_photos_by_listing(&listing_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn non_image_upload_writes_nothing() {
    let (service, _pool, dir, listing_id) = setup().await;

    let result = service
        .store_photo(upload(listing_id, "notes.txt", "text/plain", vec![1, 2, 3]))
        .await;

    assert!(matches!(result, Err(AppError::InvalidImageTypeError(_))));
    assert_eq!(stored_file_count(&dir), 0);
}

#[tokio::test]
async fn empty_upload_writes_nothing() {
    let (service, _pool, dir, listing_id) = setup().await;

    let result = service
        .store_photo(upload(listing_id, "void.png", "image/png", Vec::new()))
        .await;

    assert!(matches!(result, Err(AppError::EmptyUploadError)));
    assert_eq!(stored_file_count(&dir), 0);
}

#[tokio::test]
async fn batch_failure_names_the_failing_item_and_keeps_earlier_ones() {
    let (service, _pool, _dir, listing_id) = setup().await;

    let result = service
        .store_photos(vec![
            upload(listing_id, "ok.png", "image/png", vec![1; 64]),
            upload(listing_id, "bad.txt", "text/plain", vec![2; 64]),
            upload(listing_id, "never.png", "image/png", vec![3; 64]),
        ])
        .await;

    match result {
        Err(AppError::PhotoBatchError {
            index,
            filename,
            source,
        }) => {
            assert_eq!(index, 1);
            assert_eq!(filename, "bad.txt");
            assert!(matches!(*source, AppError::InvalidImageTypeError(_)));
        }
        other => panic!("expected PhotoBatchError, got {other:?}"),
    }

    let stored = service.list_photos_by_listing(&listing_id).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].original_name, "ok.png");
}

#[tokio::test]
async fn missing_metadata_is_reported_as_photo_missing() {
    let (service, _pool, _dir, _listing_id) = setup().await;

    let result = service.read_photo(&Uuid::new_v4()).await;

    assert!(matches!(result, Err(AppError::PhotoMissingError(_))));
}

#[tokio::test]
async fn metadata_without_backing_file_is_reported_not_ignored() {
    let (service, _pool, _dir, listing_id) = setup().await;

    let stored = service
        .store_photo(upload(listing_id, "gone.png", "image/png", vec![9; 128]))
        .await
        .unwrap();

    std::fs::remove_file(&stored.storage_path).unwrap();

    let result = service.read_photo(&stored.id).await;
    assert!(matches!(result, Err(AppError::PhotoMissingError(_))));

    let result = service.read_photos_by_listing(&listing_id).await;
    assert!(matches!(result, Err(AppError::PhotoMissingError(_))));
}

#[tokio::test]
async fn listing_delete_cascades_to_photo_metadata() {
    let (service, pool, _dir, listing_id) = setup().await;

    service
        .store_photo(upload(listing_id, "cascade.png", "image/png", vec![4; 32]))
        .await
        .unwrap();

    delete_listing(&pool, &listing_id).await.unwrap().unwrap();

    let remaining = service.list_photos_by_listing(&listing_id).await.unwrap();
    assert!(remaining.is_empty());
}

#[test]
fn pagination_rejects_out_of_range_values() {
    let negative_offset = Pagination {
        offset: -1,
        limit: 10,
    };
    assert!(matches!(
        negative_offset.validate(),
        Err(AppError::ValidationError(_))
    ));

    let zero_limit = Pagination {
        offset: 0,
        limit: 0,
    };
    assert!(matches!(
        zero_limit.validate(),
        Err(AppError::ValidationError(_))
    ));

    let oversized_limit = Pagination {
        offset: 0,
        limit: 101,
    };
    assert!(matches!(
        oversized_limit.validate(),
        Err(AppError::ValidationError(_))
    ));

    let in_range = Pagination {
        offset: 0,
        limit: 100,
    };
    assert!(in_range.validate().is_ok());
}

#[test]
fn single_upload_takes_exactly_one_field() {
    let one = vec![upload(Uuid::new_v4(), "only.png", "image/png", vec![1; 8])];
    assert_eq!(take_single_upload(one).unwrap().filename, "only.png");

    let none: Vec<PhotoUpload> = Vec::new();
    assert!(matches!(
        take_single_upload(none),
        Err(AppError::InvalidFormData(_))
    ));

    let listing_id = Uuid::new_v4();
    let two = vec![
        upload(listing_id, "first.png", "image/png", vec![1; 8]),
        upload(listing_id, "second.png", "image/png", vec![2; 8]),
    ];
    assert!(matches!(
        take_single_upload(two),
        Err(AppError::InvalidFormData(_))
    ));
}

#[tokio::test]
async fn photo_page_is_newest_first_with_limit_and_offset() {
    let (service, _pool, _dir, listing_id) = setup().await;

    for name in ["one.png", "two.png", "three.png", "four.png", "five.png"] {
        service
            .store_photo(upload(listing_id, name, "image/png", vec![6; 16]))
            .await
            .unwrap();
    }

    let page = service.list_photos(2, 0).await.unwrap();
    let names: Vec<&str> = page.iter().map(|p| p.original_name.as_str()).collect();
    assert_eq!(names, vec!["five.png", "four.png"]);

    let page = service.list_photos(2, 2).await.unwrap();
    let names: Vec<&str> = page.iter().map(|p| p.original_name.as_str()).collect();
    assert_eq!(names, vec!["three.png", "two.png"]);

    let page = service.list_photos(50, 0).await.unwrap();
    assert_eq!(page.len(), 5);
}

#[tokio::test]
async fn photos_list_by_listing_in_upload_order() {
    let (service, _pool, _dir, listing_id) = setup().await;

    for name in ["a.png", "b.png", "c.png"] {
        service
            .store_photo(upload(listing_id, name, "image/png", vec![5; 16]))
            .await
            .unwrap();
    }

    let photos = service.list_photos_by_listing(&listing_id).await.unwrap();
    let names: Vec<&str> = photos.iter().map(|p| p.original_name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "b.png", "c.png"]);
}
