//! Integration tests for image upload intake

mod common;

use bytes::Bytes;
use common::{print_test_header, TestEnv};
use marketplace_service::contract::*;

fn image(name: &str, size: usize) -> ImageUpload {
    ImageUpload {
        file_name: name.to_string(),
        bytes: Bytes::from(vec![0u8; size]),
    }
}

#[tokio::test]
async fn test_single_upload_is_stored_and_attached() {
    print_test_header(
        "test_single_upload_is_stored_and_attached",
        &["An accepted image is written under products/ and linked to the product"],
    );
    let env = TestEnv::new();
    let (user, _, owner) = env.register("fotografer").await;
    let category = env.category("Kamera").await;
    let product = env.product(&owner, &category, "Lensa Tele", "900000", 1).await;

    let (stored, photo) = env
        .services
        .uploads
        .upload_and_assign(&owner, i64::from(product.id), image("Lensa.JPG", 512))
        .await
        .expect("Failed to upload");
    println!("   ✓ stored {} as {}", stored.file_name, stored.url);

    assert!(stored.file_name.starts_with(&format!("product_{}_", user.id)));
    assert!(stored.file_name.ends_with(".jpg"));
    assert_eq!(stored.size, 512);
    assert_eq!(stored.url, format!("/uploads/products/{}", stored.file_name));
    assert_eq!(photo.url, stored.url);
    assert_eq!(env.files.paths(), vec![format!("products/{}", stored.file_name)]);
}

#[tokio::test]
async fn test_rejected_files_are_not_stored() {
    print_test_header(
        "test_rejected_files_are_not_stored",
        &["Wrong extensions and oversized files never reach the file store"],
    );
    let env = TestEnv::new();
    let (_, _, owner) = env.register("desainer").await;
    let category = env.category("Seni").await;
    let product = env.product(&owner, &category, "Lukisan Kanvas", "300000", 1).await;

    for upload in [image("script.exe", 10), image("huge.png", 4096), image("noext", 10)] {
        let err = env
            .services
            .uploads
            .upload_and_assign(&owner, i64::from(product.id), upload)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketplaceError::Validation { .. }));
    }
    assert!(env.files.paths().is_empty());
}

#[tokio::test]
async fn test_foreign_product_upload_is_discarded() {
    print_test_header(
        "test_foreign_product_upload_is_discarded",
        &["Uploading to someone else's product fails and leaves no file behind"],
    );
    let env = TestEnv::new();
    let (_, _, owner) = env.register("pemilik").await;
    let (_, _, stranger) = env.register("orang").await;
    let category = env.category("Perabot").await;
    let product = env.product(&owner, &category, "Kursi Rotan", "450000", 2).await;

    let err = env
        .services
        .uploads
        .upload_and_assign(&stranger, i64::from(product.id), image("kursi.png", 64))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Forbidden { .. }));
    assert!(env.files.paths().is_empty());

    let err = env
        .services
        .uploads
        .upload_and_assign(&owner, 0, image("kursi.png", 64))
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation { .. }));
}

#[tokio::test]
async fn test_multi_upload_partial_success() {
    print_test_header(
        "test_multi_upload_partial_success",
        &[
            "Accepted files are attached together; rejected ones are listed",
            "with their position and name",
        ],
    );
    let env = TestEnv::new();
    let (_, _, owner) = env.register("galeri").await;
    let category = env.category("Dekorasi").await;
    let product = env.product(&owner, &category, "Vas Bunga", "120000", 6).await;

    let result = env
        .services
        .uploads
        .upload_many_and_assign(
            &owner,
            i64::from(product.id),
            vec![
                image("depan.png", 100),
                image("readme.txt", 100),
                image("samping.webp", 100),
            ],
        )
        .await
        .expect("Partial upload must succeed");
    println!("   ✓ uploaded {} errors {:?}", result.uploaded.len(), result.errors);

    assert!(result.is_partial());
    assert_eq!(result.uploaded.len(), 2);
    assert_eq!(result.photos.len(), 2);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].starts_with("file 2 (readme.txt)"));
    assert!(result.uploaded[0].file_name.ends_with("_1.png"));
    assert!(result.uploaded[1].file_name.ends_with("_3.webp"));
    assert_eq!(
        env.services.catalog.list_photos(product.id).await.unwrap().len(),
        2
    );
}

#[tokio::test]
async fn test_multi_upload_limits() {
    print_test_header(
        "test_multi_upload_limits",
        &["Empty, oversized and all-rejected batches fail without attaching anything"],
    );
    let env = TestEnv::new();
    let (_, _, owner) = env.register("katalog").await;
    let category = env.category("Mainan").await;
    let product = env.product(&owner, &category, "Mobil Remote", "200000", 2).await;
    let uploads = &env.services.uploads;

    let err = uploads
        .upload_many_and_assign(&owner, i64::from(product.id), Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation { .. }));

    let too_many = (0..4).map(|i| image(&format!("{}.png", i), 10)).collect();
    let err = uploads
        .upload_many_and_assign(&owner, i64::from(product.id), too_many)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation { .. }));

    let err = uploads
        .upload_many_and_assign(
            &owner,
            i64::from(product.id),
            vec![image("a.gif", 10), image("b.bmp", 10)],
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation { .. }));

    assert!(env.files.paths().is_empty());
    assert!(env.services.catalog.list_photos(product.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_multi_upload_attach_failure_removes_files() {
    print_test_header(
        "test_multi_upload_attach_failure_removes_files",
        &["When the photo insert fails every stored file of the batch is removed"],
    );
    let env = TestEnv::new();
    let (_, _, owner) = env.register("arsip").await;
    let category = env.category("Kantor").await;
    let product = env.product(&owner, &category, "Map Plastik", "3000", 50).await;
    env.db.state.write().fail_photos = true;

    let err = env
        .services
        .uploads
        .upload_many_and_assign(
            &owner,
            i64::from(product.id),
            vec![image("a.png", 10), image("b.jpeg", 10)],
        )
        .await
        .unwrap_err();
    assert_eq!(err, MarketplaceError::Internal);
    assert!(env.files.paths().is_empty());
}
