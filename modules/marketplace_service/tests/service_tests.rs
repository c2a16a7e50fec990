//! Integration tests for identity, stores, addresses and regions

mod common;

use common::{print_test_header, registration, StaticRegions, TestEnv};
use marketplace_service::contract::*;
use marketplace_service::domain::{AdminSeed, PageRequest};

fn admin_seed() -> AdminSeed {
    AdminSeed {
        email: "admin@marketplace.local".to_string(),
        password: "admin123".to_string(),
        name: "Super Admin".to_string(),
        phone: "081999888777".to_string(),
        birth_date: chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
        gender: "L".to_string(),
        about: "System Administrator".to_string(),
        occupation: "Administrator".to_string(),
        province_id: "11".to_string(),
        city_id: "1101".to_string(),
        store_name: "Admin Store".to_string(),
        store_slug: "admin-store".to_string(),
    }
}

// ===== Identity =====

#[tokio::test]
async fn test_register_then_login() {
    print_test_header(
        "test_register_then_login",
        &[
            "Registration creates the user and a default store in one step",
            "and the credentials work for login",
        ],
    );
    let env = TestEnv::new();

    println!("\n📝 Stage 1: Register");
    let (user, store) = env
        .services
        .identity
        .register(registration("budi"))
        .await
        .expect("Failed to register");
    println!("   ✓ user {} store {} ({})", user.id, store.id, store.name);
    assert_eq!(store.user_id, user.id);
    assert_eq!(store.name, "Toko User budi");
    assert_eq!(store.slug, format!("toko-{}", user.id));
    assert!(!user.is_admin);

    println!("\n📝 Stage 2: Login");
    let token = env
        .services
        .identity
        .login("budi@example.com", "secret123")
        .await
        .expect("Failed to login");
    let actor = env.services.tokens.verify(&token.token).expect("Token must verify");
    assert_eq!(actor, AuthContext::user(user.id));
    println!("   ✓ token verified for user {}", actor.user_id);
}

#[tokio::test]
async fn test_register_requires_every_field() {
    print_test_header(
        "test_register_requires_every_field",
        &["Missing or malformed registration input is a validation error"],
    );
    let env = TestEnv::new();

    let mut missing_email = registration("ani");
    missing_email.email = Some("   ".to_string());
    let mut missing_password = registration("ani");
    missing_password.password = None;
    let mut bad_date = registration("ani");
    bad_date.birth_date = Some("15-06-1995".to_string());

    for (label, input) in [
        ("blank email", missing_email),
        ("no password", missing_password),
        ("bad birth date", bad_date),
    ] {
        let err = env.services.identity.register(input).await.unwrap_err();
        println!("   {} -> {}", label, err);
        assert!(matches!(err, MarketplaceError::Validation { .. }), "{}", label);
    }
    assert!(env.db.state.read().users.is_empty());
}

#[tokio::test]
async fn test_duplicate_email_is_conflict() {
    print_test_header(
        "test_duplicate_email_is_conflict",
        &["A second registration with the same email is rejected"],
    );
    let env = TestEnv::new();
    env.register("citra").await;

    let mut again = registration("other");
    again.email = Some("citra@example.com".to_string());
    let err = env.services.identity.register(again).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::Conflict { .. }));
    assert_eq!(env.db.state.read().users.len(), 1);
    assert_eq!(env.db.state.read().stores.len(), 1);
}

#[tokio::test]
async fn test_login_failures_are_unauthorized() {
    print_test_header(
        "test_login_failures_are_unauthorized",
        &["Unknown email and wrong password look the same to the caller"],
    );
    let env = TestEnv::new();
    env.register("dodi").await;

    let wrong_password = env
        .services
        .identity
        .login("dodi@example.com", "nope")
        .await
        .unwrap_err();
    let unknown = env
        .services
        .identity
        .login("ghost@example.com", "secret123")
        .await
        .unwrap_err();
    assert_eq!(wrong_password, unknown);
    assert!(matches!(unknown, MarketplaceError::Unauthorized { .. }));
}

#[tokio::test]
async fn test_seed_admin_is_idempotent() {
    print_test_header(
        "test_seed_admin_is_idempotent",
        &[
            "The administrator is created once with its own store",
            "and can log in with an admin token",
        ],
    );
    let env = TestEnv::new();
    let seed = admin_seed();

    println!("\n📝 Stage 1: First seed");
    assert!(env.services.identity.seed_admin(&seed).await.expect("seed"));

    println!("\n📝 Stage 2: Second seed is skipped");
    assert!(!env.services.identity.seed_admin(&seed).await.expect("seed"));
    assert_eq!(env.db.state.read().users.len(), 1);

    let token = env
        .services
        .identity
        .login(&seed.email, &seed.password)
        .await
        .expect("Admin login failed");
    let actor = env.services.tokens.verify(&token.token).unwrap();
    assert!(actor.is_admin);

    let store = env.services.stores.mine(&actor).await.unwrap();
    assert_eq!(store.slug, "admin-store");
}

#[tokio::test]
async fn test_profile_partial_update() {
    print_test_header(
        "test_profile_partial_update",
        &["Only present, non-blank fields change; a new password replaces the old one"],
    );
    let env = TestEnv::new();
    let (user, _, actor) = env.register("eka").await;

    let updated = env
        .services
        .identity
        .update_profile(
            &actor,
            ProfilePatch {
                name: Some("Eka Putri".to_string()),
                occupation: Some("  ".to_string()),
                password: Some("newsecret".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update profile");
    assert_eq!(updated.name, "Eka Putri");
    assert_eq!(updated.occupation, user.occupation);
    assert_eq!(updated.email, user.email);

    assert!(env
        .services
        .identity
        .login("eka@example.com", "secret123")
        .await
        .is_err());
    assert!(env
        .services
        .identity
        .login("eka@example.com", "newsecret")
        .await
        .is_ok());
}

// ===== Stores =====

#[tokio::test]
async fn test_second_store_is_conflict() {
    print_test_header(
        "test_second_store_is_conflict",
        &["Every registered user already owns a store, so creating another fails"],
    );
    let env = TestEnv::new();
    let (_, _, actor) = env.register("fajar").await;

    let err = env
        .services
        .stores
        .create(
            &actor,
            StorePatch {
                name: Some("Toko Kedua".to_string()),
                slug: Some("toko-kedua".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Conflict { .. }));
}

#[tokio::test]
async fn test_store_update_requires_owner() {
    print_test_header(
        "test_store_update_requires_owner",
        &["Only the owner may rename a store"],
    );
    let env = TestEnv::new();
    let (_, store, owner) = env.register("gita").await;
    let (_, _, stranger) = env.register("hadi").await;

    let patch = StorePatch {
        name: Some("Gita Fashion".to_string()),
        slug: None,
    };
    let err = env
        .services
        .stores
        .update(&stranger, store.id, patch.clone())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Forbidden { .. }));

    let renamed = env.services.stores.update(&owner, store.id, patch).await.unwrap();
    assert_eq!(renamed.name, "Gita Fashion");
    assert_eq!(renamed.slug, store.slug);

    let err = env
        .services
        .stores
        .update(&owner, 9999, StorePatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound { .. }));
}

#[tokio::test]
async fn test_store_list_filters_and_paginates() {
    print_test_header(
        "test_store_list_filters_and_paginates",
        &["Name filter is case-insensitive and pagination metadata is computed"],
    );
    let env = TestEnv::new();
    for handle in ["ina", "joko", "kiki"] {
        env.register(handle).await;
    }

    let page = env
        .services
        .stores
        .list(Some("USER J"), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].name, "Toko User joko");

    let page = env
        .services
        .stores
        .list(None, PageRequest { limit: 2, page: 2 })
        .await
        .unwrap();
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.info.total_items, 3);
    assert_eq!(page.info.total_pages, 2);
    assert!(page.info.has_prev);
    assert!(!page.info.has_next);
}

// ===== Addresses =====

#[tokio::test]
async fn test_address_lifecycle_and_isolation() {
    print_test_header(
        "test_address_lifecycle_and_isolation",
        &[
            "Addresses are private: another user's address is reported as not found",
            "and cannot be changed or deleted",
        ],
    );
    let env = TestEnv::new();
    let (_, _, owner) = env.register("lina").await;
    let (_, _, other) = env.register("maya").await;

    println!("\n📝 Stage 1: Create");
    let address = env.address(&owner).await;
    assert_eq!(env.services.addresses.list(&owner).await.unwrap().len(), 1);
    assert!(env.services.addresses.list(&other).await.unwrap().is_empty());

    println!("\n📝 Stage 2: Foreign access");
    let err = env.services.addresses.get(&other, address.id).await.unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound { .. }));
    let err = env
        .services
        .addresses
        .delete(&other, address.id)
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::NotFound { .. }));

    println!("\n📝 Stage 3: Partial update keeps other fields");
    let updated = env
        .services
        .addresses
        .update(
            &owner,
            address.id,
            AddressPatch {
                title: Some("Kantor".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "Kantor");
    assert_eq!(updated.detail, address.detail);

    println!("\n📝 Stage 4: Delete");
    env.services.addresses.delete(&owner, address.id).await.unwrap();
    assert!(env.services.addresses.list(&owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_address_requires_all_fields() {
    print_test_header(
        "test_address_requires_all_fields",
        &["Creating an address without a recipient is rejected"],
    );
    let env = TestEnv::new();
    let (_, _, actor) = env.register("nina").await;

    let err = env
        .services
        .addresses
        .create(
            &actor,
            AddressPatch {
                title: Some("Rumah".to_string()),
                recipient_name: None,
                phone: Some("0812".to_string()),
                detail: Some("Jl. Mawar".to_string()),
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Validation { .. }));
}

// ===== Regions =====

#[tokio::test]
async fn test_region_lookups() {
    print_test_header(
        "test_region_lookups",
        &["Province and city lookups pass through to the directory"],
    );
    let env = TestEnv::new();
    let regions = &env.services.regions;

    assert_eq!(regions.list_provinces().await.unwrap().len(), 2);
    assert_eq!(regions.list_cities("11").await.unwrap().len(), 2);
    assert_eq!(regions.list_all_cities().await.unwrap().len(), 3);
    assert_eq!(regions.get_province("31").await.unwrap().name, "DKI JAKARTA");
    assert_eq!(regions.get_city("1102").await.unwrap().province_id, "11");

    assert!(matches!(
        regions.get_province("99").await.unwrap_err(),
        MarketplaceError::NotFound { .. }
    ));
    assert!(matches!(
        regions.get_city("9999").await.unwrap_err(),
        MarketplaceError::NotFound { .. }
    ));
}

#[tokio::test]
async fn test_all_cities_skips_broken_provinces() {
    print_test_header(
        "test_all_cities_skips_broken_provinces",
        &["A province whose cities cannot be fetched is skipped, not fatal"],
    );
    let mut regions = StaticRegions::sample();
    regions.broken.insert("11".to_string());
    let env = TestEnv::with_regions(regions);

    let cities = env.services.regions.list_all_cities().await.unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].id, "3171");
}

#[tokio::test]
async fn test_offline_directory_is_upstream_error() {
    print_test_header(
        "test_offline_directory_is_upstream_error",
        &["Directory failures surface as upstream errors"],
    );
    let env = TestEnv::with_regions(StaticRegions {
        offline: true,
        ..StaticRegions::sample()
    });

    let err = env.services.regions.list_provinces().await.unwrap_err();
    assert!(matches!(err, MarketplaceError::Upstream { .. }));
}
