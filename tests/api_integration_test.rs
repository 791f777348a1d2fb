use feira::db;
use feira::models::user::UserDto;
use feira::services::{ServiceError, product_service, user_service};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

// Helper to create a test database
async fn setup_test_db() -> DatabaseConnection {
    // In-memory SQLite for testing
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

// Helper to create a test user
async fn create_test_user(db: &DatabaseConnection, cpf: &str, email: &str) {
    let user = feira::models::user::ActiveModel {
        cpf: Set(cpf.to_string()),
        name: Set("Test User".to_string()),
        phone: Set(Some("11 99999-0000".to_string())),
        email: Set(email.to_string()),
        password: Set("123456".to_string()),
        photo: Set(None),
    };
    user.insert(db).await.expect("Failed to create user");
}

// Helper to create a test tent
async fn create_test_tent(db: &DatabaseConnection, owner_cpf: &str, name: &str) -> i32 {
    let tent = feira::models::tent::ActiveModel {
        owner_cpf: Set(owner_cpf.to_string()),
        name: Set(name.to_string()),
        license: Set(None),
        ..Default::default()
    };
    let res = tent.insert(db).await.expect("Failed to create tent");
    res.id
}

#[tokio::test]
async fn test_user_crud() {
    let db = setup_test_db().await;

    // 1. Create
    let created = user_service::create_user(
        &db,
        UserDto {
            cpf: "12345678901".to_string(),
            name: "Maria Souza".to_string(),
            phone: None,
            email: "maria@example.com".to_string(),
            password: "segredo".to_string(),
            photo: None,
        },
    )
    .await
    .expect("Failed to create user");
    assert_eq!(created.cpf, "12345678901");
    assert!(created.tents.is_empty());

    // 2. Read
    let fetched = user_service::get_user(&db, "12345678901")
        .await
        .expect("get_user failed")
        .expect("user should exist");
    assert_eq!(fetched.name, "Maria Souza");

    // 3. Update
    let updated = user_service::update_user(
        &db,
        "12345678901",
        UserDto {
            cpf: "12345678901".to_string(),
            name: "Maria S. Lima".to_string(),
            phone: Some("11 98888-7777".to_string()),
            email: "maria@example.com".to_string(),
            password: "segredo".to_string(),
            photo: None,
        },
    )
    .await
    .expect("update_user failed");
    assert_eq!(updated.name, "Maria S. Lima");
    assert_eq!(updated.phone.as_deref(), Some("11 98888-7777"));

    // 4. List
    let all = user_service::list_users(&db).await.expect("list failed");
    assert_eq!(all.len(), 1);

    // 5. Delete
    user_service::delete_user(&db, "12345678901")
        .await
        .expect("delete_user failed");
    let gone = user_service::get_user(&db, "12345678901")
        .await
        .expect("get_user failed");
    assert!(gone.is_none());
}

#[tokio::test]
async fn test_user_create_rejects_empty_cpf() {
    let db = setup_test_db().await;

    let result = user_service::create_user(
        &db,
        UserDto {
            cpf: "   ".to_string(),
            name: "Nobody".to_string(),
            phone: None,
            email: "nobody@example.com".to_string(),
            password: "x".to_string(),
            photo: None,
        },
    )
    .await;

    assert!(matches!(result, Err(ServiceError::Validation(_))));
    let count = feira::models::user::Entity::find()
        .count(&db)
        .await
        .expect("count failed");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_user_photo_roundtrips_as_base64() {
    let db = setup_test_db().await;

    let created = user_service::create_user(
        &db,
        UserDto {
            cpf: "10101010101".to_string(),
            name: "Foto".to_string(),
            phone: None,
            email: "foto@example.com".to_string(),
            password: "x".to_string(),
            photo: Some(feira::utils::encode_blob(&[1u8, 2, 3, 4])),
        },
    )
    .await
    .expect("create failed");

    let photo = created.photo.expect("photo should be present");
    assert_eq!(feira::utils::decode_blob(&photo).unwrap(), vec![1, 2, 3, 4]);

    // Stored as raw bytes, not base64 text
    let stored = feira::models::user::Entity::find_by_id("10101010101".to_string())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.photo, Some(vec![1, 2, 3, 4]));
}

#[tokio::test]
async fn test_user_detail_embeds_owned_tents() {
    let db = setup_test_db().await;
    create_test_user(&db, "99988877766", "vendor@example.com").await;
    create_test_tent(&db, "99988877766", "Barraca Um").await;
    create_test_tent(&db, "99988877766", "Barraca Dois").await;

    let user = user_service::get_user(&db, "99988877766")
        .await
        .expect("get_user failed")
        .expect("user should exist");
    assert_eq!(user.tents.len(), 2);

    let all = user_service::list_users(&db).await.expect("list failed");
    assert_eq!(all[0].tents.len(), 2);
}

#[tokio::test]
async fn test_login_plaintext_comparison() {
    let db = setup_test_db().await;
    create_test_user(&db, "12312312312", "login@example.com").await;

    let ok = user_service::validate_login(&db, "login@example.com", "123456")
        .await
        .expect("login query failed");
    assert!(ok.is_some());
    assert_eq!(ok.unwrap().cpf, "12312312312");

    let wrong_password = user_service::validate_login(&db, "login@example.com", "wrong")
        .await
        .expect("login query failed");
    assert!(wrong_password.is_none());

    let unknown_email = user_service::validate_login(&db, "ghost@example.com", "123456")
        .await
        .expect("login query failed");
    assert!(unknown_email.is_none());
}

#[tokio::test]
async fn test_product_crud() {
    let db = setup_test_db().await;

    let created = product_service::create_product(
        &db,
        feira::models::product::ProductDto {
            id: None,
            name: "Tomate".to_string(),
            price: 4.5,
            description: Some("Tomate orgânico".to_string()),
            image: None,
            tent_id: None,
        },
    )
    .await
    .expect("create_product failed");
    let id = created.id.expect("created product should have an id");

    let fetched = product_service::get_product(&db, id)
        .await
        .expect("get failed")
        .expect("product should exist");
    assert_eq!(fetched.name, "Tomate");

    let updated = product_service::update_product(
        &db,
        id,
        feira::models::product::ProductDto {
            id: None,
            name: "Tomate Italiano".to_string(),
            price: 5.0,
            description: None,
            image: None,
            tent_id: None,
        },
    )
    .await
    .expect("update failed");
    assert_eq!(updated.name, "Tomate Italiano");

    product_service::delete_product(&db, id)
        .await
        .expect("delete failed");
    assert!(
        product_service::get_product(&db, id)
            .await
            .expect("get failed")
            .is_none()
    );
}

#[tokio::test]
async fn test_product_create_seeds_initial_stock() {
    let db = setup_test_db().await;
    create_test_user(&db, "55544433322", "tentowner@example.com").await;
    let tent_id = create_test_tent(&db, "55544433322", "Hortifruti").await;

    let created = product_service::create_product(
        &db,
        feira::models::product::ProductDto {
            id: None,
            name: "Alface".to_string(),
            price: 2.0,
            description: None,
            image: None,
            tent_id: Some(tent_id),
        },
    )
    .await
    .expect("create_product failed");

    let stock = feira::models::stock::Entity::find()
        .filter(feira::models::stock::Column::ProductId.eq(created.id.unwrap()))
        .filter(feira::models::stock::Column::TentId.eq(tent_id))
        .one(&db)
        .await
        .expect("stock query failed")
        .expect("stock row should have been created");
    assert_eq!(stock.quantity, 1);
}

#[tokio::test]
async fn test_product_not_found_on_update_and_delete() {
    let db = setup_test_db().await;

    let update = product_service::update_product(
        &db,
        999,
        feira::models::product::ProductDto {
            id: None,
            name: "Ghost".to_string(),
            price: 1.0,
            description: None,
            image: None,
            tent_id: None,
        },
    )
    .await;
    assert!(matches!(update, Err(ServiceError::NotFound)));

    let delete = product_service::delete_product(&db, 999).await;
    assert!(matches!(delete, Err(ServiceError::NotFound)));
}
