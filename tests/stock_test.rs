//! Stock upsert semantics: one row per (product, tent) key, latest
//! quantity wins, reads join product details.

use feira::db;
use feira::models::stock::StockDto;
use feira::services::{ServiceError, stock_service};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_test_user(db: &DatabaseConnection, cpf: &str) {
    let user = feira::models::user::ActiveModel {
        cpf: Set(cpf.to_string()),
        name: Set("Dono".to_string()),
        phone: Set(None),
        email: Set(format!("{}@example.com", cpf)),
        password: Set("123456".to_string()),
        photo: Set(None),
    };
    user.insert(db).await.expect("Failed to create user");
}

async fn create_test_tent(db: &DatabaseConnection, owner_cpf: &str) -> i32 {
    let tent = feira::models::tent::ActiveModel {
        owner_cpf: Set(owner_cpf.to_string()),
        name: Set("Barraca".to_string()),
        license: Set(None),
        ..Default::default()
    };
    tent.insert(db).await.expect("Failed to create tent").id
}

async fn create_test_product(db: &DatabaseConnection, name: &str, price: f64) -> i32 {
    let product = feira::models::product::ActiveModel {
        name: Set(name.to_string()),
        price: Set(price),
        description: Set(Some("fresquinho".to_string())),
        image: Set(None),
        tent_id: Set(None),
        ..Default::default()
    };
    product.insert(db).await.expect("Failed to create product").id
}

#[tokio::test]
async fn test_upsert_twice_keeps_single_row_with_latest_quantity() {
    let db = setup_test_db().await;
    create_test_user(&db, "12345678900").await;
    let tent_id = create_test_tent(&db, "12345678900").await;
    let product_id = create_test_product(&db, "Tomate", 4.5).await;

    stock_service::save_stock(
        &db,
        &StockDto {
            product_id,
            tent_id,
            quantity: 10,
        },
    )
    .await
    .expect("first save failed");

    stock_service::save_stock(
        &db,
        &StockDto {
            product_id,
            tent_id,
            quantity: 3,
        },
    )
    .await
    .expect("second save failed");

    let rows = feira::models::stock::Entity::find()
        .all(&db)
        .await
        .expect("query failed");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].quantity, 3);
}

#[tokio::test]
async fn test_same_product_in_two_tents_keeps_two_rows() {
    let db = setup_test_db().await;
    create_test_user(&db, "12345678900").await;
    let tent_a = create_test_tent(&db, "12345678900").await;
    let tent_b = create_test_tent(&db, "12345678900").await;
    let product_id = create_test_product(&db, "Tomate", 4.5).await;

    for (tent_id, quantity) in [(tent_a, 5i16), (tent_b, 8)] {
        stock_service::save_stock(
            &db,
            &StockDto {
                product_id,
                tent_id,
                quantity,
            },
        )
        .await
        .expect("save failed");
    }

    let count = feira::models::stock::Entity::find()
        .count(&db)
        .await
        .expect("count failed");
    assert_eq!(count, 2);
}

#[tokio::test]
async fn test_list_by_tent_joins_product_details() {
    let db = setup_test_db().await;
    create_test_user(&db, "12345678900").await;
    let tent_id = create_test_tent(&db, "12345678900").await;
    let other_tent = create_test_tent(&db, "12345678900").await;
    let p1 = create_test_product(&db, "Tomate", 4.5).await;
    let p2 = create_test_product(&db, "Alface", 2.0).await;

    for (product_id, quantity) in [(p1, 10i16), (p2, 4)] {
        stock_service::save_stock(
            &db,
            &StockDto {
                product_id,
                tent_id,
                quantity,
            },
        )
        .await
        .expect("save failed");
    }
    stock_service::save_stock(
        &db,
        &StockDto {
            product_id: p1,
            tent_id: other_tent,
            quantity: 99,
        },
    )
    .await
    .expect("save failed");

    let mut rows = stock_service::list_by_tent(&db, tent_id)
        .await
        .expect("list failed");
    rows.sort_by(|a, b| a.product_name.cmp(&b.product_name));

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].product_name, "Alface");
    assert_eq!(rows[0].quantity, 4);
    assert_eq!(rows[1].product_name, "Tomate");
    assert_eq!(rows[1].product_price, 4.5);
    assert_eq!(rows[1].product_description.as_deref(), Some("fresquinho"));
}

#[tokio::test]
async fn test_delete_stock_by_composite_key() {
    let db = setup_test_db().await;
    create_test_user(&db, "12345678900").await;
    let tent_id = create_test_tent(&db, "12345678900").await;
    let product_id = create_test_product(&db, "Tomate", 4.5).await;

    stock_service::save_stock(
        &db,
        &StockDto {
            product_id,
            tent_id,
            quantity: 7,
        },
    )
    .await
    .expect("save failed");

    stock_service::delete_stock(&db, product_id, tent_id)
        .await
        .expect("delete failed");

    let count = feira::models::stock::Entity::find()
        .count(&db)
        .await
        .expect("count failed");
    assert_eq!(count, 0);

    let again = stock_service::delete_stock(&db, product_id, tent_id).await;
    assert!(matches!(again, Err(ServiceError::NotFound)));
}
