use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // Users are keyed by their CPF (caller-supplied), everything else uses
    // store-generated integer ids.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS users (
            cpf TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            phone TEXT,
            email TEXT NOT NULL,
            password TEXT NOT NULL,
            photo BLOB
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS tents (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            owner_cpf TEXT NOT NULL,
            name TEXT NOT NULL,
            license BLOB,
            FOREIGN KEY (owner_cpf) REFERENCES users(cpf)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            price REAL NOT NULL,
            description TEXT,
            image BLOB,
            tent_id INTEGER,
            FOREIGN KEY (tent_id) REFERENCES tents(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    // One row per (product, tent) pair; writes go through the upsert.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS stock (
            product_id INTEGER NOT NULL,
            tent_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL,
            PRIMARY KEY (product_id, tent_id),
            FOREIGN KEY (product_id) REFERENCES products(id),
            FOREIGN KEY (tent_id) REFERENCES tents(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS sales (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sale_date TEXT NOT NULL,
            tent_id INTEGER NOT NULL,
            buyer_cpf TEXT NOT NULL,
            FOREIGN KEY (tent_id) REFERENCES tents(id),
            FOREIGN KEY (buyer_cpf) REFERENCES users(cpf)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS sale_items (
            sale_id INTEGER NOT NULL,
            product_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL,
            PRIMARY KEY (sale_id, product_id),
            FOREIGN KEY (sale_id) REFERENCES sales(id),
            FOREIGN KEY (product_id) REFERENCES products(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_sale_items_sale_id ON sale_items(sale_id)".to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS reservations (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            holder_cpf TEXT NOT NULL,
            reservation_date TEXT NOT NULL,
            status TEXT NOT NULL,
            FOREIGN KEY (holder_cpf) REFERENCES users(cpf)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS reservation_items (
            reservation_id INTEGER NOT NULL,
            product_id INTEGER NOT NULL,
            quantity INTEGER NOT NULL,
            unit_price REAL NOT NULL,
            PRIMARY KEY (reservation_id, product_id),
            FOREIGN KEY (reservation_id) REFERENCES reservations(id),
            FOREIGN KEY (product_id) REFERENCES products(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_reservation_items_reservation_id ON reservation_items(reservation_id)"
            .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS payments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            sale_id INTEGER,
            buyer_cpf TEXT NOT NULL,
            tent_id INTEGER NOT NULL,
            method TEXT NOT NULL,
            payment_date TEXT,
            FOREIGN KEY (sale_id) REFERENCES sales(id),
            FOREIGN KEY (buyer_cpf) REFERENCES users(cpf),
            FOREIGN KEY (tent_id) REFERENCES tents(id)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS comments (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            product_id INTEGER NOT NULL,
            user_cpf TEXT NOT NULL,
            posted_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (product_id) REFERENCES products(id),
            FOREIGN KEY (user_cpf) REFERENCES users(cpf)
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_comments_product_id ON comments(product_id)".to_owned(),
    ))
    .await?;

    Ok(())
}
