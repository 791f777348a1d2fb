use sea_orm::sea_query::OnConflict;
use sea_orm::*;

use crate::models::{product, stock, tent, user};

pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    // 1. Create Users
    let vendors = vec![
        ("11122233344", "Maria Souza", "maria@feira.dev"),
        ("55566677788", "João Lima", "joao@feira.dev"),
    ];

    for (cpf, name, email) in vendors {
        let u = user::ActiveModel {
            cpf: Set(cpf.to_owned()),
            name: Set(name.to_owned()),
            phone: Set(None),
            email: Set(email.to_owned()),
            password: Set("123456".to_owned()),
            photo: Set(None),
        };
        user::Entity::insert(u)
            .on_conflict(
                OnConflict::column(user::Column::Cpf)
                    .do_nothing()
                    .to_owned(),
            )
            .exec(db)
            .await?;
    }

    // 2. Create Tents
    let tents = vec![
        ("11122233344", "Barraca da Maria"),
        ("55566677788", "Hortifruti do João"),
    ];

    let mut tent_ids = Vec::new();
    for (owner, name) in tents {
        let t = tent::ActiveModel {
            owner_cpf: Set(owner.to_owned()),
            name: Set(name.to_owned()),
            license: Set(None),
            ..Default::default()
        };
        let res = tent::Entity::insert(t).exec(db).await?;
        tent_ids.push(res.last_insert_id);
    }

    // 3. Create Products with starting stock
    let products = vec![
        ("Tomate", 4.50, tent_ids[0], 30i16),
        ("Alface", 2.00, tent_ids[0], 15),
        ("Queijo Minas", 28.00, tent_ids[1], 8),
    ];

    for (name, price, tent_id, quantity) in products {
        let p = product::ActiveModel {
            name: Set(name.to_owned()),
            price: Set(price),
            description: Set(None),
            image: Set(None),
            tent_id: Set(Some(tent_id)),
            ..Default::default()
        };
        let res = product::Entity::insert(p).exec(db).await?;

        let s = stock::ActiveModel {
            product_id: Set(res.last_insert_id),
            tent_id: Set(tent_id),
            quantity: Set(quantity),
        };
        stock::Entity::insert(s)
            .on_conflict(
                OnConflict::columns([stock::Column::ProductId, stock::Column::TentId])
                    .update_column(stock::Column::Quantity)
                    .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
    }

    Ok(())
}
