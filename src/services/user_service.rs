//! User Service - CRUD over CPF-keyed users plus login
//!
//! Login compares the plaintext password column. User responses embed the
//! tents owned by that CPF.

use sea_orm::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::models::tent::{self, Entity as Tent, TentDto};
use crate::models::user::{self, Entity as User, UserDto};
use crate::services::ServiceError;
use crate::utils;

#[derive(Debug, Serialize)]
pub struct UserWithTents {
    pub cpf: String,
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
    pub password: String,
    pub photo: Option<String>,
    pub tents: Vec<TentDto>,
}

fn with_tents(model: user::Model, tents: Vec<tent::Model>) -> UserWithTents {
    let dto = UserDto::from(model);
    UserWithTents {
        cpf: dto.cpf,
        name: dto.name,
        phone: dto.phone,
        email: dto.email,
        password: dto.password,
        photo: dto.photo,
        tents: tents.into_iter().map(TentDto::from).collect(),
    }
}

fn decode_photo(photo: Option<&str>) -> Result<Option<Vec<u8>>, ServiceError> {
    photo
        .map(|value| {
            utils::decode_blob(value)
                .map_err(|_| ServiceError::Validation("photo is not valid base64".to_string()))
        })
        .transpose()
}

pub async fn create_user(db: &DatabaseConnection, dto: UserDto) -> Result<UserWithTents, ServiceError> {
    if dto.cpf.trim().is_empty() {
        return Err(ServiceError::Validation("cpf must not be empty".to_string()));
    }
    let photo = decode_photo(dto.photo.as_deref())?;

    let saved = user::ActiveModel {
        cpf: Set(dto.cpf),
        name: Set(dto.name),
        phone: Set(dto.phone),
        email: Set(dto.email),
        password: Set(dto.password),
        photo: Set(photo),
    }
    .insert(db)
    .await?;

    Ok(with_tents(saved, Vec::new()))
}

pub async fn get_user(
    db: &DatabaseConnection,
    cpf: &str,
) -> Result<Option<UserWithTents>, ServiceError> {
    let Some(model) = User::find_by_id(cpf.to_string()).one(db).await? else {
        return Ok(None);
    };

    let tents = Tent::find()
        .filter(tent::Column::OwnerCpf.eq(cpf))
        .all(db)
        .await?;

    Ok(Some(with_tents(model, tents)))
}

/// List all users, each with the tents they own (one batched tent query).
pub async fn list_users(db: &DatabaseConnection) -> Result<Vec<UserWithTents>, ServiceError> {
    let users = User::find().all(db).await?;

    let cpfs: Vec<String> = users.iter().map(|u| u.cpf.clone()).collect();

    let mut tents_by_owner: HashMap<String, Vec<tent::Model>> = HashMap::new();
    if !cpfs.is_empty() {
        let tents = Tent::find()
            .filter(tent::Column::OwnerCpf.is_in(cpfs))
            .all(db)
            .await?;
        for t in tents {
            tents_by_owner.entry(t.owner_cpf.clone()).or_default().push(t);
        }
    }

    Ok(users
        .into_iter()
        .map(|model| {
            let tents = tents_by_owner.remove(&model.cpf).unwrap_or_default();
            with_tents(model, tents)
        })
        .collect())
}

/// Update a user's fields; the CPF itself is immutable.
pub async fn update_user(
    db: &DatabaseConnection,
    cpf: &str,
    dto: UserDto,
) -> Result<UserWithTents, ServiceError> {
    let photo = decode_photo(dto.photo.as_deref())?;

    let updated = User::update_many()
        .set(user::ActiveModel {
            name: Set(dto.name),
            phone: Set(dto.phone),
            email: Set(dto.email),
            password: Set(dto.password),
            photo: Set(photo),
            ..Default::default()
        })
        .filter(user::Column::Cpf.eq(cpf))
        .exec(db)
        .await?;
    if updated.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }

    get_user(db, cpf).await?.ok_or(ServiceError::NotFound)
}

pub async fn delete_user(db: &DatabaseConnection, cpf: &str) -> Result<(), ServiceError> {
    let deleted = User::delete_many()
        .filter(user::Column::Cpf.eq(cpf))
        .exec(db)
        .await?;
    if deleted.rows_affected == 0 {
        return Err(ServiceError::NotFound);
    }
    Ok(())
}

/// Validate a login by email + plaintext password comparison. Returns the
/// user on a match, None otherwise (mapped to 401 by the handler).
pub async fn validate_login(
    db: &DatabaseConnection,
    email: &str,
    password: &str,
) -> Result<Option<UserWithTents>, ServiceError> {
    let Some(model) = User::find()
        .filter(user::Column::Email.eq(email))
        .filter(user::Column::Password.eq(password))
        .one(db)
        .await?
    else {
        return Ok(None);
    };

    let tents = Tent::find()
        .filter(tent::Column::OwnerCpf.eq(model.cpf.clone()))
        .all(db)
        .await?;

    Ok(Some(with_tents(model, tents)))
}
