//! Customer database entity for SeaORM.

use sea_orm::entity::prelude::*;

use crate::domain::Customer;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub surname: String,
    pub email: String,
    pub date_of_birth: Date,
    pub premium_user: bool,
    pub username: String,
    pub address: String,
    pub postal_code: String,
    pub city: String,
    pub country: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl From<Model> for Customer {
    fn from(model: Model) -> Self {
        Customer {
            id: model.id,
            name: model.name,
            surname: model.surname,
            email: model.email,
            date_of_birth: model.date_of_birth,
            premium_user: model.premium_user,
            username: model.username,
            address: model.address,
            postal_code: model.postal_code,
            city: model.city,
            country: model.country,
        }
    }
}
