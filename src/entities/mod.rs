pub mod category;
pub mod farm;
pub mod farm_species;
pub mod order;
pub mod order_item;
pub mod phone;
pub mod species;
pub mod sub_species;
pub mod transaction;
pub mod user;

use sea_orm::{ConnectionTrait, DatabaseConnection, Schema};

use crate::entities::{
    category::Entity as Category, farm::Entity as Farm, farm_species::Entity as FarmSpecies,
    order::Entity as Order, order_item::Entity as OrderItem, phone::Entity as Phone,
    species::Entity as Species, sub_species::Entity as SubSpecies,
    transaction::Entity as Transaction, user::Entity as User,
};

/// Creates every table from the entity definitions. Parents first, so the
/// foreign keys with their cascade rules resolve.
pub async fn setup_schema(db: &DatabaseConnection) {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut tables = vec![
        schema.create_table_from_entity(Phone),
        schema.create_table_from_entity(Category),
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Species),
        schema.create_table_from_entity(SubSpecies),
        schema.create_table_from_entity(Farm),
        schema.create_table_from_entity(FarmSpecies),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderItem),
        schema.create_table_from_entity(Transaction),
    ];

    for table in tables.iter_mut() {
        db.execute(backend.build(table.if_not_exists()))
            .await
            .expect("Failed to create table schema");
    }
}
