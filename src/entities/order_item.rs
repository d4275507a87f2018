use crate::entities::farm_species::Entity as FarmSpecies;
use crate::entities::order::Entity as Order;
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "order_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub order_id: i32,
    pub farm_species_id: i32,
    pub quantity: i32,
    pub price: f64,
    pub total_price: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Order",
        from = "crate::entities::order_item::Column::OrderId",
        to = "crate::entities::order::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade",
    )]
    Order,
    #[sea_orm(
        belongs_to = "FarmSpecies",
        from = "crate::entities::order_item::Column::FarmSpeciesId",
        to = "crate::entities::farm_species::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade",
    )]
    FarmSpecies,
}

impl Related<crate::entities::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl Related<crate::entities::farm_species::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FarmSpecies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
