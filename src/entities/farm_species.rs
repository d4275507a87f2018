use crate::entities::farm::Entity as Farm;
use crate::entities::sub_species::Entity as SubSpecies;
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "farm_species")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub farm_id: i32,
    pub sub_species_id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub price: f64,
    pub available_quantity: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Farm",
        from = "crate::entities::farm_species::Column::FarmId",
        to = "crate::entities::farm::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade",
    )]
    Farm,
    #[sea_orm(
        belongs_to = "SubSpecies",
        from = "crate::entities::farm_species::Column::SubSpeciesId",
        to = "crate::entities::sub_species::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade",
    )]
    SubSpecies,
    #[sea_orm(has_many = "crate::entities::order_item::Entity")]
    OrderItem,
}

impl Related<crate::entities::farm::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Farm.def()
    }
}

impl Related<crate::entities::sub_species::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubSpecies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
