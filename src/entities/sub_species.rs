use crate::entities::species::Entity as Species;
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "sub_species")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub species_id: i32,
    pub name: String,
    pub common_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub growth_rate: String,
    #[sea_orm(column_type = "Text")]
    pub unique_traits: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Species",
        from = "crate::entities::sub_species::Column::SpeciesId",
        to = "crate::entities::species::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade",
    )]
    Species,
}

impl Related<crate::entities::species::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Species.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
