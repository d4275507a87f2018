use crate::entities::category::Entity as Category;
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "species")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category_name: String,
    pub common_name: String,
    pub scientific_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub genus: String,
    pub family: String,
    pub optimal_temperature_min: f64,
    pub optimal_temperature_max: f64,
    pub optimal_humidity: f64,
    pub optimal_ph: f64,
    pub water_requirement_per_litre: f64,
    pub nutrient_requirement_per_kg: f64,
    pub lifespan: i32,
    pub native_region: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Category",
        from = "crate::entities::species::Column::CategoryName",
        to = "crate::entities::category::Column::Category",
        on_update = "Cascade",
    )]
    Category,
    #[sea_orm(has_many = "crate::entities::sub_species::Entity")]
    SubSpecies,
}

impl Related<crate::entities::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<crate::entities::sub_species::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubSpecies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
