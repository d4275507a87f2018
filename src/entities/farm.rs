use crate::entities::user::Entity as User;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "farms")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(indexed)]
    pub user_id: i32,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub farm_type: FarmType,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "User",
        from = "crate::entities::farm::Column::UserId",
        to = "crate::entities::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade",
    )]
    User,
    #[sea_orm(has_many = "crate::entities::farm_species::Entity")]
    FarmSpecies,
}

impl Related<crate::entities::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<crate::entities::farm_species::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FarmSpecies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, PartialEq, Debug, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(
    enum_name = "farm_type",
    db_type = "String(StringLen::N(255))",
    rs_type = "String"
)]
#[serde(rename_all = "UPPERCASE")]
pub enum FarmType {
    #[sea_orm(string_value = "FARM")]
    Farm,
    #[sea_orm(string_value = "ORCHARD")]
    Orchard,
    #[sea_orm(string_value = "GARDEN")]
    Garden,
}

impl FromStr for FarmType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FARM" => Ok(Self::Farm),
            "ORCHARD" => Ok(Self::Orchard),
            "GARDEN" => Ok(Self::Garden),
            _ => Err(format!("Invalid farm type: {}", s)),
        }
    }
}
