//! Carrier entity for database
//!
//! Nested documents (addresses, insurance policies, identification codes) are
//! stored as JSON text columns.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

use crate::domain;

/// Carrier status column
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum CarrierStatus {
    #[sea_orm(string_value = "Active")]
    Active,
    #[sea_orm(string_value = "Inactive")]
    Inactive,
    #[sea_orm(string_value = "Suspended")]
    Suspended,
}

impl From<domain::CarrierStatus> for CarrierStatus {
    fn from(s: domain::CarrierStatus) -> Self {
        match s {
            domain::CarrierStatus::Active => Self::Active,
            domain::CarrierStatus::Inactive => Self::Inactive,
            domain::CarrierStatus::Suspended => Self::Suspended,
        }
    }
}

impl From<CarrierStatus> for domain::CarrierStatus {
    fn from(s: CarrierStatus) -> Self {
        match s {
            CarrierStatus::Active => Self::Active,
            CarrierStatus::Inactive => Self::Inactive,
            CarrierStatus::Suspended => Self::Suspended,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "carriers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub dba: String,
    pub status: CarrierStatus,
    /// JSON `Address`
    #[sea_orm(column_type = "Text")]
    pub physical_address: String,
    /// JSON `Address`
    #[sea_orm(column_type = "Text")]
    pub mailing_address: String,
    /// JSON array of `Insurance`
    #[sea_orm(column_type = "Text")]
    pub insurance: String,
    /// JSON array of `IdentificationCode`
    #[sea_orm(column_type = "Text")]
    pub identification_codes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Column {
    /// Column holding a listable carrier attribute
    pub fn for_field(field: domain::CarrierField) -> Self {
        match field {
            domain::CarrierField::Id => Self::Id,
            domain::CarrierField::Name => Self::Name,
            domain::CarrierField::Dba => Self::Dba,
            domain::CarrierField::Status => Self::Status,
            domain::CarrierField::PhysicalAddress => Self::PhysicalAddress,
            domain::CarrierField::MailingAddress => Self::MailingAddress,
            domain::CarrierField::Insurance => Self::Insurance,
            domain::CarrierField::IdentificationCodes => Self::IdentificationCodes,
            domain::CarrierField::CreatedAt => Self::CreatedAt,
            domain::CarrierField::UpdatedAt => Self::UpdatedAt,
        }
    }
}
