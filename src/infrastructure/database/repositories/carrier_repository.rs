//! SeaORM implementation of CarrierRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{error, info, warn};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryOrder, QuerySelect, Set, Statement,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::domain::{
    Carrier, CarrierField, CarrierPage, CarrierQuery, CarrierRepository, CarrierSortField,
    CarrierStatus, DomainError, DomainResult, ProjectedCarrier,
};
use crate::infrastructure::database::entities::carrier;

pub struct SeaOrmCarrierRepository {
    db: DatabaseConnection,
}

impl SeaOrmCarrierRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn db_err(e: DbErr) -> DomainError {
    error!("Database error: {}", e);
    DomainError::Storage(format!("Database error: {}", e))
}

fn to_json<T: Serialize>(value: &T) -> DomainResult<String> {
    serde_json::to_string(value).map_err(|e| DomainError::Storage(format!("Encode error: {}", e)))
}

fn from_json<T: DeserializeOwned>(raw: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(raw)
}

fn from_json_opt<T: DeserializeOwned>(raw: Option<String>) -> Result<Option<T>, serde_json::Error> {
    raw.as_deref().map(from_json).transpose()
}

fn status_from_str(raw: &str) -> Option<CarrierStatus> {
    match raw {
        "Active" => Some(CarrierStatus::Active),
        "Inactive" => Some(CarrierStatus::Inactive),
        "Suspended" => Some(CarrierStatus::Suspended),
        _ => None,
    }
}

fn entity_to_domain(m: carrier::Model) -> Result<Carrier, serde_json::Error> {
    Ok(Carrier {
        physical_address: from_json(&m.physical_address)?,
        mailing_address: from_json(&m.mailing_address)?,
        insurance: from_json(&m.insurance)?,
        identification_codes: from_json(&m.identification_codes)?,
        id: m.id,
        name: m.name,
        dba: m.dba,
        status: m.status.into(),
        created_at: m.created_at,
        updated_at: m.updated_at,
    })
}

fn domain_to_active(c: &Carrier) -> DomainResult<carrier::ActiveModel> {
    Ok(carrier::ActiveModel {
        id: Set(c.id.clone()),
        name: Set(c.name.clone()),
        dba: Set(c.dba.clone()),
        status: Set(c.status.into()),
        physical_address: Set(to_json(&c.physical_address)?),
        mailing_address: Set(to_json(&c.mailing_address)?),
        insurance: Set(to_json(&c.insurance)?),
        identification_codes: Set(to_json(&c.identification_codes)?),
        created_at: Set(c.created_at),
        updated_at: Set(c.updated_at),
    })
}

/// Listing row. Columns left out of the projection come back as NULL.
#[derive(Debug, FromQueryResult)]
struct CarrierRow {
    id: String,
    name: Option<String>,
    dba: Option<String>,
    status: Option<String>,
    physical_address: Option<String>,
    mailing_address: Option<String>,
    insurance: Option<String>,
    identification_codes: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl CarrierRow {
    fn into_projected(self) -> Result<ProjectedCarrier, String> {
        let status = match self.status.as_deref() {
            Some(raw) => Some(status_from_str(raw).ok_or_else(|| format!("unknown status {raw}"))?),
            None => None,
        };

        let decode = |e: serde_json::Error| e.to_string();
        Ok(ProjectedCarrier {
            id: self.id,
            name: self.name,
            dba: self.dba,
            status,
            physical_address: from_json_opt(self.physical_address).map_err(decode)?,
            mailing_address: from_json_opt(self.mailing_address).map_err(decode)?,
            insurance: from_json_opt(self.insurance).map_err(decode)?,
            identification_codes: from_json_opt(self.identification_codes).map_err(decode)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[async_trait]
impl CarrierRepository for SeaOrmCarrierRepository {
    async fn find_page(&self, query: &CarrierQuery) -> DomainResult<CarrierPage> {
        let mut select = carrier::Entity::find().select_only();
        for field in CarrierField::ALL {
            let column = carrier::Column::for_field(field);
            select = if query.projects(field) {
                select.column(column)
            } else {
                select.column_as(Expr::cust("NULL"), field.storage_key())
            };
        }

        select = match query.sort_by {
            CarrierSortField::Id => select.order_by_asc(carrier::Column::Id),
            CarrierSortField::Name => select
                .order_by_asc(carrier::Column::Name)
                .order_by_asc(carrier::Column::Id),
        };

        let rows = select
            .limit(query.page_size.get())
            .offset(query.offset())
            .into_model::<CarrierRow>()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let total = carrier::Entity::find()
            .count(&self.db)
            .await
            .map_err(db_err)?;

        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            let id = row.id.clone();
            match row.into_projected() {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping carrier {} that failed to decode: {}", id, e),
            }
        }

        Ok(CarrierPage { records, total })
    }

    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Carrier>> {
        let model = carrier::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        model
            .map(|m| {
                entity_to_domain(m).map_err(|e| {
                    error!("Carrier {} failed to decode: {}", id, e);
                    DomainError::Storage(format!("Decode error: {}", e))
                })
            })
            .transpose()
    }

    async fn save(&self, carrier: Carrier) -> DomainResult<()> {
        let model = domain_to_active(&carrier)?;
        model.insert(&self.db).await.map_err(db_err)?;
        info!("Carrier {} saved", carrier.id);
        Ok(())
    }

    async fn update(&self, carrier: Carrier) -> DomainResult<()> {
        let model = domain_to_active(&carrier)?;
        match model.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(DomainError::carrier_not_found(carrier.id)),
            Err(e) => Err(db_err(e)),
        }
    }

    async fn delete(&self, id: &str) -> DomainResult<()> {
        let result = carrier::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        if result.rows_affected > 0 {
            info!("Carrier {} deleted", id);
        }
        Ok(())
    }

    async fn ping(&self) -> DomainResult<()> {
        self.db
            .execute(Statement::from_string(
                self.db.get_database_backend(),
                "SELECT 1".to_string(),
            ))
            .await
            .map_err(db_err)?;
        Ok(())
    }
}
