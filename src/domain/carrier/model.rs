//! Carrier domain entity

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::query::CarrierField;

/// Operational status of a freight carrier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CarrierStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl std::fmt::Display for CarrierStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
            Self::Suspended => write!(f, "Suspended"),
        }
    }
}

/// Kind of postal address
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressType {
    Home,
    Work,
    Billing,
    Shipping,
    Other,
}

/// Carrier identification code type (MC number, DOT number, SCAC, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdentificationCodeType {
    Iata,
    Icc,
    Imo,
    Mc,
    Scac,
    Usdot,
}

/// International postal address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Street address, P.O. box, company name, c/o
    pub line1: String,
    /// Apartment, suite, unit, building
    pub line2: Option<String>,
    /// Floor, bin, warehouse section, port number
    pub line3: Option<String>,
    /// City, town, village
    pub locality: String,
    /// State or province
    pub region: String,
    pub postal_code: String,
    /// ISO 3166 country code
    pub country: String,
    pub description: Option<String>,
    pub attention: Option<String>,
    #[serde(rename = "type")]
    pub address_type: AddressType,
}

/// Insurance policy held by a carrier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    /// Person or entity the policy is issued to
    pub policy_holder: String,
    pub policy_number: String,
    /// Insurance company name
    pub insurer: String,
    /// Cargo, Liability, ...
    pub insurance_type: String,
    /// Total coverage amount
    pub amount: f64,
    pub effective_date: NaiveDate,
    pub expiration_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentificationCode {
    #[serde(rename = "type")]
    pub code_type: IdentificationCodeType,
    pub code: String,
}

/// Freight carrier record
#[derive(Debug, Clone, PartialEq)]
pub struct Carrier {
    pub id: String,
    pub name: String,
    /// Doing business as
    pub dba: String,
    pub status: CarrierStatus,
    pub physical_address: Address,
    pub mailing_address: Address,
    pub insurance: Vec<Insurance>,
    pub identification_codes: Vec<IdentificationCode>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything needed to register a new carrier
#[derive(Debug, Clone)]
pub struct CarrierDraft {
    pub name: String,
    pub dba: String,
    pub status: CarrierStatus,
    pub physical_address: Address,
    pub mailing_address: Address,
    pub insurance: Vec<Insurance>,
    pub identification_codes: Vec<IdentificationCode>,
}

/// Partial update; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct CarrierPatch {
    pub name: Option<String>,
    pub dba: Option<String>,
    pub status: Option<CarrierStatus>,
    pub physical_address: Option<Address>,
    pub mailing_address: Option<Address>,
    pub insurance: Option<Vec<Insurance>>,
    pub identification_codes: Option<Vec<IdentificationCode>>,
}

impl Carrier {
    /// Build a new carrier with a fresh identifier and timestamps.
    pub fn register(draft: CarrierDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: draft.name,
            dba: draft.dba,
            status: draft.status,
            physical_address: draft.physical_address,
            mailing_address: draft.mailing_address,
            insurance: draft.insurance,
            identification_codes: draft.identification_codes,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, patch: CarrierPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(dba) = patch.dba {
            self.dba = dba;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(address) = patch.physical_address {
            self.physical_address = address;
        }
        if let Some(address) = patch.mailing_address {
            self.mailing_address = address;
        }
        if let Some(insurance) = patch.insurance {
            self.insurance = insurance;
        }
        if let Some(codes) = patch.identification_codes {
            self.identification_codes = codes;
        }
        self.updated_at = Utc::now();
    }

    /// Keep only the requested attributes. The identifier is always kept.
    pub fn project(&self, fields: &[CarrierField]) -> ProjectedCarrier {
        let wants = |field: CarrierField| fields.contains(&field);
        ProjectedCarrier {
            id: self.id.clone(),
            name: wants(CarrierField::Name).then(|| self.name.clone()),
            dba: wants(CarrierField::Dba).then(|| self.dba.clone()),
            status: wants(CarrierField::Status).then_some(self.status),
            physical_address: wants(CarrierField::PhysicalAddress)
                .then(|| self.physical_address.clone()),
            mailing_address: wants(CarrierField::MailingAddress)
                .then(|| self.mailing_address.clone()),
            insurance: wants(CarrierField::Insurance).then(|| self.insurance.clone()),
            identification_codes: wants(CarrierField::IdentificationCodes)
                .then(|| self.identification_codes.clone()),
            created_at: wants(CarrierField::CreatedAt).then_some(self.created_at),
            updated_at: wants(CarrierField::UpdatedAt).then_some(self.updated_at),
        }
    }
}

/// A carrier as returned by a listing: only projected attributes are set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ProjectedCarrier {
    pub id: String,
    pub name: Option<String>,
    pub dba: Option<String>,
    pub status: Option<CarrierStatus>,
    pub physical_address: Option<Address>,
    pub mailing_address: Option<Address>,
    pub insurance: Option<Vec<Insurance>>,
    pub identification_codes: Option<Vec<IdentificationCode>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Carrier> for ProjectedCarrier {
    fn from(c: Carrier) -> Self {
        Self {
            id: c.id,
            name: Some(c.name),
            dba: Some(c.dba),
            status: Some(c.status),
            physical_address: Some(c.physical_address),
            mailing_address: Some(c.mailing_address),
            insurance: Some(c.insurance),
            identification_codes: Some(c.identification_codes),
            created_at: Some(c.created_at),
            updated_at: Some(c.updated_at),
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn address(line1: &str) -> Address {
        Address {
            line1: line1.into(),
            line2: None,
            line3: None,
            locality: "Columbus".into(),
            region: "Ohio".into(),
            postal_code: "43215".into(),
            country: "US".into(),
            description: None,
            attention: None,
            address_type: AddressType::Work,
        }
    }

    pub fn draft(name: &str) -> CarrierDraft {
        CarrierDraft {
            name: name.into(),
            dba: String::new(),
            status: CarrierStatus::Active,
            physical_address: address("100 Main St"),
            mailing_address: address("PO Box 42"),
            insurance: vec![Insurance {
                policy_holder: name.into(),
                policy_number: "POL-001".into(),
                insurer: "Acme Mutual".into(),
                insurance_type: "Cargo".into(),
                amount: 100_000.0,
                effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                expiration_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            }],
            identification_codes: vec![IdentificationCode {
                code_type: IdentificationCodeType::Mc,
                code: "MC123456".into(),
            }],
        }
    }

    pub fn carrier(name: &str) -> Carrier {
        Carrier::register(draft(name))
    }
}
