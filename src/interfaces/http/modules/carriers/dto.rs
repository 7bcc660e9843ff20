//! Carrier DTOs

use chrono::NaiveDate;
use serde::{de, Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

use crate::domain::{
    Address, AddressType, Carrier, CarrierDraft, CarrierPatch, CarrierQueryInput, CarrierStatus,
    IdentificationCode, IdentificationCodeType, Insurance, ProjectedCarrier,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum CarrierStatusDto {
    Active,
    Inactive,
    Suspended,
}

impl From<CarrierStatusDto> for CarrierStatus {
    fn from(s: CarrierStatusDto) -> Self {
        match s {
            CarrierStatusDto::Active => Self::Active,
            CarrierStatusDto::Inactive => Self::Inactive,
            CarrierStatusDto::Suspended => Self::Suspended,
        }
    }
}

impl From<CarrierStatus> for CarrierStatusDto {
    fn from(s: CarrierStatus) -> Self {
        match s {
            CarrierStatus::Active => Self::Active,
            CarrierStatus::Inactive => Self::Inactive,
            CarrierStatus::Suspended => Self::Suspended,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum AddressTypeDto {
    Home,
    Work,
    Billing,
    Shipping,
    Other,
}

impl From<AddressTypeDto> for AddressType {
    fn from(t: AddressTypeDto) -> Self {
        match t {
            AddressTypeDto::Home => Self::Home,
            AddressTypeDto::Work => Self::Work,
            AddressTypeDto::Billing => Self::Billing,
            AddressTypeDto::Shipping => Self::Shipping,
            AddressTypeDto::Other => Self::Other,
        }
    }
}

impl From<AddressType> for AddressTypeDto {
    fn from(t: AddressType) -> Self {
        match t {
            AddressType::Home => Self::Home,
            AddressType::Work => Self::Work,
            AddressType::Billing => Self::Billing,
            AddressType::Shipping => Self::Shipping,
            AddressType::Other => Self::Other,
        }
    }
}

/// Issuing authority of an identification code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdentificationCodeTypeDto {
    Iata,
    Icc,
    Imo,
    Mc,
    Scac,
    Usdot,
}

impl From<IdentificationCodeTypeDto> for IdentificationCodeType {
    fn from(t: IdentificationCodeTypeDto) -> Self {
        match t {
            IdentificationCodeTypeDto::Iata => Self::Iata,
            IdentificationCodeTypeDto::Icc => Self::Icc,
            IdentificationCodeTypeDto::Imo => Self::Imo,
            IdentificationCodeTypeDto::Mc => Self::Mc,
            IdentificationCodeTypeDto::Scac => Self::Scac,
            IdentificationCodeTypeDto::Usdot => Self::Usdot,
        }
    }
}

impl From<IdentificationCodeType> for IdentificationCodeTypeDto {
    fn from(t: IdentificationCodeType) -> Self {
        match t {
            IdentificationCodeType::Iata => Self::Iata,
            IdentificationCodeType::Icc => Self::Icc,
            IdentificationCodeType::Imo => Self::Imo,
            IdentificationCodeType::Mc => Self::Mc,
            IdentificationCodeType::Scac => Self::Scac,
            IdentificationCodeType::Usdot => Self::Usdot,
        }
    }
}

/// Postal address
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressDto {
    /// Street address, P.O. box, company name, c/o
    #[validate(length(min = 1, max = 100))]
    pub line1: String,
    #[validate(length(max = 100))]
    pub line2: Option<String>,
    #[validate(length(max = 100))]
    pub line3: Option<String>,
    /// City, town, village
    #[serde(alias = "local")]
    #[validate(length(min = 1, max = 100))]
    pub locality: String,
    /// State or province
    #[validate(length(min = 2, max = 100))]
    pub region: String,
    #[validate(length(min = 3, max = 11))]
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code
    #[validate(length(equal = 2))]
    pub country: String,
    #[validate(length(max = 200))]
    pub description: Option<String>,
    #[validate(length(max = 100))]
    pub attention: Option<String>,
    #[serde(rename = "type")]
    pub address_type: AddressTypeDto,
}

impl From<AddressDto> for Address {
    fn from(a: AddressDto) -> Self {
        Self {
            line1: a.line1,
            line2: a.line2,
            line3: a.line3,
            locality: a.locality,
            region: a.region,
            postal_code: a.postal_code,
            country: a.country,
            description: a.description,
            attention: a.attention,
            address_type: a.address_type.into(),
        }
    }
}

impl From<Address> for AddressDto {
    fn from(a: Address) -> Self {
        Self {
            line1: a.line1,
            line2: a.line2,
            line3: a.line3,
            locality: a.locality,
            region: a.region,
            postal_code: a.postal_code,
            country: a.country,
            description: a.description,
            attention: a.attention,
            address_type: a.address_type.into(),
        }
    }
}

fn validate_policy_period(insurance: &InsuranceDto) -> Result<(), ValidationError> {
    if insurance.expiration_date < insurance.effective_date {
        let mut err = ValidationError::new("policy_period");
        err.message = Some("expirationDate must not precede effectiveDate".into());
        return Err(err);
    }
    Ok(())
}

/// Insurance policy
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_policy_period"))]
pub struct InsuranceDto {
    #[validate(length(min = 1, max = 200))]
    pub policy_holder: String,
    #[validate(length(min = 1, max = 200))]
    pub policy_number: String,
    #[validate(length(min = 1, max = 200))]
    pub insurer: String,
    /// Cargo, Liability, ...
    #[validate(length(min = 1, max = 200))]
    pub insurance_type: String,
    #[validate(range(exclusive_min = 0.0))]
    pub amount: f64,
    pub effective_date: NaiveDate,
    pub expiration_date: NaiveDate,
}

impl From<InsuranceDto> for Insurance {
    fn from(i: InsuranceDto) -> Self {
        Self {
            policy_holder: i.policy_holder,
            policy_number: i.policy_number,
            insurer: i.insurer,
            insurance_type: i.insurance_type,
            amount: i.amount,
            effective_date: i.effective_date,
            expiration_date: i.expiration_date,
        }
    }
}

impl From<Insurance> for InsuranceDto {
    fn from(i: Insurance) -> Self {
        Self {
            policy_holder: i.policy_holder,
            policy_number: i.policy_number,
            insurer: i.insurer,
            insurance_type: i.insurance_type,
            amount: i.amount,
            effective_date: i.effective_date,
            expiration_date: i.expiration_date,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct IdentificationCodeDto {
    #[serde(rename = "type")]
    pub code_type: IdentificationCodeTypeDto,
    #[validate(length(min = 2, max = 50))]
    pub code: String,
}

impl From<IdentificationCodeDto> for IdentificationCode {
    fn from(c: IdentificationCodeDto) -> Self {
        Self {
            code_type: c.code_type.into(),
            code: c.code,
        }
    }
}

impl From<IdentificationCode> for IdentificationCodeDto {
    fn from(c: IdentificationCode) -> Self {
        Self {
            code_type: c.code_type.into(),
            code: c.code,
        }
    }
}

/// Carrier as returned by the API. Attributes left out of a listing's
/// `fields` projection are omitted.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CarrierDto {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Doing business as
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dba: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<CarrierStatusDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub physical_address: Option<AddressDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailing_address: Option<AddressDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub insurance: Option<Vec<InsuranceDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identification_codes: Option<Vec<IdentificationCodeDto>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<ProjectedCarrier> for CarrierDto {
    fn from(c: ProjectedCarrier) -> Self {
        Self {
            id: c.id,
            name: c.name,
            dba: c.dba,
            status: c.status.map(Into::into),
            physical_address: c.physical_address.map(Into::into),
            mailing_address: c.mailing_address.map(Into::into),
            insurance: c
                .insurance
                .map(|list| list.into_iter().map(Into::into).collect()),
            identification_codes: c
                .identification_codes
                .map(|list| list.into_iter().map(Into::into).collect()),
            created_at: c.created_at.map(|d| d.to_rfc3339()),
            updated_at: c.updated_at.map(|d| d.to_rfc3339()),
        }
    }
}

impl From<Carrier> for CarrierDto {
    fn from(c: Carrier) -> Self {
        ProjectedCarrier::from(c).into()
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCarrierRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub dba: String,
    /// Defaults to `Active`
    pub status: Option<CarrierStatusDto>,
    #[validate(nested)]
    pub physical_address: AddressDto,
    #[validate(nested)]
    pub mailing_address: AddressDto,
    #[validate(length(min = 1), nested)]
    pub insurance: Vec<InsuranceDto>,
    #[validate(length(min = 1), nested)]
    pub identification_codes: Vec<IdentificationCodeDto>,
}

impl From<CreateCarrierRequest> for CarrierDraft {
    fn from(r: CreateCarrierRequest) -> Self {
        Self {
            name: r.name,
            dba: r.dba,
            status: r.status.map(Into::into).unwrap_or_default(),
            physical_address: r.physical_address.into(),
            mailing_address: r.mailing_address.into(),
            insurance: r.insurance.into_iter().map(Into::into).collect(),
            identification_codes: r.identification_codes.into_iter().map(Into::into).collect(),
        }
    }
}

/// Partial update: omitted attributes keep their stored value
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCarrierRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(max = 100))]
    pub dba: Option<String>,
    pub status: Option<CarrierStatusDto>,
    #[validate(nested)]
    pub physical_address: Option<AddressDto>,
    #[validate(nested)]
    pub mailing_address: Option<AddressDto>,
    #[validate(length(min = 1), nested)]
    pub insurance: Option<Vec<InsuranceDto>>,
    #[validate(length(min = 1), nested)]
    pub identification_codes: Option<Vec<IdentificationCodeDto>>,
}

impl From<UpdateCarrierRequest> for CarrierPatch {
    fn from(r: UpdateCarrierRequest) -> Self {
        Self {
            name: r.name,
            dba: r.dba,
            status: r.status.map(Into::into),
            physical_address: r.physical_address.map(Into::into),
            mailing_address: r.mailing_address.map(Into::into),
            insurance: r
                .insurance
                .map(|list| list.into_iter().map(Into::into).collect()),
            identification_codes: r
                .identification_codes
                .map(|list| list.into_iter().map(Into::into).collect()),
        }
    }
}

/// Only plain `-?[0-9]+` values are accepted, the same shape the pagination
/// links rewrite. Blank, padded or `+`-signed values are rejected.
fn plain_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let digits = raw.strip_prefix('-').unwrap_or(&raw);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(de::Error::custom(format!("invalid integer `{raw}`")));
    }

    raw.parse()
        .map(Some)
        .map_err(|_| de::Error::custom(format!("integer out of range `{raw}`")))
}

/// Listing query parameters
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListCarriersParams {
    /// Zero-indexed page. Default 0; negative values are treated as 0
    #[serde(default, deserialize_with = "plain_integer")]
    pub page: Option<i64>,
    /// Records per page. Default 10 when absent or not positive; capped by configuration
    #[serde(default, deserialize_with = "plain_integer")]
    pub page_size: Option<i64>,
    /// `id` (or `_id`) or `name`
    pub sort_by: Option<String>,
    /// Comma-separated attribute names to return; unknown names are ignored
    pub fields: Option<String>,
    /// Alias of `fields`
    pub include: Option<String>,
}

impl From<ListCarriersParams> for CarrierQueryInput {
    fn from(p: ListCarriersParams) -> Self {
        Self {
            page: p.page,
            page_size: p.page_size,
            sort_by: p.sort_by,
            fields: p.fields.into_iter().chain(p.include).collect(),
        }
    }
}
