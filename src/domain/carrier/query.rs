//! Listing query descriptor
//!
//! Raw `page`, `pageSize`, `sortBy` and `fields` inputs are normalized here
//! into a [`CarrierQuery`] that storage can execute without further checks.

use std::num::NonZeroU64;

use crate::domain::error::{DomainError, DomainResult};

/// Page size used when none (or a non-positive one) is requested
pub const DEFAULT_PAGE_SIZE: NonZeroU64 = match NonZeroU64::new(10) {
    Some(n) => n,
    None => unreachable!(),
};

/// Largest skip count storage is asked for. SQL backends bind OFFSET as a
/// signed 64-bit integer.
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Carrier attribute that may be projected in a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarrierField {
    Id,
    Name,
    Dba,
    Status,
    PhysicalAddress,
    MailingAddress,
    Insurance,
    IdentificationCodes,
    CreatedAt,
    UpdatedAt,
}

/// Public field name -> field. Anything not listed here can never be projected.
const PUBLIC_FIELDS: &[(&str, CarrierField)] = &[
    ("id", CarrierField::Id),
    ("name", CarrierField::Name),
    ("dba", CarrierField::Dba),
    ("status", CarrierField::Status),
    ("physicalAddress", CarrierField::PhysicalAddress),
    ("mailingAddress", CarrierField::MailingAddress),
    ("insurance", CarrierField::Insurance),
    ("identificationCodes", CarrierField::IdentificationCodes),
    ("createdAt", CarrierField::CreatedAt),
    ("updatedAt", CarrierField::UpdatedAt),
];

impl CarrierField {
    pub const ALL: [CarrierField; 10] = [
        Self::Id,
        Self::Name,
        Self::Dba,
        Self::Status,
        Self::PhysicalAddress,
        Self::MailingAddress,
        Self::Insurance,
        Self::IdentificationCodes,
        Self::CreatedAt,
        Self::UpdatedAt,
    ];

    /// Look up a public (camelCase) field name.
    pub fn from_public_name(name: &str) -> Option<Self> {
        PUBLIC_FIELDS
            .iter()
            .find(|(public, _)| *public == name)
            .map(|(_, field)| *field)
    }

    pub fn public_name(self) -> &'static str {
        PUBLIC_FIELDS
            .iter()
            .find(|(_, field)| *field == self)
            .map(|(public, _)| *public)
            .unwrap_or("id")
    }

    /// Column that stores this attribute
    pub fn storage_key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Dba => "dba",
            Self::Status => "status",
            Self::PhysicalAddress => "physical_address",
            Self::MailingAddress => "mailing_address",
            Self::Insurance => "insurance",
            Self::IdentificationCodes => "identification_codes",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// Sort keys accepted by `sortBy`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CarrierSortField {
    #[default]
    Id,
    Name,
}

impl CarrierSortField {
    pub fn parse(raw: &str) -> DomainResult<Self> {
        match raw {
            "id" | "_id" => Ok(Self::Id),
            "name" => Ok(Self::Name),
            other => Err(DomainError::InvalidSortField(other.to_string())),
        }
    }

    pub fn field(self) -> CarrierField {
        match self {
            Self::Id => CarrierField::Id,
            Self::Name => CarrierField::Name,
        }
    }
}

/// Listing inputs as they arrive from the HTTP layer
#[derive(Debug, Clone, Default)]
pub struct CarrierQueryInput {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    /// Raw `fields` / `include` values; each may be a comma-separated list
    pub fields: Vec<String>,
}

/// Normalized, storage-ready listing query
#[derive(Debug, Clone, PartialEq)]
pub struct CarrierQuery {
    /// Zero-indexed page
    pub page: u64,
    pub page_size: NonZeroU64,
    pub sort_by: CarrierSortField,
    /// Projected attributes, in whitelist order. Always contains `Id`.
    pub fields: Vec<CarrierField>,
}

impl Default for CarrierQuery {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
            sort_by: CarrierSortField::default(),
            fields: CarrierField::ALL.to_vec(),
        }
    }
}

impl CarrierQuery {
    pub fn normalize(input: CarrierQueryInput, max_page_size: NonZeroU64) -> DomainResult<Self> {
        let sort_by = match input.sort_by.as_deref().map(str::trim) {
            None | Some("") => CarrierSortField::default(),
            Some(raw) => CarrierSortField::parse(raw)?,
        };

        let page = input.page.unwrap_or(0).max(0) as u64;

        let page_size = input
            .page_size
            .filter(|size| *size > 0)
            .and_then(|size| NonZeroU64::new(size as u64))
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(max_page_size);

        Ok(Self {
            page,
            page_size,
            sort_by,
            fields: resolve_fields(&input.fields),
        })
    }

    /// Number of records to skip, capped at [`MAX_OFFSET`]
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_mul(self.page_size.get())
            .min(MAX_OFFSET)
    }

    pub fn projects(&self, field: CarrierField) -> bool {
        self.fields.contains(&field)
    }
}

/// Whitelist the requested names. Nothing usable requested means everything.
fn resolve_fields(raw: &[String]) -> Vec<CarrierField> {
    let requested: Vec<CarrierField> = raw
        .iter()
        .flat_map(|value| value.split(','))
        .filter_map(|name| CarrierField::from_public_name(name.trim()))
        .collect();

    if requested.is_empty() {
        return CarrierField::ALL.to_vec();
    }

    CarrierField::ALL
        .into_iter()
        .filter(|field| *field == CarrierField::Id || requested.contains(field))
        .collect()
}
