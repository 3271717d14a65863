/// Tab-delimited catalog records carrying a taxon id and a payload id
use crate::bio::taxonomy::TaxonId;
use serde::{Deserialize, Serialize};

/// Column layout of the catalog being filtered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSchema {
    /// RefSeq release catalog: taxon id in column 0, GI number in column 3
    #[default]
    Catalog,
    /// Preformatted two-column file: payload id, then taxon id
    Pairs,
}

impl CatalogSchema {
    pub fn taxon_field(&self) -> usize {
        match self {
            Self::Catalog => 0,
            Self::Pairs => 1,
        }
    }

    pub fn payload_field(&self) -> usize {
        match self {
            Self::Catalog => 3,
            Self::Pairs => 0,
        }
    }

    /// Minimum number of tab-separated fields a record must have
    pub fn min_fields(&self) -> usize {
        self.taxon_field().max(self.payload_field()) + 1
    }
}

impl std::str::FromStr for CatalogSchema {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "catalog" | "a" => Ok(CatalogSchema::Catalog),
            "pairs" | "b" => Ok(CatalogSchema::Pairs),
            _ => Err(format!("Unknown catalog schema: {}", s)),
        }
    }
}

impl std::fmt::Display for CatalogSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Catalog => write!(f, "catalog"),
            Self::Pairs => write!(f, "pairs"),
        }
    }
}

/// One catalog line, borrowed from the read buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record<'a> {
    pub taxon_id: TaxonId,
    pub payload: &'a str,
}

/// Split a line (terminator already stripped) into a [`Record`].
///
/// Only the taxon and payload fields are decoded, so other columns may hold
/// arbitrary bytes. Returns a human-readable reason when the line does not
/// fit the schema.
pub fn parse_record(line: &[u8], schema: CatalogSchema) -> Result<Record<'_>, String> {
    let mut taxon = None;
    let mut payload = None;
    let mut count = 0;

    for (index, field) in line.split(|b| *b == b'\t').enumerate() {
        count = index + 1;
        if index == schema.taxon_field() {
            taxon = Some(field);
        }
        if index == schema.payload_field() {
            payload = Some(field);
        }
        if count >= schema.min_fields() {
            break;
        }
    }

    let (taxon, payload) = match (taxon, payload) {
        (Some(taxon), Some(payload)) => (taxon, payload),
        _ => {
            return Err(format!(
                "expected at least {} fields, found {}",
                schema.min_fields(),
                count
            ))
        }
    };

    let taxon = std::str::from_utf8(taxon)
        .map_err(|_| "taxon id is not valid UTF-8".to_string())?;
    let taxon_id = taxon
        .trim()
        .parse::<TaxonId>()
        .map_err(|_| format!("invalid taxon id {:?}", taxon))?;

    let payload = std::str::from_utf8(payload)
        .map_err(|_| "payload id is not valid UTF-8".to_string())?
        .trim();
    if payload.is_empty() {
        return Err("empty payload id".to_string());
    }

    Ok(Record { taxon_id, payload })
}
