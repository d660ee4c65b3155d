//! Registry data model
//!
//! Owner, Asset and HistoryRecord records plus the key namespaces they
//! are stored under. Records travel as JSON; numeric and boolean fields
//! keep their historical string wire encoding but are typed in Rust and
//! parsed strictly at the argument boundary.

use serde::{Deserialize, Serialize};

use super::error::{RegistryError, RegistryResult};

/// Key prefix for Owner records
pub const OWNER_KEY_PREFIX: &str = "USER_";
/// Key prefix for Asset records
pub const ASSET_KEY_PREFIX: &str = "REALESTATE_";
/// Key prefix for HistoryRecord records
pub const HISTORY_KEY_PREFIX: &str = "REALESTATEHISTORY_";
/// Composite namespace of the forward (owner -> assets) index
pub const ASSETS_BY_OWNER_INDEX: &str = "GetRealEstatesByOwner";
/// Composite namespace of the reverse (asset -> history) index
pub const OWNERS_BY_ASSET_INDEX: &str = "GetOwnersByRealEstate";

/// Value stored under index keys; only the key's existence matters.
pub const INDEX_SENTINEL: [u8; 1] = [0x00];

/// State key for an owner id
pub fn owner_key(owner_id: &str) -> String {
    format!("{}{}", OWNER_KEY_PREFIX, owner_id)
}

/// State key for an asset id
pub fn asset_key(asset_id: &str) -> String {
    format!("{}{}", ASSET_KEY_PREFIX, asset_id)
}

/// Strict `"true"`/`"false"` parse for flag arguments.
pub fn parse_bool_flag(field: &'static str, value: &str) -> RegistryResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(RegistryError::InvalidArgument {
            field,
            value: value.to_string(),
        }),
    }
}

fn parse_count(field: &'static str, value: &str) -> RegistryResult<u32> {
    value.parse().map_err(|_| RegistryError::InvalidArgument {
        field,
        value: value.to_string(),
    })
}

/// Booleans serialized as `"true"`/`"false"` strings on the wire.
mod string_bool {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "true" } else { "false" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        match String::deserialize(deserializer)?.as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(D::Error::custom(format!("invalid bool string {other:?}"))),
        }
    }
}

/// Integers serialized as decimal strings on the wire.
mod string_u32 {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| D::Error::custom(format!("invalid integer string {raw:?}")))
    }
}

/// A registered owner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: String,
    pub name: String,
    pub tax_id: String,
    pub phone: String,
    pub email: String,
}

impl Owner {
    /// Build an owner from the positional argument list
    /// `[id, name, tax_id, phone, email]`.
    pub fn from_args(args: &[String]) -> RegistryResult<Self> {
        if args.len() != 5 {
            return Err(RegistryError::BadArgumentCount {
                expected: 5,
                got: args.len(),
            });
        }
        Ok(Self {
            id: args[0].clone(),
            name: args[1].clone(),
            tax_id: args[2].clone(),
            phone: args[3].clone(),
            email: args[4].clone(),
        })
    }
}

/// A registered real-estate asset
///
/// `bed_count`, `bath_count` and `sellable` are typed here but keep the
/// historical string encoding in JSON. The remaining descriptive fields
/// come from a free-form listing feed and stay as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub id: String,
    pub owner_id: String,
    pub price: String,
    #[serde(with = "string_u32")]
    pub bed_count: u32,
    #[serde(with = "string_u32")]
    pub bath_count: u32,
    pub lot_size: String,
    pub full_address: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub house_size: String,
    #[serde(with = "string_bool")]
    pub sellable: bool,
}

impl Asset {
    /// Number of positional arguments a full asset takes.
    pub const ARG_COUNT: usize = 13;

    /// Build an asset from the positional argument list
    /// `[id, owner_id, price, bed_count, bath_count, lot_size,
    /// full_address, street, city, state, zip_code, house_size,
    /// sellable]`, parsing the typed fields strictly.
    pub fn from_args(args: &[String]) -> RegistryResult<Self> {
        if args.len() != Self::ARG_COUNT {
            return Err(RegistryError::BadArgumentCount {
                expected: Self::ARG_COUNT,
                got: args.len(),
            });
        }
        Ok(Self {
            id: args[0].clone(),
            owner_id: args[1].clone(),
            price: args[2].clone(),
            bed_count: parse_count("bed_count", &args[3])?,
            bath_count: parse_count("bath_count", &args[4])?,
            lot_size: args[5].clone(),
            full_address: args[6].clone(),
            street: args[7].clone(),
            city: args[8].clone(),
            state: args[9].clone(),
            zip_code: args[10].clone(),
            house_size: args[11].clone(),
            sellable: parse_bool_flag("sellable", &args[12])?,
        })
    }
}

/// One ownership event of an asset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub owner_id: String,
    pub asset_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset_args() -> Vec<String> {
        [
            "0", "7", "250000", "3", "2", "0.25", "1 Main St, Springfield, IL 62704", "1 Main St",
            "Springfield", "IL", "62704", "1400", "false",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect()
    }

    #[test]
    fn test_asset_from_args() {
        let asset = Asset::from_args(&asset_args()).unwrap();
        assert_eq!(asset.id, "0");
        assert_eq!(asset.owner_id, "7");
        assert_eq!(asset.bed_count, 3);
        assert_eq!(asset.bath_count, 2);
        assert!(!asset.sellable);
    }

    #[test]
    fn test_asset_rejects_malformed_typed_fields() {
        let mut args = asset_args();
        args[3] = "three".into();
        assert!(matches!(
            Asset::from_args(&args),
            Err(RegistryError::InvalidArgument {
                field: "bed_count",
                ..
            })
        ));

        let mut args = asset_args();
        args[12] = "yes".into();
        assert!(matches!(
            Asset::from_args(&args),
            Err(RegistryError::InvalidArgument {
                field: "sellable",
                ..
            })
        ));
    }

    #[test]
    fn test_asset_rejects_wrong_arg_count() {
        let args = asset_args()[..12].to_vec();
        assert!(matches!(
            Asset::from_args(&args),
            Err(RegistryError::BadArgumentCount {
                expected: 13,
                got: 12
            })
        ));
    }

    #[test]
    fn test_asset_wire_format_keeps_string_fields() {
        let asset = Asset::from_args(&asset_args()).unwrap();
        let json: serde_json::Value = serde_json::to_value(&asset).unwrap();
        assert_eq!(json["bed_count"], "3");
        assert_eq!(json["sellable"], "false");
        assert_eq!(json["price"], "250000");

        let back: Asset = serde_json::from_value(json).unwrap();
        assert_eq!(back, asset);
    }

    #[test]
    fn test_owner_from_args() {
        let args: Vec<String> = ["9", "alice", "npwp-9", "555-0100", "a@example.com"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let owner = Owner::from_args(&args).unwrap();
        assert_eq!(owner.id, "9");
        assert_eq!(owner.tax_id, "npwp-9");
        assert!(Owner::from_args(&args[..3]).is_err());
    }

    #[test]
    fn test_parse_bool_flag_is_strict() {
        assert!(parse_bool_flag("sellable", "true").unwrap());
        assert!(!parse_bool_flag("sellable", "false").unwrap());
        assert!(parse_bool_flag("sellable", "TRUE").is_err());
        assert!(parse_bool_flag("sellable", "1").is_err());
    }
}
