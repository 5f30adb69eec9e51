//! UUID, ULID and NanoID generation.

use serde::{Deserialize, Serialize};
use ulid::Ulid;
use uuid::Uuid;

use super::UtilityError;

pub const MAX_COUNT: usize = 100;
pub const NANOID_DEFAULT_SIZE: usize = 21;
pub const NANOID_MIN_SIZE: usize = 2;
pub const NANOID_MAX_SIZE: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdKind {
    #[default]
    Uuid,
    Ulid,
    Nanoid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedIds {
    pub kind: IdKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u8>,
    pub count: usize,
    pub values: Vec<String>,
}

pub fn uuids(count: usize, version: u8) -> Result<GeneratedIds, UtilityError> {
    check_count(count)?;
    let make: fn() -> Uuid = match version {
        4 => Uuid::new_v4,
        7 => Uuid::now_v7,
        other => {
            return Err(UtilityError::invalid(
                "version",
                format!("UUID version {} is not supported (use 4 or 7)", other),
            ))
        }
    };
    Ok(GeneratedIds {
        kind: IdKind::Uuid,
        version: Some(version),
        count,
        values: (0..count).map(|_| make().to_string()).collect(),
    })
}

/// Monotonic within one call.
pub fn ulids(count: usize) -> Result<GeneratedIds, UtilityError> {
    check_count(count)?;
    let mut generator = ulid::Generator::new();
    let mut values = Vec::with_capacity(count);
    for _ in 0..count {
        let id = generator.generate().unwrap_or_else(|_| Ulid::new());
        values.push(id.to_string());
    }
    Ok(GeneratedIds {
        kind: IdKind::Ulid,
        version: None,
        count,
        values,
    })
}

pub fn nanoids(count: usize, size: usize) -> Result<GeneratedIds, UtilityError> {
    check_count(count)?;
    if !(NANOID_MIN_SIZE..=NANOID_MAX_SIZE).contains(&size) {
        return Err(UtilityError::invalid(
            "size",
            format!("must be between {} and {}", NANOID_MIN_SIZE, NANOID_MAX_SIZE),
        ));
    }
    Ok(GeneratedIds {
        kind: IdKind::Nanoid,
        version: None,
        count,
        values: (0..count).map(|_| nanoid::nanoid!(size)).collect(),
    })
}

fn check_count(count: usize) -> Result<(), UtilityError> {
    if count == 0 || count > MAX_COUNT {
        return Err(UtilityError::invalid(
            "count",
            format!("must be between 1 and {}", MAX_COUNT),
        ));
    }
    Ok(())
}
