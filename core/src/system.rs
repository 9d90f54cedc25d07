use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// The cultivation system a reading or device belongs to.
///
/// Selects both the submission schema and the table a reading lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SystemType {
    Hydroponics,
    Aquaponics,
}

impl SystemType {
    pub const ALL: [SystemType; 2] = [SystemType::Hydroponics, SystemType::Aquaponics];

    pub fn as_str(&self) -> &'static str {
        match self {
            SystemType::Hydroponics => "hydroponics",
            SystemType::Aquaponics => "aquaponics",
        }
    }

    /// Name given to devices that register without a `device_name`
    pub fn default_device_name(&self) -> &'static str {
        match self {
            SystemType::Hydroponics => "Unknown Hydroponics Sensor",
            SystemType::Aquaponics => "Unknown Aquaponics Sensor",
        }
    }
}

impl fmt::Display for SystemType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SystemType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hydroponics" => Ok(SystemType::Hydroponics),
            "aquaponics" => Ok(SystemType::Aquaponics),
            other => Err(ValidationError::UnknownSystem(other.to_owned())),
        }
    }
}

impl TryFrom<String> for SystemType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_system_type() {
        for system in SystemType::ALL {
            assert_eq!(system, system.as_str().parse().unwrap());
        }
        assert_eq!(
            Err(ValidationError::UnknownSystem("soil".to_owned())),
            "soil".parse::<SystemType>()
        );
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&SystemType::Aquaponics).unwrap();
        assert_eq!("\"aquaponics\"", json);
    }
}
