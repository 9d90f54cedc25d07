use crate::SystemType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Metadata a device registers or refreshes with on every submission
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceRegistration {
    pub device_id: String,
    pub device_name: String,
    pub device_type: String,
    pub system_type: SystemType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Device {
    pub id: i64,
    pub device_id: String,
    pub device_name: String,
    pub device_type: String,
    pub system_type: SystemType,
    pub last_seen: DateTime<Utc>,
    pub registered_at: DateTime<Utc>,
}
