//! IoT devices monitoring storage conditions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::DeviceId;
use crate::error::{Error, Result};

/// The most recent sensor reading reported by a device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceReading {
    pub value: f64,
    pub unit: String,
    pub timestamp: DateTime<Utc>,
}

/// A registered monitoring device (moisture sensor, weight scale, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IotDevice {
    pub id: DeviceId,
    /// Opaque owner identifier.
    pub owner_id: String,
    pub device_name: String,
    pub device_type: String,
    pub location: String,
    /// `active`, `inactive` or `maintenance`.
    pub status: String,
    pub last_reading: Option<DeviceReading>,
    pub battery_level: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a device.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIotDevice {
    pub owner_id: String,
    pub device_name: String,
    pub device_type: String,
    pub location: String,
}

impl NewIotDevice {
    pub fn validate(&self) -> Result<()> {
        if self.device_name.trim().is_empty() {
            return Err(Error::validation("deviceName must not be empty"));
        }
        if self.device_type.trim().is_empty() {
            return Err(Error::validation("deviceType must not be empty"));
        }
        Ok(())
    }
}

impl IotDevice {
    /// Register a device. New devices start `active` with a full battery.
    #[must_use]
    pub fn create(new: NewIotDevice, now: DateTime<Utc>) -> Self {
        Self {
            id: DeviceId::new(),
            owner_id: new.owner_id,
            device_name: new.device_name,
            device_type: new.device_type,
            location: new.location,
            status: "active".to_string(),
            last_reading: None,
            battery_level: Some(100),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the last reading and bump `updated_at`.
    pub fn record_reading(&mut self, reading: DeviceReading, now: DateTime<Utc>) {
        self.last_reading = Some(reading);
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_device() -> NewIotDevice {
        NewIotDevice {
            owner_id: "owner-1".to_string(),
            device_name: "Warehouse Moisture Sensor #1".to_string(),
            device_type: "moisture_sensor".to_string(),
            location: "Main Warehouse, Punjab".to_string(),
        }
    }

    #[test]
    fn new_devices_start_active_with_full_battery() {
        let device = IotDevice::create(sample_device(), Utc::now());
        assert_eq!(device.status, "active");
        assert_eq!(device.battery_level, Some(100));
        assert!(device.last_reading.is_none());
    }

    #[test]
    fn record_reading_replaces_previous() {
        let now = Utc::now();
        let mut device = IotDevice::create(sample_device(), now);

        let later = now + chrono::Duration::hours(1);
        device.record_reading(
            DeviceReading {
                value: 11.2,
                unit: "%".to_string(),
                timestamp: later,
            },
            later,
        );
        device.record_reading(
            DeviceReading {
                value: 12.8,
                unit: "%".to_string(),
                timestamp: later,
            },
            later,
        );

        assert_eq!(device.last_reading.as_ref().map(|r| r.value), Some(12.8));
        assert_eq!(device.updated_at, later);
    }

    #[test]
    fn empty_device_name_is_rejected() {
        let mut new = sample_device();
        new.device_name = "  ".to_string();
        assert!(new.validate().is_err());
    }
}
