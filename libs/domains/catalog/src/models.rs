use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// Unit of a memory capacity. Each step up is 1024x the previous one
/// (bytes are 8 bits).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemoryUnit {
    Bit,
    Byte,
    Kilobyte,
    Megabyte,
    Gigabyte,
    Terabyte,
}

impl MemoryUnit {
    /// Left shift that converts one of this unit into bits.
    pub fn bit_shift(self) -> u32 {
        match self {
            MemoryUnit::Bit => 0,
            MemoryUnit::Byte => 3,
            MemoryUnit::Kilobyte => 13,
            MemoryUnit::Megabyte => 23,
            MemoryUnit::Gigabyte => 33,
            MemoryUnit::Terabyte => 43,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memory {
    pub value: u64,
    pub unit: MemoryUnit,
}

impl Memory {
    pub fn new(value: u64, unit: MemoryUnit) -> Self {
        Self { value, unit }
    }

    /// Capacity in bits, saturating at `u64::MAX`.
    pub fn to_bits(&self) -> u64 {
        self.value.saturating_mul(1u64 << self.unit.bit_shift())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processor {
    pub brand: String,
    pub name: String,
    pub cores: u32,
    pub threads: u32,
    pub base_ghz: f64,
    pub boost_ghz: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gpu {
    pub brand: String,
    pub name: String,
    pub min_ghz: f64,
    pub max_ghz: f64,
    pub memory: Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageDriver {
    Hdd,
    Ssd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageDevice {
    pub driver: StorageDriver,
    pub memory: Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Panel {
    Ips,
    Oled,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Display {
    pub size_inch: f32,
    pub resolution: Resolution,
    pub panel: Panel,
    pub multitouch: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyboardLayout {
    Qwerty,
    Qwertz,
    Azerty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyboard {
    pub layout: KeyboardLayout,
    pub backlit: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weight {
    Kg(f64),
    Lb(f64),
}

/// Catalog record (a laptop configuration).
///
/// All data is owned, so `Clone` yields a fully independent copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// UUID in textual form. Empty until assigned at create time.
    pub id: String,
    pub brand: String,
    pub name: String,
    pub processor: Processor,
    pub memory: Memory,
    pub gpus: Vec<Gpu>,
    pub storages: Vec<StorageDevice>,
    pub display: Option<Display>,
    pub keyboard: Option<Keyboard>,
    pub weight: Option<Weight>,
    pub price_usd: f64,
    pub release_year: u32,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Record {
    /// Independent copy of this record.
    ///
    /// Fails when a numeric field is NaN or infinite: such a value cannot be
    /// compared or round-tripped faithfully, so the record is refused rather
    /// than duplicated.
    pub fn deep_copy(&self) -> CatalogResult<Record> {
        if let Some(field) = self.non_finite_field() {
            return Err(CatalogError::Copy {
                id: self.id.clone(),
                reason: format!("{field} is not a finite number"),
            });
        }
        Ok(self.clone())
    }

    fn non_finite_field(&self) -> Option<&'static str> {
        let p = &self.processor;
        if !p.base_ghz.is_finite() || !p.boost_ghz.is_finite() {
            return Some("processor clock");
        }
        if self
            .gpus
            .iter()
            .any(|g| !g.min_ghz.is_finite() || !g.max_ghz.is_finite())
        {
            return Some("gpu clock");
        }
        if self.display.is_some_and(|d| !d.size_inch.is_finite()) {
            return Some("display size");
        }
        match self.weight {
            Some(Weight::Kg(w)) | Some(Weight::Lb(w)) if !w.is_finite() => return Some("weight"),
            _ => {}
        }
        if !self.price_usd.is_finite() {
            return Some("price");
        }
        None
    }
}

/// Threshold filter for searches. Zero values accept everything on that axis
/// except `max_price_usd`, where zero accepts only free records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdFilter {
    pub max_price_usd: f64,
    pub min_cpu_cores: u32,
    pub min_cpu_ghz: f64,
    pub min_memory: Option<Memory>,
}

/// Stored asset descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
    pub id: String,
    pub record_id: String,
    /// File extension including the dot, e.g. `.jpg`.
    pub asset_type: String,
    pub path: std::path::PathBuf,
}

/// Running score total for one record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub count: u32,
    pub sum: f64,
}
