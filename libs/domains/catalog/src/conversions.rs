//! Catalog proto ↔ domain conversions
//!
//! Incoming messages are validated on the way in: required sub-messages
//! must be present and enums must carry a known, non-zero value. Failures
//! are plain `String`s, surfaced to callers as `INVALID_ARGUMENT` via
//! `grpc_client::ToTonicResult`.

use rpc::catalog as pb;

use crate::models::{
    Display, Gpu, Keyboard, KeyboardLayout, Memory, MemoryUnit, Panel, Processor, Rating, Record,
    Resolution, StorageDevice, StorageDriver, ThresholdFilter, Weight,
};

pub use grpc_client::conversions::*;

// ============================================================================
// Enum Conversions
// ============================================================================

impl From<MemoryUnit> for i32 {
    fn from(unit: MemoryUnit) -> Self {
        let unit = match unit {
            MemoryUnit::Bit => pb::memory::Unit::Bit,
            MemoryUnit::Byte => pb::memory::Unit::Byte,
            MemoryUnit::Kilobyte => pb::memory::Unit::Kilobyte,
            MemoryUnit::Megabyte => pb::memory::Unit::Megabyte,
            MemoryUnit::Gigabyte => pb::memory::Unit::Gigabyte,
            MemoryUnit::Terabyte => pb::memory::Unit::Terabyte,
        };
        unit as i32
    }
}

impl TryFrom<i32> for MemoryUnit {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match pb::memory::Unit::try_from(value) {
            Ok(pb::memory::Unit::Bit) => Ok(MemoryUnit::Bit),
            Ok(pb::memory::Unit::Byte) => Ok(MemoryUnit::Byte),
            Ok(pb::memory::Unit::Kilobyte) => Ok(MemoryUnit::Kilobyte),
            Ok(pb::memory::Unit::Megabyte) => Ok(MemoryUnit::Megabyte),
            Ok(pb::memory::Unit::Gigabyte) => Ok(MemoryUnit::Gigabyte),
            Ok(pb::memory::Unit::Terabyte) => Ok(MemoryUnit::Terabyte),
            Ok(pb::memory::Unit::Unknown) | Err(_) => Err(format!("Invalid memory unit: {}", value)),
        }
    }
}

impl From<StorageDriver> for i32 {
    fn from(driver: StorageDriver) -> Self {
        match driver {
            StorageDriver::Hdd => pb::storage::Driver::Hdd as i32,
            StorageDriver::Ssd => pb::storage::Driver::Ssd as i32,
        }
    }
}

impl TryFrom<i32> for StorageDriver {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match pb::storage::Driver::try_from(value) {
            Ok(pb::storage::Driver::Hdd) => Ok(StorageDriver::Hdd),
            Ok(pb::storage::Driver::Ssd) => Ok(StorageDriver::Ssd),
            Ok(pb::storage::Driver::Unknown) | Err(_) => {
                Err(format!("Invalid storage driver: {}", value))
            }
        }
    }
}

impl From<Panel> for i32 {
    fn from(panel: Panel) -> Self {
        match panel {
            Panel::Ips => pb::display::Panel::Ips as i32,
            Panel::Oled => pb::display::Panel::Oled as i32,
        }
    }
}

impl TryFrom<i32> for Panel {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match pb::display::Panel::try_from(value) {
            Ok(pb::display::Panel::Ips) => Ok(Panel::Ips),
            Ok(pb::display::Panel::Oled) => Ok(Panel::Oled),
            Ok(pb::display::Panel::Unknown) | Err(_) => Err(format!("Invalid display panel: {}", value)),
        }
    }
}

impl From<KeyboardLayout> for i32 {
    fn from(layout: KeyboardLayout) -> Self {
        match layout {
            KeyboardLayout::Qwerty => pb::keyboard::Layout::Qwerty as i32,
            KeyboardLayout::Qwertz => pb::keyboard::Layout::Qwertz as i32,
            KeyboardLayout::Azerty => pb::keyboard::Layout::Azerty as i32,
        }
    }
}

impl TryFrom<i32> for KeyboardLayout {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match pb::keyboard::Layout::try_from(value) {
            Ok(pb::keyboard::Layout::Qwerty) => Ok(KeyboardLayout::Qwerty),
            Ok(pb::keyboard::Layout::Qwertz) => Ok(KeyboardLayout::Qwertz),
            Ok(pb::keyboard::Layout::Azerty) => Ok(KeyboardLayout::Azerty),
            Ok(pb::keyboard::Layout::Unknown) | Err(_) => {
                Err(format!("Invalid keyboard layout: {}", value))
            }
        }
    }
}

// ============================================================================
// Message Conversions
// ============================================================================

impl From<Memory> for pb::Memory {
    fn from(memory: Memory) -> Self {
        pb::Memory {
            value: memory.value,
            unit: memory.unit.into(),
        }
    }
}

impl TryFrom<pb::Memory> for Memory {
    type Error = String;

    fn try_from(proto: pb::Memory) -> Result<Self, Self::Error> {
        Ok(Memory {
            value: proto.value,
            unit: proto.unit.try_into()?,
        })
    }
}

fn required_memory(memory: Option<pb::Memory>, field: &str) -> Result<Memory, String> {
    memory
        .ok_or_else(|| format!("{} is required", field))?
        .try_into()
}

impl From<Processor> for pb::Processor {
    fn from(p: Processor) -> Self {
        pb::Processor {
            brand: p.brand,
            name: p.name,
            cores: p.cores,
            threads: p.threads,
            base_ghz: p.base_ghz,
            boost_ghz: p.boost_ghz,
        }
    }
}

impl From<pb::Processor> for Processor {
    fn from(p: pb::Processor) -> Self {
        Processor {
            brand: p.brand,
            name: p.name,
            cores: p.cores,
            threads: p.threads,
            base_ghz: p.base_ghz,
            boost_ghz: p.boost_ghz,
        }
    }
}

impl From<Gpu> for pb::Gpu {
    fn from(g: Gpu) -> Self {
        pb::Gpu {
            brand: g.brand,
            name: g.name,
            min_ghz: g.min_ghz,
            max_ghz: g.max_ghz,
            memory: Some(g.memory.into()),
        }
    }
}

impl TryFrom<pb::Gpu> for Gpu {
    type Error = String;

    fn try_from(g: pb::Gpu) -> Result<Self, Self::Error> {
        Ok(Gpu {
            memory: required_memory(g.memory, "gpu memory")?,
            brand: g.brand,
            name: g.name,
            min_ghz: g.min_ghz,
            max_ghz: g.max_ghz,
        })
    }
}

impl From<StorageDevice> for pb::Storage {
    fn from(s: StorageDevice) -> Self {
        pb::Storage {
            driver: s.driver.into(),
            memory: Some(s.memory.into()),
        }
    }
}

impl TryFrom<pb::Storage> for StorageDevice {
    type Error = String;

    fn try_from(s: pb::Storage) -> Result<Self, Self::Error> {
        Ok(StorageDevice {
            driver: s.driver.try_into()?,
            memory: required_memory(s.memory, "storage memory")?,
        })
    }
}

impl From<Display> for pb::Display {
    fn from(d: Display) -> Self {
        pb::Display {
            size_inch: d.size_inch,
            resolution: Some(pb::display::Resolution {
                width: d.resolution.width,
                height: d.resolution.height,
            }),
            panel: d.panel.into(),
            multitouch: d.multitouch,
        }
    }
}

impl TryFrom<pb::Display> for Display {
    type Error = String;

    fn try_from(d: pb::Display) -> Result<Self, Self::Error> {
        let resolution = d.resolution.unwrap_or_default();
        Ok(Display {
            size_inch: d.size_inch,
            resolution: Resolution {
                width: resolution.width,
                height: resolution.height,
            },
            panel: d.panel.try_into()?,
            multitouch: d.multitouch,
        })
    }
}

impl From<Keyboard> for pb::Keyboard {
    fn from(k: Keyboard) -> Self {
        pb::Keyboard {
            layout: k.layout.into(),
            backlit: k.backlit,
        }
    }
}

impl TryFrom<pb::Keyboard> for Keyboard {
    type Error = String;

    fn try_from(k: pb::Keyboard) -> Result<Self, Self::Error> {
        Ok(Keyboard {
            layout: k.layout.try_into()?,
            backlit: k.backlit,
        })
    }
}

impl From<Record> for pb::Record {
    fn from(r: Record) -> Self {
        pb::Record {
            id: r.id,
            brand: r.brand,
            name: r.name,
            processor: Some(r.processor.into()),
            memory: Some(r.memory.into()),
            gpus: r.gpus.into_iter().map(Into::into).collect(),
            storages: r.storages.into_iter().map(Into::into).collect(),
            display: r.display.map(Into::into),
            keyboard: r.keyboard.map(Into::into),
            weight: r.weight.map(|w| match w {
                Weight::Kg(kg) => pb::record::Weight::WeightKg(kg),
                Weight::Lb(lb) => pb::record::Weight::WeightLb(lb),
            }),
            price_usd: r.price_usd,
            release_year: r.release_year,
            updated_at: opt_datetime_to_millis(r.updated_at),
        }
    }
}

impl TryFrom<pb::Record> for Record {
    type Error = String;

    fn try_from(r: pb::Record) -> Result<Self, Self::Error> {
        Ok(Record {
            processor: r
                .processor
                .ok_or_else(|| "processor is required".to_string())?
                .into(),
            memory: required_memory(r.memory, "memory")?,
            gpus: r
                .gpus
                .into_iter()
                .map(Gpu::try_from)
                .collect::<Result<_, _>>()?,
            storages: r
                .storages
                .into_iter()
                .map(StorageDevice::try_from)
                .collect::<Result<_, _>>()?,
            display: r.display.map(Display::try_from).transpose()?,
            keyboard: r.keyboard.map(Keyboard::try_from).transpose()?,
            weight: r.weight.map(|w| match w {
                pb::record::Weight::WeightKg(kg) => Weight::Kg(kg),
                pb::record::Weight::WeightLb(lb) => Weight::Lb(lb),
            }),
            id: r.id,
            brand: r.brand,
            name: r.name,
            price_usd: r.price_usd,
            release_year: r.release_year,
            updated_at: millis_to_opt_datetime(r.updated_at),
        })
    }
}

impl From<ThresholdFilter> for pb::Filter {
    fn from(f: ThresholdFilter) -> Self {
        pb::Filter {
            max_price_usd: f.max_price_usd,
            min_cpu_cores: f.min_cpu_cores,
            min_cpu_ghz: f.min_cpu_ghz,
            min_memory: f.min_memory.map(Into::into),
        }
    }
}

/// A minimum memory with an unspecified unit counts as no minimum.
impl TryFrom<pb::Filter> for ThresholdFilter {
    type Error = String;

    fn try_from(f: pb::Filter) -> Result<Self, Self::Error> {
        let min_memory = match f.min_memory {
            Some(m) if m.unit == pb::memory::Unit::Unknown as i32 => None,
            Some(m) => Some(m.try_into()?),
            None => None,
        };
        Ok(ThresholdFilter {
            max_price_usd: f.max_price_usd,
            min_cpu_cores: f.min_cpu_cores,
            min_cpu_ghz: f.min_cpu_ghz,
            min_memory,
        })
    }
}

/// Wire form of a rating update for `record_id`.
pub fn rating_response(record_id: String, rating: Rating) -> pb::SubmitRatingResponse {
    pb::SubmitRatingResponse {
        record_id,
        rated_count: rating.count,
        score_sum: rating.sum,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::record;

    fn sample() -> Record {
        let mut r = record(
            "2b6f0cc9-4f4b-4f2e-8a5e-2d1f0a9c1e11",
            1999.0,
            6,
            2.6,
            Memory::new(16, MemoryUnit::Gigabyte),
        );
        r.updated_at = Some(now_millis_precision());
        r
    }

    #[test]
    fn test_record_survives_wire_form() {
        let domain = sample();
        let proto: pb::Record = domain.clone().into();
        assert_eq!(proto.memory.unwrap().unit, pb::memory::Unit::Gigabyte as i32);
        assert!(matches!(proto.weight, Some(pb::record::Weight::WeightKg(_))));

        let back = Record::try_from(proto).unwrap();
        assert_eq!(back, domain);
    }

    #[test]
    fn test_record_requires_processor_and_memory() {
        let mut proto: pb::Record = sample().into();
        proto.processor = None;
        assert_eq!(Record::try_from(proto).unwrap_err(), "processor is required");

        let mut proto: pb::Record = sample().into();
        proto.memory = None;
        assert_eq!(Record::try_from(proto).unwrap_err(), "memory is required");
    }

    #[test]
    fn test_unknown_enum_values_rejected() {
        assert!(MemoryUnit::try_from(0).is_err());
        assert!(MemoryUnit::try_from(42).unwrap_err().contains("42"));
        assert!(StorageDriver::try_from(0).is_err());
        assert!(Panel::try_from(9).is_err());
        assert!(KeyboardLayout::try_from(-1).is_err());

        let mut proto: pb::Record = sample().into();
        proto.storages[0].driver = 0;
        assert!(Record::try_from(proto).unwrap_err().contains("storage driver"));
    }

    #[test]
    fn test_zero_timestamp_is_unset() {
        let mut proto: pb::Record = sample().into();
        proto.updated_at = 0;
        assert_eq!(Record::try_from(proto).unwrap().updated_at, None);
    }

    #[test]
    fn test_filter_memory_handling() {
        let proto = pb::Filter {
            max_price_usd: 2000.0,
            min_cpu_cores: 4,
            min_cpu_ghz: 2.5,
            min_memory: Some(pb::Memory {
                value: 8,
                unit: pb::memory::Unit::Gigabyte as i32,
            }),
        };
        let filter = ThresholdFilter::try_from(proto).unwrap();
        assert_eq!(filter.min_memory, Some(Memory::new(8, MemoryUnit::Gigabyte)));

        let unspecified = pb::Filter {
            min_memory: Some(pb::Memory { value: 8, unit: 0 }),
            ..proto
        };
        assert_eq!(ThresholdFilter::try_from(unspecified).unwrap().min_memory, None);

        let bogus = pb::Filter {
            min_memory: Some(pb::Memory { value: 8, unit: 77 }),
            ..proto
        };
        assert!(ThresholdFilter::try_from(bogus).is_err());
    }

    #[test]
    fn test_rating_response() {
        let resp = rating_response("a".into(), Rating { count: 2, sum: 12.0 });
        assert_eq!(resp.record_id, "a");
        assert_eq!(resp.rated_count, 2);
        assert_eq!(resp.score_sum, 12.0);
    }
}
