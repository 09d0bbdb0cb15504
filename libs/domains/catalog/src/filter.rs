//! Threshold matching for searches.

use crate::models::{Record, ThresholdFilter};

impl ThresholdFilter {
    /// Whether `record` satisfies every threshold.
    pub fn matches(&self, record: &Record) -> bool {
        if record.price_usd > self.max_price_usd {
            return false;
        }
        if record.processor.cores < self.min_cpu_cores {
            return false;
        }
        if record.processor.base_ghz < self.min_cpu_ghz {
            return false;
        }
        let min_bits = self.min_memory.map(|m| m.to_bits()).unwrap_or(0);
        record.memory.to_bits() >= min_bits
    }
}

#[cfg(test)]
mod tests {
    use crate::models::fixtures::record;
    use crate::models::{Memory, MemoryUnit, ThresholdFilter};

    fn filter(max_price: f64, cores: u32, ghz: f64, memory: Option<Memory>) -> ThresholdFilter {
        ThresholdFilter {
            max_price_usd: max_price,
            min_cpu_cores: cores,
            min_cpu_ghz: ghz,
            min_memory: memory,
        }
    }

    #[test]
    fn test_each_threshold_disqualifies() {
        let laptop = record("a", 2000.0, 4, 2.5, Memory::new(8, MemoryUnit::Gigabyte));

        assert!(filter(2000.0, 4, 2.5, Some(Memory::new(8, MemoryUnit::Gigabyte))).matches(&laptop));
        assert!(!filter(1999.99, 4, 2.5, None).matches(&laptop));
        assert!(!filter(3000.0, 6, 2.5, None).matches(&laptop));
        assert!(!filter(3000.0, 4, 2.6, None).matches(&laptop));
        assert!(!filter(3000.0, 4, 2.5, Some(Memory::new(16, MemoryUnit::Gigabyte))).matches(&laptop));
    }

    #[test]
    fn test_missing_min_memory_is_zero_bits() {
        let laptop = record("a", 100.0, 1, 1.0, Memory::new(0, MemoryUnit::Bit));
        assert!(filter(100.0, 0, 0.0, None).matches(&laptop));
    }

    #[test]
    fn test_units_are_interchangeable() {
        let in_gb = record("a", 100.0, 2, 2.0, Memory::new(1, MemoryUnit::Gigabyte));
        let in_mb = record("b", 100.0, 2, 2.0, Memory::new(1024, MemoryUnit::Megabyte));
        let needs_gb = filter(100.0, 0, 0.0, Some(Memory::new(1, MemoryUnit::Gigabyte)));
        let needs_mb = filter(100.0, 0, 0.0, Some(Memory::new(1024, MemoryUnit::Megabyte)));

        for laptop in [&in_gb, &in_mb] {
            assert!(needs_gb.matches(laptop));
            assert!(needs_mb.matches(laptop));
        }
        let needs_more = filter(100.0, 0, 0.0, Some(Memory::new(1025, MemoryUnit::Megabyte)));
        assert!(!needs_more.matches(&in_gb));
    }

    #[test]
    fn test_raising_max_price_never_loses_matches() {
        let laptops: Vec<_> = [900.0, 1500.0, 1500.0, 2200.0, 3000.0]
            .into_iter()
            .enumerate()
            .map(|(i, price)| record(&i.to_string(), price, 4, 2.5, Memory::new(8, MemoryUnit::Gigabyte)))
            .collect();

        let mut previous = 0;
        for max in [0.0, 899.0, 900.0, 1500.0, 2500.0, 3000.0, 10_000.0] {
            let hits = laptops
                .iter()
                .filter(|l| filter(max, 0, 0.0, None).matches(l))
                .count();
            assert!(hits >= previous, "max {max} matched {hits} < {previous}");
            previous = hits;
        }
        assert_eq!(previous, laptops.len());
    }
}
