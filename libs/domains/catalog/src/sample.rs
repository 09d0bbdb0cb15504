//! Random but plausible records, for seeding and tests.

use rand::Rng;

use grpc_client::conversions::now_millis_precision;

use crate::models::{
    Display, Gpu, Keyboard, KeyboardLayout, Memory, MemoryUnit, Panel, Processor, Record,
    Resolution, StorageDevice, StorageDriver, Weight,
};

const CPU_BRANDS: &[&str] = &["Intel", "AMD"];
const INTEL_CPUS: &[&str] = &[
    "Xeon E-2286M",
    "Core i9-9980HK",
    "Core i7-9750H",
    "Core i5-9400F",
    "Core i3-1005G1",
];
const AMD_CPUS: &[&str] = &["Ryzen 7 PRO 2700U", "Ryzen 5 PRO 3500U", "Ryzen 3 PRO 3200GE"];

const GPU_BRANDS: &[&str] = &["NVIDIA", "AMD"];
const NVIDIA_GPUS: &[&str] = &["RTX 2060", "RTX 2070", "RTX 2080-Ti", "GTX 1660-Ti"];
const AMD_GPUS: &[&str] = &["RX 590", "RX 580", "RX 5700-XT", "RX Vega-56"];

const LAPTOP_BRANDS: &[&str] = &["Apple", "Dell", "Lenovo", "Microsoft", "Acer", "HP"];

fn laptop_names(brand: &str) -> &'static [&'static str] {
    match brand {
        "Apple" => &["MacBook Pro", "MacBook Air", "MacBook"],
        "Dell" => &["G15-5525", "Alienware x15", "Inspiron 3511", "Vostro 15 3568"],
        "Lenovo" => &["IdeaPad Slim 5", "Yoga 9i", "ThinkPad X13", "Legion 5 Pro"],
        "Microsoft" => &[
            "Surface Pro 7",
            "Surface Book 3",
            "Surface Laptop 4",
            "Surface StudioBook",
        ],
        "HP" => &["Envy 13", "Omen 16", "Spectre x360", "Pavilion 15s"],
        _ => &["Aspire 7", "Swift 3", "Nitro 5", "Predator Helios"],
    }
}

fn pick<R: Rng + ?Sized>(rng: &mut R, set: &[&'static str]) -> &'static str {
    set[rng.random_range(0..set.len())]
}

fn gigabytes<R: Rng + ?Sized>(rng: &mut R, min: u64, max: u64) -> Memory {
    Memory::new(rng.random_range(min..=max), MemoryUnit::Gigabyte)
}

pub fn processor<R: Rng + ?Sized>(rng: &mut R) -> Processor {
    let brand = pick(rng, CPU_BRANDS);
    let name = pick(rng, if brand == "Intel" { INTEL_CPUS } else { AMD_CPUS });
    let cores = rng.random_range(2..=8);
    let base_ghz = rng.random_range(2.0..3.5);

    Processor {
        brand: brand.to_string(),
        name: name.to_string(),
        cores,
        threads: rng.random_range(cores..=12),
        base_ghz,
        boost_ghz: rng.random_range(base_ghz..5.0),
    }
}

pub fn gpu<R: Rng + ?Sized>(rng: &mut R) -> Gpu {
    let brand = pick(rng, GPU_BRANDS);
    let name = pick(rng, if brand == "NVIDIA" { NVIDIA_GPUS } else { AMD_GPUS });
    let min_ghz = rng.random_range(1.0..1.5);

    Gpu {
        brand: brand.to_string(),
        name: name.to_string(),
        min_ghz,
        max_ghz: rng.random_range(min_ghz..2.0),
        memory: gigabytes(rng, 2, 6),
    }
}

pub fn storage<R: Rng + ?Sized>(rng: &mut R, driver: StorageDriver) -> StorageDevice {
    StorageDevice {
        driver,
        memory: gigabytes(rng, 128, 1024),
    }
}

pub fn display<R: Rng + ?Sized>(rng: &mut R) -> Display {
    let height = rng.random_range(1080..=4320);
    Display {
        size_inch: rng.random_range(13.0..17.0),
        resolution: Resolution {
            width: height * 16 / 9,
            height,
        },
        panel: if rng.random_bool(0.5) { Panel::Ips } else { Panel::Oled },
        multitouch: rng.random_bool(0.5),
    }
}

pub fn keyboard<R: Rng + ?Sized>(rng: &mut R) -> Keyboard {
    let layout = match rng.random_range(0..3) {
        0 => KeyboardLayout::Qwerty,
        1 => KeyboardLayout::Qwertz,
        _ => KeyboardLayout::Azerty,
    };
    Keyboard {
        layout,
        backlit: rng.random_bool(0.5),
    }
}

/// Random record with a fresh id, drawn from `rng`.
pub fn record_with<R: Rng + ?Sized>(rng: &mut R) -> Record {
    let brand = pick(rng, LAPTOP_BRANDS);
    let name = pick(rng, laptop_names(brand));

    Record {
        id: uuid::Uuid::new_v4().to_string(),
        brand: brand.to_string(),
        name: name.to_string(),
        processor: processor(rng),
        memory: gigabytes(rng, 4, 64),
        gpus: vec![gpu(rng)],
        storages: vec![
            storage(rng, StorageDriver::Ssd),
            storage(rng, StorageDriver::Hdd),
        ],
        display: Some(display(rng)),
        keyboard: Some(keyboard(rng)),
        weight: Some(Weight::Kg(rng.random_range(1.0..3.0))),
        price_usd: rng.random_range(1000.0..3000.0),
        release_year: rng.random_range(2012..=2020),
        updated_at: Some(now_millis_precision()),
    }
}

/// Random record from the thread-local generator.
pub fn record() -> Record {
    record_with(&mut rand::rng())
}
