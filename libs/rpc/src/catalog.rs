//! `catalog.v1` wire messages.
//!
//! Declared with prost derives (standard protobuf wire format). Field tags
//! are part of the wire contract and must never be reused.

/// Memory capacity: a value and its unit.
#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Memory {
    #[prost(uint64, tag = "1")]
    pub value: u64,
    #[prost(enumeration = "memory::Unit", tag = "2")]
    pub unit: i32,
}

/// Nested message and enum types in `Memory`.
pub mod memory {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Unit {
        Unknown = 0,
        Bit = 1,
        Byte = 2,
        Kilobyte = 3,
        Megabyte = 4,
        Gigabyte = 5,
        Terabyte = 6,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Processor {
    #[prost(string, tag = "1")]
    pub brand: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(uint32, tag = "3")]
    pub cores: u32,
    #[prost(uint32, tag = "4")]
    pub threads: u32,
    #[prost(double, tag = "5")]
    pub base_ghz: f64,
    #[prost(double, tag = "6")]
    pub boost_ghz: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Gpu {
    #[prost(string, tag = "1")]
    pub brand: String,
    #[prost(string, tag = "2")]
    pub name: String,
    #[prost(double, tag = "3")]
    pub min_ghz: f64,
    #[prost(double, tag = "4")]
    pub max_ghz: f64,
    #[prost(message, optional, tag = "5")]
    pub memory: Option<Memory>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Storage {
    #[prost(enumeration = "storage::Driver", tag = "1")]
    pub driver: i32,
    #[prost(message, optional, tag = "2")]
    pub memory: Option<Memory>,
}

/// Nested message and enum types in `Storage`.
pub mod storage {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Driver {
        Unknown = 0,
        Hdd = 1,
        Ssd = 2,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Display {
    #[prost(float, tag = "1")]
    pub size_inch: f32,
    #[prost(message, optional, tag = "2")]
    pub resolution: Option<display::Resolution>,
    #[prost(enumeration = "display::Panel", tag = "3")]
    pub panel: i32,
    #[prost(bool, tag = "4")]
    pub multitouch: bool,
}

/// Nested message and enum types in `Display`.
pub mod display {
    #[derive(Clone, Copy, PartialEq, ::prost::Message)]
    pub struct Resolution {
        #[prost(uint32, tag = "1")]
        pub width: u32,
        #[prost(uint32, tag = "2")]
        pub height: u32,
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Panel {
        Unknown = 0,
        Ips = 1,
        Oled = 2,
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Keyboard {
    #[prost(enumeration = "keyboard::Layout", tag = "1")]
    pub layout: i32,
    #[prost(bool, tag = "2")]
    pub backlit: bool,
}

/// Nested message and enum types in `Keyboard`.
pub mod keyboard {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Layout {
        Unknown = 0,
        Qwerty = 1,
        Qwertz = 2,
        Azerty = 3,
    }
}

/// A catalog record (a laptop configuration).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Record {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub brand: String,
    #[prost(string, tag = "3")]
    pub name: String,
    #[prost(message, optional, tag = "4")]
    pub processor: Option<Processor>,
    #[prost(message, optional, tag = "5")]
    pub memory: Option<Memory>,
    #[prost(message, repeated, tag = "6")]
    pub gpus: Vec<Gpu>,
    #[prost(message, repeated, tag = "7")]
    pub storages: Vec<Storage>,
    #[prost(message, optional, tag = "8")]
    pub display: Option<Display>,
    #[prost(message, optional, tag = "9")]
    pub keyboard: Option<Keyboard>,
    #[prost(oneof = "record::Weight", tags = "10, 11")]
    pub weight: Option<record::Weight>,
    #[prost(double, tag = "12")]
    pub price_usd: f64,
    #[prost(uint32, tag = "13")]
    pub release_year: u32,
    /// Unix time in milliseconds.
    #[prost(int64, tag = "14")]
    pub updated_at: i64,
}

/// Nested message and enum types in `Record`.
pub mod record {
    #[derive(Clone, Copy, PartialEq, ::prost::Oneof)]
    pub enum Weight {
        #[prost(double, tag = "10")]
        WeightKg(f64),
        #[prost(double, tag = "11")]
        WeightLb(f64),
    }
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct Filter {
    #[prost(double, tag = "1")]
    pub max_price_usd: f64,
    #[prost(uint32, tag = "2")]
    pub min_cpu_cores: u32,
    #[prost(double, tag = "3")]
    pub min_cpu_ghz: f64,
    #[prost(message, optional, tag = "4")]
    pub min_memory: Option<Memory>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateRecordRequest {
    #[prost(message, optional, tag = "1")]
    pub record: Option<Record>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateRecordResponse {
    #[prost(string, tag = "1")]
    pub id: String,
}

#[derive(Clone, Copy, PartialEq, ::prost::Message)]
pub struct SearchRecordsRequest {
    #[prost(message, optional, tag = "1")]
    pub filter: Option<Filter>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SearchRecordsResponse {
    #[prost(message, optional, tag = "1")]
    pub record: Option<Record>,
}

/// First frame of an upload: which record the asset belongs to.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct AssetInfo {
    #[prost(string, tag = "1")]
    pub record_id: String,
    /// File extension including the dot, e.g. `.jpg`.
    #[prost(string, tag = "2")]
    pub asset_type: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UploadAssetRequest {
    #[prost(oneof = "upload_asset_request::Data", tags = "1, 2")]
    pub data: Option<upload_asset_request::Data>,
}

/// Nested message and enum types in `UploadAssetRequest`.
pub mod upload_asset_request {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "1")]
        Info(super::AssetInfo),
        #[prost(bytes, tag = "2")]
        ChunkData(Vec<u8>),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UploadAssetResponse {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(uint32, tag = "2")]
    pub size: u32,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubmitRatingRequest {
    #[prost(string, tag = "1")]
    pub record_id: String,
    #[prost(double, tag = "2")]
    pub score: f64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubmitRatingResponse {
    #[prost(string, tag = "1")]
    pub record_id: String,
    #[prost(uint32, tag = "2")]
    pub rated_count: u32,
    #[prost(double, tag = "3")]
    pub score_sum: f64,
}

include!(concat!(env!("OUT_DIR"), "/catalog.v1.CatalogService.rs"));

/// Fully qualified service name, used for health reporting.
pub const SERVICE_NAME: &str = "catalog.v1.CatalogService";
