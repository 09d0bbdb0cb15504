//! Generates the `catalog.v1.CatalogService` server and client.
//!
//! Message types are declared by hand in `src/catalog.rs` with prost derives,
//! so only the service plumbing is generated here and no `protoc` is needed.

use tonic_build::manual::{Builder, Method, Service};

const CODEC: &str = "tonic_prost::ProstCodec";

fn method(name: &str, route: &str, input: &str, output: &str) -> tonic_build::manual::MethodBuilder {
    Method::builder()
        .name(name)
        .route_name(route)
        .input_type(format!("crate::catalog::{input}"))
        .output_type(format!("crate::catalog::{output}"))
        .codec_path(CODEC)
}

fn main() {
    let service = Service::builder()
        .name("CatalogService")
        .package("catalog.v1")
        .method(
            method(
                "create_record",
                "CreateRecord",
                "CreateRecordRequest",
                "CreateRecordResponse",
            )
            .build(),
        )
        .method(
            method(
                "search_records",
                "SearchRecords",
                "SearchRecordsRequest",
                "SearchRecordsResponse",
            )
            .server_streaming()
            .build(),
        )
        .method(
            method(
                "upload_asset",
                "UploadAsset",
                "UploadAssetRequest",
                "UploadAssetResponse",
            )
            .client_streaming()
            .build(),
        )
        .method(
            method(
                "submit_ratings",
                "SubmitRatings",
                "SubmitRatingRequest",
                "SubmitRatingResponse",
            )
            .client_streaming()
            .server_streaming()
            .build(),
        )
        .build();

    Builder::new().compile(&[service]);
}
