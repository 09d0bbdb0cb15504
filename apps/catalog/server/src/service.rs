//! Catalog gRPC service implementation
//!
//! One handler per RPC shape. Each call gets a [`CallSignal`] whose guard
//! lives as long as the call's transport side, with a deadline taken from
//! the client's `grpc-timeout` header.

use std::pin::Pin;
use std::task::{Context, Poll};

use domain_catalog::conversions::rating_response;
use domain_catalog::{
    CallGuard, CallSignal, CatalogError, CatalogService, Record, StoredAsset, ThresholdFilter,
};
use grpc_client::{ToTonicOption, ToTonicResult, request_timeout};
use rpc::catalog::catalog_service_server::CatalogService as CatalogRpc;
use rpc::catalog::upload_asset_request::Data;
use rpc::catalog::{
    CreateRecordRequest, CreateRecordResponse, SearchRecordsRequest, SearchRecordsResponse,
    SubmitRatingRequest, SubmitRatingResponse, UploadAssetRequest, UploadAssetResponse,
};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::{Stream, StreamExt};
use tonic::metadata::MetadataMap;
use tonic::{Code, Request, Response, Status, Streaming};
use tracing::{debug, error, info, warn};

/// Records buffered between the search scan and the transport.
const SEARCH_BUFFER: usize = 16;
const RATING_BUFFER: usize = 16;

type SearchStream = Pin<Box<dyn Stream<Item = Result<SearchRecordsResponse, Status>> + Send>>;
type RatingStream = Pin<Box<dyn Stream<Item = Result<SubmitRatingResponse, Status>> + Send>>;

/// gRPC front of the domain [`CatalogService`].
#[derive(Clone)]
pub struct CatalogServiceImpl {
    service: CatalogService,
}

impl CatalogServiceImpl {
    pub fn new(service: CatalogService) -> Self {
        Self { service }
    }

    /// Drive an upload from its frames: info first, then chunks until the
    /// client closes its side.
    ///
    /// A call that is cancelled or past its deadline stops before the next
    /// frame and stores nothing. The returned `Cancelled` or
    /// `DeadlineExceeded` is the call signal's own status, not a fault.
    pub(crate) async fn receive_upload<S>(
        &self,
        frames: S,
        signal: &CallSignal,
    ) -> Result<StoredAsset, Status>
    where
        S: Stream<Item = Result<UploadAssetRequest, Status>>,
    {
        tokio::pin!(frames);

        let info = match frames.next().await {
            Some(Ok(UploadAssetRequest {
                data: Some(Data::Info(info)),
            })) => info,
            Some(Ok(_)) => {
                return Err(to_status(CatalogError::InvalidFrame(
                    "first frame must carry asset info".to_string(),
                )));
            }
            Some(Err(status)) => {
                return Err(to_status(CatalogError::Stream(format!(
                    "cannot receive asset info: {}",
                    status.message()
                ))));
            }
            None => {
                return Err(to_status(CatalogError::InvalidFrame(
                    "stream closed before asset info".to_string(),
                )));
            }
        };

        let mut upload = self
            .service
            .begin_upload(&info.record_id, &info.asset_type)
            .map_err(to_status)?;
        debug!(record_id = %info.record_id, asset_type = %info.asset_type, "receiving asset");

        loop {
            if let Err(interrupt) = signal.check() {
                info!(record_id = upload.record_id(), received = upload.size(), %interrupt, "upload abandoned");
                return Err(interrupt.into());
            }

            let frame = match frames.next().await {
                None => break,
                Some(Ok(frame)) => frame,
                Some(Err(status)) => {
                    return Err(to_status(CatalogError::Stream(format!(
                        "cannot receive chunk: {}",
                        status.message()
                    ))));
                }
            };

            match frame.data {
                Some(Data::ChunkData(chunk)) => upload.push(&chunk).map_err(to_status)?,
                Some(Data::Info(_)) => {
                    return Err(to_status(CatalogError::InvalidFrame(
                        "asset info sent twice".to_string(),
                    )));
                }
                None => {
                    return Err(to_status(CatalogError::InvalidFrame(
                        "frame carries neither info nor chunk".to_string(),
                    )));
                }
            }
        }

        self.service.commit_upload(upload).await.map_err(to_status)
    }
}

/// Forward rating frames to the domain and push one response per frame, in order.
pub(crate) async fn relay_ratings<S>(
    service: CatalogService,
    frames: S,
    tx: mpsc::Sender<Result<SubmitRatingResponse, Status>>,
) where
    S: Stream<Item = Result<SubmitRatingRequest, Status>>,
{
    tokio::pin!(frames);

    while let Some(frame) = frames.next().await {
        let reply = match frame {
            Ok(SubmitRatingRequest { record_id, score }) => service
                .rate(&record_id, score)
                .map(|rating| rating_response(record_id, rating))
                .map_err(to_status),
            Err(status) => {
                warn!(code = ?status.code(), message = status.message(), "cannot receive rating");
                let _ = tx.send(Err(status)).await;
                return;
            }
        };

        let terminal = reply.is_err();
        if tx.send(reply).await.is_err() {
            warn!("rating response receiver dropped");
            return;
        }
        if terminal {
            return;
        }
    }
    debug!("rating stream closed by client");
}

fn call_signal(metadata: &MetadataMap) -> (CallGuard, CallSignal) {
    CallGuard::new(request_timeout(metadata))
}

fn to_status(err: CatalogError) -> Status {
    let status = Status::from(err);
    match status.code() {
        Code::Internal | Code::Unknown => error!(code = ?status.code(), message = status.message(), "call failed"),
        _ => warn!(code = ?status.code(), message = status.message(), "call rejected"),
    }
    status
}

/// Keeps a [`CallGuard`] alive for as long as the response stream is.
struct GuardedStream<S> {
    inner: S,
    _guard: CallGuard,
}

impl<S> Stream for GuardedStream<S>
where
    S: Stream + Unpin,
{
    type Item = S::Item;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        Pin::new(&mut self.inner).poll_next(cx)
    }
}

#[tonic::async_trait]
impl CatalogRpc for CatalogServiceImpl {
    async fn create_record(
        &self,
        request: Request<CreateRecordRequest>,
    ) -> Result<Response<CreateRecordResponse>, Status> {
        let (_guard, signal) = call_signal(request.metadata());
        let record: Record = request
            .into_inner()
            .record
            .ok_or_invalid("record is required")?
            .try_into()
            .to_tonic()?;

        let id = self.service.create_record(record, &signal).map_err(to_status)?;
        Ok(Response::new(CreateRecordResponse { id }))
    }

    type SearchRecordsStream = SearchStream;

    async fn search_records(
        &self,
        request: Request<SearchRecordsRequest>,
    ) -> Result<Response<Self::SearchRecordsStream>, Status> {
        let (guard, signal) = call_signal(request.metadata());
        let filter: ThresholdFilter = request
            .into_inner()
            .filter
            .unwrap_or_default()
            .try_into()
            .to_tonic()?;
        debug!(?filter, "search started");

        let (tx, rx) = mpsc::channel::<Result<SearchRecordsResponse, Status>>(SEARCH_BUFFER);
        let service = self.service.clone();

        tokio::task::spawn_blocking(move || {
            let mut sent = 0usize;
            let result = service.search_records(&signal, &filter, &mut |record| {
                let frame = SearchRecordsResponse {
                    record: Some(record.into()),
                };
                tx.blocking_send(Ok(frame))
                    .map_err(|_| CatalogError::Stream("cannot send record: client is gone".to_string()))?;
                sent += 1;
                Ok(())
            });

            match result {
                Ok(()) => debug!(sent, "search finished"),
                Err(err) => {
                    let status = to_status(err);
                    let _ = tx.blocking_send(Err(status));
                }
            }
        });

        let stream = GuardedStream {
            inner: ReceiverStream::new(rx),
            _guard: guard,
        };
        Ok(Response::new(Box::pin(stream)))
    }

    async fn upload_asset(
        &self,
        request: Request<Streaming<UploadAssetRequest>>,
    ) -> Result<Response<UploadAssetResponse>, Status> {
        let (_guard, signal) = call_signal(request.metadata());
        let stored = self.receive_upload(request.into_inner(), &signal).await?;

        let size = u32::try_from(stored.size)
            .map_err(|_| to_status(CatalogError::Internal(format!("asset size {} overflows", stored.size))))?;
        Ok(Response::new(UploadAssetResponse { id: stored.id, size }))
    }

    type SubmitRatingsStream = RatingStream;

    async fn submit_ratings(
        &self,
        request: Request<Streaming<SubmitRatingRequest>>,
    ) -> Result<Response<Self::SubmitRatingsStream>, Status> {
        let frames = request.into_inner();
        let (tx, rx) = mpsc::channel(RATING_BUFFER);

        tokio::spawn(relay_ratings(self.service.clone(), frames, tx));

        Ok(Response::new(Box::pin(ReceiverStream::new(rx))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_catalog::{
        DiskAssetStore, InMemoryRatingRepository, InMemoryRecordRepository, MAX_ASSET_SIZE, sample,
    };
    use rpc::catalog::{AssetInfo, Filter};
    use std::sync::Arc;
    use std::time::Duration;
    use tempfile::TempDir;

    struct Fixture {
        api: CatalogServiceImpl,
        service: CatalogService,
        dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let service = CatalogService::new(
            Arc::new(InMemoryRecordRepository::new()),
            Arc::new(DiskAssetStore::new(dir.path())),
            Arc::new(InMemoryRatingRepository::new()),
        );
        Fixture {
            api: CatalogServiceImpl::new(service.clone()),
            service,
            dir,
        }
    }

    fn create_request(record: Record) -> Request<CreateRecordRequest> {
        Request::new(CreateRecordRequest {
            record: Some(record.into()),
        })
    }

    fn info_frame(record_id: &str) -> Result<UploadAssetRequest, Status> {
        Ok(UploadAssetRequest {
            data: Some(Data::Info(AssetInfo {
                record_id: record_id.to_string(),
                asset_type: ".jpg".to_string(),
            })),
        })
    }

    fn chunk_frame(len: usize) -> Result<UploadAssetRequest, Status> {
        Ok(UploadAssetRequest {
            data: Some(Data::ChunkData(vec![7u8; len])),
        })
    }

    async fn stored_record(fx: &Fixture) -> String {
        let mut record = sample::record();
        record.id.clear();
        fx.api
            .create_record(create_request(record))
            .await
            .unwrap()
            .into_inner()
            .id
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let fx = fixture();
        let id = stored_record(&fx).await;
        assert!(uuid::Uuid::parse_str(&id).is_ok());
        assert!(fx.service.find_record(&id).unwrap().is_some());
    }

    #[tokio::test]
    async fn test_create_error_codes() {
        let fx = fixture();

        let missing = fx
            .api
            .create_record(Request::new(CreateRecordRequest { record: None }))
            .await
            .unwrap_err();
        assert_eq!(missing.code(), Code::InvalidArgument);

        let mut bad_id = sample::record();
        bad_id.id = "laptop-1".into();
        let status = fx.api.create_record(create_request(bad_id)).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("laptop-1"));

        let record = sample::record();
        fx.api.create_record(create_request(record.clone())).await.unwrap();
        let status = fx.api.create_record(create_request(record)).await.unwrap_err();
        assert_eq!(status.code(), Code::AlreadyExists);
    }

    #[tokio::test]
    async fn test_create_with_expired_deadline() {
        let fx = fixture();
        let mut request = create_request(sample::record());
        request
            .metadata_mut()
            .insert("grpc-timeout", "0n".parse().unwrap());

        let status = fx.api.create_record(request).await.unwrap_err();
        assert_eq!(status.code(), Code::DeadlineExceeded);
        assert_eq!(fx.service.record_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_search_streams_matches() {
        let fx = fixture();
        for price in [1000.0, 1500.0, 2500.0] {
            let mut record = sample::record();
            record.price_usd = price;
            fx.api.create_record(create_request(record)).await.unwrap();
        }

        let request = Request::new(SearchRecordsRequest {
            filter: Some(Filter {
                max_price_usd: 2000.0,
                ..Default::default()
            }),
        });
        let stream = fx.api.search_records(request).await.unwrap().into_inner();
        let frames: Vec<_> = stream.collect().await;

        assert_eq!(frames.len(), 2);
        for frame in frames {
            let record = frame.unwrap().record.unwrap();
            assert!(record.price_usd <= 2000.0);
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_creates_progress_while_search_stream_is_unread() {
        let fx = fixture();
        for _ in 0..100 {
            fx.service
                .create_record(sample::record(), &CallSignal::never())
                .unwrap();
        }

        let request = Request::new(SearchRecordsRequest {
            filter: Some(Filter {
                max_price_usd: 1e9,
                ..Default::default()
            }),
        });
        let stream = fx.api.search_records(request).await.unwrap().into_inner();
        tokio::time::sleep(Duration::from_millis(300)).await;

        let creates: Vec<_> = (0..2)
            .map(|_| {
                let api = fx.api.clone();
                tokio::spawn(async move { api.create_record(create_request(sample::record())).await })
            })
            .collect();
        for create in creates {
            let created = tokio::time::timeout(Duration::from_secs(5), create)
                .await
                .expect("create stalled behind an unread search")
                .unwrap();
            assert!(created.is_ok());
        }

        let drained = tokio::time::timeout(
            Duration::from_secs(5),
            tokio::spawn(async move { stream.collect::<Vec<_>>().await.len() }),
        )
        .await
        .expect("search stream never drained")
        .unwrap();
        assert_eq!(drained, 100);
        assert_eq!(fx.service.record_count().unwrap(), 102);
    }

    #[tokio::test]
    async fn test_search_past_deadline_ends_cleanly() {
        let fx = fixture();
        for _ in 0..5 {
            fx.api.create_record(create_request(sample::record())).await.unwrap();
        }

        let mut request = Request::new(SearchRecordsRequest {
            filter: Some(Filter {
                max_price_usd: 10_000.0,
                ..Default::default()
            }),
        });
        request
            .metadata_mut()
            .insert("grpc-timeout", "0n".parse().unwrap());

        let stream = fx.api.search_records(request).await.unwrap().into_inner();
        let frames: Vec<_> = stream.collect().await;
        assert!(frames.is_empty());
    }

    #[tokio::test]
    async fn test_search_without_filter_matches_only_free_records() {
        let fx = fixture();
        fx.api.create_record(create_request(sample::record())).await.unwrap();

        let stream = fx
            .api
            .search_records(Request::new(SearchRecordsRequest { filter: None }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(stream.collect::<Vec<_>>().await.len(), 0);
    }

    #[tokio::test]
    async fn test_upload_exact_limit() {
        let fx = fixture();
        let id = stored_record(&fx).await;

        let frames = tokio_stream::iter(vec![
            info_frame(&id),
            chunk_frame(MAX_ASSET_SIZE / 2),
            chunk_frame(MAX_ASSET_SIZE / 2),
        ]);
        let stored = fx.api.receive_upload(frames, &CallSignal::never()).await.unwrap();

        assert_eq!(stored.size, MAX_ASSET_SIZE);
        let info = fx.service.asset(&stored.id).await.unwrap().unwrap();
        assert_eq!(info.record_id, id);
        assert_eq!(tokio::fs::metadata(&info.path).await.unwrap().len(), MAX_ASSET_SIZE as u64);
    }

    #[tokio::test]
    async fn test_upload_over_limit_saves_nothing() {
        let fx = fixture();
        let id = stored_record(&fx).await;

        let frames = tokio_stream::iter(vec![
            info_frame(&id),
            chunk_frame(MAX_ASSET_SIZE),
            chunk_frame(1),
        ]);
        let status = fx
            .api
            .receive_upload(frames, &CallSignal::never())
            .await
            .unwrap_err();

        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("too large"));
        let mut entries = tokio::fs::read_dir(fx.dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upload_frame_errors() {
        let fx = fixture();
        let id = stored_record(&fx).await;
        let never = CallSignal::never();

        let unknown_record = tokio_stream::iter(vec![info_frame("ghost")]);
        assert_eq!(
            fx.api.receive_upload(unknown_record, &never).await.unwrap_err().code(),
            Code::Internal
        );

        let chunk_first = tokio_stream::iter(vec![chunk_frame(3)]);
        assert_eq!(
            fx.api.receive_upload(chunk_first, &never).await.unwrap_err().code(),
            Code::InvalidArgument
        );

        let empty = tokio_stream::iter(Vec::<Result<UploadAssetRequest, Status>>::new());
        assert_eq!(
            fx.api.receive_upload(empty, &never).await.unwrap_err().code(),
            Code::InvalidArgument
        );

        let broken = tokio_stream::iter(vec![Err(Status::internal("reset"))]);
        assert_eq!(
            fx.api.receive_upload(broken, &never).await.unwrap_err().code(),
            Code::Unknown
        );

        let twice = tokio_stream::iter(vec![info_frame(&id), info_frame(&id)]);
        assert_eq!(
            fx.api.receive_upload(twice, &never).await.unwrap_err().code(),
            Code::InvalidArgument
        );
    }

    #[tokio::test]
    async fn test_upload_cancelled_persists_nothing() {
        let fx = fixture();
        let id = stored_record(&fx).await;

        let (guard, signal) = CallGuard::new(None);
        guard.cancel();
        let frames = tokio_stream::iter(vec![info_frame(&id), chunk_frame(10)]);
        let status = fx.api.receive_upload(frames, &signal).await.unwrap_err();

        assert_eq!(status.code(), Code::Cancelled);
        let mut entries = tokio::fs::read_dir(fx.dir.path()).await.unwrap();
        assert!(entries.next_entry().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ratings_in_order() {
        let fx = fixture();
        let frames = tokio_stream::iter(vec![
            Ok(SubmitRatingRequest {
                record_id: "a".into(),
                score: 5.0,
            }),
            Ok(SubmitRatingRequest {
                record_id: "b".into(),
                score: 3.0,
            }),
            Ok(SubmitRatingRequest {
                record_id: "a".into(),
                score: 7.0,
            }),
        ]);
        let (tx, rx) = mpsc::channel(4);
        relay_ratings(fx.service.clone(), frames, tx).await;

        let replies: Vec<_> = ReceiverStream::new(rx)
            .map(|r| r.unwrap())
            .map(|r| (r.record_id, r.rated_count, r.score_sum))
            .collect()
            .await;
        assert_eq!(
            replies,
            vec![
                ("a".to_string(), 1, 5.0),
                ("b".to_string(), 1, 3.0),
                ("a".to_string(), 2, 12.0),
            ]
        );
    }

    #[tokio::test]
    async fn test_rating_receive_error_is_forwarded() {
        let fx = fixture();
        let frames = tokio_stream::iter(vec![
            Ok(SubmitRatingRequest {
                record_id: "a".into(),
                score: 5.0,
            }),
            Err(Status::data_loss("broken pipe")),
            Ok(SubmitRatingRequest {
                record_id: "a".into(),
                score: 9.0,
            }),
        ]);
        let (tx, rx) = mpsc::channel(4);
        relay_ratings(fx.service.clone(), frames, tx).await;

        let replies: Vec<_> = ReceiverStream::new(rx).collect().await;
        assert_eq!(replies.len(), 2);
        assert!(replies[0].is_ok());
        assert_eq!(replies[1].as_ref().unwrap_err().code(), Code::DataLoss);
        assert_eq!(fx.service.rating("a").unwrap().unwrap().count, 1);
    }
}
