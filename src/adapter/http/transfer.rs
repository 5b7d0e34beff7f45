//! Streamed request bodies that report how many bytes have been handed to
//! the transport.

use futures_util::stream::{self, Stream, StreamExt};
use reqwest::multipart::Part;
use reqwest::Body;

use crate::domain::repositories::upload_repository::TransferProgress;

pub const STREAM_BLOCK_SIZE: usize = 64 * 1024;

pub fn progress_stream(
    data: Vec<u8>,
    progress: TransferProgress,
) -> impl Stream<Item = Result<Vec<u8>, std::io::Error>> + Send + 'static {
    let total = data.len() as u64;
    let blocks: Vec<Vec<u8>> = data.chunks(STREAM_BLOCK_SIZE).map(<[u8]>::to_vec).collect();
    let mut loaded: u64 = 0;

    stream::iter(blocks).map(move |block| {
        loaded += block.len() as u64;
        progress(loaded, total);
        Ok(block)
    })
}

/// Multipart part with a known length whose bytes are streamed through
/// `progress_stream`
pub fn progress_part(data: Vec<u8>, progress: TransferProgress) -> Part {
    let length = data.len() as u64;
    let body = Body::wrap_stream(progress_stream(data, progress));
    Part::stream_with_length(body, length)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording() -> (TransferProgress, Arc<Mutex<Vec<(u64, u64)>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let sink = calls.clone();
        let progress: TransferProgress =
            Arc::new(move |loaded, total| sink.lock().unwrap().push((loaded, total)));
        (progress, calls)
    }

    #[tokio::test]
    async fn test_progress_stream_reports_each_block() {
        let (progress, calls) = recording();
        let data = vec![7u8; STREAM_BLOCK_SIZE * 2 + 10];
        let total = data.len() as u64;

        let blocks: Vec<Vec<u8>> = progress_stream(data, progress)
            .map(|block| block.unwrap())
            .collect()
            .await;

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[2].len(), 10);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![
                (STREAM_BLOCK_SIZE as u64, total),
                (STREAM_BLOCK_SIZE as u64 * 2, total),
                (total, total),
            ]
        );
    }

    #[tokio::test]
    async fn test_progress_stream_empty_body() {
        let (progress, calls) = recording();

        let blocks: Vec<_> = progress_stream(Vec::new(), progress).collect().await;

        assert!(blocks.is_empty());
        assert!(calls.lock().unwrap().is_empty());
    }
}
