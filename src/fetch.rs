use rayon::prelude::*;

use crate::{
    foundation::{
        core::{CollectionReference, ImageBuffer},
        error::{CollageError, CollageResult},
    },
    transport::HttpTransport,
};

/// Download strategy for [`ThumbnailFetcher`].
#[derive(Clone, Debug)]
pub struct FetchOpts {
    /// Fetch on a dedicated rayon pool instead of the calling thread.
    pub parallel: bool,
    /// Worker thread count. `None` uses available parallelism, capped at the job count.
    pub threads: Option<usize>,
}

impl Default for FetchOpts {
    fn default() -> Self {
        Self {
            parallel: true,
            threads: None,
        }
    }
}

/// Downloads thumbnail bytes, index-aligned with the input references.
pub struct ThumbnailFetcher<'a, T: HttpTransport> {
    transport: &'a T,
    opts: FetchOpts,
}

impl<'a, T: HttpTransport> ThumbnailFetcher<'a, T> {
    pub fn new(transport: &'a T, opts: FetchOpts) -> Self {
        Self { transport, opts }
    }

    /// Fetch every reference. Output slot `i` always holds the bytes of `refs[i]`,
    /// whatever order the downloads finish in. The first failure aborts the batch.
    #[tracing::instrument(skip(self, refs), fields(count = refs.len(), parallel = self.opts.parallel))]
    pub fn fetch_all(&self, refs: &[CollectionReference]) -> CollageResult<Vec<ImageBuffer>> {
        let images = if self.opts.parallel && refs.len() > 1 {
            let pool = build_thread_pool(self.opts.threads, refs.len())?;
            pool.install(|| {
                refs.par_iter()
                    .map(|r| self.fetch_one(r))
                    .collect::<CollageResult<Vec<_>>>()
            })?
        } else {
            refs.iter()
                .map(|r| self.fetch_one(r))
                .collect::<CollageResult<Vec<_>>>()?
        };

        let bytes: usize = images.iter().map(ImageBuffer::len).sum();
        tracing::info!(images = images.len(), bytes, "thumbnails fetched");
        Ok(images)
    }

    fn fetch_one(&self, reference: &CollectionReference) -> CollageResult<ImageBuffer> {
        let response = self.transport.get(reference.as_str(), &[])?;
        if !response.is_success() {
            return Err(CollageError::fetch(format!(
                "image {reference} responded with status code {}",
                response.status
            )));
        }
        tracing::debug!(url = %reference, bytes = response.body.len(), "thumbnail");
        Ok(ImageBuffer(response.body))
    }
}

fn build_thread_pool(threads: Option<usize>, jobs: usize) -> CollageResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(CollageError::config(
            "fetch threading 'threads' must be >= 1 when set",
        ));
    }

    let n = threads
        .unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
        .min(jobs.max(1));
    rayon::ThreadPoolBuilder::new()
        .num_threads(n)
        .thread_name(|i| format!("thumb-fetch-{i}"))
        .build()
        .map_err(|e| CollageError::config(format!("failed to build rayon thread pool: {e}")))
}
