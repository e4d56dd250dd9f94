use std::path::Path;

use image::RgbImage;

use crate::{
    catalog::{
        pager::{CollectionPager, SortOrder},
        user::UserValidator,
    },
    compose::composer::GridComposer,
    config::ClientConfig,
    fetch::{FetchOpts, ThumbnailFetcher},
    foundation::{
        core::CellSize,
        error::{CollageError, CollageResult},
    },
    transport::HttpTransport,
};

/// What to build: whose collection, how big each cell is, and in which order.
#[derive(Clone, Debug)]
pub struct CollageRequest {
    pub username: String,
    pub cell: CellSize,
    pub sort: SortOrder,
}

impl CollageRequest {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            cell: CellSize::default(),
            sort: SortOrder::default(),
        }
    }
}

/// Validate user → list collection → fetch thumbnails → compose.
///
/// This is the primary one-shot API for producing a collage. Every stage is fail-fast:
/// the first error ends the run and no canvas is returned.
pub struct CollagePipeline<T: HttpTransport> {
    config: ClientConfig,
    transport: T,
    fetch: FetchOpts,
    composer: GridComposer,
}

impl<T: HttpTransport> CollagePipeline<T> {
    pub fn new(config: ClientConfig, transport: T) -> CollageResult<Self> {
        config.validate()?;
        let fetch = FetchOpts {
            parallel: true,
            threads: config.threads,
        };
        Ok(Self {
            config,
            transport,
            fetch,
            composer: GridComposer::default(),
        })
    }

    pub fn with_fetch_opts(mut self, fetch: FetchOpts) -> Self {
        self.fetch = fetch;
        self
    }

    pub fn with_composer(mut self, composer: GridComposer) -> Self {
        self.composer = composer;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    #[tracing::instrument(skip(self, req), fields(user = %req.username))]
    pub fn run(&self, req: &CollageRequest) -> CollageResult<RgbImage> {
        if !UserValidator::new(&self.config, &self.transport).exists(&req.username)? {
            return Err(CollageError::user_not_found(req.username.clone()));
        }

        let refs = CollectionPager::new(&self.config, &self.transport)
            .fetch_references(&req.username, req.sort)?;
        let images =
            ThumbnailFetcher::new(&self.transport, self.fetch.clone()).fetch_all(&refs)?;
        self.composer.compose(images, req.cell)
    }
}

/// Write the finished collage as PNG, creating parent directories as needed.
pub fn write_png(canvas: &RgbImage, path: &Path) -> CollageResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CollageError::encode(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    canvas
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| CollageError::encode(format!("write png '{}': {e}", path.display())))
}
