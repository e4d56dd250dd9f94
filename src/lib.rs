//! Build a square-grid collage from the cover art of a Discogs collection.
//!
//! The work is split into four collaborators, run in order by [`CollagePipeline`]:
//!
//! - [`UserValidator`] checks the account exists
//! - [`CollectionPager`] walks the paginated collection listing into cover-image URLs
//! - [`ThumbnailFetcher`] downloads the images, optionally on a rayon pool
//! - [`GridComposer`] pastes them row-major onto the smallest square grid
#![forbid(unsafe_code)]

pub mod catalog;
pub mod compose;
pub mod config;
pub mod fetch;
mod foundation;
pub mod pipeline;
pub mod transport;

pub use crate::catalog::pager::{CollectionPager, SortOrder};
pub use crate::catalog::user::UserValidator;
pub use crate::compose::composer::{GridComposer, ResizeFilter};
pub use crate::compose::grid::GridSpec;
pub use crate::config::ClientConfig;
pub use crate::fetch::{FetchOpts, ThumbnailFetcher};
pub use crate::foundation::core::{CellSize, CollectionReference, ImageBuffer};
pub use crate::foundation::error::{CollageError, CollageResult};
pub use crate::pipeline::{CollagePipeline, CollageRequest, write_png};
pub use crate::transport::{HttpResponse, HttpTransport, InMemoryTransport, ReqwestTransport};
