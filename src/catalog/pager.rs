use std::collections::HashSet;

use crate::{
    catalog::model::CollectionPage,
    config::ClientConfig,
    foundation::{
        core::CollectionReference,
        error::{CollageError, CollageResult},
    },
    transport::{HttpTransport, request_key},
};

/// Listing order requested from the catalog.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Whatever order the service returns.
    #[default]
    Unsorted,
    /// Artist name, descending.
    ArtistDesc,
}

impl SortOrder {
    pub fn from_flag(sort: bool) -> Self {
        if sort { Self::ArtistDesc } else { Self::Unsorted }
    }

    fn query(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Unsorted => &[],
            Self::ArtistDesc => &[("sort", "artist"), ("sort-order", "desc")],
        }
    }
}

/// Walks every page of a user's primary collection folder.
pub struct CollectionPager<'a, T: HttpTransport> {
    config: &'a ClientConfig,
    transport: &'a T,
}

impl<'a, T: HttpTransport> CollectionPager<'a, T> {
    pub fn new(config: &'a ClientConfig, transport: &'a T) -> Self {
        Self { config, transport }
    }

    /// Collect one cover-image reference per release, in listing order.
    ///
    /// Pages are requested one after another; each URL comes from the previous page.
    /// The sort query is attached to the first request only, the service carries it
    /// forward inside its `next` links.
    #[tracing::instrument(skip(self))]
    pub fn fetch_references(
        &self,
        username: &str,
        sort: SortOrder,
    ) -> CollageResult<Vec<CollectionReference>> {
        let mut refs = Vec::new();
        let mut visited = HashSet::new();
        let mut url = self.config.collection_url(username);
        let mut query = sort.query();

        loop {
            let key = request_key(&url, query);
            if !visited.insert(key.clone()) {
                return Err(CollageError::fetch(format!(
                    "collection pagination revisited {key}"
                )));
            }

            let page = self.fetch_page(&url, query)?;
            let next = page.next_url().map(str::to_owned);
            let before = refs.len();
            refs.extend(
                page.releases
                    .into_iter()
                    .map(|r| CollectionReference::new(r.basic_information.cover_image)),
            );
            tracing::debug!(page = visited.len(), items = refs.len() - before, "collection page");

            match next {
                Some(next) => {
                    url = next;
                    query = &[];
                }
                None => break,
            }
        }

        if refs.is_empty() {
            return Err(CollageError::empty_result(format!(
                "no images supplied for '{username}'; the collection may be empty"
            )));
        }
        tracing::info!(pages = visited.len(), references = refs.len(), "collection listed");
        Ok(refs)
    }

    fn fetch_page(&self, url: &str, query: &[(&str, &str)]) -> CollageResult<CollectionPage> {
        let response = self.transport.get(url, query)?;
        if !response.is_success() {
            return Err(CollageError::fetch(format!(
                "catalog responded with status code {} for {url}",
                response.status
            )));
        }
        serde_json::from_slice(&response.body)
            .map_err(|e| CollageError::fetch(format!("malformed collection page {url}: {e}")))
    }
}
