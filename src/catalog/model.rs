//! Wire shape of one collection listing page. Only the fields the pipeline reads.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
pub struct CollectionPage {
    #[serde(default)]
    pub releases: Vec<Release>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Release {
    pub basic_information: BasicInformation,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BasicInformation {
    pub cover_image: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub urls: PaginationUrls,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct PaginationUrls {
    #[serde(default)]
    pub next: Option<String>,
}

impl CollectionPage {
    /// Next page link; absent, `null` and `""` all mean this was the last page.
    pub fn next_url(&self) -> Option<&str> {
        self.pagination
            .urls
            .next
            .as_deref()
            .filter(|next| !next.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_cover_image_and_next_link() {
        let json = r#"{
            "pagination": {"page": 1, "pages": 2, "urls": {"next": "http://x/p2", "last": "http://x/p2"}},
            "releases": [
                {"id": 1, "basic_information": {"title": "A", "cover_image": "http://img/a.jpg"}},
                {"id": 2, "basic_information": {"title": "B", "cover_image": "http://img/b.jpg"}}
            ]
        }"#;
        let page: CollectionPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.releases.len(), 2);
        assert_eq!(page.releases[1].basic_information.cover_image, "http://img/b.jpg");
        assert_eq!(page.next_url(), Some("http://x/p2"));
    }

    #[test]
    fn missing_null_or_empty_next_ends_paging() {
        for json in [
            r#"{"releases": [], "pagination": {"urls": {}}}"#,
            r#"{"releases": [], "pagination": {"urls": {"next": null}}}"#,
            r#"{"releases": [], "pagination": {"urls": {"next": ""}}}"#,
            r#"{"releases": []}"#,
        ] {
            let page: CollectionPage = serde_json::from_str(json).unwrap();
            assert_eq!(page.next_url(), None, "{json}");
        }
    }
}
