use serde::{Deserialize, Deserializer};

use crate::pagination::PageRequest;

/// `?page=N` on listing routes.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    #[serde(default, deserialize_with = "deserialize_page")]
    pub page: PageRequest,
}

// clients send whatever they like here; anything that is not an integer means the first page
pub fn deserialize_page<'de, D>(deserializer: D) -> Result<PageRequest, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    let page = value
        .and_then(|value| value.trim().parse::<i64>().ok())
        .unwrap_or(1);
    Ok(PageRequest::new(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::Query;
    use axum::http::Uri;

    fn page_of(uri: &str) -> i64 {
        let uri: Uri = uri.parse().unwrap();
        let Query(query) = Query::<PageQuery>::try_from_uri(&uri).unwrap();
        query.page.page
    }

    #[test]
    fn reads_numeric_page() {
        assert_eq!(page_of("/questions?page=3"), 3);
    }

    #[test]
    fn missing_page_is_first() {
        assert_eq!(page_of("/questions"), 1);
    }

    #[test]
    fn garbage_page_is_first() {
        assert_eq!(page_of("/questions?page=abc"), 1);
        assert_eq!(page_of("/questions?page="), 1);
    }

    #[test]
    fn page_below_one_is_clamped() {
        assert_eq!(page_of("/questions?page=0"), 1);
        assert_eq!(page_of("/questions?page=-2"), 1);
    }
}
