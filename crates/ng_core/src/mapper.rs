use crate::types::{NormalizedArticle, UpstreamArticle};

/// Converts an upstream article into the caller-facing shape.
///
/// Missing strings become `""`. The image url is carried over as-is,
/// so an absent image stays absent.
pub fn map_article(article: &UpstreamArticle) -> NormalizedArticle {
    NormalizedArticle::from(article.clone())
}

impl From<UpstreamArticle> for NormalizedArticle {
    fn from(article: UpstreamArticle) -> Self {
        Self {
            source: article.source.and_then(|s| s.name).unwrap_or_default(),
            title: article.title.unwrap_or_default(),
            summary: article.description.unwrap_or_default(),
            url: article.url.unwrap_or_default(),
            image: article.url_to_image,
            published_at: article.published_at.unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UpstreamSource;

    fn full_article() -> UpstreamArticle {
        UpstreamArticle {
            source: Some(UpstreamSource {
                id: Some("the-national".to_string()),
                name: Some("The National".to_string()),
            }),
            author: Some("Staff".to_string()),
            title: Some("Dubai metro expands".to_string()),
            description: Some("New stations open next year.".to_string()),
            url: Some("https://example.com/metro".to_string()),
            url_to_image: Some("https://example.com/metro.jpg".to_string()),
            published_at: Some("2024-05-01T08:30:00Z".to_string()),
            content: Some("Full text".to_string()),
        }
    }

    #[test]
    fn test_map_populated_article() {
        let article = full_article();
        let mapped = map_article(&article);

        assert_eq!(mapped.source, "The National");
        assert_eq!(mapped.title, "Dubai metro expands");
        assert_eq!(mapped.summary, "New stations open next year.");
        assert_eq!(mapped.url, "https://example.com/metro");
        assert_eq!(mapped.image.as_deref(), Some("https://example.com/metro.jpg"));
        assert_eq!(mapped.published_at, "2024-05-01T08:30:00Z");
    }

    #[test]
    fn test_map_empty_article_defaults_to_empty_strings() {
        let mapped = map_article(&UpstreamArticle::default());

        assert_eq!(mapped.source, "");
        assert_eq!(mapped.title, "");
        assert_eq!(mapped.summary, "");
        assert_eq!(mapped.url, "");
        assert_eq!(mapped.published_at, "");
        assert!(mapped.image.is_none());
    }

    #[test]
    fn test_map_source_without_name() {
        let article = UpstreamArticle {
            source: Some(UpstreamSource {
                id: Some("x".to_string()),
                name: None,
            }),
            ..full_article()
        };
        assert_eq!(map_article(&article).source, "");
    }

    #[test]
    fn test_map_keeps_missing_image_absent() {
        let article = UpstreamArticle {
            url_to_image: None,
            ..full_article()
        };
        let mapped = map_article(&article);
        assert!(mapped.image.is_none());
        assert_eq!(mapped.title, "Dubai metro expands");
    }

    #[test]
    fn test_owned_conversion_matches_borrowed() {
        let article = full_article();
        assert_eq!(NormalizedArticle::from(article.clone()), map_article(&article));
        assert_eq!(
            NormalizedArticle::from(UpstreamArticle::default()),
            map_article(&UpstreamArticle::default())
        );
    }
}
