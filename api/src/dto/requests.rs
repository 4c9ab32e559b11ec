use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Validate, Deserialize)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 5000, message = "Post text must be 1-5000 characters"))]
    pub text: String,
    pub group_id: Option<Uuid>,
    #[validate(length(max = 255))]
    pub image: Option<String>,
}

#[derive(Debug, Validate, Deserialize)]
pub struct CreateGroupRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(
        length(min = 1, max = 200),
        custom(function = "validate_slug", message = "Slug may contain only a-z, 0-9, '-' and '_'")
    )]
    pub slug: String,
    #[serde(default)]
    pub description: String,
}

fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("slug"))
    }
}

/// `?page=N` query parameter.
///
/// Kept as a raw string so a malformed value never fails the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    /// Anything that is not a non-negative integer reads as page 1. Integers
    /// too large for `usize` saturate, so they still land on the last page.
    pub fn page_number(&self) -> usize {
        let Some(raw) = self.page.as_deref().map(str::trim) else {
            return 1;
        };
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return 1;
        }
        raw.parse().unwrap_or(usize::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>) -> PageParams {
        PageParams {
            page: page.map(str::to_string),
        }
    }

    #[test]
    fn page_number_defaults_to_first() {
        assert_eq!(params(None).page_number(), 1);
        assert_eq!(params(Some("abc")).page_number(), 1);
        assert_eq!(params(Some("-2")).page_number(), 1);
        assert_eq!(params(Some("3")).page_number(), 3);
        assert_eq!(params(Some("")).page_number(), 1);
    }

    #[test]
    fn oversized_page_number_saturates() {
        assert_eq!(
            params(Some("99999999999999999999999999")).page_number(),
            usize::MAX
        );
    }

    #[test]
    fn validates_group_slug() {
        let group = |slug: &str| CreateGroupRequest {
            title: "Tolstoy fans".into(),
            slug: slug.into(),
            description: String::new(),
        };

        assert!(group("tolstoi").validate().is_ok());
        assert!(group("leo-tolstoy_2").validate().is_ok());
        assert!(group("Not A Slug").validate().is_err());
        assert!(group("").validate().is_err());
    }

    #[test]
    fn validates_post_text() {
        let empty = CreatePostRequest {
            text: String::new(),
            group_id: None,
            image: None,
        };
        assert!(empty.validate().is_err());

        let ok = CreatePostRequest {
            text: "hello".into(),
            group_id: None,
            image: Some("posts/cat.jpg".into()),
        };
        assert!(ok.validate().is_ok());
    }
}
