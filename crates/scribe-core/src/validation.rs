//! Input validation for post payloads.
//!
//! All field checks run and their failures aggregate into a single report;
//! persistence only executes on a clean pass. The cross-entity blog check is
//! a separate step run once per create request.

use std::fmt;

use uuid::Uuid;

use crate::domain::PostDraft;
use crate::error::DomainError;
use crate::ports::BlogDirectory;

pub const TITLE_MAX: usize = 30;
pub const SHORT_DESCRIPTION_MAX: usize = 100;
pub const CONTENT_MAX: usize = 1000;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Aggregated validation failures, in field-check order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}

/// Validate and normalize an inbound post payload.
///
/// Values are trimmed before the emptiness and length checks, and the
/// trimmed values are what the returned draft carries. Lengths are counted
/// in characters; exactly-at-limit values pass.
pub fn validate_post_input(
    title: &str,
    short_description: &str,
    content: &str,
    blog_id: &str,
) -> Result<PostDraft, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = checked_text("title", title, TITLE_MAX, &mut errors);
    let short_description = checked_text(
        "shortDescription",
        short_description,
        SHORT_DESCRIPTION_MAX,
        &mut errors,
    );
    let content = checked_text("content", content, CONTENT_MAX, &mut errors);

    let blog_id = blog_id.trim();
    if blog_id.is_empty() {
        errors.push("blogId", "must be a non-empty string");
    }

    if errors.is_empty() {
        Ok(PostDraft {
            title,
            short_description,
            content,
            blog_id: blog_id.to_owned(),
        })
    } else {
        Err(errors)
    }
}

fn checked_text(
    field: &'static str,
    value: &str,
    max: usize,
    errors: &mut ValidationErrors,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(field, "must not be empty");
    } else if trimmed.chars().count() > max {
        errors.push(field, format!("must be at most {max} characters"));
    }
    trimmed.to_owned()
}

/// Creation-time referential check: does `blog_id` resolve to an existing
/// blog? Malformed identifiers count as unresolved.
pub async fn check_blog_exists(
    blogs: &dyn BlogDirectory,
    blog_id: &str,
) -> Result<(), DomainError> {
    let exists = match Uuid::parse_str(blog_id) {
        Ok(id) => blogs.find_blog_by_id(id).await?.is_some(),
        Err(_) => false,
    };

    if exists {
        Ok(())
    } else {
        Err(DomainError::InvalidReference {
            blog_id: blog_id.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::Blog;
    use crate::error::RepoError;

    fn valid_input() -> (String, String, String, String) {
        (
            "Title".to_owned(),
            "Short description".to_owned(),
            "Content".to_owned(),
            Uuid::new_v4().to_string(),
        )
    }

    #[test]
    fn accepts_valid_input_and_trims() {
        let draft = validate_post_input("  Title  ", " desc ", " body ", " abc ").unwrap();
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.short_description, "desc");
        assert_eq!(draft.content, "body");
        assert_eq!(draft.blog_id, "abc");
    }

    #[test]
    fn rejects_empty_and_whitespace_only_fields() {
        let errors = validate_post_input("", "   ", "content", "").unwrap_err();
        let fields: Vec<_> = errors.0.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "shortDescription", "blogId"]);
    }

    #[test]
    fn accepts_values_exactly_at_limit() {
        let (_, _, _, blog_id) = valid_input();
        let draft = validate_post_input(
            &"t".repeat(TITLE_MAX),
            &"s".repeat(SHORT_DESCRIPTION_MAX),
            &"c".repeat(CONTENT_MAX),
            &blog_id,
        )
        .unwrap();
        assert_eq!(draft.title.chars().count(), TITLE_MAX);
        assert_eq!(draft.content.chars().count(), CONTENT_MAX);
    }

    #[test]
    fn rejects_values_one_past_the_limit() {
        let (_, _, _, blog_id) = valid_input();
        let errors = validate_post_input(
            &"t".repeat(TITLE_MAX + 1),
            &"s".repeat(SHORT_DESCRIPTION_MAX + 1),
            &"c".repeat(CONTENT_MAX + 1),
            &blog_id,
        )
        .unwrap_err();
        let fields: Vec<_> = errors.0.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "shortDescription", "content"]);
    }

    #[test]
    fn limit_is_counted_after_trimming() {
        let (_, short_description, content, blog_id) = valid_input();
        let padded = format!("  {}  ", "t".repeat(TITLE_MAX));
        let draft =
            validate_post_input(&padded, &short_description, &content, &blog_id).unwrap();
        assert_eq!(draft.title.chars().count(), TITLE_MAX);
    }

    struct StubBlogs(HashMap<Uuid, Blog>);

    #[async_trait]
    impl BlogDirectory for StubBlogs {
        async fn find_blog_by_id(&self, id: Uuid) -> Result<Option<Blog>, RepoError> {
            Ok(self.0.get(&id).cloned())
        }
    }

    #[tokio::test]
    async fn blog_check_passes_for_known_blog() {
        let blog = Blog {
            id: Uuid::new_v4(),
            name: "tech".to_owned(),
        };
        let blogs = StubBlogs(HashMap::from([(blog.id, blog.clone())]));
        assert!(check_blog_exists(&blogs, &blog.id.to_string()).await.is_ok());
    }

    #[tokio::test]
    async fn blog_check_fails_for_unknown_and_malformed_ids() {
        let blogs = StubBlogs(HashMap::new());

        let err = check_blog_exists(&blogs, &Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidReference { .. }));

        let err = check_blog_exists(&blogs, "not-an-id").await.unwrap_err();
        assert!(matches!(err, DomainError::InvalidReference { .. }));
    }
}
