//! Post records and write payload validation
//!
//! Write bodies arrive as `PostPayload` (named fields, untyped values) and are
//! checked field by field into a typed `NewPost` before any statement runs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;

use super::{PostField, ValidationError, ValidationErrors};

/// A stored post row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub image: String,
    pub category_id: i32,
    pub description: String,
    pub content: String,
    pub status_id: i32,
}

/// Raw write body for create and update.
///
/// Values stay untyped so each field can report its own type error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostPayload {
    pub title: Option<Value>,
    pub image: Option<Value>,
    pub category_id: Option<Value>,
    pub description: Option<Value>,
    pub content: Option<Value>,
    pub status_id: Option<Value>,
}

/// Validated post fields, ready to bind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub image: String,
    pub category_id: i32,
    pub description: String,
    pub content: String,
    pub status_id: i32,
}

impl PostPayload {
    fn value(&self, field: PostField) -> Option<&Value> {
        let value = match field {
            PostField::Title => &self.title,
            PostField::Image => &self.image,
            PostField::CategoryId => &self.category_id,
            PostField::Description => &self.description,
            PostField::Content => &self.content,
            PostField::StatusId => &self.status_id,
        };
        value.as_ref().filter(|v| !v.is_null())
    }

    /// Check all six fields and collect every violation.
    ///
    /// # Example
    /// ```
    /// use posts_server::models::PostPayload;
    /// use serde_json::json;
    ///
    /// let payload: PostPayload = serde_json::from_value(json!({
    ///     "title": "A", "image": "i", "category_id": 1,
    ///     "description": "d", "content": "c", "status_id": 1
    /// })).unwrap();
    /// assert!(payload.validate().is_ok());
    ///
    /// let errors = PostPayload::default().validate().unwrap_err();
    /// assert_eq!(errors.len(), 6);
    /// ```
    pub fn validate(&self) -> Result<NewPost, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let title = self.text(PostField::Title, &mut errors);
        let image = self.text(PostField::Image, &mut errors);
        let category_id = self.integer(PostField::CategoryId, &mut errors);
        let description = self.text(PostField::Description, &mut errors);
        let content = self.text(PostField::Content, &mut errors);
        let status_id = self.integer(PostField::StatusId, &mut errors);

        match (title, image, category_id, description, content, status_id) {
            (
                Some(title),
                Some(image),
                Some(category_id),
                Some(description),
                Some(content),
                Some(status_id),
            ) if errors.is_empty() => Ok(NewPost {
                title,
                image,
                category_id,
                description,
                content,
                status_id,
            }),
            _ => Err(errors),
        }
    }

    fn text(&self, field: PostField, errors: &mut ValidationErrors) -> Option<String> {
        match self.value(field) {
            None => {
                errors.push(ValidationError::Required { field });
                None
            }
            Some(Value::String(s)) if s.trim().is_empty() => {
                errors.push(ValidationError::Required { field });
                None
            }
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(ValidationError::NotText { field });
                None
            }
        }
    }

    fn integer(&self, field: PostField, errors: &mut ValidationErrors) -> Option<i32> {
        match self.value(field) {
            None => {
                errors.push(ValidationError::Required { field });
                None
            }
            Some(Value::Number(n)) => match whole_i32(n) {
                Some(n) => Some(n),
                None => {
                    errors.push(ValidationError::NotInteger { field });
                    None
                }
            },
            Some(_) => {
                errors.push(ValidationError::NotNumber { field });
                None
            }
        }
    }
}

/// Whole-valued JSON number in `i32` range; `1.0` counts as `1`.
fn whole_i32(n: &serde_json::Number) -> Option<i32> {
    if let Some(n) = n.as_i64() {
        return i32::try_from(n).ok();
    }
    let f = n.as_f64()?;
    let in_range = f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX);
    (f.fract() == 0.0 && in_range).then_some(f as i32)
}

/// Post identifier taken from a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostId(i32);

impl PostId {
    /// Parse a path segment. Anything that cannot be an integer key returns
    /// `None`, since no row can match it.
    pub fn parse(s: &str) -> Option<Self> {
        s.trim().parse::<i32>().ok().map(Self)
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for PostId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: Value) -> PostPayload {
        serde_json::from_value(value).expect("payload should deserialize")
    }

    #[test]
    fn valid_payload() {
        let post = payload(json!({
            "title": "A",
            "image": "https://example.com/a.png",
            "category_id": 1,
            "description": "d",
            "content": "c",
            "status_id": 2
        }))
        .validate()
        .expect("valid payload");

        assert_eq!(post.title, "A");
        assert_eq!(post.category_id, 1);
        assert_eq!(post.status_id, 2);
    }

    #[test]
    fn empty_body_reports_all_fields_in_order() {
        let errors = payload(json!({})).validate().unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "Title is required",
                "Image is required",
                "Category ID is required",
                "Description is required",
                "Content is required",
                "Status ID is required",
            ]
        );
        assert_eq!(errors.first().unwrap().to_string(), "Title is required");
    }

    #[test]
    fn null_counts_as_missing() {
        let errors = payload(json!({
            "title": null,
            "image": "i",
            "category_id": 1,
            "description": "d",
            "content": "c",
            "status_id": null
        }))
        .validate()
        .unwrap_err();

        assert_eq!(
            errors.messages(),
            vec!["Title is required", "Status ID is required"]
        );
    }

    #[test]
    fn wrong_types() {
        let errors = payload(json!({
            "title": 5,
            "image": "i",
            "category_id": "1",
            "description": ["d"],
            "content": "c",
            "status_id": true
        }))
        .validate()
        .unwrap_err();

        assert_eq!(
            errors.messages(),
            vec![
                "Title must be a string",
                "Category ID must be a number",
                "Description must be a string",
                "Status ID must be a number",
            ]
        );
    }

    #[test]
    fn blank_text_is_missing() {
        let errors = payload(json!({
            "title": "   ",
            "image": "i",
            "category_id": 1,
            "description": "d",
            "content": "c",
            "status_id": 1
        }))
        .validate()
        .unwrap_err();

        assert_eq!(errors.messages(), vec!["Title is required"]);
    }

    #[test]
    fn fractional_and_oversized_numbers() {
        let errors = payload(json!({
            "title": "t",
            "image": "i",
            "category_id": 1.5,
            "description": "d",
            "content": "c",
            "status_id": 10_000_000_000i64
        }))
        .validate()
        .unwrap_err();

        assert_eq!(
            errors.messages(),
            vec!["Category ID must be an integer", "Status ID must be an integer"]
        );
    }

    #[test]
    fn whole_valued_floats_are_integers() {
        let post = payload(json!({
            "title": "t",
            "image": "i",
            "category_id": 3.0,
            "description": "d",
            "content": "c",
            "status_id": 1
        }))
        .validate()
        .expect("whole float accepted");
        assert_eq!(post.category_id, 3);

        let errors = payload(json!({
            "title": "t",
            "image": "i",
            "category_id": 1,
            "description": "d",
            "content": "c",
            "status_id": 3.0e10
        }))
        .validate()
        .unwrap_err();
        assert_eq!(errors.messages(), vec!["Status ID must be an integer"]);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let post = payload(json!({
            "id": 99,
            "title": "t",
            "image": "i",
            "category_id": 1,
            "description": "d",
            "content": "c",
            "status_id": 1
        }))
        .validate();
        assert!(post.is_ok());
    }

    #[test]
    fn post_id_parsing() {
        assert_eq!(PostId::parse("42").map(PostId::get), Some(42));
        assert!(PostId::parse("abc").is_none());
        assert!(PostId::parse("4.2").is_none());
        assert!(PostId::parse("99999999999").is_none());
    }

    #[test]
    fn post_serializes_with_column_names() {
        let post = Post {
            id: 1,
            title: "A".into(),
            image: "i".into(),
            category_id: 3,
            description: "d".into(),
            content: "c".into(),
            status_id: 2,
        };
        let value = serde_json::to_value(&post).unwrap();
        assert_eq!(value["category_id"], 3);
        assert_eq!(value["status_id"], 2);
        assert_eq!(value["title"], "A");
    }
}
