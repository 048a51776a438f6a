use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

use crate::database::models::{CourseInput, CoursePatch, NewCourse};

/// First violated field of a course body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }

    fn required(field: &str) -> Self {
        Self::new(field, format!("\"{}\" is required", field))
    }

    fn empty(field: &str) -> Self {
        Self::new(field, format!("\"{}\" is not allowed to be empty", field))
    }

    fn not_allowed(field: &str) -> Self {
        Self::new(field, format!("\"{}\" is not allowed", field))
    }

    /// Single-entry map for `ApiError::validation_error`
    pub fn field_errors(&self) -> HashMap<String, String> {
        HashMap::from([(self.field.clone(), self.message.clone())])
    }
}

/// Validate a full course body. Fields are checked in the order
/// title, description, price, then unknown keys.
pub fn validate_new_course(input: &CourseInput, instructor: Uuid) -> Result<NewCourse, ValidationError> {
    let title = input.title.as_ref().ok_or_else(|| ValidationError::required("title"))?;
    let title = check_text("title", title)?;

    let description = input
        .description
        .as_ref()
        .ok_or_else(|| ValidationError::required("description"))?;
    let description = check_text("description", description)?;

    let price = input.price.as_ref().ok_or_else(|| ValidationError::required("price"))?;
    let price = check_price(price)?;

    reject_unknown(input)?;

    Ok(NewCourse {
        title: title.to_string(),
        description: description.to_string(),
        price,
        instructor,
    })
}

/// Validate a partial course body: the same rules as a new course, applied
/// only to the fields that are present.
pub fn validate_course_patch(input: &CourseInput) -> Result<CoursePatch, ValidationError> {
    let title = input
        .title
        .as_ref()
        .map(|value| check_text("title", value))
        .transpose()?;
    let description = input
        .description
        .as_ref()
        .map(|value| check_text("description", value))
        .transpose()?;
    let price = input.price.as_ref().map(check_price).transpose()?;
    reject_unknown(input)?;

    Ok(CoursePatch {
        title: title.map(str::to_string),
        description: description.map(str::to_string),
        price,
    })
}

fn check_text<'a>(field: &str, value: &'a Value) -> Result<&'a str, ValidationError> {
    let text = value
        .as_str()
        .ok_or_else(|| ValidationError::new(field, format!("\"{}\" must be a string", field)))?;
    if text.trim().is_empty() {
        return Err(ValidationError::empty(field));
    }
    Ok(text)
}

fn check_price(value: &Value) -> Result<f64, ValidationError> {
    let price = value
        .as_f64()
        .ok_or_else(|| ValidationError::new("price", "\"price\" must be a number"))?;
    if price < 0.0 {
        return Err(ValidationError::new(
            "price",
            "\"price\" must be greater than or equal to 0",
        ));
    }
    Ok(price)
}

fn reject_unknown(input: &CourseInput) -> Result<(), ValidationError> {
    // BTreeMap keeps the reported key deterministic
    match input.unknown.keys().next() {
        Some(key) => Err(ValidationError::not_allowed(key)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn input(value: serde_json::Value) -> CourseInput {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn accepts_valid_course() {
        let instructor = Uuid::new_v4();
        let course = validate_new_course(&CourseInput::new("Algorithms", "Intro", 49.99), instructor).unwrap();
        assert_eq!(course.title, "Algorithms");
        assert_eq!(course.price, 49.99);
        assert_eq!(course.instructor, instructor);
    }

    #[test]
    fn free_course_is_valid() {
        assert!(validate_new_course(&CourseInput::new("Intro", "Free intro", 0.0), Uuid::new_v4()).is_ok());
    }

    #[test]
    fn reports_first_violated_field() {
        let err = validate_new_course(&input(json!({ "price": -1 })), Uuid::new_v4()).unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.message, "\"title\" is required");

        let err = validate_new_course(
            &input(json!({ "title": "T", "description": "  ", "price": -1 })),
            Uuid::new_v4(),
        )
        .unwrap_err();
        assert_eq!(err.field, "description");
        assert_eq!(err.message, "\"description\" is not allowed to be empty");
    }

    #[test]
    fn rejects_negative_price() {
        let err = validate_new_course(&CourseInput::new("T", "D", -0.01), Uuid::new_v4()).unwrap_err();
        assert_eq!(err.field, "price");
        assert_eq!(err.message, "\"price\" must be greater than or equal to 0");
    }

    #[test]
    fn rejects_mistyped_fields() {
        let err = validate_new_course(
            &input(json!({ "title": 42, "description": "Intro", "price": 1 })),
            Uuid::new_v4(),
        )
        .unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.message, "\"title\" must be a string");

        let err = validate_new_course(
            &input(json!({ "title": "T", "description": "D", "price": "49.99" })),
            Uuid::new_v4(),
        )
        .unwrap_err();
        assert_eq!(err.field, "price");
        assert_eq!(err.message, "\"price\" must be a number");

        let err = validate_course_patch(&input(json!({ "description": ["Intro"] }))).unwrap_err();
        assert_eq!(err.message, "\"description\" must be a string");
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = validate_new_course(
            &input(json!({ "title": "T", "description": "D", "price": 1, "instructor": "x" })),
            Uuid::new_v4(),
        )
        .unwrap_err();
        assert_eq!(err.field, "instructor");
        assert_eq!(err.message, "\"instructor\" is not allowed");
    }

    #[test]
    fn patch_allows_missing_fields() {
        let patch = validate_course_patch(&input(json!({ "price": 59.99 }))).unwrap();
        assert_eq!(patch.price, Some(59.99));
        assert!(patch.title.is_none());
        assert!(patch.description.is_none());
    }

    #[test]
    fn patch_applies_field_rules() {
        let err = validate_course_patch(&input(json!({ "title": "" }))).unwrap_err();
        assert_eq!(err.field, "title");

        let err = validate_course_patch(&input(json!({ "students": [] }))).unwrap_err();
        assert_eq!(err.field, "students");
    }

    #[test]
    fn field_errors_has_single_entry() {
        let err = ValidationError::required("title");
        let map = err.field_errors();
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("title").map(String::as_str), Some("\"title\" is required"));
    }
}
