use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use uuid::Uuid;

use super::user::InstructorSummary;

/// Persisted course record; `instructor` is the owning user's id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub instructor: Uuid,
    #[serde(default)]
    pub students: Vec<String>,
}

/// Course as returned by every store read, with the instructor resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub instructor: InstructorSummary,
    pub students: Vec<String>,
}

impl CourseView {
    pub fn new(course: Course, instructor: InstructorSummary) -> Self {
        Self {
            id: course.id,
            title: course.title,
            description: course.description,
            price: course.price,
            instructor,
            students: course.students,
        }
    }

    pub fn instructor_id(&self) -> Uuid {
        self.instructor.id
    }
}

/// Course body as received from a client, before validation.
///
/// Field values stay untyped JSON so a wrongly typed field is reported by the
/// validator instead of failing extraction. Keys other than the three course
/// fields are captured in `unknown` so the validator can reject them by name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseInput {
    pub title: Option<Value>,
    pub description: Option<Value>,
    pub price: Option<Value>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, Value>,
}

impl CourseInput {
    pub fn new(title: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            title: Some(Value::String(title.into())),
            description: Some(Value::String(description.into())),
            price: Some(Value::from(price)),
            unknown: BTreeMap::new(),
        }
    }
}

/// Validated fields for a new course; the store assigns the id
#[derive(Debug, Clone, PartialEq)]
pub struct NewCourse {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub instructor: Uuid,
}

/// Validated field-level changes; `None` leaves the stored value untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoursePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
}

impl CoursePatch {
    /// Apply present fields onto a stored course
    pub fn apply_to(&self, course: &mut Course) {
        if let Some(title) = &self.title {
            course.title = title.clone();
        }
        if let Some(description) = &self.description {
            course.description = description.clone();
        }
        if let Some(price) = self.price {
            course.price = price;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_course() -> Course {
        Course {
            id: Uuid::new_v4(),
            title: "Algorithms".to_string(),
            description: "Intro".to_string(),
            price: 49.99,
            instructor: Uuid::new_v4(),
            students: vec![],
        }
    }

    #[test]
    fn input_captures_unknown_keys() {
        let input: CourseInput = serde_json::from_value(json!({
            "title": "Algorithms",
            "instructor": "someone-else",
        }))
        .unwrap();
        assert_eq!(input.title, Some(json!("Algorithms")));
        assert!(input.description.is_none());
        assert!(input.unknown.contains_key("instructor"));
    }

    #[test]
    fn input_keeps_mistyped_fields() {
        let input: CourseInput = serde_json::from_value(json!({
            "title": 42,
            "price": "49.99",
        }))
        .unwrap();
        assert_eq!(input.title, Some(json!(42)));
        assert_eq!(input.price, Some(json!("49.99")));
    }

    #[test]
    fn patch_only_touches_present_fields() {
        let mut course = sample_course();
        let patch = CoursePatch {
            price: Some(59.99),
            ..Default::default()
        };
        patch.apply_to(&mut course);
        assert_eq!(course.price, 59.99);
        assert_eq!(course.title, "Algorithms");
        assert_eq!(course.description, "Intro");
    }

    #[test]
    fn view_serializes_resolved_instructor() {
        let course = sample_course();
        let instructor = InstructorSummary {
            id: course.instructor,
            username: None,
            email: Some("ada@example.com".to_string()),
        };
        let view = CourseView::new(course.clone(), instructor);
        let value = serde_json::to_value(&view).unwrap();
        assert_eq!(value["instructor"]["email"], "ada@example.com");
        assert_eq!(value["students"], json!([]));
        assert_eq!(view.instructor_id(), course.instructor);
    }
}
