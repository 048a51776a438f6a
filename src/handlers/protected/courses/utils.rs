use uuid::Uuid;

use crate::error::ApiError;

/// A course id that is not a UUID cannot name any course, so it reports as missing
pub fn parse_course_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found("Course not found"))
}

pub fn parse_user_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("'{}' is not a valid user id", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn malformed_course_id_is_not_found() {
        let err = parse_course_id("64b7f0c2e4b0a1a2b3c4d5e6").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn malformed_user_id_is_bad_request() {
        let err = parse_user_id("instructor#7").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let id = Uuid::new_v4();
        assert_eq!(parse_user_id(&id.to_string()).unwrap(), id);
    }
}
