// Every handler here runs behind `jwt_auth_middleware` and can extract the `ActingUser`
pub mod courses;
