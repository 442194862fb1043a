//! Application-wide constants

pub const MIN_USERNAME_LENGTH: u64 = 3;
pub const MAX_USERNAME_LENGTH: u64 = 50;
pub const MIN_PASSWORD_LENGTH: u64 = 8;
pub const MAX_PASSWORD_LENGTH: u64 = 128;
pub const MAX_NAME_LENGTH: u64 = 100;
pub const MAX_PHONE_LENGTH: u64 = 32;
pub const MAX_EMAIL_LENGTH: u64 = 254;
pub const MIN_EMPLOYEE_AGE: i32 = 16;
pub const MAX_EMPLOYEE_AGE: i32 = 100;
/// `salary` is stored as NUMERIC(12,2): ten integer digits, two decimal places.
pub const SALARY_INTEGER_DIGITS: u32 = 10;
pub const SALARY_DECIMAL_PLACES: u32 = 2;
pub const MIN_JWT_SECRET_LENGTH: usize = 32;
pub const DEFAULT_SESSION_TTL_SECS: i64 = 28_800;
pub const DEFAULT_SESSION_COOKIE: &str = "hr_session";
pub const EMPLOYEE_LIST_PATH: &str = "/employees/page";
pub const LOGIN_PATH: &str = "/auth/login";
