use diesel::result::Error as DieselError;
use tower_sessions::session::Error as SessionError;
use validator::ValidationErrors;
use crate::data::models::ApiError;

impl From<DieselError> for ApiError {
    fn from(err: DieselError) -> Self {
        ApiError::Database(err)
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        ApiError::Session(err.to_string())
    }
}

// The API returns the first validation message without validator's
// "field: " prefix.
impl From<ValidationErrors> for ApiError {
    fn from(err: ValidationErrors) -> Self {
        let message = err
            .field_errors()
            .into_values()
            .flatten()
            .filter_map(|e| e.message.as_deref().map(str::to_string))
            .next()
            .unwrap_or_else(|| err.to_string());
        ApiError::Validation(message)
    }
}
