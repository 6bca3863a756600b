use super::super::storage::StorageError;
use super::super::traits::OrderError;
use shared::error::{AppError, ErrorCode};

pub type ManagerResult<T> = Result<T, OrderError>;

/// 存储错误的对外消息（技术细节只进日志）
fn storage_message(e: &StorageError) -> &'static str {
    match e {
        StorageError::Serialization(_) => "Stored record could not be decoded",
        StorageError::Commit(_) => "Failed to commit order changes",
        _ => "Order storage is unavailable",
    }
}

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        let kind = err.kind();
        let code = err.code();
        let message = match &err {
            OrderError::Storage(e) => {
                tracing::error!(error = %e, error_code = ?code, "Storage error occurred");
                storage_message(e).to_string()
            }
            OrderError::Unexpected(msg) => {
                tracing::error!(error = %msg, "Unexpected order engine error");
                err.to_string()
            }
            _ => err.to_string(),
        };
        AppError::with_message(code, message).with_detail("kind", kind.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use shared::error::ErrorKind;

    #[test]
    fn test_kind_detail_and_status() {
        let err: AppError = OrderError::AlreadySettled("ORD1".to_string()).into();
        assert_eq!(err.code, ErrorCode::OrderAlreadySettled);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        let details = err.details.unwrap();
        assert_eq!(details["kind"], "ALREADY_SETTLED");
    }

    #[test]
    fn test_invalid_input_keeps_message() {
        let err: AppError = OrderError::invalid(ErrorCode::OrderLastItem, "only item").into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.message, "only item");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_error_hides_details() {
        let json_err = serde_json::from_str::<u8>("x").unwrap_err();
        let err: AppError = OrderError::Storage(StorageError::Serialization(json_err)).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.kind(), ErrorKind::Unexpected);
        assert_eq!(err.message, "Stored record could not be decoded");
    }
}
