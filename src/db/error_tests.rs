//! Unit tests for database error types

#[cfg(test)]
mod tests {
    use crate::db::error::DbError;
    use sled::transaction::TransactionError;
    use std::error::Error;

    #[test]
    fn test_unknown_asset_error() {
        let error = DbError::UnknownAsset("guid-1".to_string());
        assert_eq!(error.to_string(), "Unknown asset: guid-1");
    }

    #[test]
    fn test_serialize_error() {
        let error = DbError::SerializeError("bad revision".to_string());
        assert_eq!(error.to_string(), "Error during serialization: bad revision");
    }

    #[test]
    fn test_error_debug() {
        let error = DbError::UnknownEntry("guid-2".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownEntry"));
        assert!(debug.contains("guid-2"));
    }

    #[test]
    fn test_error_source() {
        let error = DbError::InvalidInput("[".to_string());
        assert!(error.source().is_none());
    }

    #[test]
    fn test_transaction_abort_unwraps_inner_error() {
        let err: TransactionError<DbError> =
            TransactionError::Abort(DbError::UnknownEntry("x".into()));
        let converted = DbError::from(err);
        assert!(matches!(converted, DbError::UnknownEntry(ref id) if id == "x"));
    }
}
