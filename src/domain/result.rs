//! Result type alias for Sentra

use super::errors::SentraError;

/// Result type alias used throughout the crate for fallible operations
pub type Result<T> = std::result::Result<T, SentraError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::SentraError;

    #[test]
    fn test_question_mark_propagation() -> Result<()> {
        fn inner() -> Result<u32> {
            Ok(7)
        }
        assert_eq!(inner()?, 7);
        Ok(())
    }

    #[test]
    fn test_err_variant() {
        let result: Result<()> = Err(SentraError::Configuration("bad".to_string()));
        assert!(result.is_err());
    }
}
