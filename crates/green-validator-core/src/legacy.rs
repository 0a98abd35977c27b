//! Names from the pre-namespace API.
//!
//! Existing callers that use `GreenValidator` and `Validation` keep working;
//! both are plain aliases of the current types.

/// Old name of [`Validator`](crate::Validator).
pub type GreenValidator = crate::Validator;

/// Old name of [`Outcome`](crate::Outcome).
pub type Validation = crate::Outcome;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_are_drop_in() {
        let mut validator = GreenValidator::new();
        let result: Validation = validator.validate([("abc", "number")]).execute();

        assert!(result.failed());
        assert_eq!(result.message(), "abc is not a valid number");
    }
}
