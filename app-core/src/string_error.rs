//! Errors at the application level are plain strings that end up in the log
//! (or in a status line). This trait turns any displayable error into such a
//! string and prefixes it with some context.

use std::fmt::Display;

pub trait ErrorStringExt<T> {
    fn err_to_string(self, context: &str) -> Result<T, String>;
}

impl<T, E: Display> ErrorStringExt<T> for Result<T, E> {
    fn err_to_string(self, context: &str) -> Result<T, String> {
        self.map_err(|err| format!("{context}: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_err_to_string_adds_context() {
        let res: Result<u8, _> = "x".parse::<u8>();
        let err = res.err_to_string("could not parse count").unwrap_err();
        assert!(err.starts_with("could not parse count: "));
    }

    #[test]
    fn test_err_to_string_keeps_ok() {
        let res: Result<u8, std::num::ParseIntError> = Ok(3);
        assert_eq!(res.err_to_string("unused"), Ok(3));
    }
}
