use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of a failure that is reported back to the user from a command.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorType {
    /// The home directory or `config.json` is missing or invalid.
    Config,
    /// Reading or writing the record store or a backup file failed.
    Storage,
    /// An import file was rejected.
    Import,
    /// The arguments given to a command were not acceptable.
    Request,
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorType::Config => "Configuration error",
            ErrorType::Storage => "Storage error",
            ErrorType::Import => "Import error",
            ErrorType::Request => "Invalid request",
        };
        f.write_str(s)
    }
}

/// Tags an internal error with an `ErrorType` so that it reads well when shown to the user.
pub(crate) trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| {
            let e: Error = e.into();
            e.context(error_type.to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_pub_result_adds_error_type() {
        let r: std::result::Result<(), Error> = Err(anyhow!("top level value is not an array"));
        let e = r.pub_result(ErrorType::Import).unwrap_err();
        assert_eq!(e.to_string(), "Import error");
        let chain = format!("{e:#}");
        assert!(chain.contains("Import error"));
        assert!(chain.contains("not an array"));
    }

    #[test]
    fn test_pub_result_ok_passes_through() {
        let r: std::result::Result<u8, Error> = Ok(7);
        assert_eq!(r.pub_result(ErrorType::Storage).unwrap(), 7);
    }
}
