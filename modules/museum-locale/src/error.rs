use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LocaleError {
    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),

    #[error("Locale set is empty")]
    EmptyLocaleSet,

    #[error("Locale listed more than once: {0}")]
    DuplicateLocale(String),

    #[error("Invalid locale tag: {0:?}")]
    InvalidTag(String),

    #[error("Default locale {0} is not in the supported set")]
    DefaultNotSupported(String),

    #[error("Navigation interceptor is already mounted on this document")]
    AlreadyMounted,

    #[error("Configuration error: {0}")]
    Config(String),
}
