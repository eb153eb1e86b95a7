pub mod boundary;
pub mod config;
pub mod cookie;
pub mod error;
pub mod link;
pub mod navigation;
pub mod path;
pub mod registry;

pub use boundary::{locale_boundary, BoundaryDecision, LocaleBoundary, RequestLocale};
pub use config::{LocalesConfig, RoutingConfig};
pub use error::LocaleError;
pub use link::{localize_target, LinkTarget, LocalizedLink, UrlObject};
pub use navigation::{ClickEvent, ClickOutcome, NavigationInterceptor};
pub use path::*;
pub use registry::{is_valid_locale, Locale, Locales};
