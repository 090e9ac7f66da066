//! Client side of the terms site: API base URL resolution, the HTTP adapter
//! for the terms endpoint, and the header/navigation state.

pub mod api;
pub mod base_url;
pub mod error;
pub mod header;
pub mod language;

pub use api::{ApiClient, PassthroughInterceptor, ResponseInterceptor, TermsApi};
pub use base_url::{resolve_base_url, PageLocation};
pub use error::ClientError;
pub use header::{render_header, HeaderState, HeaderView, NavRoute};
pub use language::LanguageContext;
