//! Application service layer.
//!
//! Services contain the lookup logic and orchestrate the user directory and
//! the phone normalizer. They provide a clean boundary between the HTTP
//! handlers and the data access layer.

mod lookup_service;

pub use lookup_service::{LookupService, PhoneLookupHandler, DEFAULT_PAGE_SIZE};
