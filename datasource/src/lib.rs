//! Datasource service: lists a caller's collections from the upstream
//! event-management API, stamped with `identity`/`updated_at` and ordered by
//! update time.

pub mod handler;
pub mod records;
pub mod registry;
pub mod since;
pub mod upstream;

pub use handler::{handler, AppState};
pub use records::Record;
pub use registry::Datatype;
pub use since::SinceFilter;
pub use upstream::UpstreamClient;
