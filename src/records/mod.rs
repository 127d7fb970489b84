//! Student record storage: the ordered in-memory store and the service that guards it.

mod service;
pub mod store;
pub mod types;

pub use service::{RecordApi, RecordService};
pub use store::RecordStore;
pub use types::{ID_FIELD, Record, RecordError, RecordFields, RecordId, parse_record_id};
