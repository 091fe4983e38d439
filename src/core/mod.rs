pub mod codec;
pub mod composition;
pub mod error;
pub mod event;
pub mod identity;
pub mod matching;
pub mod record;
pub mod selection;
pub mod sync;
pub mod triggers;
pub mod types;
