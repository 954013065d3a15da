//! Core types for calman.
//!
//! This crate holds everything behind the calendar screen:
//! - `event` and `draft` for the event entity and its editable copy
//! - `form` and `validation` for the editor and its constraints
//! - `store` and `page` for the event collection and the orchestration around it

pub mod config;
pub mod draft;
pub mod error;
pub mod event;
pub mod form;
pub mod page;
pub mod seed;
pub mod store;
pub mod utils;
pub mod valid_range;
pub mod validation;

pub use draft::EventDraft;
pub use error::{CalmanError, CalmanResult};
pub use event::*;
pub use form::{EventForm, FieldUpdate, FormIntent};
pub use page::{CalendarPage, Confirm, Outcome, Selection, SlotSelection};
pub use store::{EventStore, MemoryStore};
