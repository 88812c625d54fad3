//! In-memory contact list with a modal add/edit form and a terminal front end.
//!
//! [`store::ContactStore`] owns the contacts and the edit session; the
//! [`ui`] module is one consumer of it.

pub mod config;
pub mod logging;
pub mod store;
pub mod ui;
