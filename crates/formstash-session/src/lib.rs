//! # formstash-session
//!
//! The form session state machine: a pure action/reducer core, the
//! required-field validation views, and an async driver that wires the
//! working snapshot to the persisted submission collection.

pub mod action;
pub mod session;
pub mod validate;

pub use action::{reduce, FieldPatch, FormAction};
pub use session::{EncodeTicket, FormSession, MediaField, SessionError, SessionPhase};
pub use validate::{field_errors, is_submittable};
