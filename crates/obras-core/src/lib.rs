//! Domain logic for the obras relay.
//!
//! This crate is free of I/O. It provides:
//! - [`Obra`], [`Gasto`] and [`ContatoWhatsapp`] rows as stored remotely
//! - [`normalize_text`] for accent- and case-insensitive comparisons
//! - [`parse_month_year`] to read a month/year out of free text
//! - [`find_by_name`] to pick the project a message talks about
//! - [`ExpenseSummary`] and [`compose_answer`] for the expense reports

mod answer;
mod matcher;
mod model;
mod period;
mod summary;
mod text;

pub use answer::{compose_answer, NO_PROJECTS_ANSWER};
pub use matcher::{find_by_name, Named};
pub use model::{ContatoWhatsapp, Gasto, Obra, RowId};
pub use period::{parse_month_year, parse_month_year_on, Period, YEARS};
pub use summary::{ExpenseSummary, DEFAULT_CATEGORY, TOP_EXPENSES};
pub use text::normalize_text;
