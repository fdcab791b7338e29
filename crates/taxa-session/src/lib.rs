//! # taxa-session
//!
//! Structured search sessions for Taxa.
//!
//! A session copies a vector search ranking, executes one structured query
//! against it, and can then be exported, imported, or rendered as a report.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use taxa_query::{FilterOptions, XmlDocumentLoader};
//! use taxa_session::{SearchSession, SessionSource};
//!
//! let loader = XmlDocumentLoader::new(settings.collection_dir());
//! let mut session = SearchSession::run(
//!     SessionSource::FromPath("vector.json".into()),
//!     "leaf color green, stem",
//!     &loader,
//!     FilterOptions::default(),
//! )?;
//! session.export_to("leaf-green", false, &settings)?;
//! ```
//!
//! ## Modules
//!
//! - [`session`]: Session aggregate and execution
//! - [`store`]: JSON persistence
//! - [`report`]: Text and HTML reports

pub mod error;
pub mod report;
pub mod session;
pub mod store;

pub use error::SessionError;
pub use report::{ReportFormat, REPORT_LIMIT};
pub use session::{SearchSession, SessionSource, SessionState, SessionSummary};
pub use store::resolve_path;
