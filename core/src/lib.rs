//! Blocking client for the Brewfather batch API.
//!
//! # Overview
//! Fetches batch documents from `https://api.brewfather.app/v1` with HTTP
//! Basic credentials and decodes them into typed structures. Also carries a
//! few brewing helpers: fallback getters on `Batch` and a gravity to Plato
//! conversion.
//!
//! # Design
//! - `Client` is stateless: a transport plus a base URL. It is safe to share
//!   between threads issuing independent requests.
//! - Each operation is split into `build_*` (produces a request) and
//!   `parse_*` (consumes a response), so the I/O boundary is explicit.
//! - `BasicAuth` decorates any `Transport`, adding credentials and turning
//!   non-2xx answers into `ApiError::Upstream`.
//! - No retries, caching, or writes.
//!
//! ```no_run
//! use brewchild::{limit, status, Client};
//!
//! let client = Client::new("user-id", "api-key");
//! for batch in client.batches(&[status("Fermenting"), limit(10)])? {
//!     println!("#{} {} abv={:.1}", batch.batch_number, batch.name, batch.abv());
//! }
//! # Ok::<(), brewchild::ApiError>(())
//! ```

pub mod client;
pub mod datetime;
pub mod error;
pub mod formula;
pub mod http;
pub mod options;
pub mod transport;
pub mod types;

pub use client::{Client, ClientBuilder, DEFAULT_BASE_URL};
pub use datetime::DateTime;
pub use error::ApiError;
pub use formula::sg_to_plato;
pub use http::{HttpRequest, HttpResponse};
pub use options::{complete, limit, offset, status, ListOption};
pub use transport::{BasicAuth, Transport, UreqTransport};
pub use types::{Batch, Fermentable, Hop, Miscs, Note, Nutrition, Recipe, RecipeData, Style, Total, Yeast};
