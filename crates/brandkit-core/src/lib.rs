//! # brandkit
//!
//! Business and product listings behind a session login, plus three small
//! tools: a QR code generator, a company-name generator and a hashtag
//! generator. The two text generators pair up synonyms from a lexical
//! dictionary (WordNet or a JSON thesaurus), see [`generator`].
//!
//! ```rust,no_run
//! use brandkit_core::{App, logging};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     logging::init_logging();
//!     App::new().await?.run().await
//! }
//! ```

pub mod app;
pub mod auth;
pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod extractors;
pub mod generator;
pub mod logging;
pub mod migrations;
pub mod models;
pub mod qr;
pub mod response;
pub mod routing;
pub mod synonyms;
pub mod testing;

pub use app::App;
pub use config::Config;
pub use error::BrandkitError;
pub use response::ApiResponse;
pub use synonyms::{SynonymSource, Synset, Thesaurus};
pub use testing::{TestApp, TestClient, TestResponse};
