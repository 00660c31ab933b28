//! Client for the CarQuery vehicle data API.
//!
//! Each operation builds a query URL from a `cmd` and caller filters, issues
//! one GET and unwraps the payload from the response envelope:
//!
//! - [`CarQueryClient::years`] (`getYears`)
//! - [`CarQueryClient::makes`] (`getMakes`)
//! - [`CarQueryClient::models`] (`getModels`)
//! - [`CarQueryClient::trims`] (`getTrims`)
//! - [`CarQueryClient::model`] (`getModel`)
//!
//! [`FixtureClient`] serves recorded responses with the same interface.

pub mod client;
pub mod envelope;
pub mod error;
pub mod filters;
pub mod fixture;
pub mod params;
pub mod types;

pub use client::{CarQueryClient, CarQueryConfig, DEFAULT_BASE_URL};
pub use envelope::{ModelEnvelope, ResponseScope};
pub use error::CarQueryError;
pub use filters::{MakesFilter, ModelFilter, ModelsFilter, TrimsFilter};
pub use fixture::FixtureClient;
pub use params::{Command, ParamValue, QueryParams};
pub use types::{Make, ModelName, Record, YearRange};
