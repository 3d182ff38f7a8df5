pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::http::{api_router, build_router, router_from_settings, AppState};
pub use crate::config::{CliConfig, Settings, TomlConfig};
pub use crate::core::Calculators;
pub use crate::domain::ports::Calculation;
pub use crate::utils::error::{CalcError, Result};
