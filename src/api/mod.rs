pub mod client;
mod employees;
mod leaves;
pub mod query;
pub mod types;

pub use client::*;
pub use query::*;
pub use types::*;

#[cfg(all(test, not(target_arch = "wasm32")))]
pub mod test_support;
