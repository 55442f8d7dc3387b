#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Derived code names this crate as `qp_params`, which must also resolve
// inside the crate itself.
extern crate self as qp_params;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod case;
pub mod config;
pub mod convert;
pub mod error;
pub mod impls;
pub mod info;
pub mod marshal;
pub mod registry;
pub mod schema;
pub mod value;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use qp_params_derive as derive;
pub use registry::{ParamsRegistry, QueryParams};
