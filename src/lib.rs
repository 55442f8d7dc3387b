#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use qp_params as params;
pub use qp_utils as utils;

pub use qp_params::derive::QueryParams;
pub use qp_params::marshal::ParamMap;
