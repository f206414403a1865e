pub mod augmenter;
pub mod config;
pub mod core;
pub mod dataset;
pub mod eda;
pub mod error;
pub mod noise;
pub mod service;

pub use augmenter::{augment_text, Augmenter, Mode, Strategy};
pub use crate::core::{classify, compose, decompose, SyllableParts};
pub use dataset::TextRecord;
pub use error::{AugmentError, CodecError, DatasetError, ServiceError};
