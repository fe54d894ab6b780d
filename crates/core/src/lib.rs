#![doc = include_str!("../README.md")]

pub mod buffer;
pub mod descriptor;
pub mod diag;
pub mod format;

pub mod prelude {
    pub use crate::{
        buffer::{CanonicalPixelBuffer, canonical_len},
        descriptor::RawImageDescriptor,
        diag::{DecodeWarning, Warnings},
        format::{ChannelLayout, ColorSpace, PixelFormat, Resolution},
    };
}
