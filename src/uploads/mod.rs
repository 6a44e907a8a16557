//! Upload handling

pub mod multipart;
