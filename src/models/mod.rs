//! Request configuration model

pub mod descriptor;
pub mod types;

pub use descriptor::{BodyDescriptor, MultipartPart, RequestDescriptor};
pub use types::{ContentType, FormFieldsDict, HeadersDict, QueryParamsDict, CONTENT_TYPE_HEADER};
