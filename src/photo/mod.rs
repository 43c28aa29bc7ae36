//! Conversion of raw image bytes into embeddable `data:` URLs.

pub mod batch;
pub mod encoder;

pub use batch::encode_batch;
pub use encoder::{DataUrlEncoder, PhotoEncoder, PhotoSource, sniff_media_type, to_data_url};
