//! A `fanout` chunk key encoding for [zarrs].
//!
//! Chunk coordinates are split into fixed-width decimal digit groups so that no
//! prefix in the store has more than `max_children` children,
//! while keys still sort in the same order as their coordinates.
//!
//! ```
//! use zarrs_fanout::chunk_key_encoding::FanoutChunkKeyEncoding;
//!
//! let cke = FanoutChunkKeyEncoding::new(1000).unwrap();
//! assert_eq!(cke.encode_key(&[1234, 5]), "c/1/001/234/0/005");
//! assert_eq!(cke.decode_key("c/1/001/234/0/005").unwrap(), vec![1234, 5]);
//! ```
pub mod chunk_key_encoding;
pub mod codec;
pub mod configuration;
mod error;

pub use zarrs;

pub use chunk_key_encoding::FanoutChunkKeyEncoding;
pub use configuration::{FanoutChunkKeyEncodingConfiguration, FanoutConfig};
pub use error::{Error, Result};
