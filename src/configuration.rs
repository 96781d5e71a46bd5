use serde::{Deserialize, Serialize};

/// Smallest accepted `max_children`.
pub const MIN_MAX_CHILDREN: u64 = 100;

/// `max_children` used when the configuration does not give one.
pub const DEFAULT_MAX_CHILDREN: u64 = 1000;

/// Number of decimal digits in [u64::MAX].
const U64_DIGITS: usize = 20;

/// Serialized form of the `fanout` chunk key encoding configuration.
///
/// ```json
/// { "max_children": 1000 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FanoutChunkKeyEncodingConfiguration {
    /// Upper bound on the number of entries under any prefix.
    /// Floored to a power of 10 when the encoding is created.
    #[serde(default = "default_max_children")]
    pub max_children: u64,
}

fn default_max_children() -> u64 {
    DEFAULT_MAX_CHILDREN
}

impl Default for FanoutChunkKeyEncodingConfiguration {
    fn default() -> Self {
        Self {
            max_children: DEFAULT_MAX_CHILDREN,
        }
    }
}

/// Validated, immutable parameters of the fanout codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FanoutConfig {
    /// Always a power of 10.
    max_children: u64,
    /// Width of every digit group; `log10(max_children)`.
    decimal_len: usize,
}

impl FanoutConfig {
    /// Validate `max_children` and derive the digit group width.
    ///
    /// `max_children` is floored to a power of 10 (`1234` becomes `1000`),
    /// which guarantees that one digit group has at most `max_children` values.
    pub fn new(max_children: u64) -> crate::Result<Self> {
        if max_children < MIN_MAX_CHILDREN {
            return Err(crate::Error::configuration(format!(
                "max_children must be at least {MIN_MAX_CHILDREN}, got {max_children}"
            )));
        }
        let decimal_len = digit_count(max_children) - 1;
        let floored = 10u64.pow(decimal_len as u32);
        if floored != max_children {
            log::debug!("flooring fanout max_children {max_children} to {floored}");
        }
        Ok(Self {
            max_children: floored,
            decimal_len,
        })
    }

    pub fn max_children(&self) -> u64 {
        self.max_children
    }

    /// Radix of the digit groups; equal to `max_children`.
    pub fn base(&self) -> u64 {
        self.max_children
    }

    /// Number of decimal digits in each digit group.
    pub fn decimal_len(&self) -> usize {
        self.decimal_len
    }

    /// Most digit groups a single [u64] coordinate can need.
    pub fn max_groups(&self) -> usize {
        U64_DIGITS.div_ceil(self.decimal_len)
    }

    pub fn to_configuration(&self) -> FanoutChunkKeyEncodingConfiguration {
        FanoutChunkKeyEncodingConfiguration {
            max_children: self.max_children,
        }
    }
}

impl Default for FanoutConfig {
    fn default() -> Self {
        Self {
            max_children: DEFAULT_MAX_CHILDREN,
            decimal_len: 3,
        }
    }
}

impl TryFrom<&FanoutChunkKeyEncodingConfiguration> for FanoutConfig {
    type Error = crate::Error;

    fn try_from(value: &FanoutChunkKeyEncodingConfiguration) -> Result<Self, Self::Error> {
        Self::new(value.max_children)
    }
}

/// Base-10 digit count, with `digit_count(0) == 1`.
pub(crate) fn digit_count(value: u64) -> usize {
    value.checked_ilog10().map_or(1, |n| n as usize + 1)
}
