use zarrs::{
    array::{
        ChunkKeyEncoding, ChunkKeyEncodingTraits,
        chunk_key_encoding::{self as cke, api::ChunkKeyEncodingPlugin},
    },
    metadata::v3::MetadataV3,
    plugin::{ExtensionAliasesV3, PluginConfigurationInvalidError, PluginCreateError},
};

use crate::{
    codec,
    configuration::{FanoutChunkKeyEncodingConfiguration, FanoutConfig},
};

/// The `fanout` chunk key encoding.
///
/// Keys look like `c/1/001/234/0/005` for chunk `[1234, 5]` with `max_children` 1000.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FanoutChunkKeyEncoding {
    config: FanoutConfig,
}

zarrs::plugin::impl_extension_aliases!(FanoutChunkKeyEncoding, v3: "fanout", ["fanout", "zarrs.fanout"]);
inventory::submit! {
    ChunkKeyEncodingPlugin::new::<FanoutChunkKeyEncoding>()
}

impl FanoutChunkKeyEncoding {
    /// Create the encoding; `max_children` is floored to a power of 10.
    pub fn new(max_children: u64) -> crate::Result<Self> {
        FanoutConfig::new(max_children).map(Self::from)
    }

    pub fn new_with_configuration(
        configuration: &FanoutChunkKeyEncodingConfiguration,
    ) -> crate::Result<Self> {
        FanoutConfig::try_from(configuration).map(Self::from)
    }

    pub fn config(&self) -> &FanoutConfig {
        &self.config
    }

    pub fn max_children(&self) -> u64 {
        self.config.max_children()
    }

    /// Encode chunk grid indices as a key relative to the array.
    pub fn encode_key(&self, chunk_grid_indices: &[u64]) -> String {
        codec::encode(&self.config, chunk_grid_indices)
    }

    /// Recover chunk grid indices from a key produced by [Self::encode_key].
    pub fn decode_key(&self, key: &str) -> crate::Result<Vec<u64>> {
        codec::decode(&self.config, key)
    }

    /// Chunk key encoding metadata, for use in array metadata.
    pub fn metadata(&self) -> crate::Result<MetadataV3> {
        let out = MetadataV3::new_with_serializable_configuration(
            Self::aliases_v3().default_name.clone().to_string(),
            &self.config.to_configuration(),
        )?;
        Ok(out)
    }
}

impl From<FanoutConfig> for FanoutChunkKeyEncoding {
    fn from(config: FanoutConfig) -> Self {
        Self { config }
    }
}

impl ChunkKeyEncodingTraits for FanoutChunkKeyEncoding {
    fn create(metadata: &MetadataV3) -> Result<cke::api::ChunkKeyEncoding, PluginCreateError>
    where
        Self: Sized,
    {
        match metadata.name() {
            "fanout" | "zarrs.fanout" => {}
            _ => {
                return Err(PluginCreateError::NameInvalid {
                    name: metadata.name().into(),
                });
            }
        }
        let configuration = if metadata.configuration_is_none_or_empty() {
            FanoutChunkKeyEncodingConfiguration::default()
        } else {
            metadata
                .to_configuration::<FanoutChunkKeyEncodingConfiguration>()
                .map_err(|_| {
                    PluginCreateError::ConfigurationInvalid(PluginConfigurationInvalidError::new(
                        "fanout chunk key encoding configuration must be {\"max_children\": <integer>}"
                            .into(),
                    ))
                })?
        };
        let encoding = Self::new_with_configuration(&configuration).map_err(|e| {
            PluginCreateError::ConfigurationInvalid(PluginConfigurationInvalidError::new(
                e.to_string(),
            ))
        })?;
        Ok(ChunkKeyEncoding::new(encoding))
    }

    fn configuration(&self) -> zarrs::metadata::Configuration {
        match serde_json::to_value(self.config.to_configuration()) {
            Ok(serde_json::Value::Object(map)) => map.into(),
            _ => unreachable!("fanout configuration should serialize to a JSON object"),
        }
    }

    fn encode(&self, chunk_grid_indices: &[u64]) -> zarrs::storage::StoreKey {
        zarrs::storage::StoreKey::new(self.encode_key(chunk_grid_indices))
            .expect("fanout chunk key should be valid")
    }
}
