/// Errors that can occur during simulation operations.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config value out of range: {0}")]
    ConfigRange(&'static str),

    #[error("Range source not connected: {0}")]
    NotConnected(&'static str),

    #[error("Range script has no segments")]
    EmptyRangeScript,

    #[error("Domain registry full")]
    RegistryFull,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
