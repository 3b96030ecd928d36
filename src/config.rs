use crate::types::NamedGroup;
use crate::Error;

/// Smallest accepted `max_message_len`. Modp2048 needs ~360 bytes.
const MIN_MESSAGE_LEN: usize = 128;

/// SRD configuration
#[derive(Debug, Clone)]
pub struct Config {
    key_exchange: NamedGroup,
    accepted_groups: Vec<NamedGroup>,
    max_message_len: usize,
    accepted_blob_names: Vec<String>,
}

impl Config {
    /// Create a new configuration builder.
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder {
            key_exchange: NamedGroup::X25519,
            accepted_groups: NamedGroup::supported().to_vec(),
            max_message_len: 4096,
            accepted_blob_names: Vec::new(),
        }
    }

    /// Key exchange group requested by an initiator.
    #[inline(always)]
    pub fn key_exchange(&self) -> NamedGroup {
        self.key_exchange
    }

    /// Key exchange groups a responder agrees to.
    #[inline(always)]
    pub fn accepted_groups(&self) -> &[NamedGroup] {
        &self.accepted_groups
    }

    /// Largest message body accepted or produced.
    #[inline(always)]
    pub fn max_message_len(&self) -> usize {
        self.max_message_len
    }

    /// Blob names a responder accepts. Empty means any.
    #[inline(always)]
    pub fn accepted_blob_names(&self) -> &[String] {
        &self.accepted_blob_names
    }

    pub(crate) fn accepts_group(&self, group: NamedGroup) -> bool {
        group.is_supported() && self.accepted_groups.contains(&group)
    }

    pub(crate) fn accepts_blob_name(&self, name: &str) -> bool {
        self.accepted_blob_names.is_empty() || self.accepted_blob_names.iter().any(|n| n == name)
    }
}

/// Builder for SRD configuration.
pub struct ConfigBuilder {
    key_exchange: NamedGroup,
    accepted_groups: Vec<NamedGroup>,
    max_message_len: usize,
    accepted_blob_names: Vec<String>,
}

impl ConfigBuilder {
    /// Set the key exchange group an initiator asks for.
    ///
    /// Defaults to X25519.
    pub fn key_exchange(mut self, group: NamedGroup) -> Self {
        self.key_exchange = group;
        self
    }

    /// Set the key exchange groups a responder accepts.
    ///
    /// Defaults to every supported group.
    pub fn accepted_groups(mut self, groups: impl IntoIterator<Item = NamedGroup>) -> Self {
        self.accepted_groups = groups.into_iter().collect();
        self
    }

    /// Set the largest message body (excluding the header) in bytes.
    ///
    /// Defaults to 4096.
    pub fn max_message_len(mut self, len: usize) -> Self {
        self.max_message_len = len;
        self
    }

    /// Restrict which blob names a responder accepts.
    ///
    /// A delegated blob with any other name fails the handshake.
    /// Defaults to accepting every name.
    pub fn accepted_blob_names<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.accepted_blob_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Build the configuration.
    ///
    /// Returns `Error::ConfigError` for unsupported groups or a too small
    /// message limit.
    pub fn build(self) -> Result<Config, Error> {
        if !self.key_exchange.is_supported() {
            return Err(Error::ConfigError(format!(
                "Unsupported key exchange group: {:?}",
                self.key_exchange
            )));
        }

        if self.accepted_groups.is_empty() {
            return Err(Error::ConfigError(
                "At least one key exchange group must be accepted".to_string(),
            ));
        }

        if let Some(g) = self.accepted_groups.iter().find(|g| !g.is_supported()) {
            return Err(Error::ConfigError(format!(
                "Unsupported accepted group: {:?}",
                g
            )));
        }

        if self.max_message_len < MIN_MESSAGE_LEN || self.max_message_len > u16::MAX as usize {
            return Err(Error::ConfigError(format!(
                "max_message_len must be within {}..={}, got {}",
                MIN_MESSAGE_LEN,
                u16::MAX,
                self.max_message_len
            )));
        }

        Ok(Config {
            key_exchange: self.key_exchange,
            accepted_groups: self.accepted_groups,
            max_message_len: self.max_message_len,
            accepted_blob_names: self.accepted_blob_names,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::builder()
            .build()
            .expect("Default config should always validate")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.key_exchange(), NamedGroup::X25519);
        assert_eq!(config.max_message_len(), 4096);
        assert!(config.accepts_group(NamedGroup::Modp2048));
        assert!(config.accepts_blob_name("Anything"));
    }

    #[test]
    fn rejects_unknown_group() {
        let err = Config::builder()
            .key_exchange(NamedGroup::Unknown(1))
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));

        let err = Config::builder()
            .accepted_groups(Vec::<NamedGroup>::new())
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::ConfigError(_)));
    }

    #[test]
    fn rejects_tiny_message_limit() {
        assert!(Config::builder().max_message_len(16).build().is_err());
        assert!(Config::builder().max_message_len(70_000).build().is_err());
    }

    #[test]
    fn blob_name_filter() {
        let config = Config::builder()
            .accepted_blob_names(["Basic"])
            .build()
            .unwrap();
        assert!(config.accepts_blob_name("Basic"));
        assert!(!config.accepts_blob_name("Logon"));
    }
}
