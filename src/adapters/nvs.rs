//! Persistent robot tunables.
//!
//! [`NvsAdapter`] implements [`ConfigPort`]: the whole [`RobotConfig`]
//! lives in one postcard blob, key `robotcfg` in namespace `mazebot`.
//! On target that is the default NVS partition through `EspNvs`; on host
//! a `HashMap` stands in for flash.
//!
//! Saves are validated first.  A blob that decodes but fails validation
//! is reported as such and never clamped into range.

use log::{info, warn};

use crate::app::ports::{ConfigError, ConfigPort};
use crate::config::RobotConfig;

#[cfg(target_os = "espidf")]
use esp_idf_svc::nvs::{EspNvs, EspNvsPartition, NvsDefault};

#[cfg(target_os = "espidf")]
const NAMESPACE: &str = "mazebot";
const KEY: &str = "robotcfg";

/// Upper bound on the encoded config.  Postcard keeps it well under this.
#[cfg(target_os = "espidf")]
const BLOB_CAP: usize = 256;

pub struct NvsAdapter {
    #[cfg(target_os = "espidf")]
    nvs: EspNvs<NvsDefault>,
    #[cfg(not(target_os = "espidf"))]
    blobs: std::collections::HashMap<&'static str, Vec<u8>>,
}

impl NvsAdapter {
    /// Open the config namespace read-write.
    ///
    /// Taking the default partition initialises NVS flash, erasing it on
    /// a layout version change.  Fails if the partition is already taken
    /// or cannot be brought up.
    #[cfg(target_os = "espidf")]
    pub fn new() -> Result<Self, ConfigError> {
        let partition = EspNvsPartition::<NvsDefault>::take().map_err(|e| {
            warn!("NVS: partition unavailable ({})", e);
            ConfigError::IoError
        })?;
        let nvs = EspNvs::new(partition, NAMESPACE, true).map_err(|e| {
            warn!("NVS: cannot open {} ({})", NAMESPACE, e);
            ConfigError::IoError
        })?;
        info!("NVS: namespace {} open", NAMESPACE);
        Ok(Self { nvs })
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Result<Self, ConfigError> {
        info!("NVS: in-memory store");
        Ok(Self {
            blobs: std::collections::HashMap::new(),
        })
    }

    /// Stored config, or the defaults when nothing usable is stored.
    pub fn load_or_default(&self) -> RobotConfig {
        match self.load() {
            Ok(cfg) => cfg,
            Err(ConfigError::NotFound) => {
                info!("NVS: nothing stored, using defaults");
                RobotConfig::default()
            }
            Err(e) => {
                warn!("NVS: {}, using defaults", e);
                RobotConfig::default()
            }
        }
    }

    fn decode(bytes: &[u8]) -> Result<RobotConfig, ConfigError> {
        let cfg: RobotConfig = postcard::from_bytes(bytes).map_err(|_| ConfigError::Corrupted)?;
        cfg.validate().map_err(ConfigError::ValidationFailed)?;
        Ok(cfg)
    }

    #[cfg(target_os = "espidf")]
    fn read_blob(&self) -> Result<RobotConfig, ConfigError> {
        let mut buf = [0u8; BLOB_CAP];
        match self.nvs.get_blob(KEY, &mut buf) {
            Ok(Some(bytes)) => Self::decode(bytes),
            Ok(None) => Err(ConfigError::NotFound),
            Err(e) => {
                warn!("NVS: read {} failed ({})", KEY, e);
                Err(ConfigError::IoError)
            }
        }
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_blob(&self) -> Result<RobotConfig, ConfigError> {
        let bytes = self.blobs.get(KEY).ok_or(ConfigError::NotFound)?;
        Self::decode(bytes)
    }

    #[cfg(target_os = "espidf")]
    fn write_blob(&mut self, bytes: &[u8]) -> Result<(), ConfigError> {
        self.nvs.set_blob(KEY, bytes).map_err(|e| {
            warn!("NVS: write {} failed ({})", KEY, e);
            ConfigError::IoError
        })
    }

    #[cfg(not(target_os = "espidf"))]
    fn write_blob(&mut self, bytes: &[u8]) -> Result<(), ConfigError> {
        self.blobs.insert(KEY, bytes.to_vec());
        Ok(())
    }
}

impl ConfigPort for NvsAdapter {
    fn load(&self) -> Result<RobotConfig, ConfigError> {
        let cfg = self.read_blob()?;
        info!("NVS: config loaded");
        Ok(cfg)
    }

    fn save(&mut self, config: &RobotConfig) -> Result<(), ConfigError> {
        config.validate().map_err(ConfigError::ValidationFailed)?;
        let bytes = postcard::to_allocvec(config).map_err(|_| ConfigError::IoError)?;
        self.write_blob(&bytes)?;
        info!("NVS: config saved ({} bytes)", bytes.len());
        Ok(())
    }
}
