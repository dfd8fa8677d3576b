use crate::engine::error::EngineError;
use std::collections::BTreeMap;
use std::fmt;

/// Environment variable carrying the visible GPU device list (set by Slurm
/// and most cluster prologues).
pub const GPU_DEVICES_ENV: &str = "CUDA_VISIBLE_DEVICES";

/// Environment variable carrying the CPU thread allocation under Slurm.
pub const CPU_THREADS_ENV: &str = "SLURM_CPUS_PER_TASK";

/// The compute platforms a downstream simulation engine can run on.
///
/// Lookup is by the engine's exact, case-sensitive platform names; an
/// unknown name is a fatal error with no fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Reference,
    Cpu,
    Cuda,
    OpenCl,
}

impl Platform {
    /// Resolves a platform by its engine name.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownPlatform`] when the name matches no
    /// known platform. Matching is case-sensitive, like the engine's own
    /// platform registry.
    pub fn by_name(name: &str) -> Result<Self, EngineError> {
        match name {
            "Reference" => Ok(Platform::Reference),
            "CPU" => Ok(Platform::Cpu),
            "CUDA" => Ok(Platform::Cuda),
            "OpenCL" => Ok(Platform::OpenCl),
            _ => Err(EngineError::UnknownPlatform {
                name: name.to_string(),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Platform::Reference => "Reference",
            Platform::Cpu => "CPU",
            Platform::Cuda => "CUDA",
            Platform::OpenCl => "OpenCL",
        }
    }

    pub fn is_gpu(&self) -> bool {
        matches!(self, Platform::Cuda | Platform::OpenCl)
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Resolves the engine tuning properties for a requested platform.
///
/// With no platform requested the map is empty and the engine auto-selects
/// the fastest platform available. GPU platforms get a fixed mixed-precision
/// property plus a device index forwarded verbatim from the environment; the
/// CPU platform forwards its thread allocation. The resolver is a pure
/// mapping over the platform name and environment, with no retries.
///
/// # Errors
///
/// Returns [`EngineError::UnknownPlatform`] for an unrecognized name.
pub fn resolve_properties(
    platform_name: Option<&str>,
) -> Result<BTreeMap<String, String>, EngineError> {
    let mut properties = BTreeMap::new();
    let Some(name) = platform_name else {
        return Ok(properties);
    };

    let platform = Platform::by_name(name)?;
    match platform {
        Platform::Cuda => {
            properties.insert("CudaPrecision".to_string(), "mixed".to_string());
            if let Ok(gpu_ids) = std::env::var(GPU_DEVICES_ENV) {
                if !gpu_ids.is_empty() {
                    properties.insert("DeviceIndex".to_string(), gpu_ids);
                }
            }
        }
        Platform::OpenCl => {
            properties.insert("OpenCLPrecision".to_string(), "mixed".to_string());
            if let Ok(gpu_ids) = std::env::var(GPU_DEVICES_ENV) {
                if !gpu_ids.is_empty() {
                    properties.insert("DeviceIndex".to_string(), gpu_ids);
                }
            }
        }
        Platform::Cpu => {
            if let Ok(threads) = std::env::var(CPU_THREADS_ENV) {
                if !threads.is_empty() {
                    properties.insert("Threads".to_string(), threads);
                }
            }
        }
        Platform::Reference => {}
    }

    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn with_env<F: FnOnce()>(key: &str, value: Option<&str>, f: F) {
        let previous = std::env::var(key).ok();
        unsafe {
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        f();
        unsafe {
            match previous {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
    }

    #[test]
    fn by_name_is_case_sensitive() {
        assert!(Platform::by_name("CUDA").is_ok());
        assert!(Platform::by_name("cuda").is_err());
        assert!(Platform::by_name("Cpu").is_err());
    }

    #[test]
    fn unknown_platform_is_an_error() {
        let err = Platform::by_name("Metal").unwrap_err();
        assert!(matches!(err, EngineError::UnknownPlatform { name } if name == "Metal"));
    }

    #[test]
    fn no_platform_yields_empty_properties() {
        let properties = resolve_properties(None).unwrap();
        assert!(properties.is_empty());
    }

    #[test]
    #[serial]
    fn cuda_gets_mixed_precision_and_device_index() {
        with_env(GPU_DEVICES_ENV, Some("0,1"), || {
            let properties = resolve_properties(Some("CUDA")).unwrap();
            assert_eq!(properties.get("CudaPrecision").unwrap(), "mixed");
            assert_eq!(properties.get("DeviceIndex").unwrap(), "0,1");
        });
    }

    #[test]
    #[serial]
    fn cuda_without_device_list_only_sets_precision() {
        with_env(GPU_DEVICES_ENV, None, || {
            let properties = resolve_properties(Some("CUDA")).unwrap();
            assert_eq!(properties.len(), 1);
            assert_eq!(properties.get("CudaPrecision").unwrap(), "mixed");
        });
    }

    #[test]
    #[serial]
    fn opencl_is_gpu_class() {
        with_env(GPU_DEVICES_ENV, Some("2"), || {
            let properties = resolve_properties(Some("OpenCL")).unwrap();
            assert_eq!(properties.get("OpenCLPrecision").unwrap(), "mixed");
            assert_eq!(properties.get("DeviceIndex").unwrap(), "2");
        });
    }

    #[test]
    #[serial]
    fn cpu_forwards_thread_allocation() {
        with_env(CPU_THREADS_ENV, Some("8"), || {
            let properties = resolve_properties(Some("CPU")).unwrap();
            assert_eq!(properties.get("Threads").unwrap(), "8");
        });
    }

    #[test]
    #[serial]
    fn cpu_without_allocation_yields_empty_properties() {
        with_env(CPU_THREADS_ENV, None, || {
            let properties = resolve_properties(Some("CPU")).unwrap();
            assert!(properties.is_empty());
        });
    }

    #[test]
    fn reference_platform_has_no_properties() {
        let properties = resolve_properties(Some("Reference")).unwrap();
        assert!(properties.is_empty());
    }
}
