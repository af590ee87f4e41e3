//! Output device discovery.

use cpal::Device;
use cpal::traits::{DeviceTrait, HostTrait};

use crate::{Error, Result};

/// Sample rate reported when a device has no default configuration.
const FALLBACK_SAMPLE_RATE: u32 = 48_000;

/// Get the human-readable name of a cpal device.
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Audio output device information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Whether this is the host's default output.
    pub is_default: bool,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Default channel count.
    pub default_channels: u16,
}

fn describe(device: &Device, default_name: Option<&str>) -> Option<AudioDevice> {
    let name = device_name(device).ok()?;
    let (default_sample_rate, default_channels) = device
        .default_output_config()
        .map(|c| (c.sample_rate(), c.channels()))
        .unwrap_or((FALLBACK_SAMPLE_RATE, 2));
    Some(AudioDevice {
        is_default: default_name == Some(name.as_str()),
        name,
        default_sample_rate,
        default_channels,
    })
}

/// List the output devices of the default host.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let default_name = host
        .default_output_device()
        .and_then(|d| device_name(&d).ok());

    let devices = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;

    let mut found: Vec<AudioDevice> = Vec::new();
    for device in devices {
        if let Some(info) = describe(&device, default_name.as_deref())
            && !found.iter().any(|d| d.name == info.name)
        {
            found.push(info);
        }
    }

    tracing::debug!(count = found.len(), "output devices enumerated");
    Ok(found)
}

/// The default output device, if the host has one.
pub fn default_output_device() -> Result<Option<AudioDevice>> {
    let host = cpal::default_host();
    Ok(host.default_output_device().and_then(|d| {
        let name = device_name(&d).ok();
        describe(&d, name.as_deref())
    }))
}

/// Find an output device by name.
///
/// An exact name wins; otherwise the first case-insensitive partial match.
pub fn find_output_device(search: &str) -> Result<AudioDevice> {
    let devices = list_devices()?;
    if let Some(exact) = devices.iter().find(|d| d.name == search) {
        return Ok(exact.clone());
    }
    match_partial(&devices, search)
        .cloned()
        .ok_or_else(|| Error::DeviceNotFound(format!("no output device matching '{search}'")))
}

/// First device whose name contains `search`, ignoring case.
pub(crate) fn match_partial<'a>(
    devices: &'a [AudioDevice],
    search: &str,
) -> Option<&'a AudioDevice> {
    let search_lower = search.to_lowercase();
    let mut matches = devices
        .iter()
        .filter(|d| d.name.to_lowercase().contains(&search_lower));
    let first = matches.next()?;
    let others: Vec<&str> = matches.map(|d| d.name.as_str()).collect();
    if !others.is_empty() {
        tracing::warn!(
            search,
            using = first.name.as_str(),
            also = ?others,
            "device name matches several devices"
        );
    }
    Some(first)
}
