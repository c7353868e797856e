//! Field Merging - Preset vs Explicit Precedence
//!
//! Explicit values always win over preset values for the same field.
//! The override flag only decides whether a preset seeds the record at all.

/// Sentinel for an unset focal length.
pub const UNSET_LENS_MM: u32 = 0;
/// Sentinel for an unset ISO.
pub const UNSET_ISO: u32 = 0;

/// Trimmed, non-empty view of an optional string.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Explicit value wins when non-empty after trimming, then the preset value.
pub fn merge_scalar(preset: Option<&str>, explicit: Option<&str>) -> Option<String> {
    present(explicit).or_else(|| present(preset)).map(str::to_string)
}

/// Numeric merge under the sentinel policy: anything above `sentinel` is provided.
pub fn merge_numeric(preset: Option<u32>, explicit: u32, sentinel: u32) -> Option<u32> {
    if explicit > sentinel {
        Some(explicit)
    } else {
        preset.filter(|v| *v > sentinel)
    }
}

/// A sparse record whose populated fields can be laid over another instance.
pub trait Overlay {
    /// Replace every field of `self` that `explicit` populates.
    fn overlay(&mut self, explicit: &Self);
}

/// Seed from `preset` unless `override_preset` is set, then apply explicit fields.
pub fn merge_record<R>(preset: Option<&R>, explicit: &R, override_preset: bool) -> R
where
    R: Overlay + Clone + Default,
{
    let mut record = match preset {
        Some(preset) if !override_preset => preset.clone(),
        _ => R::default(),
    };
    record.overlay(explicit);
    record
}
