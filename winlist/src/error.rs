use thiserror::Error;

/// Errors reported by the list engine.
///
/// The only failure the engine reports is a bad configuration. It is a programmer error and is
/// surfaced when options are built or updated, never while handling scroll events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigIssue),
}

/// The specific option that failed validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("item extent must be greater than zero")]
    ZeroItemExtent,
    #[error("viewport extent must be greater than zero")]
    ZeroViewportExtent,
    #[error("fast-scroll sample rate must be at least 1")]
    ZeroSampleRate,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;

pub(crate) fn check_extents(item_extent: u32, viewport_extent: u32) -> Result<()> {
    if item_extent == 0 {
        vwarn!("rejecting zero item extent");
        return Err(ConfigIssue::ZeroItemExtent.into());
    }
    if viewport_extent == 0 {
        vwarn!("rejecting zero viewport extent");
        return Err(ConfigIssue::ZeroViewportExtent.into());
    }
    Ok(())
}
