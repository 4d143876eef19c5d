//! Snapshot save and restore
//!
//! On save every plugin appends its own record to a shared buffer; on
//! restore every plugin looks at the current read position and either
//! recognizes its record by magic or leaves the bytes to a sibling.

use radar_protocol::{
    RadarState, SnapshotError, SnapshotHeader, SnapshotReader, SnapshotRecord, SnapshotWriter,
    HEADER_SIZE,
};
use tracing::{debug, warn};

use crate::controller::PropertyController;

/// Result of offering a buffer position to [`PropertyController::deserialize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeserializeOutcome {
    /// No radar record at the read position; nothing was consumed
    NotPresent,
    /// A radar record of another version or size was consumed but not applied
    Skipped { version: i32, size_bytes: i32 },
    /// The record was consumed and applied to the device
    Applied,
}

impl PropertyController {
    /// Append the device state to `out` as one snapshot record
    ///
    /// Only a controller that initialized the device writes anything; any
    /// other controller would capture a session it does not own. Returns
    /// the number of bytes written.
    pub fn serialize(&self, out: &mut SnapshotWriter) -> usize {
        if !self.owns_surface() {
            debug!(
                "Gauge {} does not own the radar, nothing to serialize",
                self.container_id()
            );
            return 0;
        }

        let state = self.surface().with(RadarState::capture);
        let bytes = SnapshotRecord::new(state).encode();
        out.write_data(&bytes);
        bytes.len()
    }

    /// Restore the device state from the record at the reader's position
    ///
    /// A record with a foreign magic is left in place. A radar record is
    /// always consumed by its declared size, so whatever follows stays
    /// aligned, but it is only applied when its version and size match
    /// this build. Applying claims the device exactly like a write does.
    ///
    /// # Errors
    ///
    /// A radar record whose declared size is smaller than its own header
    /// returns [`SnapshotError::InvalidSize`], and one that runs past the end
    /// of the buffer returns [`SnapshotError::Truncated`]. The read position
    /// is left unchanged in both cases.
    pub fn deserialize(
        &mut self,
        input: &mut SnapshotReader<'_>,
    ) -> Result<DeserializeOutcome, SnapshotError> {
        let Some(header_bytes) = input.peek(HEADER_SIZE) else {
            debug!("Too few bytes left for a radar snapshot header");
            return Ok(DeserializeOutcome::NotPresent);
        };
        let header = SnapshotHeader::decode(header_bytes)?;
        if !header.is_valid() {
            return Ok(DeserializeOutcome::NotPresent);
        }

        let declared = usize::try_from(header.size_bytes)
            .ok()
            .filter(|&size| size >= HEADER_SIZE)
            .ok_or_else(|| {
                warn!("Radar snapshot declares invalid size {}", header.size_bytes);
                SnapshotError::InvalidSize(header.size_bytes)
            })?;
        let bytes = input.read(declared).inspect_err(|e| {
            warn!("Radar snapshot overruns buffer: {}", e);
        })?;

        if !(header.is_current_version() && header.validate_size()) {
            debug!(
                "Skipping radar snapshot version {} ({} bytes)",
                header.version, header.size_bytes
            );
            return Ok(DeserializeOutcome::Skipped {
                version: header.version,
                size_bytes: header.size_bytes,
            });
        }

        let record = SnapshotRecord::decode(bytes)?;
        self.ensure_initialized();
        self.surface().with_mut(|s| record.state.apply(s));
        Ok(DeserializeOutcome::Applied)
    }
}
