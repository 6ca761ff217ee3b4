//! Save/Load functionality for persisting a dashboard session.
//!
//! Uses bincode for compact binary serialization of the whole simulator:
//! scores, settings, suite, toast queue, and pending timers. The RNG stream
//! position is not part of the snapshot; loading reseeds from the recorded
//! seed.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::scheduler::Scheduler;
use crate::state::{Settings, Suite, WellnessState};
use crate::systems::NotificationQueue;

/// Version number for the snapshot format (increment when it changes).
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serializable snapshot of a dashboard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Snapshot format version.
    pub version: u32,
    /// Simulation time in seconds.
    pub sim_time: f64,
    /// RNG seed the session was created with.
    pub seed: u64,
    /// Counter for locally created suite ids.
    pub next_suite_id: u64,
    pub state: WellnessState,
    pub settings: Settings,
    pub suite: Option<Suite>,
    pub queue: NotificationQueue,
    pub scheduler: Scheduler,
}

/// Write a snapshot to a writer.
pub fn save_snapshot<W: Write>(writer: W, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    bincode::serialize_into(writer, snapshot)?;
    Ok(())
}

/// Read a snapshot from a reader, rejecting unknown versions.
pub fn load_snapshot<R: Read>(reader: R) -> Result<Snapshot, SnapshotError> {
    let snapshot: Snapshot = bincode::deserialize_from(reader)?;

    if snapshot.version != SNAPSHOT_VERSION {
        return Err(SnapshotError::VersionMismatch {
            expected: SNAPSHOT_VERSION,
            found: snapshot.version,
        });
    }

    Ok(snapshot)
}

/// Errors that can occur during snapshot save/load.
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SnapshotError {
    fn from(err: std::io::Error) -> Self {
        SnapshotError::Io(err)
    }
}

impl From<Box<bincode::ErrorKind>> for SnapshotError {
    fn from(err: Box<bincode::ErrorKind>) -> Self {
        SnapshotError::Bincode(err)
    }
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::Io(err) => write!(f, "IO error: {}", err),
            SnapshotError::Bincode(err) => write!(f, "Serialization error: {}", err),
            SnapshotError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Snapshot version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SnapshotError {}
