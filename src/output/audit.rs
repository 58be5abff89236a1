use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::engine::run::events::{RunEvent, RunObserver};

/// Append-only audit trail: one `timestamp,step,status` CSV row per run
/// transition, mirroring the driver's structured events into a file that
/// survives the process.
pub struct AuditTrail {
    path: PathBuf,
}

impl AuditTrail {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// One trail per engine under the log directory.
    pub fn for_engine(log_dir: &Path, engine: &str) -> Self {
        Self::new(log_dir.join(format!("run_{engine}.csv")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &RunEvent) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(
            file,
            "{},{},{}",
            event.timestamp.to_rfc3339(),
            event.phase.as_str(),
            event.status
        )
    }
}

impl RunObserver for AuditTrail {
    fn on_transition(&mut self, event: &RunEvent) {
        // The trail is diagnostics; a failure to append must not take the
        // run down with it.
        if let Err(err) = self.append(event) {
            warn!(
                target: "stationmart::audit",
                error = %err,
                path = %self.path.display(),
                "failed to append audit row"
            );
        }
    }
}
