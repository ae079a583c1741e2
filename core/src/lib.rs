//! RunPro core: herding av GPS-fixer i sanntid, løpsmetrikk og coach score.
//!
//! Flyt per fix: kvalitetsport → glatting → akkumulator (distanse/tid/pace/splits).
//! UI og eksport leser snapshots ved behov (pull, ikke push).

pub mod error;
pub mod geomath;
pub mod models;
pub mod types;

pub mod gate;
pub mod smoothing;
pub mod hardening;

pub mod metrics;
pub mod coach;
pub mod summary;
pub mod route;

pub mod session;
pub mod telemetry;
pub mod ingest;
pub mod storage;

#[cfg(feature = "python")]
mod py;

pub use error::{Result, RunProError};
pub use geomath::{ema, haversine_m, RoundTo};
pub use models::{RunFix, RunStats, SmoothedPosition};
pub use types::{
    CoachLabel, CoachScore, FixVerdict, HardeningConfig, RejectReason, RunSummary, SignalGrade,
};

pub use gate::assess_fix;
pub use hardening::{apply_fix, HardeningState};
pub use coach::coach_score;
pub use summary::build_summary;
pub use route::to_gpx;
pub use session::{replay, FinishedRun, RunSession};
pub use telemetry::Metrics;
