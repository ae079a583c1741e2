// Python-flate (maturin --features python). Tynne JSON-inn/JSON-ut-wrappere rundt kjernen.
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::wrap_pyfunction;

use serde_json as json;
use serde_path_to_error as spte;

use crate::coach::coach_score;
use crate::ingest::parse_fixes_json;
use crate::session::replay;
use crate::types::HardeningConfig;

fn parse_config(cfg_json: Option<&str>) -> PyResult<HardeningConfig> {
    let Some(s) = cfg_json else {
        return Ok(HardeningConfig::default());
    };
    let mut de = json::Deserializer::from_str(s);
    spte::deserialize(&mut de).map_err(|e| {
        let path = e.path().to_string();
        PyValueError::new_err(format!("parse error (HardeningConfig) at {}: {}", path, e))
    })
}

/// Tillater både str og dict/list (serialiseres via Python sin json.dumps).
fn payload_to_json(py: Python<'_>, payload: &PyAny) -> PyResult<String> {
    if let Ok(s) = payload.extract::<&str>() {
        return Ok(s.to_owned());
    }
    let json_mod = py
        .import("json")
        .map_err(|e| PyValueError::new_err(format!("failed to import json: {e}")))?;
    json_mod
        .call_method1("dumps", (payload,))
        .and_then(|o| o.extract::<String>())
        .map_err(|e| PyValueError::new_err(format!("failed to serialize payload with json.dumps: {e}")))
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-FUNKSJONER
// ──────────────────────────────────────────────────────────────────────────────

#[pyfunction]
#[pyo3(signature = (fixes, config_json=None, started_at_ms=None))]
fn harden_fixes_json(
    py: Python<'_>,
    fixes: &PyAny,
    config_json: Option<&str>,
    started_at_ms: Option<i64>,
) -> PyResult<String> {
    let fixes_json = payload_to_json(py, fixes)?;
    let fixes = parse_fixes_json(&fixes_json).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let cfg = parse_config(config_json)?;

    let run = replay(cfg, &fixes, started_at_ms).map_err(|e| PyValueError::new_err(e.to_string()))?;
    run.summary_json().map_err(|e| PyValueError::new_err(e.to_string()))
}

#[pyfunction]
#[pyo3(signature = (fixes, dropped_fixes=0))]
fn coach_score_json(py: Python<'_>, fixes: &PyAny, dropped_fixes: u32) -> PyResult<String> {
    let fixes_json = payload_to_json(py, fixes)?;
    let fixes = parse_fixes_json(&fixes_json).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let score = coach_score(&fixes, dropped_fixes);
    json::to_string(&score).map_err(|e| PyValueError::new_err(e.to_string()))
}

// ──────────────────────────────────────────────────────────────────────────────
// PyO3-MODUL
// ──────────────────────────────────────────────────────────────────────────────

#[pymodule]
fn runpro_core(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(harden_fixes_json, m)?)?;
    m.add_function(wrap_pyfunction!(coach_score_json, m)?)?;
    Ok(())
}
