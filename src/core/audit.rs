//! Completion audit log
//!
//! Completing a case deletes the patient from the registry. When enabled, a
//! JSON line per completion keeps the history. Patient names are stored as a
//! SHA-256 hash unless configured otherwise.

use crate::config::AuditConfig;
use crate::core::workflow::Action;
use crate::domain::{DoctorId, MedicineId, Patient, PatientId, Result, TriageError};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One completed case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub event_id: Uuid,
    pub timestamp: String,
    pub patient_id: PatientId,
    pub doctor_id: DoctorId,
    pub action: Action,
    pub medicine_ids: Vec<MedicineId>,
    pub prescription_printed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_name_hash: Option<String>,
}

/// Appends completion records to a JSON lines file
#[derive(Debug, Clone)]
pub struct CompletionAuditLog {
    path: PathBuf,
    hash_names: bool,
}

impl CompletionAuditLog {
    /// Create a new audit log, creating its directory
    pub fn new(path: impl Into<PathBuf>, hash_names: bool) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                TriageError::Io(format!(
                    "Failed to create audit log directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        Ok(Self { path, hash_names })
    }

    /// Audit log for `config`, or `None` when disabled
    pub fn from_config(config: &AuditConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }
        Self::new(&config.path, config.hash_patient_names).map(Some)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record for a patient that was just completed
    pub fn record(&self, patient: &Patient, action: Action) -> Result<CompletionRecord> {
        let (patient_name, patient_name_hash) = if self.hash_names {
            (None, Some(hash_name(patient.name())))
        } else {
            (Some(patient.name().to_string()), None)
        };

        let record = CompletionRecord {
            event_id: Uuid::new_v4(),
            timestamp: Utc::now().to_rfc3339(),
            patient_id: patient.id(),
            doctor_id: patient.doctor_id(),
            action,
            medicine_ids: patient.selected_medicines().to_vec(),
            prescription_printed: patient.prescription_printed(),
            patient_name,
            patient_name_hash,
        };

        self.write_entry(&record)?;
        Ok(record)
    }

    /// Reads every record back, skipping lines that do not parse
    pub fn read_all(&self) -> Result<Vec<CompletionRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(contents
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect())
    }

    fn write_entry(&self, record: &CompletionRecord) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                TriageError::Io(format!(
                    "Failed to open audit log {}: {}",
                    self.path.display(),
                    e
                ))
            })?;

        let json_line = serde_json::to_string(record)?;
        writeln!(file, "{json_line}")?;
        Ok(())
    }
}

/// SHA-256 of a patient name, lowercase hex
fn hash_name(name: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(name.as_bytes());
    format!("{:x}", hasher.finalize())
}
