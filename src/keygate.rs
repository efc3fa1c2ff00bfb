use crate::config::Config;
use crate::error::CredentialError;

/// Whether the shell may render at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Unchecked,
    Missing,
    Active,
}

/// Blocks app entry until a credential is present. A failed check is
/// not fatal: the gate screen offers activation and retries.
#[derive(Debug)]
pub struct KeyGate {
    status: GateStatus,
}

impl KeyGate {
    pub fn new() -> Self {
        Self {
            status: GateStatus::Unchecked,
        }
    }

    pub fn status(&self) -> GateStatus {
        self.status
    }

    pub fn check(&mut self, config: &Config) -> GateStatus {
        self.status = if config.ai.api_key.trim().is_empty() {
            GateStatus::Missing
        } else {
            GateStatus::Active
        };
        self.status
    }

    /// Persists an entered credential and unblocks entry. Blank input
    /// is rejected so the gate screen can keep its retry affordance.
    pub fn activate(&mut self, config: &mut Config, key: &str) -> Result<(), CredentialError> {
        let key = key.trim();
        if key.is_empty() {
            return Err(CredentialError::Empty);
        }
        config.ai.api_key = key.to_string();
        config
            .save()
            .map_err(|e| CredentialError::Persist(e.to_string()))?;
        self.status = GateStatus::Active;
        Ok(())
    }
}

impl Default for KeyGate {
    fn default() -> Self {
        Self::new()
    }
}
