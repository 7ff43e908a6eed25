use crate::core::errors::LedgerError;
use crate::core::models::audit::AppLog;
use crate::infrastructure::logging::LoggingService;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Clone)]
pub struct InMemoryLogging {
    logs: Arc<RwLock<Vec<AppLog>>>,
}

impl InMemoryLogging {
    pub fn new() -> Self {
        InMemoryLogging {
            logs: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl Default for InMemoryLogging {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoggingService for InMemoryLogging {
    async fn log_action(&self, action: &str, details: serde_json::Value) -> Result<(), LedgerError> {
        let mut logs = self.logs.write().await;
        logs.push(AppLog {
            id: Uuid::new_v4().to_string(),
            action: action.to_string(),
            details,
            timestamp: chrono::Utc::now(),
        });
        Ok(())
    }

    async fn get_logs(&self) -> Result<Vec<AppLog>, LedgerError> {
        let logs = self.logs.read().await;
        Ok(logs.clone())
    }
}
