// src/services/redis_service.rs
use redis::{AsyncCommands, Client};
use uuid::Uuid;

use crate::errors::PictoscopeError;
use crate::models::AnalysisReport;

pub fn report_key(id: &Uuid) -> String {
    format!("analysis:{}", id)
}

pub struct RedisService {
    client: Client,
    ttl_secs: u64,
}

impl RedisService {
    pub async fn new(redis_url: &str, ttl_secs: u64) -> Result<Self, PictoscopeError> {
        let client = Client::open(redis_url)?;

        // Test connection
        let mut conn = client.get_async_connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;

        Ok(Self { client, ttl_secs })
    }

    /// Store a report under `analysis:{id}`, expiring after the configured TTL.
    pub async fn store_report(&self, report: &AnalysisReport) -> Result<(), PictoscopeError> {
        let mut conn = self.client.get_async_connection().await?;
        let value = serde_json::to_string(report)?;
        conn.set_ex::<_, _, ()>(report_key(&report.id), value, self.ttl_secs as usize)
            .await?;
        Ok(())
    }

    pub async fn get_report(&self, id: &Uuid) -> Result<AnalysisReport, PictoscopeError> {
        let mut conn = self.client.get_async_connection().await?;
        let value: Option<String> = conn.get(report_key(id)).await?;
        let value =
            value.ok_or_else(|| PictoscopeError::NotFound(format!("analysis {}", id)))?;
        Ok(serde_json::from_str(&value)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced() {
        let id = Uuid::nil();
        assert_eq!(
            report_key(&id),
            "analysis:00000000-0000-0000-0000-000000000000"
        );
    }
}
