/*
 * Responsibility
 * - 下流に通知するドメインイベント (PortfolioUpdateEvent / TradeUpdateEvent)
 * - id / userId / timestamp は本文とは別にメタデータとしても載せる
 */
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::services::documents::types::{DocumentType, ProcessResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Portfolio,
    Trade,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioUpdateEvent {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub process_id: Uuid,
    pub portfolio_id: Option<String>,
    pub broker_type: String,
    pub document_type: DocumentType,
    pub file_name: String,
    pub checksum: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeUpdateEvent {
    pub id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub process_id: Uuid,
    pub portfolio_id: Option<String>,
    pub broker_type: String,
    pub file_name: String,
    pub checksum: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DomainEvent {
    PortfolioUpdate(PortfolioUpdateEvent),
    TradeUpdate(TradeUpdateEvent),
}

impl DomainEvent {
    pub fn portfolio_update(result: &ProcessResult) -> Self {
        Self::PortfolioUpdate(PortfolioUpdateEvent {
            id: Uuid::new_v4(),
            user_id: result.user_id.clone(),
            timestamp: Utc::now(),
            process_id: result.process_id,
            portfolio_id: result.portfolio_id.clone(),
            broker_type: result.document_type.broker().to_string(),
            document_type: result.document_type,
            file_name: result.file_name.clone(),
            checksum: result.checksum.clone(),
        })
    }

    pub fn trade_update(result: &ProcessResult) -> Self {
        Self::TradeUpdate(TradeUpdateEvent {
            id: Uuid::new_v4(),
            user_id: result.user_id.clone(),
            timestamp: Utc::now(),
            process_id: result.process_id,
            portfolio_id: result.portfolio_id.clone(),
            broker_type: result.document_type.broker().to_string(),
            file_name: result.file_name.clone(),
            checksum: result.checksum.clone(),
        })
    }

    pub fn id(&self) -> Uuid {
        match self {
            Self::PortfolioUpdate(e) => e.id,
            Self::TradeUpdate(e) => e.id,
        }
    }

    pub fn user_id(&self) -> &str {
        match self {
            Self::PortfolioUpdate(e) => &e.user_id,
            Self::TradeUpdate(e) => &e.user_id,
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::PortfolioUpdate(e) => e.timestamp,
            Self::TradeUpdate(e) => e.timestamp,
        }
    }

    /// Default destination for this variant.
    pub fn topic(&self) -> Topic {
        match self {
            Self::PortfolioUpdate(_) => Topic::Portfolio,
            Self::TradeUpdate(_) => Topic::Trade,
        }
    }

    /// Transport-level metadata, readable without touching the body.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        vec![
            ("id", self.id().to_string()),
            ("userId", self.user_id().to_string()),
            (
                "timestamp",
                self.timestamp().to_rfc3339_opts(SecondsFormat::Millis, true),
            ),
        ]
    }
}
