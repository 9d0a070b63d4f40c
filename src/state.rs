/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - verifier: 署名シークレット (起動時に一度だけ読み込み、以後 read-only)
 *   - policy: route policy table (read-only)
 *   - documents: 処理・ステータス・イベントのユースケース
 * - Clone 前提で持つ (内部は Arc)
 */
use std::sync::Arc;

use crate::middleware::auth::RoutePolicy;
use crate::services::{auth::CredentialVerifier, documents::DocumentService};

#[derive(Clone)]
pub struct AppState {
    pub verifier: Arc<CredentialVerifier>,
    pub policy: Arc<RoutePolicy>,
    pub documents: Arc<DocumentService>,
}

impl AppState {
    pub fn new(
        verifier: Arc<CredentialVerifier>,
        policy: Arc<RoutePolicy>,
        documents: Arc<DocumentService>,
    ) -> Self {
        Self {
            verifier,
            policy,
            documents,
        }
    }
}
