/*
 * Responsibility
 * - ゲートウェイが X-User-ID で渡すエンドユーザー ID
 *
 * Notes
 * - bearer credential は「ゲートウェイからの正当な呼び出し」であることだけを証明する
 * - どのユーザーの代理かはこのヘッダをそのまま信頼する (IdentityContext とは突き合わせない)
 * - ゲートウェイとこのサービス間のネットワークが侵害されるとこの前提は崩れる
 */
use std::fmt;

pub const CALLER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TrustedCallerId(String);

impl TrustedCallerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `None` for a missing or blank header value.
    pub fn parse(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| Self(v.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TrustedCallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_or_missing_header_is_none() {
        assert_eq!(TrustedCallerId::parse(None), None);
        assert_eq!(TrustedCallerId::parse(Some("   ")), None);
    }

    #[test]
    fn value_is_taken_verbatim_apart_from_whitespace() {
        let id = TrustedCallerId::parse(Some(" user-42 ")).unwrap();
        assert_eq!(id.as_str(), "user-42");
    }
}
