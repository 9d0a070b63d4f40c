/*!
 * Request extractors
 *
 * - Identity: access middleware が検証済み IdentityContext を extensions に入れた前提で取り出す
 * - TrustedCallerId: ゲートウェイが付与する X-User-ID (bearer とは別物として扱う)
 */
mod caller_id;
mod identity;

pub use identity::Identity;
pub use crate::services::auth::TrustedCallerId;
