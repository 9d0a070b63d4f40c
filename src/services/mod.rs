/*
 * Responsibility
 * - handler から呼ばれるドメインロジックと外部コラボレータ (処理・ステータス・イベント)
 */
pub mod auth;
pub mod documents;
pub mod events;
pub mod status;
