/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 認証はここではなく AuthCtxExtractor (handler 引数) で行う
 */
pub mod cors;
pub mod error_log;
pub mod http;
