//! Pusher 実装（購読セッションへのファンアウト）
//!
//! ## 概要
//!
//! このモジュールは `FieldPusher` trait の具体的な実装を提供します。
//!
//! ## 実装
//!
//! - `websocket`: WebSocket 接続ごとのチャンネルを使った実装

pub mod websocket;

pub use websocket::WebSocketFieldPusher;
