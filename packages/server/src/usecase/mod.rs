//! UseCase 層
//!
//! 接続・参加・メッセージ送信・切断の各ユースケースと、
//! それらを受信イベントごとに振り分ける [`SessionLifecycle`] を提供します。
//!
//! 全てのユースケースは 1 つの [`SerialGate`] を共有し、
//! Registry の更新からブロードキャストの開始までを他の接続のイベントと排他的に実行します。

mod connect;
mod disconnect;
mod gate;
mod join_chat;
mod lifecycle;
mod list_participants;
mod send_message;

pub use connect::ConnectUseCase;
pub use disconnect::{DisconnectOutcome, DisconnectUseCase};
pub use gate::SerialGate;
pub use join_chat::{JoinChatUseCase, JoinOutcome};
pub use lifecycle::SessionLifecycle;
pub use list_participants::ListParticipantsUseCase;
pub use send_message::{SendMessageUseCase, SendOutcome};
