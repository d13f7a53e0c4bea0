//! 通知发送 - 业务能力层
//!
//! 只负责把 `Notice` 投递给界面层，不关心谁产生、如何渲染

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::models::notice::Notice;

#[derive(Debug, Clone)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<Notice>,
}

impl Notifier {
    /// 创建通知通道，接收端交给界面层
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// 发送通知；接收端已关闭时丢弃
    pub fn notify(&self, notice: Notice) {
        if notice.is_destructive() {
            warn!("[文件 {}] ⚠️ {}: {}", notice.file_name(), notice.title(), notice.description());
        } else {
            info!("[文件 {}] ✓ {}: {}", notice.file_name(), notice.title(), notice.description());
        }

        if self.tx.send(notice).is_err() {
            debug!("通知接收端已关闭，丢弃通知");
        }
    }
}
