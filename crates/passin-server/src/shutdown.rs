use tokio::signal;
use tracing::{info, warn};

/// 关闭信号类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownSignal {
    /// SIGTERM
    Term,
    /// SIGINT - Ctrl+C
    Interrupt,
}

/// 等待 SIGINT 或 SIGTERM
///
/// 某个信号监听安装失败时只记录警告，继续等待另一个信号。
pub async fn wait_for_signal() -> ShutdownSignal {
    let interrupt = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => {
            info!("Received SIGINT");
            ShutdownSignal::Interrupt
        }
        _ = terminate => {
            info!("Received SIGTERM");
            ShutdownSignal::Term
        }
    }
}
