use passin_core::CheckInManager;
use std::sync::Arc;

/// API 应用状态
#[derive(Clone)]
pub struct AppState {
    /// 签到管理器
    pub manager: Arc<CheckInManager>,
}

impl AppState {
    /// 创建新的应用状态
    pub fn new(manager: Arc<CheckInManager>) -> Self {
        Self { manager }
    }
}
