use tokio::sync::RwLock;

use super::ResponseResult;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Banner {
    pub visible: bool,
    pub message: String,
}

/// Success and error banners. Showing one hides the other; a hidden banner
/// keeps its last message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BannerState {
    pub success: Banner,
    pub error: Banner,
}

impl BannerState {
    pub fn show_success(&mut self, message: impl Into<String>) {
        self.success.message = message.into();
        self.success.visible = true;
        self.error.visible = false;
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.error.message = message.into();
        self.error.visible = true;
        self.success.visible = false;
    }

    pub fn apply(&mut self, result: &ResponseResult) {
        match result {
            ResponseResult::Success { message } => self.show_success(message.as_str()),
            ResponseResult::Failure { message } => self.show_error(message.as_str()),
        }
    }
}

/// Shared handle on the banner elements a handler writes to.
#[derive(Debug, Default)]
pub struct Banners {
    state: RwLock<BannerState>,
}

impl Banners {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> BannerState {
        self.state.read().await.clone()
    }

    pub async fn apply(&self, result: &ResponseResult) {
        self.state.write().await.apply(result);
    }
}
