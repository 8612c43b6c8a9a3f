use crate::api::ApiError;

/// Success / error feedback a view renders next to a form or list.
#[derive(Clone, Default)]
pub struct MessageState {
    pub success: Option<String>,
    pub error: Option<ApiError>,
}

impl MessageState {
    pub fn set_success(&mut self, message: impl Into<String>) {
        self.success = Some(message.into());
        self.error = None;
    }

    pub fn set_error(&mut self, error: ApiError) {
        self.error = Some(error);
        self.success = None;
    }

    pub fn clear(&mut self) {
        self.success = None;
        self.error = None;
    }
}
