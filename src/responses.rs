use serde::Serialize;

#[derive(Serialize, Clone)]
pub struct MessageResponse {
    pub(crate) message: &'static str,
}

#[derive(Serialize, Clone)]
pub struct ErrorResponse {
    pub(crate) error: String,
}
