//! Resume API trait

use async_trait::async_trait;

use crate::client::models::{ResumeRequest, ResumeResponse};
use crate::error::Result;

/// Resume generation
#[async_trait]
pub trait ResumeApi: Send + Sync {
    /// Generate a resume from the stored profile plus `request`
    async fn generate_resume(&self, request: &ResumeRequest) -> Result<ResumeResponse>;
}
