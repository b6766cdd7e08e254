use super::{Gateway, REMOTE_TAG};
use crate::domain::Job;

impl Gateway<Job> {
    /// Jobs matching the `"remote"` rule: location mentions "remote" or the
    /// tags hold exactly `"remote"`.
    pub async fn get_remote(&self) -> Vec<Job> {
        self.filter_by_tag(REMOTE_TAG).await
    }
}
