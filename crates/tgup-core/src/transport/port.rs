use std::path::Path;

use async_trait::async_trait;

use crate::{
    domain::{Destination, MessageId},
    Result,
};

/// Port for the remote chat client.
///
/// The uploader only ever needs two operations; connection lifecycle, authentication
/// and protocol-level retries belong to the implementation.
#[async_trait]
pub trait UploadTransport: Send + Sync {
    /// Upload a local file with a caption, optionally as a reply to `reply_to`.
    async fn send_file(
        &self,
        destination: &Destination,
        path: &Path,
        caption: &str,
        reply_to: Option<MessageId>,
    ) -> Result<MessageId>;

    /// Send a plain text message, optionally as a reply to `reply_to`.
    async fn send_text(
        &self,
        destination: &Destination,
        text: &str,
        reply_to: Option<MessageId>,
    ) -> Result<MessageId>;
}
