use thiserror::Error;

use crate::ui::widgets::{DraftField, MessageBlock, NoticeLevel, TargetTable};

pub type UiResult<T> = Result<T, UiError>;

#[derive(Debug, Error)]
pub enum UiError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub trait Renderer {
    fn text(&mut self, body: &str) -> UiResult<()>;
    fn section(&mut self, title: &str) -> UiResult<()>;
    fn notice(&mut self, level: NoticeLevel, body: &str) -> UiResult<()>;

    fn error_block(&mut self, block: &MessageBlock) -> UiResult<()>;

    /// A run configuration, one aligned field per line.
    fn configuration(&mut self, fields: &[DraftField]) -> UiResult<()>;
    fn targets(&mut self, table: &TargetTable) -> UiResult<()>;
}
