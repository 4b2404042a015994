use crate::{command::Command, convert::service::ConversionSummary, error::AppResult};

pub trait ConvertImageUseCase: Send + Sync {
    fn convert(&self, command: &Command) -> AppResult<ConversionSummary>;
}
