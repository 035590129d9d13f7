use thiserror::Error;
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("sample count must be greater than zero")]
    InvalidSampleCount,
    #[error("cannot score an empty sample frame")]
    EmptyFrame,
    #[error("failed to render plot: {0}")]
    Plot(String),
}
impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for SessionError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        SessionError::Plot(format!("{value:?}"))
    }
}
impl From<image::ImageError> for SessionError {
    fn from(value: image::ImageError) -> Self {
        SessionError::Plot(value.to_string())
    }
}
