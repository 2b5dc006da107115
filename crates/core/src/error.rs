use thiserror::Error;

use crate::model::CourseError;
use crate::notify::NotifyError;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
}
