use std::{
    error::Error,
    fmt::{Debug, Display},
};

#[derive(Debug)]
pub enum EtagServiceError<InnerError, ReadResBodyError> {
    InnerError(InnerError),
    ReadResBodyError(ReadResBodyError),
}

impl<InnerError: Display, ReadResBodyError: Display> Display
    for EtagServiceError<InnerError, ReadResBodyError>
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InnerError(e) => e.fmt(f),
            Self::ReadResBodyError(e) => e.fmt(f),
        }
    }
}

// must implement std::Error else axum's HandleErrorLayer will throw
// `the trait bound HandleError<...> is not satisfied`
impl<InnerError: Debug + Display, ReadResBodyError: Debug + Display> Error
    for EtagServiceError<InnerError, ReadResBodyError>
{
}
