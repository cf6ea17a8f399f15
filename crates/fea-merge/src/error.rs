use std::result;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("no masters provided for merging")]
    NoMasters,

    #[error("value recorded for master '{0}', which is not in the master registry")]
    UnknownMaster(String),
}

pub type Result<T> = result::Result<T, Error>;
