#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("recipe catalog is empty")]
    EmptyCatalog,

    #[error("invalid household config: {0}")]
    InvalidConfig(String),

    #[error("malformed recipe '{id}': {reason}")]
    MalformedRecipe { id: String, reason: String },

    #[error("recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! invalid_config {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::InvalidConfig(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::InvalidConfig(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! malformed {
    ($id:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        return Err($crate::Error::MalformedRecipe {
            id: $id.to_string(),
            reason: format!($fmt $(, $arg)*),
        })
    };
}
