use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchedulerError {
    #[error("invalid time spec '{spec}': {source}")]
    InvalidSpec {
        spec: String,
        #[source]
        source: cron::error::Error,
    },

    #[error("invalid time spec '{spec}': expected 6 fields (sec min hour dom mon dow), got {fields}")]
    WrongFieldCount { spec: String, fields: usize },

    #[error("job with name '{0}' already exists")]
    DuplicateName(String),

    #[error("job not found: {0}")]
    NotFound(String),
}
