/// RouteError
///
/// Failures raised while building or reverse-resolving a route table. These only
/// occur at startup (malformed static data) or when a caller asks for a path by
/// a name/parameter set the table cannot satisfy.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteError {
    #[error("route pattern `{0}` must start with '/'")]
    MissingLeadingSlash(String),
    #[error("route pattern `{0}` contains an empty segment")]
    EmptySegment(String),
    #[error("route pattern `{pattern}` has an invalid parameter name `{name}`")]
    InvalidParamName { pattern: String, name: String },
    #[error("route pattern `{pattern}` declares parameter `{name}` more than once")]
    DuplicateParam { pattern: String, name: String },
    #[error("missing value for parameter `{name}` of `{pattern}`")]
    MissingParam { pattern: String, name: String },
    #[error("no route named `{0}`")]
    UnknownName(String),
}

/// ConfigError
///
/// Raised by `AppConfig::load` when the environment cannot produce a usable configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    MissingProductionVar(&'static str),
    #[error("invalid value `{value}` for {var}")]
    InvalidValue { var: &'static str, value: String },
}
