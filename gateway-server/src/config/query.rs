use confique::Config;

/// Configuration for the person directory behind the protected routes
#[derive(Debug, Config, Clone)]
pub struct QueryConfig {
    /// JSON file with person records; the bundled sample records are used
    /// when unset
    #[config(env = "GATEWAY_QUERY_RECORDS_FILE")]
    pub records_file: Option<String>,
}
