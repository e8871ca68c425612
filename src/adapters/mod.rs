pub mod registry_http;
pub mod registry_retrying;

pub use registry_http::HttpDeploymentRegistry;
pub use registry_retrying::{RetryPolicy, RetryingDeploymentRegistry};
