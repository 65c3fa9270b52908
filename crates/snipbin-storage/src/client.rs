use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;

/// Build an S3 client from the default AWS credential and region chain.
pub async fn build_client() -> Client {
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    Client::new(&config)
}

/// Build an S3 client against a custom endpoint such as MinIO or LocalStack.
///
/// Path-style addressing is forced since most S3-compatible servers do not
/// serve virtual-hosted buckets.
pub async fn build_client_with_endpoint(endpoint: &str) -> Client {
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let s3_config = aws_sdk_s3::config::Builder::from(&config)
        .endpoint_url(endpoint)
        .force_path_style(true)
        .build();
    Client::from_conf(s3_config)
}
