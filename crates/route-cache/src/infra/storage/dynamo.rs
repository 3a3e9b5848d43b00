use {
    super::{CachedRoutesItem, EXPIRES_AT, PARTITION_KEY, PAYLOAD, RouteStore, SORT_KEY},
    crate::infra::config::Arguments,
    anyhow::{Context, Result, anyhow},
    aws_sdk_dynamodb::{
        Client,
        config::{retry::RetryConfig, timeout::TimeoutConfig},
        primitives::Blob,
        types::AttributeValue,
    },
};

/// [`RouteStore`] backed by a DynamoDB table with a string partition key, a
/// string sort key and TTL enabled on [`EXPIRES_AT`].
#[derive(Clone, Debug)]
pub struct DynamoRouteStore {
    client: Client,
    table: String,
}

impl DynamoRouteStore {
    /// Creates a store from shared AWS configuration, with timeouts and
    /// retries taken from `args` instead of the SDK defaults.
    pub fn new(sdk_config: &aws_config::SdkConfig, args: &Arguments) -> Self {
        let attempts = args.cached_routes_max_attempts;
        let retry = RetryConfig::standard()
            .with_max_attempts(attempts)
            .with_initial_backoff(args.cached_routes_retry_backoff)
            .with_max_backoff(args.cached_routes_retry_backoff);
        let timeout = TimeoutConfig::builder()
            .operation_attempt_timeout(args.cached_routes_timeout)
            .operation_timeout(
                args.cached_routes_timeout * attempts
                    + args.cached_routes_retry_backoff * attempts.saturating_sub(1),
            )
            .build();
        let config = aws_sdk_dynamodb::config::Builder::from(sdk_config)
            .retry_config(retry)
            .timeout_config(timeout)
            .build();

        Self {
            client: Client::from_conf(config),
            table: args.cached_routes_table_name.clone(),
        }
    }

    /// Creates a store using the default AWS credential and region chain.
    pub async fn from_env(args: &Arguments) -> Self {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .load()
            .await;
        Self::new(&sdk_config, args)
    }
}

#[async_trait::async_trait]
impl RouteStore for DynamoRouteStore {
    async fn latest(&self, partition_key: &str, sort_key_prefix: &str) -> Result<Option<Vec<u8>>> {
        let output = self
            .client
            .query()
            .table_name(&self.table)
            .key_condition_expression("#pk = :pk AND begins_with(#sk, :sk)")
            .expression_attribute_names("#pk", PARTITION_KEY)
            .expression_attribute_names("#sk", SORT_KEY)
            .expression_attribute_values(":pk", AttributeValue::S(partition_key.to_owned()))
            .expression_attribute_values(":sk", AttributeValue::S(sort_key_prefix.to_owned()))
            .scan_index_forward(false)
            .limit(1)
            .send()
            .await
            .context("query cached routes")?;

        let Some(item) = output.items().first() else {
            return Ok(None);
        };
        match item.get(PAYLOAD) {
            Some(AttributeValue::B(blob)) => Ok(Some(blob.as_ref().to_vec())),
            _ => Err(anyhow!(
                "cached routes item {partition_key} has no binary {PAYLOAD} attribute"
            )),
        }
    }

    async fn put(&self, item: CachedRoutesItem) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .item(PARTITION_KEY, AttributeValue::S(item.partition_key))
            .item(SORT_KEY, AttributeValue::S(item.sort_key))
            .item(PAYLOAD, AttributeValue::B(Blob::new(item.payload)))
            .item(EXPIRES_AT, AttributeValue::N(item.expires_at.to_string()))
            .send()
            .await
            .context("put cached routes")?;
        Ok(())
    }
}
