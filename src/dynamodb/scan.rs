use aws_sdk_dynamodb::{Client, error, operation};

/// scan operation
#[derive(Clone, Debug, Default, PartialEq)]
struct ScanInput {
    table_name: String,
}

/// Scan of a whole table, first page only.
///
/// ```rust,no_run
/// use aws_sdk_dynamodb::Client;
/// use dynamo_cognito_helpers::dynamodb;
///
/// # async fn example(client: &Client) -> Result<(), Box<dyn std::error::Error>> {
/// let scan = dynamodb::scan::Scan {
///     table_name: "users".to_string(),
/// };
/// let items = scan.send(client).await?.items.unwrap_or_default();
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Scan {
    /// The name of the table to scan.
    pub table_name: String,
}

impl From<Scan> for ScanInput {
    fn from(scan: Scan) -> Self {
        Self {
            table_name: scan.table_name,
        }
    }
}

impl Scan {
    /// Execute the scan operation.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamo_cognito_helpers.scan", skip(client), err)
    )]
    pub async fn send(
        self,
        client: &Client,
    ) -> Result<operation::scan::ScanOutput, error::SdkError<operation::scan::ScanError>> {
        let scan: ScanInput = self.into();
        client.scan().table_name(scan.table_name).send().await
    }
}
