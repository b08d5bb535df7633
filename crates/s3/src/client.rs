//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the StorageClient trait from bs-core.

use std::path::Path;

use async_trait::async_trait;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, ErrorDocument, IndexDocument,
    WebsiteConfiguration as S3WebsiteConfiguration,
};

use bs_core::{
    BucketRef, CreateBucketOutcome, Error, ObjectPage, ObjectSummary, Result, Session,
    StorageClient, WebsiteConfiguration,
};

/// Region whose buckets are created without a location constraint
const DEFAULT_S3_REGION: &str = "us-east-1";

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a new S3 client for a resolved session
    pub async fn new(session: &Session) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(session.region.clone()));

        if let Some(profile) = &session.shared_profile {
            loader = loader.profile_name(profile);
        }

        if let Some(creds) = &session.credentials {
            let credentials = aws_credential_types::Credentials::new(
                &creds.access_key,
                &creds.secret_key,
                None, // session token
                None, // expiry
                "bucketsite-profile",
            );
            loader = loader.credentials_provider(credentials);
        }

        if let Some(endpoint) = &session.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(session.path_style)
            .build();

        tracing::debug!(
            "S3 client ready (region: {}, profile: {:?})",
            session.region,
            session.shared_profile
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

/// Render a service error as "Code: message", falling back to the full
/// error chain for transport failures.
fn describe<E, R>(err: &SdkError<E, R>) -> String
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    match (err.code(), err.message()) {
        (Some(code), Some(message)) => format!("{code}: {message}"),
        (Some(code), None) => code.to_string(),
        _ => DisplayErrorContext(err).to_string(),
    }
}

/// Map an SDK error for an operation on `bucket`
fn bucket_error<E, R>(bucket: &str, err: SdkError<E, R>) -> Error
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    if err.code() == Some("NoSuchBucket") {
        Error::NotFound(format!("Bucket not found: {bucket}"))
    } else {
        Error::Provider(describe(&err))
    }
}

fn to_timestamp(date: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::from_second(date.secs()).ok()
}

#[async_trait]
impl StorageClient for S3Client {
    async fn create_bucket(&self, bucket: &str, region: &str) -> Result<CreateBucketOutcome> {
        let mut request = self.inner.create_bucket().bucket(bucket);

        if region != DEFAULT_S3_REGION {
            let configuration = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region))
                .build();
            request = request.create_bucket_configuration(configuration);
        }

        tracing::debug!("CreateBucket {bucket} ({region})");
        match request.send().await {
            Ok(_) => Ok(CreateBucketOutcome::Created),
            Err(e) => match e.as_service_error() {
                Some(err) if err.is_bucket_already_owned_by_you() => {
                    Ok(CreateBucketOutcome::AlreadyOwned)
                }
                Some(_) => Ok(CreateBucketOutcome::Failed(describe(&e))),
                None => Err(Error::Provider(describe(&e))),
            },
        }
    }

    async fn list_buckets(&self) -> Result<Vec<BucketRef>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| Error::Provider(describe(&e)))?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| {
                let mut bucket = BucketRef::new(b.name().unwrap_or_default());
                bucket.created = b.creation_date().and_then(to_timestamp);
                bucket
            })
            .collect();

        Ok(buckets)
    }

    async fn list_objects(
        &self,
        bucket: &str,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage> {
        let response = self
            .inner
            .list_objects_v2()
            .bucket(bucket)
            .set_continuation_token(continuation_token)
            .send()
            .await
            .map_err(|e| bucket_error(bucket, e))?;

        let objects = response
            .contents()
            .iter()
            .map(|object| {
                let size = object.size().unwrap_or(0).max(0) as u64;
                let mut summary = ObjectSummary::new(object.key().unwrap_or_default(), size);
                summary.etag = object.e_tag().map(|etag| etag.trim_matches('"').to_string());
                summary.last_modified = object.last_modified().and_then(to_timestamp);
                summary
            })
            .collect();

        let next_token = if response.is_truncated().unwrap_or(false) {
            response.next_continuation_token().map(str::to_string)
        } else {
            None
        };

        Ok(ObjectPage {
            objects,
            next_token,
        })
    }

    async fn put_bucket_policy(&self, bucket: &str, policy: &str) -> Result<()> {
        tracing::debug!("PutBucketPolicy {bucket}");
        self.inner
            .put_bucket_policy()
            .bucket(bucket)
            .policy(policy)
            .send()
            .await
            .map_err(|e| bucket_error(bucket, e))?;

        Ok(())
    }

    async fn get_bucket_policy(&self, bucket: &str) -> Result<Option<String>> {
        match self.inner.get_bucket_policy().bucket(bucket).send().await {
            Ok(response) => Ok(response.policy().map(str::to_string)),
            Err(e) if e.code() == Some("NoSuchBucketPolicy") => Ok(None),
            Err(e) => Err(bucket_error(bucket, e)),
        }
    }

    async fn put_bucket_website(
        &self,
        bucket: &str,
        website: &WebsiteConfiguration,
    ) -> Result<()> {
        let index = IndexDocument::builder()
            .suffix(website.index_document())
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;
        let error = ErrorDocument::builder()
            .key(website.error_document())
            .build()
            .map_err(|e| Error::Configuration(e.to_string()))?;
        let configuration = S3WebsiteConfiguration::builder()
            .index_document(index)
            .error_document(error)
            .build();

        tracing::debug!("PutBucketWebsite {bucket}");
        self.inner
            .put_bucket_website()
            .bucket(bucket)
            .website_configuration(configuration)
            .send()
            .await
            .map_err(|e| bucket_error(bucket, e))?;

        Ok(())
    }

    async fn get_bucket_website(&self, bucket: &str) -> Result<Option<WebsiteConfiguration>> {
        let response = match self.inner.get_bucket_website().bucket(bucket).send().await {
            Ok(response) => response,
            Err(e) if e.code() == Some("NoSuchWebsiteConfiguration") => return Ok(None),
            Err(e) => return Err(bucket_error(bucket, e)),
        };

        match (response.index_document(), response.error_document()) {
            (Some(index), Some(error)) => Ok(Some(WebsiteConfiguration::new(
                index.suffix(),
                error.key(),
            ))),
            _ => {
                tracing::debug!("Bucket {bucket} has an incomplete website configuration");
                Ok(None)
            }
        }
    }

    async fn upload_object(
        &self,
        bucket: &str,
        key: &str,
        path: &Path,
        content_type: &str,
    ) -> Result<u64> {
        let size = tokio::fs::metadata(path).await?.len();
        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?;

        self.inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|e| bucket_error(bucket, e))?;

        Ok(size)
    }
}
