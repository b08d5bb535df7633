//! Bucket Manager
//!
//! Orchestrates bucket creation, policy, website configuration and
//! directory sync on top of a [`StorageClient`]. The manager holds no
//! state besides the client and the session region; every operation can
//! be re-issued independently.

use std::path::Path;

use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};

use crate::bucket::validate_bucket_name;
use crate::error::{Error, Result};
use crate::policy::BucketPolicy;
use crate::sync::{SyncReport, SyncUnit, collect_units, resolve_root};
use crate::traits::{BucketRef, CreateBucketOutcome, ObjectSummary, StorageClient};
use crate::website::WebsiteConfiguration;

/// What `setup_bucket` applied to a bucket
#[derive(Debug, Clone)]
pub struct BucketSetup {
    pub bucket: BucketRef,
    pub policy: BucketPolicy,
    pub website: WebsiteConfiguration,
}

/// Manages website buckets for one session
pub struct BucketManager<C> {
    client: C,
    region: String,
}

impl<C: StorageClient> BucketManager<C> {
    /// Bind a manager to a storage client and the session region
    pub fn new(client: C, region: impl Into<String>) -> Self {
        Self {
            client,
            region: region.into(),
        }
    }

    /// Region new buckets are created in
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Get the underlying storage client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Stream all buckets owned by the account.
    ///
    /// Nothing is requested until the stream is polled; calling again
    /// starts a fresh listing.
    pub fn all_buckets(&self) -> BoxStream<'_, Result<BucketRef>> {
        stream::once(self.client.list_buckets())
            .map_ok(|buckets| stream::iter(buckets.into_iter().map(Ok)))
            .try_flatten()
            .boxed()
    }

    /// Stream every object in `bucket`, following continuation tokens.
    pub fn all_objects<'a>(&'a self, bucket: &'a str) -> BoxStream<'a, Result<ObjectSummary>> {
        enum Cursor {
            Start,
            Next(String),
            Done,
        }

        stream::try_unfold(Cursor::Start, move |cursor| async move {
            let token = match cursor {
                Cursor::Done => return Ok::<_, Error>(None),
                Cursor::Start => None,
                Cursor::Next(token) => Some(token),
            };

            tracing::debug!("Listing objects in {bucket}");
            let page = self.client.list_objects(bucket, token).await?;
            let next = match page.next_token {
                Some(token) => Cursor::Next(token),
                None => Cursor::Done,
            };

            Ok(Some((stream::iter(page.objects.into_iter().map(Ok)), next)))
        })
        .try_flatten()
        .boxed()
    }

    /// Create `bucket` in the session region, succeeding if the account
    /// already owns it.
    pub async fn init_bucket(&self, bucket: &str) -> Result<BucketRef> {
        validate_bucket_name(bucket)?;

        let outcome = self
            .client
            .create_bucket(bucket, &self.region)
            .await
            .map_err(|e| Error::BucketCreation(format!("{bucket}: {e}")))?;

        match outcome {
            CreateBucketOutcome::Created => {
                tracing::info!("Created bucket {bucket} in {}", self.region);
                Ok(BucketRef::new(bucket))
            }
            CreateBucketOutcome::AlreadyOwned => {
                tracing::warn!("Bucket {bucket} already exists and is owned by you");
                Ok(BucketRef::new(bucket))
            }
            CreateBucketOutcome::Failed(reason) => {
                Err(Error::BucketCreation(format!("{bucket}: {reason}")))
            }
        }
    }

    /// Replace the bucket policy with public read access to all objects
    pub async fn set_policy(&self, bucket: &BucketRef) -> Result<BucketPolicy> {
        let policy = BucketPolicy::public_read(&bucket.name);
        let document = policy.to_json()?;

        self.client
            .put_bucket_policy(&bucket.name, &document)
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => e,
                other => Error::Policy(format!("{bucket}: {other}")),
            })?;

        tracing::info!("Applied public-read policy to {bucket}");
        Ok(policy)
    }

    /// Configure `index.html` / `error.html` website hosting
    pub async fn configure_website(&self, bucket: &BucketRef) -> Result<WebsiteConfiguration> {
        let website = WebsiteConfiguration::default();

        self.client
            .put_bucket_website(&bucket.name, &website)
            .await
            .map_err(|e| match e {
                Error::NotFound(_) => e,
                other => Error::Configuration(format!("{bucket}: {other}")),
            })?;

        tracing::info!(
            "Configured website hosting for {bucket} (index: {}, error: {})",
            website.index_document(),
            website.error_document()
        );
        Ok(website)
    }

    /// Create, open up and configure a website bucket in one go
    pub async fn setup_bucket(&self, bucket: &str) -> Result<BucketSetup> {
        let bucket = self.init_bucket(bucket).await?;
        let policy = self.set_policy(&bucket).await?;
        let website = self.configure_website(&bucket).await?;
        Ok(BucketSetup {
            bucket,
            policy,
            website,
        })
    }

    /// List what `sync` would upload from `root`, without uploading
    pub fn plan_sync(&self, root: &Path) -> Result<Vec<SyncUnit>> {
        let root = resolve_root(root)?;
        collect_units(&root)
    }

    /// Upload every file under `root` to `bucket`.
    ///
    /// Stops at the first failed upload with [`Error::Sync`]. Objects
    /// uploaded before the failure stay in the bucket.
    pub async fn sync(&self, root: &Path, bucket: &str) -> Result<SyncReport> {
        self.sync_with(root, bucket, |_| {}).await
    }

    /// Like [`sync`](Self::sync), calling `on_uploaded` after each upload
    pub async fn sync_with<F>(
        &self,
        root: &Path,
        bucket: &str,
        on_uploaded: F,
    ) -> Result<SyncReport>
    where
        F: FnMut(&SyncUnit) + Send,
    {
        let units = self.plan_sync(root)?;
        self.sync_units(units, bucket, on_uploaded).await
    }

    /// Upload units returned by [`plan_sync`](Self::plan_sync), in order,
    /// with the same abort-on-first-failure rule as [`sync`](Self::sync).
    pub async fn sync_units<F>(
        &self,
        units: Vec<SyncUnit>,
        bucket: &str,
        mut on_uploaded: F,
    ) -> Result<SyncReport>
    where
        F: FnMut(&SyncUnit) + Send,
    {
        tracing::debug!("Syncing {} file(s) to {bucket}", units.len());

        let mut report = SyncReport::default();
        for unit in units {
            let content_type = unit.content_type();
            let bytes = self
                .client
                .upload_object(bucket, &unit.key, &unit.path, &content_type)
                .await
                .map_err(|e| Error::sync(&unit.key, e))?;

            tracing::debug!("Uploaded {} ({content_type}, {bytes} bytes)", unit.key);
            on_uploaded(&unit);
            report.total_bytes += bytes;
            report.uploaded.push(unit);
        }

        tracing::info!("Synced {} file(s) to {bucket}", report.uploaded.len());
        Ok(report)
    }
}
