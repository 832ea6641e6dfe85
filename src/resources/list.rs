//! Paginated listings.

use std::sync::Arc;

use futures::{Stream, StreamExt, TryStreamExt};

use crate::client::ClientInner;
use crate::error::Error;
use crate::selector::Selector;
use crate::types::{Resource, ResourceType};

/// Response header carrying the continuation token.
const CONTINUE_HEADER: &str = "sensu-continue";

/// Items requested per page unless overridden.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// A listing of one collection, optionally filtered by selectors.
///
/// Nothing is fetched until the listing is consumed. Each call to
/// [`stream`](Self::stream) (or `.await`) starts from the first page, so a
/// `ResourceList` can be consumed more than once; each individual stream is
/// single-pass.
///
/// Pages are fetched on demand with `GET <collection>?limit=<n>`, following
/// the `sensu-continue` response header until it is missing or empty.
/// Dropping the stream early stops fetching.
///
/// ## Example
///
/// ```rust,ignore
/// use futures::TryStreamExt;
/// use sensu_go::Selector;
///
/// // Collect everything
/// let checks = client.checks().list().await?;
///
/// // Or stream with filters
/// let mut stream = std::pin::pin!(client
///     .entities()
///     .list()
///     .label_selector(Selector::equal("region", "eu-west"))
///     .field_selector(Selector::in_("linux", "subscriptions"))
///     .stream());
/// while let Some(entity) = stream.try_next().await? {
///     println!("{}", entity);
/// }
/// ```
#[derive(Clone)]
pub struct ResourceList {
    client: Arc<ClientInner>,
    kind: &'static ResourceType,
    path: String,
    label_selector: Option<Selector>,
    field_selector: Option<Selector>,
    page_size: usize,
}

impl ResourceList {
    pub(crate) fn new(client: Arc<ClientInner>, kind: &'static ResourceType, path: String) -> Self {
        Self {
            client,
            kind,
            path,
            label_selector: None,
            field_selector: None,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Filters by labels. Label names are never prefixed.
    #[must_use]
    pub fn label_selector(mut self, selector: Selector) -> Self {
        self.label_selector = Some(selector);
        self
    }

    /// Filters by fields. Field names get the resource kind's prefix.
    #[must_use]
    pub fn field_selector(mut self, selector: Selector) -> Self {
        self.field_selector = Some(selector);
        self
    }

    /// Sets the number of items requested per page.
    #[must_use]
    pub fn page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns the collection path being listed.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Query parameters of the first page.
    fn base_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::with_capacity(4);
        if let Some(ref selector) = self.label_selector {
            query.push(("labelSelector".to_string(), selector.serialize(None)));
        }
        if let Some(ref selector) = self.field_selector {
            query.push((
                "fieldSelector".to_string(),
                selector.serialize(self.kind.field_prefix),
            ));
        }
        query.push(("limit".to_string(), self.page_size.to_string()));
        query
    }

    /// Returns a stream over every matching resource.
    ///
    /// The stream ends after the first error.
    pub fn stream(&self) -> impl Stream<Item = Result<Resource, Error>> + Send + 'static {
        let client = self.client.clone();
        let kind = self.kind;
        let path = self.path.clone();
        let query = self.base_query();

        futures::stream::unfold(
            (client, path, query, None::<String>, false),
            move |(client, path, query, cursor, done)| async move {
                if done {
                    return None;
                }

                let mut page_query = query.clone();
                if let Some(ref token) = cursor {
                    page_query.push(("continue".to_string(), token.clone()));
                }

                match fetch_page(&client, kind, &path, &page_query).await {
                    Ok((items, next_cursor)) => {
                        let is_done = next_cursor.is_none();
                        Some((
                            futures::stream::iter(items),
                            (client, path, query, next_cursor, is_done),
                        ))
                    }
                    Err(e) => Some((
                        futures::stream::iter(vec![Err(e)]),
                        (client, path, query, None, true),
                    )),
                }
            },
        )
        .flatten()
    }

    /// Fetches every page and collects the resources.
    pub async fn collect(&self) -> Result<Vec<Resource>, Error> {
        self.stream().try_collect().await
    }

    /// Deletes every listed resource, in listing order.
    ///
    /// Not atomic: the first failure stops the run, leaving the resources
    /// already deleted gone and the rest untouched.
    pub async fn delete(&self) -> Result<(), Error> {
        let mut stream = std::pin::pin!(self.stream());
        while let Some(resource) = stream.try_next().await? {
            resource.delete().await?;
        }
        Ok(())
    }
}

/// Fetches one page; returns its resources and the next continuation token.
///
/// Items are converted up to and including the first one that fails, and no
/// token is returned after such a failure.
async fn fetch_page(
    client: &Arc<ClientInner>,
    kind: &'static ResourceType,
    path: &str,
    query: &[(String, String)],
) -> Result<(Vec<Result<Resource, Error>>, Option<String>), Error> {
    let response = client.get(path, query).await?;
    response.expect_status(&[200], "Expected 200 when listing resources")?;

    let data: Vec<serde_json::Value> = response.json()?;
    let next_cursor = response
        .header(CONTINUE_HEADER)
        .filter(|token| !token.is_empty())
        .map(str::to_string);

    tracing::trace!(
        path,
        items = data.len(),
        more = next_cursor.is_some(),
        "Fetched page"
    );

    let weak = Arc::downgrade(client);
    let mut items = Vec::with_capacity(data.len());
    for item in data {
        let resource = Resource::from_api(kind, weak.clone(), item);
        let failed = resource.is_err();
        items.push(resource);
        if failed {
            // A malformed item ends the listing.
            return Ok((items, None));
        }
    }
    Ok((items, next_cursor))
}

impl std::fmt::Debug for ResourceList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceList")
            .field("path", &self.path)
            .field("label_selector", &self.label_selector)
            .field("field_selector", &self.field_selector)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl std::future::IntoFuture for ResourceList {
    type Output = Result<Vec<Resource>, Error>;
    type IntoFuture = std::pin::Pin<Box<dyn std::future::Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.collect().await })
    }
}
