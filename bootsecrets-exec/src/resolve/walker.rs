use std::sync::atomic::{AtomicUsize, Ordering};

use bootsecrets_core::{cast, recognize, CastError, ConfigNode, NodePath, SecretReference};
use futures_util::future::{try_join_all, BoxFuture, FutureExt};

use crate::resolve::{ResolutionContext, ResolveError};
use crate::secrets::SecretFetcher;

/// Depth-first rebuild of a configuration tree with every secret reference
/// replaced by its fetched and cast value.
///
/// Siblings are resolved concurrently; the context's cache keeps fetches to
/// one per key. The first error aborts the whole walk.
pub struct Walker<'a, F: ?Sized> {
    fetcher: &'a F,
    context: &'a ResolutionContext<'a>,
    references: AtomicUsize,
}

impl<'a, F> Walker<'a, F>
where
    F: SecretFetcher + ?Sized,
{
    pub fn new(fetcher: &'a F, context: &'a ResolutionContext<'a>) -> Self {
        Self {
            fetcher,
            context,
            references: AtomicUsize::new(0),
        }
    }

    pub async fn resolve(&self, node: &ConfigNode) -> Result<ConfigNode, ResolveError> {
        self.resolve_at(node, NodePath::root()).await
    }

    /// References substituted so far.
    pub fn reference_count(&self) -> usize {
        self.references.load(Ordering::SeqCst)
    }

    fn resolve_at<'b>(
        &'b self,
        node: &'b ConfigNode,
        path: NodePath,
    ) -> BoxFuture<'b, Result<ConfigNode, ResolveError>> {
        async move {
            match recognize(node) {
                Ok(Some(reference)) => return self.substitute(&reference, path).await,
                Ok(None) => {}
                Err(e) => return Err(ResolveError::malformed(path, e)),
            }

            match node {
                ConfigNode::List(items) => {
                    let resolved = try_join_all(
                        items
                            .iter()
                            .enumerate()
                            .map(|(i, item)| self.resolve_at(item, path.index(i))),
                    )
                    .await?;
                    Ok(ConfigNode::List(resolved))
                }
                ConfigNode::Tuple(items) => {
                    let resolved = try_join_all(
                        items
                            .iter()
                            .enumerate()
                            .map(|(i, item)| self.resolve_at(item, path.component(i))),
                    )
                    .await?;
                    Ok(ConfigNode::Tuple(resolved))
                }
                ConfigNode::Map(entries) => {
                    let resolved = try_join_all(entries.iter().map(|(k, v)| {
                        let child = self.resolve_at(v, path.key(&k.key_text()));
                        async move { Ok::<_, ResolveError>((k.clone(), child.await?)) }
                    }))
                    .await?;
                    Ok(ConfigNode::Map(resolved))
                }
                scalar => Ok(scalar.clone()),
            }
        }
        .boxed()
    }

    async fn substitute(
        &self,
        reference: &SecretReference,
        path: NodePath,
    ) -> Result<ConfigNode, ResolveError> {
        let key = reference.fetch_key();
        let value = self
            .context
            .fetch(self.fetcher, &key)
            .await
            .map_err(|e| ResolveError::fetch(path.clone(), e))?;

        let text = value.expose_str().map_err(|e| {
            ResolveError::cast(
                path.clone(),
                key.clone(),
                CastError {
                    payload: format!("<{} bytes>", value.len()),
                    target: reference.type_tag,
                    reason: format!("payload is not valid UTF-8: {e}"),
                },
            )
        })?;
        let resolved = cast(text, reference.type_tag)
            .map_err(|e| ResolveError::cast(path.clone(), key.clone(), e))?;

        self.references.fetch_add(1, Ordering::SeqCst);
        Ok(resolved)
    }
}

/// Resolve one tree against an existing context.
pub async fn resolve<F>(
    node: &ConfigNode,
    fetcher: &F,
    context: &ResolutionContext<'_>,
) -> Result<ConfigNode, ResolveError>
where
    F: SecretFetcher + ?Sized,
{
    Walker::new(fetcher, context).resolve(node).await
}
