// Project data assembly.
// Fans language lookups out over every repository and folds in the share computation.

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::error::{Result, ShowcaseError};
use crate::github::{GitHubClient, ProjectRecord, Repository};

use super::languages::compute_shares;

/// Build a [`ProjectRecord`] for every repository.
///
/// Lookups run concurrently, bounded by `concurrency`, and the output keeps
/// the input order. Whichever lookup fails first, in completion order, fails
/// the whole batch and aborts the lookups still pending. Dropping the returned
/// future aborts them too. An empty credential is rejected before any
/// request is made.
pub async fn assemble(
    client: &GitHubClient,
    repositories: Vec<Repository>,
    credential: &str,
    concurrency: usize,
) -> Result<Vec<ProjectRecord>> {
    if credential.trim().is_empty() {
        return Err(ShowcaseError::CredentialRequired);
    }

    if repositories.is_empty() {
        return Ok(Vec::new());
    }

    let concurrency = std::cmp::max(1, std::cmp::min(concurrency, repositories.len()));
    let semaphore = Arc::new(Semaphore::new(concurrency));
    let credential: Arc<str> = Arc::from(credential);

    tracing::debug!(
        repositories = repositories.len(),
        concurrency,
        "fetching repository languages"
    );

    let total = repositories.len();
    let mut join_set = JoinSet::new();

    for (index, repository) in repositories.into_iter().enumerate() {
        let client = client.clone();
        let semaphore = Arc::clone(&semaphore);
        let credential = Arc::clone(&credential);

        join_set.spawn(async move {
            let record = lookup_languages(client, semaphore, credential, repository).await;
            (index, record)
        });
    }

    let mut slots: Vec<Option<ProjectRecord>> = (0..total).map(|_| None).collect();

    while let Some(joined) = join_set.join_next().await {
        let error = match joined {
            Ok((index, Ok(record))) => {
                slots[index] = Some(record);
                continue;
            }
            Ok((_, Err(e))) => e,
            Err(e) => ShowcaseError::Other(format!("language lookup task failed: {}", e)),
        };

        join_set.abort_all();
        tracing::warn!(error = %error, "language lookup failed, discarding batch");
        return Err(error);
    }

    slots
        .into_iter()
        .map(|slot| {
            slot.ok_or_else(|| ShowcaseError::Other("language lookup result missing".to_string()))
        })
        .collect()
}

async fn lookup_languages(
    client: GitHubClient,
    semaphore: Arc<Semaphore>,
    credential: Arc<str>,
    repository: Repository,
) -> Result<ProjectRecord> {
    let _permit = semaphore
        .acquire()
        .await
        .map_err(|_| ShowcaseError::Other("Semaphore closed unexpectedly".to_string()))?;

    let languages = client
        .fetch_languages(&repository.languages_url, &credential)
        .await?;

    Ok(ProjectRecord {
        languages: compute_shares(&languages),
        repository,
    })
}
