use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::future::join_all;

use crate::clients::gemini::GeminiClient;

/// One image-generation unit: the prompts of a single entity or place card.
/// `index` is the caller's position for the owning record; results are
/// paired by this index, never by arrival order.
#[derive(Debug, Clone)]
pub struct ImageJob {
    pub index: usize,
    pub prompts: Vec<String>,
    pub base_name: String,
}

/// The two enrichment policies. They are distinct, intentional behaviors:
/// the throttled variant exists to respect an upstream rate limit and caps
/// the total number of jobs across the whole batch.
#[derive(Debug, Clone)]
pub enum EnrichmentStrategy {
    Parallel,
    Throttled { max_total: usize, delay: Duration },
}

/// Run the jobs under the selected strategy and return generated file
/// paths keyed by job index. Jobs that produced nothing are absent.
pub async fn generate_image_sets(
    client: &GeminiClient,
    output_dir: &Path,
    strategy: EnrichmentStrategy,
    jobs: Vec<ImageJob>,
) -> HashMap<usize, Vec<PathBuf>> {
    match strategy {
        EnrichmentStrategy::Parallel => {
            let calls = jobs.iter().map(|job| async move {
                let files = client
                    .generate_image_files(&job.prompts, output_dir, &job.base_name)
                    .await;
                (job.index, files)
            });
            join_all(calls).await.into_iter().collect()
        }
        EnrichmentStrategy::Throttled { max_total, delay } => {
            let mut results = HashMap::new();
            log::info!(
                "processing {} image tasks sequentially (throttled)",
                jobs.len().min(max_total)
            );
            for (position, job) in jobs.into_iter().take(max_total).enumerate() {
                if position > 0 {
                    tokio::time::sleep(delay).await;
                }
                let files = client
                    .generate_image_files(&job.prompts, output_dir, &job.base_name)
                    .await;
                results.insert(job.index, files);
            }
            results
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Network-free cases: an empty job list must be a no-op under both
    // strategies, which is what makes enrichment idempotent when no
    // prompts are present.

    #[tokio::test]
    async fn test_parallel_with_no_jobs_is_noop() {
        let client = GeminiClient::with_api_key("test-key");
        let dir = tempfile::tempdir().unwrap();
        let results = generate_image_sets(
            &client,
            dir.path(),
            EnrichmentStrategy::Parallel,
            Vec::new(),
        )
        .await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_throttled_with_no_jobs_is_noop() {
        let client = GeminiClient::with_api_key("test-key");
        let dir = tempfile::tempdir().unwrap();
        let strategy = EnrichmentStrategy::Throttled {
            max_total: 3,
            delay: Duration::from_secs(5),
        };
        let results = generate_image_sets(&client, dir.path(), strategy, Vec::new()).await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_throttled_truncates_to_cap() {
        // Jobs beyond the cap must not run at all. With an unroutable
        // client every job that does run fails fast and reports an empty
        // file list, so the result keys show exactly which jobs ran.
        let client =
            GeminiClient::with_api_key("test-key").with_base_url("http://127.0.0.1:1/v1beta");
        let dir = tempfile::tempdir().unwrap();
        let jobs: Vec<ImageJob> = (0..5)
            .map(|index| ImageJob {
                index,
                prompts: vec!["a fort at dusk".to_string()],
                base_name: format!("entity-{}", index),
            })
            .collect();
        let strategy = EnrichmentStrategy::Throttled {
            max_total: 3,
            delay: Duration::from_millis(1),
        };

        let results = generate_image_sets(&client, dir.path(), strategy, jobs).await;
        assert_eq!(results.len(), 3);
        assert!(results.contains_key(&0));
        assert!(results.contains_key(&2));
        assert!(!results.contains_key(&3));
        assert!(results.values().all(|files| files.is_empty()));
    }

    #[tokio::test]
    async fn test_parallel_failures_stay_isolated_per_job() {
        let client =
            GeminiClient::with_api_key("test-key").with_base_url("http://127.0.0.1:1/v1beta");
        let dir = tempfile::tempdir().unwrap();
        let jobs: Vec<ImageJob> = (0..4)
            .map(|index| ImageJob {
                index,
                prompts: vec!["a palace courtyard".to_string()],
                base_name: format!("place-{}", index),
            })
            .collect();

        let results =
            generate_image_sets(&client, dir.path(), EnrichmentStrategy::Parallel, jobs).await;
        // Every job reports its own (empty) result; no failure swallows a sibling.
        assert_eq!(results.len(), 4);
        assert!(results.values().all(|files| files.is_empty()));
    }
}
