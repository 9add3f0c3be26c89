//! Content fetching for selected files

use crate::types::{FetchReport, SkippedFile};
use devglossary_domain::{FileDescriptor, RepoId, RepositoryProvider};
use tracing::{info, warn};

/// Fetch the content of each selected path, one at a time
///
/// A failed fetch is logged and the file is left out; it never aborts the
/// run and is not retried.
pub async fn fetch_contents<R>(provider: &R, repo: &RepoId, paths: &[String]) -> FetchReport
where
    R: RepositoryProvider + ?Sized,
{
    let mut report = FetchReport::default();

    for path in paths {
        match provider.file_content(repo, path).await {
            Ok(content) => report.files.push(FileDescriptor::new(path.clone(), content)),
            Err(e) => {
                warn!("Failed to fetch content for {}: {}", path, e);
                report.skipped.push(SkippedFile {
                    path: path.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        "Fetched {} files from {} ({} skipped)",
        report.files.len(),
        repo,
        report.skipped.len()
    );
    report
}
