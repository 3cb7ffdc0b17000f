//! Discovery driving loop
//!
//! The frontier expands one page per call; this module decides which pages
//! get expanded. It walks breadth-first from the seed, passing each depth
//! level's navigation candidates through a selection policy before feeding
//! them back at `depth + 1`. Mechanical expansion and link-selection policy
//! stay decoupled: swap the policy to direct the walk interactively or from
//! an external selector.

use crate::crawler::extractor::LinkExtractor;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::frontier::{CrawlFrontier, CrawlOutcome};
use crate::state::{DiscoveredLink, DiscoveryState};
use crate::storage::save_discovery_state;
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Chooses which navigation candidates from one depth level to expand
pub trait SelectionPolicy {
    fn select(&self, candidates: &[DiscoveredLink]) -> Vec<DiscoveredLink>;
}

/// Default policy: expand every candidate, bounded by a per-level cap
///
/// The cap keeps a link-dense level from exploding the walk; anything
/// beyond it stays recorded in `nav_links` and re-enters on a resumed run.
pub struct FanOutPolicy {
    pub cap: usize,
}

impl SelectionPolicy for FanOutPolicy {
    fn select(&self, candidates: &[DiscoveredLink]) -> Vec<DiscoveredLink> {
        candidates.iter().take(self.cap).cloned().collect()
    }
}

/// Result of one discovery session
#[derive(Debug)]
pub struct DiscoveryRun {
    pub state: DiscoveryState,

    /// Pages actually fetched (or attempted) this session
    pub pages_crawled: usize,

    /// Outcome of the seed page's crawl; `None` when the walk was
    /// interrupted before reaching it
    pub seed_outcome: Option<CrawlOutcome>,

    /// True when the walk stopped on a cancel signal
    pub interrupted: bool,
}

/// Runs a breadth-first discovery walk from the state's seed URL
///
/// State is checkpointed to `state_path` after every page that did work, so
/// an interrupt (the cancel flag is checked between pages) never loses more
/// than the in-flight page. On a resumed state, visited pages are skipped
/// by the frontier and recorded-but-unexpanded nav links re-enter the walk
/// at `depth + 1` of where they were found.
pub async fn run_discovery<F, E, P>(
    frontier: &CrawlFrontier<F, E>,
    policy: &P,
    mut state: DiscoveryState,
    state_path: &Path,
    cancel: Arc<AtomicBool>,
) -> crate::Result<DiscoveryRun>
where
    F: PageFetcher,
    E: LinkExtractor,
    P: SelectionPolicy,
{
    let seed = state.seed_url.clone();
    let max_depth = state.max_depth;

    // Per-depth work batches. The seed enters at depth 0; on resume,
    // unvisited recorded nav links re-enter where the walk left off.
    let mut batches: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    batches.entry(0).or_default().push(seed.clone());
    for link in &state.nav_links {
        let next_depth = link.depth + 1;
        if next_depth <= max_depth && !state.is_visited(&link.url) {
            batches.entry(next_depth).or_default().push(link.url.clone());
        }
    }

    let mut pages_crawled = 0;
    let mut seed_outcome = None;
    let mut interrupted = false;

    'walk: for depth in 0..=max_depth {
        let batch = batches.remove(&depth).unwrap_or_default();

        let mut seen = HashSet::new();
        let batch: Vec<String> = batch
            .into_iter()
            .filter(|url| seen.insert(url.clone()))
            .collect();

        if !batch.is_empty() {
            tracing::debug!("Depth {}: {} page(s) queued", depth, batch.len());
        }

        let mut level_candidates: Vec<DiscoveredLink> = Vec::new();

        for url in batch {
            if cancel.load(Ordering::Relaxed) {
                tracing::info!("Interrupt observed; stopping after {} page(s)", pages_crawled);
                interrupted = true;
                break 'walk;
            }

            let outcome = frontier.crawl_page(&mut state, &url, depth).await;

            if !matches!(outcome, CrawlOutcome::Skipped(_)) {
                pages_crawled += 1;
                save_discovery_state(&mut state, state_path)?;
            }

            if url == seed && seed_outcome.is_none() {
                seed_outcome = Some(outcome.clone());
            }

            if let CrawlOutcome::Success(summary) = outcome {
                level_candidates.extend(summary.candidates);
            }
        }

        if depth < max_depth && !level_candidates.is_empty() {
            // One selection per level, over deduplicated unvisited candidates
            let mut seen = HashSet::new();
            let candidates: Vec<DiscoveredLink> = level_candidates
                .into_iter()
                .filter(|link| !state.is_visited(&link.url))
                .filter(|link| seen.insert(link.url.clone()))
                .collect();

            let selected = policy.select(&candidates);
            if selected.len() < candidates.len() {
                tracing::info!(
                    "Selected {} of {} candidate(s) at depth {}",
                    selected.len(),
                    candidates.len(),
                    depth + 1
                );
            }

            let entry = batches.entry(depth + 1).or_default();
            entry.extend(selected.into_iter().map(|link| link.url));
        }
    }

    save_discovery_state(&mut state, state_path)?;

    tracing::info!(
        "Discovery session done: {} page(s) crawled, {} document(s), {} nav link(s) known",
        pages_crawled,
        state.documents.len(),
        state.nav_links.len()
    );

    Ok(DiscoveryRun {
        state,
        pages_crawled,
        seed_outcome,
        interrupted,
    })
}
