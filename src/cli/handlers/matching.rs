//! Match query and pair-verification handlers

use crate::cli::output::print_candidates;
use crate::cli::output::print_info;
use crate::cli::output::print_success;
use crate::matching::MatchPipeline;
use crate::AppConfig;
use crate::Result;

pub async fn handle_match(
    config: &AppConfig,
    input: &str,
    is_file: bool,
    verify: bool,
) -> Result<()> {
    let pipeline = MatchPipeline::from_config(config).await?;
    pipeline.database().verify_schema_or_error().await?;

    print_info(&format!("Matching {input} against the catalog..."));
    let mut candidates = if is_file {
        let bytes = pipeline.fetcher().read_file(input).await?;
        pipeline.identify(&bytes).await?
    } else {
        pipeline.identify_url(input).await?
    };

    // Verification needs a fetchable query URL for the SIFT service;
    // local files can't be verified.
    if verify && !is_file {
        print_info(&format!(
            "Verifying top {} candidates...",
            config.verify_top()
        ));
        candidates = pipeline.verify_candidates(input, candidates).await;
    }

    print_candidates(&candidates);
    Ok(())
}

pub async fn handle_verify(config: &AppConfig, url_a: &str, url_b: &str) -> Result<()> {
    let sift = crate::verification::SiftClient::from_config(config)?;

    print_info("Running geometric verification...");
    let result = sift.verify_pair(url_a, url_b).await?;

    print_success(&format!(
        "Inliers: {} | inlier ratio: {:.3}",
        result.inliers, result.inlier_ratio
    ));
    Ok(())
}
